//! `quickshare` - Local-first contact card sharing over QR payloads
//!
//! This library provides the core functionality for storing a professional
//! contact card in a local vault, gating access behind an optional 4-digit
//! passcode, and encoding/decoding the JSON payload a QR code carries.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod flow;
pub mod logging;
pub mod passcode;
pub mod settings;
pub mod vault;

pub use config::Config;
pub use contact::ContactRecord;
pub use error::{Error, Result};
pub use flow::{FlowController, Screen};
pub use logging::init_logging;
pub use settings::AppSettings;
pub use vault::{Vault, VaultStatus};
