//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Setup command arguments.
///
/// Runs the first-launch setup: either enables passcode protection (which
/// requires entering the passcode twice, entry then confirmation) or skips
/// it.
#[derive(Debug, Args)]
pub struct SetupCommand {
    /// Enable protection with this 4-digit passcode
    #[arg(long, requires = "confirm", conflicts_with = "skip_protection")]
    pub passcode: Option<String>,

    /// Confirmation of the passcode (must match --passcode)
    #[arg(long, requires = "passcode")]
    pub confirm: Option<String>,

    /// Complete setup without passcode protection
    #[arg(long)]
    pub skip_protection: bool,
}

/// Contact card commands.
#[derive(Debug, Subcommand)]
pub enum CardCommand {
    /// Save your contact information (overwrites the whole card)
    Set(CardSetCommand),

    /// Show the saved contact information
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Arguments for saving the contact card.
#[derive(Debug, Args)]
pub struct CardSetCommand {
    /// Full name
    #[arg(long)]
    pub full_name: String,

    /// Job title
    #[arg(long)]
    pub job_title: String,

    /// Organization or company
    #[arg(long)]
    pub organization: String,

    /// Work email
    #[arg(long)]
    pub work_email: String,

    /// Work phone (optional)
    #[arg(long)]
    pub work_phone: Option<String>,

    /// LinkedIn profile URL (optional)
    #[arg(long)]
    pub linkedin_url: Option<String>,

    /// Website or portfolio URL (optional)
    #[arg(long)]
    pub website_url: Option<String>,
}

/// Share command arguments.
#[derive(Debug, Args)]
pub struct ShareCommand {
    /// Write the payload to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Receive command arguments.
#[derive(Debug, Args)]
pub struct ReceiveCommand {
    /// The scanned payload string
    #[arg(conflicts_with = "file")]
    pub payload: Option<String>,

    /// Read the payload from a file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output the decoded contact as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Unlock command arguments.
#[derive(Debug, Args)]
pub struct UnlockCommand {
    /// The 4-digit passcode to try
    pub passcode: String,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
