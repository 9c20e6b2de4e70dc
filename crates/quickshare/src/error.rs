//! Error types for quickshare.
//!
//! This module defines all error types used throughout the quickshare crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for quickshare operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Vault Errors ===
    /// Failed to open or create the vault database.
    #[error("failed to open vault at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// Clearing the vault did not complete.
    ///
    /// Deliberately carries no detail: clears are non-atomic and a partial
    /// clear is reported the same as a total failure.
    #[error("failed to clear vault")]
    VaultClear,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Payload Errors ===
    /// A scanned payload was not well-formed JSON.
    #[error("malformed payload: {message}")]
    PayloadMalformed {
        /// Description of the parse failure.
        message: String,
    },

    /// A required contact field is missing or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A contact field has an invalid value.
    #[error("invalid field '{field}': {message}")]
    InvalidField {
        /// Name of the invalid field.
        field: &'static str,
        /// Description of what is wrong with the value.
        message: String,
    },

    // === Flow Errors ===
    /// No contact information has been saved yet.
    #[error("no contact information saved")]
    ContactMissing,

    /// A passcode string is not exactly four digits.
    #[error("invalid passcode: {message}")]
    PasscodeInvalid {
        /// Description of the problem.
        message: String,
    },

    /// An event was applied to a screen with no matching transition.
    #[error("no transition from screen '{screen}' on event '{event}'")]
    FlowTransition {
        /// The screen the flow was on.
        screen: String,
        /// The event that was applied.
        event: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for quickshare operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new malformed payload error.
    #[must_use]
    pub fn payload_malformed(message: impl Into<String>) -> Self {
        Self::PayloadMalformed {
            message: message.into(),
        }
    }

    /// Create a new missing field error.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create a new invalid field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Create a new invalid passcode error.
    #[must_use]
    pub fn passcode_invalid(message: impl Into<String>) -> Self {
        Self::PasscodeInvalid {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means a scanned payload was not valid JSON.
    #[must_use]
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, Self::PayloadMalformed { .. })
    }

    /// Check if this error means a required contact field was absent or empty.
    #[must_use]
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    /// Check if this error is recoverable by re-scanning a payload.
    ///
    /// The receive flow offers a retry for these rather than aborting.
    #[must_use]
    pub fn is_recoverable_decode(&self) -> bool {
        matches!(
            self,
            Self::PayloadMalformed { .. } | Self::MissingField { .. } | Self::InvalidField { .. }
        )
    }
}
