//! Application settings persisted alongside the contact record.

use serde::{Deserialize, Serialize};

/// Persistent application settings.
///
/// Both flags are always written together, never independently: the only
/// write happens when setup completes, which clears `is_first_launch` for
/// good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Whether the app is protected by a 4-digit passcode.
    pub has_passcode: bool,

    /// Whether setup has never been completed on this device.
    pub is_first_launch: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            has_passcode: false,
            is_first_launch: true,
        }
    }
}

impl AppSettings {
    /// Settings as written when the user completes setup.
    #[must_use]
    pub fn completed_setup(has_passcode: bool) -> Self {
        Self {
            has_passcode,
            is_first_launch: false,
        }
    }
}
