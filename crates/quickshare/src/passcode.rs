//! Passcode entry and the set-passcode sub-flow.
//!
//! Passcodes are 4-character numeric strings compared by exact string
//! equality. There is no hashing, no timing-safe comparison, and no attempt
//! limit; the passcode is a casual-access gate for a personal device, not a
//! cryptographic boundary (see DESIGN.md).

use crate::error::{Error, Result};

/// Required passcode length in digits.
pub const PASSCODE_LEN: usize = 4;

/// Check whether a string is a well-formed passcode: exactly four ASCII
/// digits.
#[must_use]
pub fn is_well_formed(value: &str) -> bool {
    value.len() == PASSCODE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a passcode string, with a descriptive error on failure.
///
/// # Errors
///
/// Returns [`Error::PasscodeInvalid`] if the string is not exactly four
/// ASCII digits.
pub fn check_well_formed(value: &str) -> Result<()> {
    if is_well_formed(value) {
        Ok(())
    } else {
        Err(Error::passcode_invalid(format!(
            "must be exactly {PASSCODE_LEN} digits"
        )))
    }
}

/// A digit-at-a-time passcode input buffer.
///
/// Accepts up to exactly four digits; further input is ignored until a
/// delete or clear. Non-digit characters are ignored outright.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasscodeEntry {
    digits: String,
}

impl PasscodeEntry {
    /// Create an empty entry buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a single digit. Returns `true` if the digit was accepted.
    pub fn push_digit(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.digits.len() >= PASSCODE_LEN {
            return false;
        }
        self.digits.push(c);
        true
    }

    /// Remove the last digit, if any.
    pub fn delete(&mut self) {
        self.digits.pop();
    }

    /// Clear all accumulated digits.
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Number of digits entered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether no digits have been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Whether all four digits have been entered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.digits.len() == PASSCODE_LEN
    }

    /// The digits entered so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

/// Outcome of advancing the set-passcode sub-flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetPasscodeOutcome {
    /// The current phase does not have four digits yet.
    NeedMoreDigits,

    /// The first entry is complete; the flow now awaits confirmation.
    AwaitingConfirmation,

    /// The confirmation did not match; both buffers were reset and the flow
    /// restarted at the entry phase.
    Mismatch,

    /// Both entries matched. The contained passcode should be persisted.
    Confirmed(String),
}

/// The two-phase set-passcode sub-flow: entry, then confirmation.
///
/// Nothing is persisted by this type; the caller stores the passcode only
/// when [`advance`] returns [`SetPasscodeOutcome::Confirmed`].
///
/// [`advance`]: SetPasscodeFlow::advance
#[derive(Debug, Clone, Default)]
pub struct SetPasscodeFlow {
    entry: PasscodeEntry,
    confirmation: PasscodeEntry,
    confirming: bool,
}

impl SetPasscodeFlow {
    /// Create a fresh sub-flow at the entry phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flow is in the confirmation phase.
    #[must_use]
    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// The buffer for the current phase.
    fn current_mut(&mut self) -> &mut PasscodeEntry {
        if self.confirming {
            &mut self.confirmation
        } else {
            &mut self.entry
        }
    }

    /// The buffer for the current phase.
    #[must_use]
    pub fn current(&self) -> &PasscodeEntry {
        if self.confirming {
            &self.confirmation
        } else {
            &self.entry
        }
    }

    /// Push a digit into the current phase's buffer.
    pub fn push_digit(&mut self, c: char) -> bool {
        self.current_mut().push_digit(c)
    }

    /// Remove the last digit from the current phase's buffer.
    pub fn delete(&mut self) {
        self.current_mut().delete();
    }

    /// Advance the flow after the user confirms the current phase.
    pub fn advance(&mut self) -> SetPasscodeOutcome {
        if !self.current().is_complete() {
            return SetPasscodeOutcome::NeedMoreDigits;
        }

        if !self.confirming {
            self.confirming = true;
            return SetPasscodeOutcome::AwaitingConfirmation;
        }

        if self.entry == self.confirmation {
            SetPasscodeOutcome::Confirmed(self.entry.as_str().to_string())
        } else {
            self.entry.clear();
            self.confirmation.clear();
            self.confirming = false;
            SetPasscodeOutcome::Mismatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("1234"));
        assert!(is_well_formed("0000"));
        assert!(!is_well_formed("123"));
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("12a4"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("١٢٣٤")); // non-ASCII digits
    }

    #[test]
    fn test_check_well_formed() {
        assert!(check_well_formed("1234").is_ok());
        let err = check_well_formed("12").unwrap_err();
        assert!(err.to_string().contains("4 digits"));
    }

    #[test]
    fn test_entry_push_and_complete() {
        let mut entry = PasscodeEntry::new();
        assert!(entry.is_empty());

        for c in ['1', '2', '3'] {
            assert!(entry.push_digit(c));
        }
        assert!(!entry.is_complete());
        assert!(entry.push_digit('4'));
        assert!(entry.is_complete());
        assert_eq!(entry.as_str(), "1234");
    }

    #[test]
    fn test_entry_ignores_input_past_four() {
        let mut entry = PasscodeEntry::new();
        for c in "12345678".chars() {
            entry.push_digit(c);
        }
        assert_eq!(entry.as_str(), "1234");
        assert!(!entry.push_digit('9'));
    }

    #[test]
    fn test_entry_ignores_non_digits() {
        let mut entry = PasscodeEntry::new();
        assert!(!entry.push_digit('a'));
        assert!(!entry.push_digit(' '));
        assert!(entry.is_empty());
    }

    #[test]
    fn test_entry_delete() {
        let mut entry = PasscodeEntry::new();
        entry.push_digit('1');
        entry.push_digit('2');
        entry.delete();
        assert_eq!(entry.as_str(), "1");

        entry.delete();
        entry.delete(); // delete on empty is a no-op
        assert!(entry.is_empty());
    }

    #[test]
    fn test_set_flow_match_confirms() {
        let mut flow = SetPasscodeFlow::new();

        for c in "1111".chars() {
            flow.push_digit(c);
        }
        assert_eq!(flow.advance(), SetPasscodeOutcome::AwaitingConfirmation);
        assert!(flow.is_confirming());

        for c in "1111".chars() {
            flow.push_digit(c);
        }
        assert_eq!(
            flow.advance(),
            SetPasscodeOutcome::Confirmed("1111".to_string())
        );
    }

    #[test]
    fn test_set_flow_mismatch_resets_both_buffers() {
        let mut flow = SetPasscodeFlow::new();

        for c in "1111".chars() {
            flow.push_digit(c);
        }
        flow.advance();
        for c in "2222".chars() {
            flow.push_digit(c);
        }

        assert_eq!(flow.advance(), SetPasscodeOutcome::Mismatch);
        assert!(!flow.is_confirming());
        assert!(flow.current().is_empty());

        // The flow restarts at the entry phase and can succeed afterwards
        for c in "9876".chars() {
            flow.push_digit(c);
        }
        assert_eq!(flow.advance(), SetPasscodeOutcome::AwaitingConfirmation);
        for c in "9876".chars() {
            flow.push_digit(c);
        }
        assert_eq!(
            flow.advance(),
            SetPasscodeOutcome::Confirmed("9876".to_string())
        );
    }

    #[test]
    fn test_set_flow_advance_needs_four_digits() {
        let mut flow = SetPasscodeFlow::new();
        flow.push_digit('1');
        assert_eq!(flow.advance(), SetPasscodeOutcome::NeedMoreDigits);
        assert!(!flow.is_confirming());
    }

    #[test]
    fn test_set_flow_delete_affects_current_phase() {
        let mut flow = SetPasscodeFlow::new();
        for c in "1111".chars() {
            flow.push_digit(c);
        }
        flow.advance();

        flow.push_digit('2');
        flow.delete();
        assert!(flow.current().is_empty());
        // Entry phase buffer is untouched
        assert!(!flow.is_confirming() || flow.current().is_empty());
    }
}
