//! The screen flow controller.
//!
//! This module drives the app's screen sequencing over the transition table
//! in [`transitions`]: setup, the set-passcode sub-flow, the lock gate, and
//! the share/scan sub-flows. The controller borrows the vault rather than
//! owning global state; every screen's reads and writes go through that one
//! narrow interface.

pub mod transitions;

use tracing::{debug, info, warn};

pub use transitions::{initial_screen, transition, FlowEvent, Screen};

use crate::contact::ContactRecord;
use crate::error::{Error, Result};
use crate::passcode::{PasscodeEntry, SetPasscodeFlow, SetPasscodeOutcome};
use crate::settings::AppSettings;
use crate::vault::Vault;

/// Progress of the lock-screen passcode gate after a digit of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockProgress {
    /// Fewer than four digits entered; the count so far is included.
    Pending(usize),

    /// Four digits were entered and did not match. The input buffer has
    /// been cleared; the user may retry without limit.
    Rejected,

    /// Four digits were entered and matched; the flow moved to home.
    Unlocked,
}

/// Drives the screen flow against a vault.
#[derive(Debug)]
pub struct FlowController<'a> {
    vault: &'a Vault,
    screen: Screen,
    lock_entry: PasscodeEntry,
    set_flow: SetPasscodeFlow,
    received: Option<ContactRecord>,
}

impl<'a> FlowController<'a> {
    /// Start the flow, deciding the initial screen from stored settings.
    ///
    /// A settings load failure is treated the same as absent settings and
    /// routes to setup.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible to match the other
    /// vault-touching operations.
    pub fn start(vault: &'a Vault) -> Result<Self> {
        let settings = match vault.load_settings() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings, routing to setup: {e}");
                None
            }
        };

        let screen = initial_screen(settings.as_ref());
        info!("Starting flow at screen '{screen}'");

        Ok(Self {
            vault,
            screen,
            lock_entry: PasscodeEntry::new(),
            set_flow: SetPasscodeFlow::new(),
            received: None,
        })
    }

    /// The screen the flow is currently on.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The decoded contact shown by the result screen, if any.
    #[must_use]
    pub fn received(&self) -> Option<&ContactRecord> {
        self.received.as_ref()
    }

    /// Apply an event through the transition table.
    fn apply(&mut self, event: FlowEvent) -> Result<Screen> {
        let Some(next) = transition(self.screen, event) else {
            return Err(Error::FlowTransition {
                screen: self.screen.to_string(),
                event: event.to_string(),
            });
        };
        debug!("Screen transition {} -> {next} on {event}", self.screen);
        self.screen = next;
        Ok(next)
    }

    /// Guard an input method that only applies to one screen.
    fn ensure_screen(&self, expected: Screen, action: &str) -> Result<()> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(Error::FlowTransition {
                screen: self.screen.to_string(),
                event: action.to_string(),
            })
        }
    }

    // === Setup ===

    /// Complete setup with or without passcode protection.
    ///
    /// Writes both settings flags together, then moves to the set-passcode
    /// screen (opted in) or straight to home (opted out, bypassing the lock
    /// screen).
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the setup screen or the settings write
    /// fails; on a failed write the flow stays on setup.
    pub fn choose_protection(&mut self, protect: bool) -> Result<Screen> {
        let event = if protect {
            FlowEvent::ProtectionEnabled
        } else {
            FlowEvent::ProtectionSkipped
        };
        self.ensure_screen(Screen::Setup, "choose-protection")?;

        self.vault
            .save_settings(&AppSettings::completed_setup(protect))?;
        self.apply(event)
    }

    // === Set-passcode sub-flow ===

    /// Push a digit into the current set-passcode phase.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the set-passcode screen.
    pub fn set_passcode_digit(&mut self, c: char) -> Result<bool> {
        self.ensure_screen(Screen::SetPasscode, "set-passcode-digit")?;
        Ok(self.set_flow.push_digit(c))
    }

    /// Delete the last digit from the current set-passcode phase.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the set-passcode screen.
    pub fn set_passcode_delete(&mut self) -> Result<()> {
        self.ensure_screen(Screen::SetPasscode, "set-passcode-delete")?;
        self.set_flow.delete();
        Ok(())
    }

    /// Advance the set-passcode sub-flow (the "continue"/"confirm" action).
    ///
    /// On [`SetPasscodeOutcome::Confirmed`] the passcode is persisted and
    /// the flow moves to home. On a failed persist the sub-flow stays where
    /// it is so the user can retry.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the set-passcode screen or the passcode
    /// write fails.
    pub fn set_passcode_advance(&mut self) -> Result<SetPasscodeOutcome> {
        self.ensure_screen(Screen::SetPasscode, "set-passcode-advance")?;

        let outcome = self.set_flow.advance();
        if let SetPasscodeOutcome::Confirmed(code) = &outcome {
            self.vault.save_passcode(code)?;
            self.apply(FlowEvent::PasscodeConfirmed)?;
        }
        Ok(outcome)
    }

    // === Lock gate ===

    /// Feed one digit into the lock-screen passcode gate.
    ///
    /// Once four digits accumulate, the comparison against the stored
    /// passcode runs automatically: a match unlocks and moves to home, a
    /// mismatch clears the buffer and stays locked. There is no attempt
    /// limit or lockout.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the lock screen or the vault read fails.
    pub fn unlock_digit(&mut self, c: char) -> Result<UnlockProgress> {
        self.ensure_screen(Screen::Lock, "unlock-digit")?;

        self.lock_entry.push_digit(c);
        if !self.lock_entry.is_complete() {
            return Ok(UnlockProgress::Pending(self.lock_entry.len()));
        }

        if self.vault.verify_passcode(self.lock_entry.as_str())? {
            self.lock_entry.clear();
            self.apply(FlowEvent::Unlocked)?;
            Ok(UnlockProgress::Unlocked)
        } else {
            debug!("Passcode mismatch, clearing input");
            self.lock_entry.clear();
            Ok(UnlockProgress::Rejected)
        }
    }

    /// Delete the last digit from the lock-screen input.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the lock screen.
    pub fn unlock_delete(&mut self) -> Result<()> {
        self.ensure_screen(Screen::Lock, "unlock-delete")?;
        self.lock_entry.delete();
        Ok(())
    }

    // === Share / scan sub-flows ===

    /// Encode the saved contact into the payload a QR image would embed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContactMissing`] if no contact has been saved.
    pub fn share_payload(&self) -> Result<String> {
        let record = self.vault.load_contact()?.ok_or(Error::ContactMissing)?;
        record.encode_payload()
    }

    /// Move from home to the QR screen, returning the payload to display.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on home or no contact has been saved; the
    /// flow does not move on failure.
    pub fn open_qr(&mut self) -> Result<String> {
        self.ensure_screen(Screen::Home, "open-qr")?;
        let payload = self.share_payload()?;
        self.apply(FlowEvent::OpenQr)?;
        Ok(payload)
    }

    /// Move from home to the scan screen.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on home.
    pub fn open_scan(&mut self) -> Result<Screen> {
        self.apply(FlowEvent::OpenScan)
    }

    /// Decode a scanned payload and move to the result screen.
    ///
    /// Decode failures are recoverable: the flow stays on the scan screen
    /// and the caller should offer a retry.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the scan screen, or with a payload error
    /// ([`Error::PayloadMalformed`], [`Error::MissingField`],
    /// [`Error::InvalidField`]) if the string does not decode.
    pub fn receive_payload(&mut self, payload: &str) -> Result<ContactRecord> {
        self.ensure_screen(Screen::Scan, "receive-payload")?;

        let record = ContactRecord::decode_payload(payload)?;
        self.received = Some(record.clone());
        self.apply(FlowEvent::PayloadDecoded)?;
        Ok(record)
    }

    /// Move from the result screen back to scanning.
    ///
    /// # Errors
    ///
    /// Fails if the flow is not on the result screen.
    pub fn scan_again(&mut self) -> Result<Screen> {
        let next = self.apply(FlowEvent::ScanAgain)?;
        self.received = None;
        Ok(next)
    }

    /// Return to home from the QR or result screen.
    ///
    /// # Errors
    ///
    /// Fails if the current screen has no way back home.
    pub fn return_home(&mut self) -> Result<Screen> {
        let next = self.apply(FlowEvent::ReturnHome)?;
        self.received = None;
        Ok(next)
    }
}
