//! The screen flow graph.
//!
//! Rather than letting each screen hard-code its successors, the flow graph
//! is a single transition table consumed by the controller, so the whole
//! sequencing lives in one place:
//!
//! ```text
//! Setup ──protection enabled──▶ SetPasscode ──confirmed──▶ Home
//!   └────protection skipped───────────────────────────────▶ Home
//! Lock ──unlocked──▶ Home
//! Home ──open qr──▶ Qr ──return home──▶ Home
//! Home ──open scan──▶ Scan ──decoded──▶ Result ──scan again──▶ Scan
//!                                         └─────return home──▶ Home
//! ```

use crate::settings::AppSettings;

/// A screen in the application flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// First-launch setup: opt in or out of passcode protection.
    Setup,
    /// Two-phase passcode entry and confirmation.
    SetPasscode,
    /// Passcode gate shown at startup when protection is enabled.
    Lock,
    /// The contact form, from which the sharing sub-flows branch.
    Home,
    /// Displays the encoded payload for the saved contact.
    Qr,
    /// Accepts a scanned payload string.
    Scan,
    /// Displays a decoded contact received from a scan.
    Result,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::SetPasscode => write!(f, "set-passcode"),
            Self::Lock => write!(f, "lock"),
            Self::Home => write!(f, "home"),
            Self::Qr => write!(f, "qr"),
            Self::Scan => write!(f, "scan"),
            Self::Result => write!(f, "result"),
        }
    }
}

/// An event that can move the flow between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowEvent {
    /// The user opted in to passcode protection during setup.
    ProtectionEnabled,
    /// The user opted out of passcode protection during setup.
    ProtectionSkipped,
    /// A new passcode was entered, confirmed, and persisted.
    PasscodeConfirmed,
    /// The correct passcode was entered at the lock screen.
    Unlocked,
    /// The user asked to see their own QR payload.
    OpenQr,
    /// The user started scanning.
    OpenScan,
    /// A scanned payload was decoded successfully.
    PayloadDecoded,
    /// The user wants to scan another code from the result screen.
    ScanAgain,
    /// The user navigated back to the home screen.
    ReturnHome,
}

impl std::fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProtectionEnabled => write!(f, "protection-enabled"),
            Self::ProtectionSkipped => write!(f, "protection-skipped"),
            Self::PasscodeConfirmed => write!(f, "passcode-confirmed"),
            Self::Unlocked => write!(f, "unlocked"),
            Self::OpenQr => write!(f, "open-qr"),
            Self::OpenScan => write!(f, "open-scan"),
            Self::PayloadDecoded => write!(f, "payload-decoded"),
            Self::ScanAgain => write!(f, "scan-again"),
            Self::ReturnHome => write!(f, "return-home"),
        }
    }
}

/// Look up the successor screen for a (screen, event) pair.
///
/// Returns `None` when the event does not apply to the screen.
#[must_use]
pub fn transition(screen: Screen, event: FlowEvent) -> Option<Screen> {
    use FlowEvent as E;
    use Screen as S;

    match (screen, event) {
        (S::Setup, E::ProtectionEnabled) => Some(S::SetPasscode),
        (S::Setup, E::ProtectionSkipped)
        | (S::SetPasscode, E::PasscodeConfirmed)
        | (S::Lock, E::Unlocked)
        | (S::Qr | S::Result, E::ReturnHome) => Some(S::Home),
        (S::Home, E::OpenQr) => Some(S::Qr),
        (S::Home, E::OpenScan) | (S::Result, E::ScanAgain) => Some(S::Scan),
        (S::Scan, E::PayloadDecoded) => Some(S::Result),
        _ => None,
    }
}

/// Decide the screen to show at startup.
///
/// Absent settings (including any load failure mapped to absent by the
/// caller) or a first-launch flag that is not explicitly false route to
/// setup; otherwise protection decides between the lock screen and home.
#[must_use]
pub fn initial_screen(settings: Option<&AppSettings>) -> Screen {
    match settings {
        None => Screen::Setup,
        Some(s) if s.is_first_launch => Screen::Setup,
        Some(s) if s.has_passcode => Screen::Lock,
        Some(_) => Screen::Home,
    }
}
