//! Command-line interface for quickshare.
//!
//! This module provides the CLI structure and command handlers for the
//! `qshare` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CardCommand, CardSetCommand, ConfigCommand, ReceiveCommand, ResetCommand, SetupCommand,
    ShareCommand, StatusCommand, UnlockCommand,
};

/// qshare - Share your professional contact card via QR payloads
///
/// Stores your contact information in a local vault, optionally protected
/// by a 4-digit passcode, and encodes it into the payload string a QR code
/// would carry. Scanned payloads are decoded and validated the same way.
#[derive(Debug, Parser)]
#[command(name = "qshare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Passcode to unlock the vault when protection is enabled
    #[arg(short, long, global = true, value_name = "CODE")]
    pub passcode: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show vault status and where the app would start
    Status(StatusCommand),

    /// Run first-launch setup
    Setup(SetupCommand),

    /// Manage your contact card
    #[command(subcommand)]
    Card(CardCommand),

    /// Print the QR payload for your saved contact card
    Share(ShareCommand),

    /// Decode a scanned payload into a contact card
    Receive(ReceiveCommand),

    /// Try a passcode against the lock screen
    Unlock(UnlockCommand),

    /// Delete all stored data
    Reset(ResetCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "qshare");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            passcode: None,
            verbose: 0,
            quiet: true,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli {
            config: None,
            passcode: None,
            verbose: 0,
            quiet: false,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose_and_trace() {
        let mut cli = Cli {
            config: None,
            passcode: None,
            verbose: 1,
            quiet: false,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
        cli.verbose = 2;
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_status() {
        let args = vec!["qshare", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn test_parse_setup_with_passcode() {
        let args = vec![
            "qshare",
            "setup",
            "--passcode",
            "1234",
            "--confirm",
            "1234",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Setup(cmd) = cli.command else {
            panic!("expected setup command");
        };
        assert_eq!(cmd.passcode.as_deref(), Some("1234"));
        assert_eq!(cmd.confirm.as_deref(), Some("1234"));
        assert!(!cmd.skip_protection);
    }

    #[test]
    fn test_parse_setup_passcode_requires_confirm() {
        let args = vec!["qshare", "setup", "--passcode", "1234"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_setup_skip_conflicts_with_passcode() {
        let args = vec![
            "qshare",
            "setup",
            "--passcode",
            "1234",
            "--confirm",
            "1234",
            "--skip-protection",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_card_set() {
        let args = vec![
            "qshare",
            "card",
            "set",
            "--full-name",
            "Ada Lovelace",
            "--job-title",
            "Engineer",
            "--organization",
            "Analytical Engines",
            "--work-email",
            "ada@ae.co",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Card(CardCommand::Set(cmd)) = cli.command else {
            panic!("expected card set command");
        };
        assert_eq!(cmd.full_name, "Ada Lovelace");
        assert!(cmd.work_phone.is_none());
    }

    #[test]
    fn test_parse_receive_payload_conflicts_with_file() {
        let args = vec!["qshare", "receive", "{}", "--file", "/tmp/payload.txt"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_unlock() {
        let args = vec!["qshare", "unlock", "1234"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Unlock(cmd) = cli.command else {
            panic!("expected unlock command");
        };
        assert_eq!(cmd.passcode, "1234");
    }

    #[test]
    fn test_parse_with_config_and_global_passcode() {
        let args = vec![
            "qshare",
            "-c",
            "/custom/config.toml",
            "-p",
            "1234",
            "card",
            "show",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.passcode.as_deref(), Some("1234"));
    }
}
