//! `qshare` - CLI for quickshare
//!
//! This binary provides the command-line interface for managing the local
//! contact vault and exchanging QR payloads.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::bail;
use clap::Parser;

use quickshare::cli::{
    CardCommand, CardSetCommand, Cli, Command, ConfigCommand, ReceiveCommand, SetupCommand,
    ShareCommand, UnlockCommand,
};
use quickshare::flow::{FlowController, Screen, UnlockProgress};
use quickshare::passcode::{self, SetPasscodeOutcome};
use quickshare::{init_logging, Config, ContactRecord, Vault};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Setup(setup_cmd) => handle_setup(&config, &setup_cmd),
        Command::Card(card_cmd) => handle_card(&config, cli.passcode.as_deref(), card_cmd),
        Command::Share(share_cmd) => handle_share(&config, cli.passcode.as_deref(), &share_cmd),
        Command::Receive(receive_cmd) => {
            handle_receive(&config, cli.passcode.as_deref(), &receive_cmd)
        }
        Command::Unlock(unlock_cmd) => handle_unlock(&config, &unlock_cmd),
        Command::Reset(reset_cmd) => handle_reset(&config, reset_cmd.yes),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Start the flow and bring it to the home screen, unlocking if needed.
fn open_home_flow<'a>(
    vault: &'a Vault,
    passcode: Option<&str>,
) -> anyhow::Result<FlowController<'a>> {
    let mut flow = FlowController::start(vault)?;
    match flow.screen() {
        Screen::Setup => {
            bail!("setup has not been completed yet; run `qshare setup` first")
        }
        Screen::Lock => {
            let Some(code) = passcode else {
                bail!("the vault is passcode-protected; pass --passcode <CODE>")
            };
            for c in code.chars() {
                match flow.unlock_digit(c)? {
                    UnlockProgress::Unlocked => break,
                    UnlockProgress::Rejected => bail!("incorrect passcode"),
                    UnlockProgress::Pending(_) => {}
                }
            }
            if flow.screen() != Screen::Home {
                bail!("incorrect passcode");
            }
        }
        _ => {}
    }
    Ok(flow)
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let vault = Vault::open(config.vault_path())?;
    let status = vault.status()?;
    let flow = FlowController::start(&vault)?;

    if json {
        let output = serde_json::json!({
            "vault_path": vault.path(),
            "starts_at": flow.screen().to_string(),
            "has_contact": status.has_contact,
            "has_settings": status.has_settings,
            "passcode_protected": status.has_passcode,
            "contact_updated_at": status.contact_updated_at,
            "db_size_bytes": status.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("qshare status");
        println!("-------------");
        println!("Vault:         {}", vault.path().display());
        println!("Starts at:     {}", flow.screen());
        println!("Contact card:  {}", if status.has_contact { "saved" } else { "not saved" });
        println!(
            "Protection:    {}",
            if status.has_passcode { "passcode set" } else { "off" }
        );
        if let Some(updated) = status.contact_updated_at {
            println!("Last updated:  {}", updated.to_rfc3339());
        }
    }
    Ok(())
}

fn handle_setup(config: &Config, cmd: &SetupCommand) -> anyhow::Result<()> {
    let vault = Vault::open(config.vault_path())?;
    let mut flow = FlowController::start(&vault)?;

    if flow.screen() != Screen::Setup {
        println!("Setup has already been completed.");
        return Ok(());
    }

    if cmd.skip_protection {
        flow.choose_protection(false)?;
        println!("Setup complete. Passcode protection is off.");
        return Ok(());
    }

    let (Some(code), Some(confirm)) = (&cmd.passcode, &cmd.confirm) else {
        bail!("pass --passcode <CODE> --confirm <CODE>, or --skip-protection")
    };
    passcode::check_well_formed(code)?;
    passcode::check_well_formed(confirm)?;
    if code != confirm {
        bail!("passcodes do not match; nothing was saved");
    }

    flow.choose_protection(true)?;
    for c in code.chars() {
        flow.set_passcode_digit(c)?;
    }
    if flow.set_passcode_advance()? != SetPasscodeOutcome::AwaitingConfirmation {
        bail!("passcode entry did not reach the confirmation phase");
    }
    for c in confirm.chars() {
        flow.set_passcode_digit(c)?;
    }
    match flow.set_passcode_advance()? {
        SetPasscodeOutcome::Confirmed(_) => {
            println!("Setup complete. Passcode protection is on.");
            Ok(())
        }
        outcome => bail!("passcode confirmation failed: {outcome:?}"),
    }
}

fn handle_card(config: &Config, passcode: Option<&str>, cmd: CardCommand) -> anyhow::Result<()> {
    let vault = Vault::open(config.vault_path())?;
    let _flow = open_home_flow(&vault, passcode)?;

    match cmd {
        CardCommand::Set(set_cmd) => {
            let record = record_from_args(&set_cmd);
            vault.save_contact(&record)?;
            println!("Contact card saved.");
        }
        CardCommand::Show { json } => match vault.load_contact()? {
            Some(record) => print_card(&record, json)?,
            None => println!("No contact card saved yet. Use `qshare card set` to create one."),
        },
    }
    Ok(())
}

fn handle_share(config: &Config, passcode: Option<&str>, cmd: &ShareCommand) -> anyhow::Result<()> {
    let vault = Vault::open(config.vault_path())?;
    let mut flow = open_home_flow(&vault, passcode)?;

    let payload = flow.open_qr()?;
    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &payload)?;
            println!("Payload written to {}", path.display());
        }
        None => println!("{payload}"),
    }
    Ok(())
}

fn handle_receive(
    config: &Config,
    passcode: Option<&str>,
    cmd: &ReceiveCommand,
) -> anyhow::Result<()> {
    let vault = Vault::open(config.vault_path())?;
    let mut flow = open_home_flow(&vault, passcode)?;
    flow.open_scan()?;

    let payload = match (&cmd.payload, &cmd.file) {
        (Some(payload), None) => payload.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?.trim().to_string(),
        _ => bail!("pass the payload string, or --file <FILE>"),
    };

    match flow.receive_payload(&payload) {
        Ok(record) => {
            print_card(&record, cmd.json)?;
            Ok(())
        }
        Err(e) if e.is_recoverable_decode() => {
            bail!("could not read the scanned code ({e}); try scanning again")
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_unlock(config: &Config, cmd: &UnlockCommand) -> anyhow::Result<()> {
    let vault = Vault::open(config.vault_path())?;
    let mut flow = FlowController::start(&vault)?;

    match flow.screen() {
        Screen::Setup => bail!("setup has not been completed yet; run `qshare setup` first"),
        Screen::Home => {
            println!("No passcode protection is enabled.");
            return Ok(());
        }
        _ => {}
    }

    for c in cmd.passcode.chars() {
        if flow.unlock_digit(c)? == UnlockProgress::Unlocked {
            println!("Unlocked.");
            return Ok(());
        }
    }
    bail!("incorrect passcode")
}

fn handle_reset(config: &Config, yes: bool) -> anyhow::Result<()> {
    if !yes {
        println!("This will delete your contact card, settings, and passcode.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let vault = Vault::open(config.vault_path())?;
    vault.clear_all()?;
    println!("All data cleared.");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Vault path:  {}", config.vault_path().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn record_from_args(cmd: &CardSetCommand) -> ContactRecord {
    ContactRecord {
        full_name: cmd.full_name.clone(),
        job_title: cmd.job_title.clone(),
        organization: cmd.organization.clone(),
        work_email: cmd.work_email.clone(),
        work_phone: cmd.work_phone.clone(),
        linkedin_url: cmd.linkedin_url.clone(),
        website_url: cmd.website_url.clone(),
    }
}

fn print_card(record: &ContactRecord, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("Name:          {}", record.full_name);
    println!("Title:         {}", record.job_title);
    println!("Organization:  {}", record.organization);
    println!("Email:         {}", record.work_email);
    if let Some(phone) = &record.work_phone {
        println!("Phone:         {phone}");
    }
    if let Some(url) = &record.linkedin_url {
        println!("LinkedIn:      {url}");
    }
    if let Some(url) = &record.website_url {
        println!("Website:       {url}");
    }
    Ok(())
}
