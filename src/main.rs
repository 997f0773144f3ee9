//! Binary entrypoint for the gpsctl CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml` and the data directory
//! - `list` - show saved units
//! - `commands [--device <name>]` - show the command catalog
//! - `add <name>` - register a unit, fill in its profile, save it
//! - `edit <name>` - update a saved unit's profile
//! - `send <unit> [command]` - dispatch a control command over SMS
//! - `reset` - clear all stored units and settings
//!
//! See the library crate docs for module-level details: `gpsctl::`.
use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use log::info;

// Use the published library crate modules instead of redefining them here.
use gpsctl::catalog::{self, DEVICES};
use gpsctl::config::Config;
use gpsctl::lang::{Localizer, Messages};
use gpsctl::logutil;
use gpsctl::sender::{DisplayPort, SenderWorkflow, SmsTransport};
use gpsctl::settings::SettingsWorkflow;
use gpsctl::storage::SledStore;
use gpsctl::transport::OutboxTransport;
use gpsctl::units::UnitStore;

#[derive(Parser)]
#[command(name = "gpsctl")]
#[command(about = "Manage GPS tracker units and send them SMS control commands")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter configuration file and data directory
    Init,
    /// List saved units
    List,
    /// Show the command catalog for a device family
    Commands {
        /// Device family (all families when omitted)
        #[arg(short, long)]
        device: Option<String>,
    },
    /// Register a new unit and fill in its profile
    Add {
        /// Unit name (must not exist yet)
        name: String,
    },
    /// Update a saved unit's profile
    Edit {
        /// Unit name
        name: String,
    },
    /// Send a control command to a unit
    Send {
        /// Unit name
        unit: String,
        /// Command name (interactive picker when omitted)
        command: Option<String>,
    },
    /// Clear all stored units and settings
    Reset {
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes it)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    logutil::init(pre_config.as_ref().map(|c| &c.logging), cli.verbose);

    match cli.command {
        Commands::Init => {
            info!("Initializing gpsctl configuration");
            Config::create_default(&cli.config).await?;
            let config = Config::load(&cli.config).await?;
            tokio::fs::create_dir_all(&config.storage.data_dir).await?;
            println!("Configuration file created at {}", cli.config);
            println!("Data directory created at {}", config.storage.data_dir);
        }
        Commands::List => {
            let config = require_config(pre_config, &cli.config)?;
            let store = SledStore::open(units_db_path(&config))?;
            let units = UnitStore::new(store).list_units();
            println!("{:<20} {:<12} {:<16} {}", "NAME", "DEVICE", "PHONE", "PASSWORD");
            for unit in units {
                let masked = "*".repeat(unit.password.chars().count());
                println!(
                    "{:<20} {:<12} {:<16} {}",
                    unit.name, unit.device, unit.phone_number, masked
                );
            }
        }
        Commands::Commands { device } => {
            let config = require_config(pre_config, &cli.config)?;
            let lang = Messages::new(&config.ui.language);
            let devices: Vec<&str> = match device.as_deref() {
                Some(one) => vec![one],
                None => DEVICES.to_vec(),
            };
            for device in devices {
                let commands = catalog::resolve(device, &lang);
                if commands.is_empty() {
                    println!("{}: no commands (unknown device)", device);
                    continue;
                }
                println!("{}:", device);
                for command in commands {
                    println!("  {:<18} {:<28} {}", command.name, command.label, command.definition);
                }
            }
        }
        Commands::Add { name } => {
            let config = require_config(pre_config, &cli.config)?;
            let mut workflow = open_workflow(&config)?;
            workflow.initialize();
            workflow.set_new_name(&name);
            workflow.add_unit().await;
            // On success the staged name is cleared and the new unit selected;
            // on rejection the workflow already said why.
            let added = workflow.new_name().is_empty() && workflow.selected_unit() == name;
            if !added {
                return Ok(());
            }
            edit_unit_fields(&mut workflow)?;
            workflow.save().await?;
        }
        Commands::Edit { name } => {
            let config = require_config(pre_config, &cli.config)?;
            let mut workflow = open_workflow(&config)?;
            workflow.initialize();
            if !workflow.names().iter().any(|n| n == &name) {
                println!("No unit named '{}'. Try 'gpsctl list'.", name);
                return Ok(());
            }
            workflow.select_unit(&name);
            edit_unit_fields(&mut workflow)?;
            workflow.save().await?;
        }
        Commands::Send { unit, command } => {
            let config = require_config(pre_config, &cli.config)?;
            let mut workflow = open_workflow(&config)?;
            workflow.initialize();
            if !workflow.names().iter().any(|n| n == &unit) {
                println!("No unit named '{}'. Try 'gpsctl list'.", unit);
                return Ok(());
            }
            workflow.select_unit(&unit);

            let chosen = match command {
                Some(wanted) => workflow
                    .commands()
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(&wanted))
                    .cloned(),
                None => pick_command(&workflow)?,
            };
            match chosen {
                Some(command) => workflow.select_command(&command).await,
                None => println!(
                    "No such command for device '{}'. Try 'gpsctl commands'.",
                    workflow.selected_device()
                ),
            }
        }
        Commands::Reset { yes } => {
            let config = require_config(pre_config, &cli.config)?;
            let lang = Messages::new(&config.ui.language);
            let display = TerminalDisplay;
            if !yes {
                let ok = display
                    .confirm(
                        &lang.lookup("ResetLabel"),
                        "This deletes every saved unit.",
                        &lang.lookup("YesLabel"),
                        &lang.lookup("NoLabel"),
                    )
                    .await;
                if !ok {
                    return Ok(());
                }
            }
            let store = SledStore::open(units_db_path(&config))?;
            SettingsWorkflow::new(store, display, lang)
                .reset_to_defaults()
                .await?;
        }
    }

    Ok(())
}

type CliWorkflow = SenderWorkflow<SledStore, TerminalDisplay, CliTransport, Messages>;

fn require_config(pre_config: Option<Config>, path: &str) -> Result<Config> {
    pre_config.ok_or_else(|| {
        anyhow::anyhow!("No configuration at {path}; run 'gpsctl init' first")
    })
}

fn units_db_path(config: &Config) -> std::path::PathBuf {
    std::path::Path::new(&config.storage.data_dir).join("units")
}

fn open_workflow(config: &Config) -> Result<CliWorkflow> {
    let store = SledStore::open(units_db_path(config))?;
    Ok(SenderWorkflow::new(
        UnitStore::new(store),
        TerminalDisplay,
        CliTransport::from_config(config),
        Messages::new(&config.ui.language),
    ))
}

/// Prompt for the unit's phone number, device family and password. Empty
/// input keeps the current value; the password echoes only when the workflow's
/// visibility toggle is on.
fn edit_unit_fields(workflow: &mut CliWorkflow) -> Result<()> {
    let phone = prompt_line("Phone number", &workflow.unit().phone_number)?;
    if !phone.is_empty() {
        workflow.unit_mut().phone_number = phone;
    }

    println!("Device families:");
    for (i, device) in DEVICES.iter().enumerate() {
        println!("  {}) {}", i + 1, device);
    }
    let device = prompt_line("Device number", workflow.selected_device())?;
    if let Ok(index) = device.parse::<usize>() {
        if let Some(device) = DEVICES.get(index.wrapping_sub(1)) {
            workflow.select_device(device);
        }
    }

    let shown = if workflow.password_visible() {
        format!("Tracker password [{}]: ", workflow.unit().password)
    } else {
        "Tracker password (hidden, empty keeps current): ".to_string()
    };
    let password = rpassword::prompt_password(shown)?;
    if !password.is_empty() {
        workflow.unit_mut().password = password;
    }
    Ok(())
}

/// Numbered picker over the selected device's command list.
fn pick_command(workflow: &CliWorkflow) -> Result<Option<catalog::Command>> {
    let commands = workflow.commands();
    if commands.is_empty() {
        return Ok(None);
    }
    println!("Commands for {}:", workflow.selected_device());
    for (i, command) in commands.iter().enumerate() {
        println!("  {}) {}", i + 1, command.label);
    }
    let answer = prompt_line("Command number", "")?;
    let Ok(index) = answer.parse::<usize>() else {
        return Ok(None);
    };
    Ok(commands.get(index.wrapping_sub(1)).cloned())
}

fn prompt_line(label: &str, current: &str) -> Result<String> {
    if current.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, current);
    }
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Terminal implementation of the alert/confirm collaborator.
struct TerminalDisplay;

#[async_trait]
impl DisplayPort for TerminalDisplay {
    async fn alert(&self, title: &str, message: &str, _dismiss: &str) {
        println!("{}: {}", title, message);
    }

    async fn confirm(&self, title: &str, message: &str, accept: &str, decline: &str) -> bool {
        print!("{}: {} [{}/{}] ", title, message, accept, decline);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        let answer = line.trim();
        answer.eq_ignore_ascii_case(accept)
            || accept
                .chars()
                .next()
                .is_some_and(|c| answer.eq_ignore_ascii_case(&c.to_string()))
    }
}

/// Transport chosen from config: a GSM modem when one is configured (and the
/// `modem` feature is compiled in), the outbox journal otherwise.
enum CliTransport {
    Outbox(OutboxTransport),
    #[cfg(feature = "modem")]
    Modem(gpsctl::transport::ModemTransport),
}

impl CliTransport {
    fn from_config(config: &Config) -> Self {
        #[cfg(feature = "modem")]
        if !config.transport.port.is_empty() {
            return Self::Modem(gpsctl::transport::ModemTransport::new(
                &config.transport.port,
                config.transport.baud_rate,
            ));
        }
        #[cfg(not(feature = "modem"))]
        if !config.transport.port.is_empty() {
            log::warn!("transport.port is set but gpsctl was built without the 'modem' feature");
        }
        let outbox = std::path::Path::new(&config.storage.data_dir).join("outbox.jsonl");
        Self::Outbox(OutboxTransport::new(outbox))
    }
}

#[async_trait]
impl SmsTransport for CliTransport {
    async fn send(&self, phone_number: &str, message: &str) {
        match self {
            Self::Outbox(t) => t.send(phone_number, message).await,
            #[cfg(feature = "modem")]
            Self::Modem(t) => t.send(phone_number, message).await,
        }
    }
}
