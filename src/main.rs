//! # Promemo CLI
//!
//! Event planner bot — tracks upcoming checks and reminds you over
//! WhatsApp the day before.
//!
//! Usage:
//!   promemo serve                # Start webhook gateway + reminder scheduler
//!   promemo list                 # Print upcoming events
//!   promemo config show          # Show configuration
//!   promemo info                 # Show system info

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use promemo_core::PromemoConfig;
use promemo_core::traits::EventStore;

#[derive(Parser)]
#[command(
    name = "promemo",
    version,
    about = "Promemo — event planner bot with WhatsApp reminders"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook gateway and the reminder scheduler
    Serve {
        /// Override listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print upcoming events
    List,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show system info
    Info,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Reset to defaults
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "promemo=debug,promemo_gateway=debug,promemo_scheduler=debug,promemo_store=debug"
    } else {
        "promemo=info,promemo_gateway=info,promemo_scheduler=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    // Load config
    let mut config = if let Some(path) = &cli.config {
        PromemoConfig::load_from(std::path::Path::new(path))?
    } else {
        PromemoConfig::load()?
    };
    config.apply_env_overrides();

    match cli.command {
        Commands::Serve { port } => {
            if let Some(p) = port {
                config.gateway.port = p;
            }
            if config.reminder.recipient.is_empty() {
                tracing::warn!(
                    "No reminder recipient configured (reminder.recipient or MY_WHATSAPP_NUMBER)"
                );
            }

            let store = promemo_store::create_store(&config.store)?;
            let transport = promemo_channels::create_transport(&config)?;
            promemo_gateway::serve(&config, store, transport).await?;
        }

        Commands::List => {
            let store = promemo_store::create_store(&config.store)?;
            let events = store.query_ordered().await?;
            if events.is_empty() {
                println!("No events found.");
            }
            for event in events {
                println!(
                    "{}. {} - {} {} - {}",
                    event.id,
                    event.subject,
                    event.date_str(),
                    event.time_str(),
                    event.description
                );
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Reset => {
                PromemoConfig::default().save()?;
                println!("✅ Configuration reset to defaults.");
            }
        },

        Commands::Info => {
            println!("📅 promemo v{}", env!("CARGO_PKG_VERSION"));
            println!("  Platform: {} / {}", std::env::consts::OS, std::env::consts::ARCH);
            println!("  Config: {}", PromemoConfig::default_path().display());
            println!("  Store: {}", config.store.db_path().display());
            println!("  Reminder interval: {}s", config.reminder.interval_secs);
            println!(
                "  Recipient: {}",
                if config.reminder.recipient.is_empty() {
                    "(not set)"
                } else {
                    &config.reminder.recipient
                }
            );
            println!(
                "  Twilio: {}",
                if config.twilio.is_some() {
                    "configured"
                } else {
                    "not configured (dry-run)"
                }
            );
        }
    }

    Ok(())
}
