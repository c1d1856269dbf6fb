use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ramprate::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ramprate::AppCommand {
    fn from(cmd: Commands) -> ramprate::AppCommand {
        match cmd {
            Commands::Compare { amount } => ramprate::AppCommand::Compare { amount },
            Commands::Offers => ramprate::AppCommand::Offers,
            Commands::Refresh { watch } => ramprate::AppCommand::Refresh { watch },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Compare live buy quotes across providers
    Compare {
        /// Fiat amount to spend
        #[arg(default_value_t = 100.0)]
        amount: f64,
    },
    /// Show the most recent cached offer per provider
    Offers,
    /// Fetch quotes and store them as cached offers
    Refresh {
        /// Keep refreshing on the configured interval
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => ramprate::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = ramprate::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
pair:
  from: "USD"
  to: "BTC"

providers:
  guardarian:
    base_url: "https://api-payments.guardarian.com"
  paybis:
    base_url: "https://api.paybis.com"
  transak:
    base_url: "https://api.transak.com"
  moonpay:
    base_url: "https://api.moonpay.com"

refresh:
  amount: 100.0
  interval_secs: 300
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
