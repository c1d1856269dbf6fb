pub mod cli;
pub mod core;
pub mod providers;
pub mod refresh;
pub mod store;

use crate::core::aggregator::Aggregator;
use crate::core::config::AppConfig;
use crate::core::quote::QuoteProvider;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub enum AppCommand {
    Compare { amount: f64 },
    Offers,
    Refresh { watch: bool },
}

/// Builds one adapter per configured provider, in the order the
/// comparison output uses.
pub fn build_aggregator(config: &AppConfig) -> Aggregator {
    let timeout = Duration::from_secs(config.providers.timeout_secs);
    let pair = &config.pair;

    let adapters: Vec<Arc<dyn QuoteProvider>> = vec![
        Arc::new(providers::guardarian::GuardarianProvider::new(
            &config.providers.guardarian,
            pair,
            timeout,
        )),
        Arc::new(providers::paybis::PaybisProvider::new(
            &config.providers.paybis,
            pair,
            timeout,
        )),
        Arc::new(providers::transak::TransakProvider::new(
            &config.providers.transak,
            pair,
            timeout,
        )),
        Arc::new(providers::moonpay::MoonpayProvider::new(
            &config.providers.moonpay,
            pair,
            timeout,
        )),
    ];

    Aggregator::new(adapters)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("ramprate starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Compare { amount } => cli::compare::run(&config, amount).await,
        AppCommand::Offers => cli::offers::run(&config),
        AppCommand::Refresh { watch } => cli::refresh::run(&config, watch).await,
    }
}
