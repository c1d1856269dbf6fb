use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderEndpoint {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderEndpoint {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub guardarian: ProviderEndpoint,
    pub paybis: ProviderEndpoint,
    pub transak: ProviderEndpoint,
    pub moonpay: ProviderEndpoint,
    /// Upper bound on each outbound quote request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            guardarian: ProviderEndpoint::new("https://api-payments.guardarian.com"),
            paybis: ProviderEndpoint::new("https://api.paybis.com"),
            transak: ProviderEndpoint::new("https://api.transak.com"),
            moonpay: ProviderEndpoint::new("https://api.moonpay.com"),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The single currency pair this deployment quotes.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PairConfig {
    pub from: String,
    pub to: String,
}

impl Default for PairConfig {
    fn default() -> Self {
        PairConfig {
            from: "USD".to_string(),
            to: "BTC".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RefreshConfig {
    /// Input amount used for cached offers.
    #[serde(default = "default_refresh_amount")]
    pub amount: f64,
    #[serde(default = "default_refresh_interval")]
    pub interval_secs: u64,
}

fn default_refresh_amount() -> f64 {
    100.0
}

fn default_refresh_interval() -> u64 {
    300
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            amount: default_refresh_amount(),
            interval_secs: default_refresh_interval(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub pair: PairConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "ramprate", "ramprate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "ramprate", "ramprate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
