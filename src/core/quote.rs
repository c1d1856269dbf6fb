//! Quote abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The fixed set of payment on-ramps this app compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Guardarian,
    Paybis,
    Transak,
    Moonpay,
}

impl Provider {
    /// All providers, in the order they appear in comparison output.
    pub const ALL: [Provider; 4] = [
        Provider::Guardarian,
        Provider::Paybis,
        Provider::Transak,
        Provider::Moonpay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Guardarian => "guardarian",
            Provider::Paybis => "paybis",
            Provider::Transak => "transak",
            Provider::Moonpay => "moonpay",
        }
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guardarian" => Ok(Provider::Guardarian),
            "paybis" => Ok(Provider::Paybis),
            "transak" => Ok(Provider::Transak),
            "moonpay" => Ok(Provider::Moonpay),
            _ => Err(anyhow::anyhow!("Unknown provider: {}", s)),
        }
    }
}

/// One normalized observation: how much of the target asset a provider
/// offered for the requested input amount. A zero amount records a
/// failed fetch.
#[derive(Debug, Clone)]
pub struct Quote {
    pub provider: Provider,
    pub amount_out: f64,
    pub observed_at: DateTime<Utc>,
}

/// Outcome of one adapter invocation. `amount_out` and `error` are
/// mutually exclusive.
#[derive(Debug, Clone)]
pub struct ProviderResult {
    pub provider: Provider,
    pub amount_out: Option<f64>,
    pub error: Option<String>,
}

impl ProviderResult {
    pub fn ok(provider: Provider, amount_out: f64) -> Self {
        Self {
            provider,
            amount_out: Some(amount_out),
            error: None,
        }
    }

    pub fn failed(provider: Provider, reason: String) -> Self {
        Self {
            provider,
            amount_out: None,
            error: Some(reason),
        }
    }

    /// Failed slots degrade to zero, matching what callers and the offer
    /// cache expect.
    pub fn amount_or_zero(&self) -> f64 {
        self.amount_out.unwrap_or(0.0)
    }
}

/// Aggregated quotes for one input amount, one slot per provider in
/// `Provider::ALL` order.
#[derive(Debug)]
pub struct Comparison {
    results: Vec<ProviderResult>,
}

impl Comparison {
    pub(crate) fn new(results: Vec<ProviderResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[ProviderResult] {
        &self.results
    }

    pub fn amount_for(&self, provider: Provider) -> f64 {
        self.results
            .iter()
            .find(|r| r.provider == provider)
            .map_or(0.0, ProviderResult::amount_or_zero)
    }

    /// The slot with the highest positive amount, if any provider
    /// returned a usable quote.
    pub fn best(&self) -> Option<&ProviderResult> {
        self.results
            .iter()
            .filter(|r| r.amount_out.is_some_and(|v| v > 0.0))
            .max_by(|a, b| a.amount_or_zero().total_cmp(&b.amount_or_zero()))
    }
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn provider(&self) -> Provider;

    /// Fetches one buy-quote for `amount` in the configured source
    /// currency, normalized to target-asset quantity.
    async fn fetch_quote(&self, amount: f64) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_display_from_str_round_trip() {
        for provider in Provider::ALL {
            let parsed: Provider = provider.to_string().parse().unwrap();
            assert_eq!(parsed, provider);
        }
        assert_eq!("MoonPay".parse::<Provider>().unwrap(), Provider::Moonpay);
        assert!("coinbase".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_serde_lowercase() {
        let json = serde_json::to_string(&Provider::Guardarian).unwrap();
        assert_eq!(json, "\"guardarian\"");
        let provider: Provider = serde_json::from_str("\"transak\"").unwrap();
        assert_eq!(provider, Provider::Transak);
    }

    #[test]
    fn test_comparison_best_ignores_failed_slots() {
        let comparison = Comparison::new(vec![
            ProviderResult::ok(Provider::Guardarian, 0.0015),
            ProviderResult::failed(Provider::Paybis, "timeout".to_string()),
            ProviderResult::ok(Provider::Transak, 0.0016),
            ProviderResult::ok(Provider::Moonpay, 0.00149),
        ]);

        let best = comparison.best().unwrap();
        assert_eq!(best.provider, Provider::Transak);
        assert_eq!(best.amount_out, Some(0.0016));
    }

    #[test]
    fn test_comparison_best_none_when_all_failed() {
        let comparison = Comparison::new(
            Provider::ALL
                .into_iter()
                .map(|p| ProviderResult::failed(p, "boom".to_string()))
                .collect(),
        );
        assert!(comparison.best().is_none());
    }

    #[test]
    fn test_amount_for_failed_slot_is_zero() {
        let comparison = Comparison::new(vec![
            ProviderResult::ok(Provider::Guardarian, 0.0015),
            ProviderResult::failed(Provider::Paybis, "HTTP error: 500".to_string()),
        ]);
        assert_eq!(comparison.amount_for(Provider::Guardarian), 0.0015);
        assert_eq!(comparison.amount_for(Provider::Paybis), 0.0);
    }
}
