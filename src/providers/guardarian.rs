use crate::core::config::{PairConfig, ProviderEndpoint};
use crate::core::quote::{Provider, QuoteProvider};
use crate::providers::USER_AGENT;
use crate::providers::util::amount_from_any;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub struct GuardarianProvider {
    base_url: String,
    api_key: Option<String>,
    from: String,
    to: String,
    timeout: Duration,
}

impl GuardarianProvider {
    pub fn new(endpoint: &ProviderEndpoint, pair: &PairConfig, timeout: Duration) -> Self {
        GuardarianProvider {
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
            from: pair.from.clone(),
            to: pair.to.clone(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GuardarianEstimate {
    #[serde(deserialize_with = "amount_from_any")]
    value: f64,
}

#[async_trait]
impl QuoteProvider for GuardarianProvider {
    fn provider(&self) -> Provider {
        Provider::Guardarian
    }

    async fn fetch_quote(&self, amount: f64) -> Result<f64> {
        let url = format!(
            "{}/v1/estimate?from_amount={}&from_currency={}&to_currency={}&platform=web&from_network={}&to_network={}",
            self.base_url, amount, self.from, self.to, self.from, self.to
        );
        debug!("Requesting estimate from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;

        let mut request = client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from Guardarian", response.status()));
        }

        let text = response.text().await?;
        let estimate: GuardarianEstimate = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse Guardarian estimate: {}", e))?;

        Ok(estimate.value)
    }
}
