use crate::core::config::{PairConfig, ProviderEndpoint};
use crate::core::quote::{Provider, QuoteProvider};
use crate::providers::USER_AGENT;
use crate::providers::util::amount_from_any;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub struct TransakProvider {
    base_url: String,
    api_key: Option<String>,
    from: String,
    to: String,
    timeout: Duration,
}

impl TransakProvider {
    pub fn new(endpoint: &ProviderEndpoint, pair: &PairConfig, timeout: Duration) -> Self {
        TransakProvider {
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
            from: pair.from.clone(),
            to: pair.to.clone(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PricingResponse {
    response: PricingQuote,
}

#[derive(Debug, Deserialize)]
struct PricingQuote {
    #[serde(rename = "cryptoAmount", deserialize_with = "amount_from_any")]
    crypto_amount: f64,
}

#[async_trait]
impl QuoteProvider for TransakProvider {
    fn provider(&self) -> Provider {
        Provider::Transak
    }

    async fn fetch_quote(&self, amount: f64) -> Result<f64> {
        let mut url = format!(
            "{}/api/v2/pricing/quote?fiatCurrency={}&cryptoCurrency={}&amount={}",
            self.base_url, self.from, self.to, amount
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&partnerApiKey={key}"));
        }
        debug!("Requesting pricing quote from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Pricing request failed for URL: {url}"))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from Transak", response.status()));
        }

        let text = response.text().await?;
        let pricing: PricingResponse = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse Transak pricing response: '{text}'"))?;

        Ok(pricing.response.crypto_amount)
    }
}
