use crate::core::config::{PairConfig, ProviderEndpoint};
use crate::core::quote::{Provider, QuoteProvider};
use crate::providers::USER_AGENT;
use crate::providers::util::amount_from_any;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct PaybisProvider {
    base_url: String,
    api_key: Option<String>,
    from: String,
    to: String,
    timeout: Duration,
}

impl PaybisProvider {
    pub fn new(endpoint: &ProviderEndpoint, pair: &PairConfig, timeout: Duration) -> Self {
        PaybisProvider {
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
            from: pair.from.clone(),
            to: pair.to.clone(),
            timeout,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRequest<'a> {
    currency_code_from: &'a str,
    currency_code_to: &'a str,
    requested_amount: RequestedAmount<'a>,
    requested_amount_type: &'a str,
    promo_code: Option<&'a str>,
    payment_method: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestedAmount<'a> {
    amount: String,
    currency_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    payment_methods: Vec<PaymentMethodQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentMethodQuote {
    amount_to: AmountTo,
}

#[derive(Debug, Deserialize)]
struct AmountTo {
    #[serde(deserialize_with = "amount_from_any")]
    amount: f64,
}

#[async_trait]
impl QuoteProvider for PaybisProvider {
    fn provider(&self) -> Provider {
        Provider::Paybis
    }

    async fn fetch_quote(&self, amount: f64) -> Result<f64> {
        let url = format!("{}/public/processing/v2/quote/buy-crypto", self.base_url);
        let body = QuoteRequest {
            currency_code_from: &self.from,
            currency_code_to: &self.to,
            requested_amount: RequestedAmount {
                amount: amount.to_string(),
                currency_code: &self.from,
            },
            requested_amount_type: "from",
            promo_code: None,
            payment_method: "credit-card",
        };
        debug!("Requesting buy-crypto quote from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;

        let mut request = client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Quote request failed for URL: {url}"))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from Paybis", response.status()));
        }

        let quote = response
            .json::<QuoteResponse>()
            .await
            .context("Failed to parse Paybis quote")?;

        let method = quote
            .payment_methods
            .first()
            .ok_or_else(|| anyhow!("No payment methods in Paybis quote"))?;

        Ok(method.amount_to.amount)
    }
}
