use crate::core::config::{PairConfig, ProviderEndpoint};
use crate::core::quote::{Provider, QuoteProvider};
use crate::providers::USER_AGENT;
use crate::providers::util::amount_from_any;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub struct MoonpayProvider {
    base_url: String,
    api_key: Option<String>,
    from: String,
    to: String,
    timeout: Duration,
}

impl MoonpayProvider {
    pub fn new(endpoint: &ProviderEndpoint, pair: &PairConfig, timeout: Duration) -> Self {
        MoonpayProvider {
            base_url: endpoint.base_url.clone(),
            api_key: endpoint.api_key.clone(),
            from: pair.from.clone(),
            to: pair.to.clone(),
            timeout,
        }
    }
}

// The rate is a bare field on the top-level envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoonpayQuote {
    #[serde(deserialize_with = "amount_from_any")]
    quote_currency_amount: f64,
}

#[async_trait]
impl QuoteProvider for MoonpayProvider {
    fn provider(&self) -> Provider {
        Provider::Moonpay
    }

    async fn fetch_quote(&self, amount: f64) -> Result<f64> {
        let mut url = format!(
            "{}/v3/currencies/{}/quote?baseCurrencyAmount={}&baseCurrencyCode={}",
            self.base_url,
            self.to.to_lowercase(),
            amount,
            self.from.to_lowercase()
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&apiKey={key}"));
        }
        debug!("Requesting quote from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from MoonPay", response.status()));
        }

        let quote = response
            .json::<MoonpayQuote>()
            .await
            .map_err(|e| anyhow!("Failed to parse MoonPay quote: {}", e))?;

        Ok(quote.quote_currency_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const QUOTE_PATH: &str = "/v3/currencies/btc/quote";

    fn test_provider(uri: &str) -> MoonpayProvider {
        MoonpayProvider::new(
            &ProviderEndpoint {
                base_url: uri.to_string(),
                api_key: None,
            },
            &PairConfig::default(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_successful_quote() {
        let mock_response = r#"{
            "baseCurrencyAmount": 100,
            "quoteCurrencyAmount": 0.00149,
            "feeAmount": 4.99
        }"#;

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUOTE_PATH))
            .and(query_param("baseCurrencyAmount", "100"))
            .and(query_param("baseCurrencyCode", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server.uri());
        let amount = provider.fetch_quote(100.0).await.unwrap();
        assert_eq!(amount, 0.00149);
    }

    #[tokio::test]
    async fn test_string_amount_accepted() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUOTE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"quoteCurrencyAmount": "0.0015"}"#),
            )
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server.uri());
        let amount = provider.fetch_quote(100.0).await.unwrap();
        assert_eq!(amount, 0.0015);
    }

    #[tokio::test]
    async fn test_http_error_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUOTE_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server.uri());
        let result = provider.fetch_quote(100.0).await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 404 Not Found from MoonPay"
        );
    }

    #[tokio::test]
    async fn test_missing_quote_field() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUOTE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"feeAmount": 4.99}"#))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server.uri());
        let result = provider.fetch_quote(100.0).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse MoonPay quote")
        );
    }
}
