//! Concurrent fan-out over all configured quote providers.

use crate::core::quote::{Comparison, ProviderResult, QuoteProvider};
use anyhow::{Result, bail};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Aggregator {
    providers: Vec<Arc<dyn QuoteProvider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn QuoteProvider>>) -> Self {
        Self { providers }
    }

    /// Fetches quotes from every provider concurrently and waits for all
    /// of them. A failing provider degrades to an empty slot; it never
    /// fails the comparison and never cancels its siblings.
    pub async fn compare(&self, amount: f64) -> Result<Comparison> {
        if !amount.is_finite() || amount <= 0.0 {
            bail!("Input amount must be a positive number, got {amount}");
        }
        debug!("Comparing quotes for amount {amount}");

        let quote_futures = self.providers.iter().map(|provider| async move {
            match provider.fetch_quote(amount).await {
                Ok(amount_out) => ProviderResult::ok(provider.provider(), amount_out),
                Err(e) => {
                    warn!(provider = %provider.provider(), error = %e, "Quote fetch failed");
                    ProviderResult::failed(provider.provider(), e.to_string())
                }
            }
        });

        let mut results = join_all(quote_futures).await;
        // Slots always render in enumeration order, not completion or
        // construction order.
        results.sort_by_key(|r| r.provider);

        Ok(Comparison::new(results))
    }
}
