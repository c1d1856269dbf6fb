//! Periodic job that snapshots live quotes into the offer store.

use crate::core::aggregator::Aggregator;
use crate::core::quote::Quote;
use crate::store::QuoteStore;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// The only writer to the quote store. Each cycle appends one row per
/// provider, including a zero row when a provider's fetch failed.
pub struct RefreshJob {
    aggregator: Aggregator,
    store: Arc<QuoteStore>,
    amount: f64,
}

impl RefreshJob {
    pub fn new(aggregator: Aggregator, store: Arc<QuoteStore>, amount: f64) -> Self {
        Self {
            aggregator,
            store,
            amount,
        }
    }

    /// Runs a single refresh cycle. Provider failures degrade to zero
    /// rows; store failures propagate.
    pub async fn run_once(&self) -> Result<()> {
        let comparison = self.aggregator.compare(self.amount).await?;

        let observed_at = Utc::now();
        let quotes: Vec<Quote> = comparison
            .results()
            .iter()
            .map(|r| Quote {
                provider: r.provider,
                amount_out: r.amount_or_zero(),
                observed_at,
            })
            .collect();

        self.store.append(&quotes)?;
        info!(amount = self.amount, rows = quotes.len(), "Refreshed cached offers");
        Ok(())
    }

    /// Keeps refreshing on `interval` until the process exits. A failed
    /// cycle is logged and the next one still runs.
    pub async fn run(&self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(e) = self.run_once().await {
                warn!(error = %e, "Refresh cycle failed");
            }
        }
    }
}
