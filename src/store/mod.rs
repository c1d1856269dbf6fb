//! Durable, append-only history of observed quotes.

use crate::core::config::AppConfig;
use crate::core::quote::{Provider, Quote};
use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

const QUOTES_PARTITION: &str = "quotes";

/// One persisted observation. Rows are immutable; the amount is kept as
/// text to preserve whatever precision the provider reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedQuote {
    pub provider: Provider,
    pub amount_out: String,
    pub created_at: i64,
}

/// Append-only quote store. "Latest" is derived on read as the row with
/// the greatest `created_at` per provider; nothing is ever updated in
/// place or deleted.
pub struct QuoteStore {
    keyspace: Keyspace,
    quotes: PartitionHandle,
    // Tie-breaker for rows landing on the same millisecond: later
    // insertions get a higher sequence and win the "latest" read.
    seq: AtomicU64,
}

impl QuoteStore {
    /// Opens (or creates) the store at `path`. Creating the schema is
    /// idempotent; existing rows are preserved.
    pub fn open(path: &Path) -> Result<Self> {
        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open quote store at {}", path.display()))?;
        let quotes = keyspace
            .open_partition(QUOTES_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open quotes partition")?;

        Ok(Self {
            keyspace,
            quotes,
            seq: AtomicU64::new(0),
        })
    }

    /// Opens the store at the configured data path.
    pub fn open_default(config: &AppConfig) -> Result<Self> {
        Self::open(&config.default_data_path()?.join("offers"))
    }

    // Keys sort lexicographically as (provider, created_at, seq) thanks
    // to the zero padding, so the last key under a provider prefix is
    // the latest row.
    fn row_key(provider: Provider, created_at: i64, seq: u64) -> String {
        format!("{provider}/{created_at:020}/{seq:010}")
    }

    /// Inserts one new row per observation. Never overwrites; repeated
    /// appends for the same provider accumulate history.
    pub fn append(&self, quotes: &[Quote]) -> Result<()> {
        for quote in quotes {
            let created_at = quote.observed_at.timestamp_millis();
            let row = CachedQuote {
                provider: quote.provider,
                amount_out: quote.amount_out.to_string(),
                created_at,
            };
            let seq = self.seq.fetch_add(1, Ordering::SeqCst);
            let key = Self::row_key(quote.provider, created_at, seq);
            self.quotes
                .insert(key.as_bytes(), serde_json::to_vec(&row)?)
                .with_context(|| format!("Failed to store quote for {}", quote.provider))?;
            debug!(provider = %quote.provider, created_at, "Stored quote row");
        }

        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist quote store")?;
        Ok(())
    }

    /// The most recently observed row for `provider`, if any.
    pub fn latest(&self, provider: Provider) -> Result<Option<CachedQuote>> {
        let prefix = format!("{provider}/");
        match self.quotes.prefix(prefix.as_bytes()).next_back() {
            Some(entry) => {
                let (_key, value) = entry.context("Failed to read quote row")?;
                let row: CachedQuote = serde_json::from_slice(&value)?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    /// Latest row per provider in enumeration order. Providers with no
    /// stored rows are omitted; an empty store yields an empty list.
    pub fn latest_all(&self) -> Result<Vec<CachedQuote>> {
        let mut latest = Vec::new();
        for provider in Provider::ALL {
            if let Some(row) = self.latest(provider)? {
                latest.push(row);
            }
        }
        Ok(latest)
    }
}
