use crate::core::config::AppConfig;
use crate::refresh::RefreshJob;
use crate::store::QuoteStore;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub async fn run(config: &AppConfig, watch: bool) -> Result<()> {
    let store = Arc::new(QuoteStore::open_default(config)?);
    let aggregator = crate::build_aggregator(config);
    let job = RefreshJob::new(aggregator, store, config.refresh.amount);

    if watch {
        info!(
            interval_secs = config.refresh.interval_secs,
            "Starting refresh loop"
        );
        job.run(Duration::from_secs(config.refresh.interval_secs))
            .await;
        Ok(())
    } else {
        job.run_once().await?;
        println!("Cached the latest quotes per provider.");
        Ok(())
    }
}
