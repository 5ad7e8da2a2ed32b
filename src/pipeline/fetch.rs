// src/pipeline/fetch.rs

//! Feed fetching stage.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Config;
use crate::services::FeedFetcher;
use crate::storage::{DigestStorage, WriteSummary};

/// Fetch every feed and replace the snapshot.
///
/// Individual feed failures are logged and skipped; only a failed snapshot
/// write is an error.
pub async fn run_fetch(
    config: &Config,
    storage: &dyn DigestStorage,
    now: DateTime<Utc>,
) -> Result<WriteSummary> {
    log::info!("Fetching {} feeds", config.feeds.len());

    let fetcher = FeedFetcher::new(config.fetcher.clone(), config.feeds.clone())?;
    let outcome = fetcher.run(now).await;

    if outcome.source_failures > 0 {
        log::warn!(
            "{} of {} feeds failed",
            outcome.source_failures,
            outcome.source_total
        );
    }
    if outcome.duplicates > 0 {
        log::info!("Removed {} duplicate entries", outcome.duplicates);
    }

    let summary = storage.write_snapshot(&outcome.snapshot).await?;
    log::info!(
        "Wrote {} items to {}",
        summary.item_count,
        summary.location
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedSource;
    use crate::storage::LocalStorage;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_snapshot_written_when_every_feed_fails() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.fetcher.timeout_secs = 2;
        config.feeds = vec![
            FeedSource::new("http://127.0.0.1:9/feed", "A"),
            FeedSource::new("http://127.0.0.1:9/other", "B"),
        ];
        let storage = LocalStorage::new(tmp.path(), config.paths.clone());
        let now = Utc.with_ymd_and_hms(2026, 10, 12, 9, 0, 0).unwrap();

        let summary = run_fetch(&config, &storage, now).await.unwrap();

        assert_eq!(summary.item_count, 0);
        let written = std::fs::read_to_string(tmp.path().join("data/feeds.json")).unwrap();
        assert!(written.contains("\"items\""));
    }
}
