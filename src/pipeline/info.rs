// src/pipeline/info.rs

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Config, WeekKey};
use crate::services::WeeklyWindow;
use crate::storage::DigestStorage;

/// Snapshot statistics reported by `info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub item_count: usize,
    pub window_count: usize,
    pub newest: Option<DateTime<Utc>>,
    pub oldest: Option<DateTime<Utc>>,
    pub week: WeekKey,
}

/// Report what the stored snapshot holds.
pub async fn run_info(
    config: &Config,
    storage: &dyn DigestStorage,
    now: DateTime<Utc>,
) -> Result<SnapshotInfo> {
    let snapshot = storage.load_snapshot(now).await?;
    let window = WeeklyWindow::new(now, config.digest.window_days);

    let info = SnapshotInfo {
        item_count: snapshot.len(),
        window_count: window.select(&snapshot.items).len(),
        newest: snapshot.items.iter().map(|i| i.published).max(),
        oldest: snapshot.items.iter().map(|i| i.published).min(),
        week: WeekKey::of(now),
    };

    log::info!("Current week: {}", info.week.label());
    if info.item_count == 0 {
        log::info!("No snapshot found yet.");
        return Ok(info);
    }
    log::info!("Snapshot items: {}", info.item_count);
    log::info!(
        "Items in the last {} days: {}",
        config.digest.window_days,
        info.window_count
    );
    if let (Some(newest), Some(oldest)) = (info.newest, info.oldest) {
        log::info!("Newest: {}", newest.to_rfc3339());
        log::info!("Oldest: {}", oldest.to_rfc3339());
    }
    Ok(info)
}
