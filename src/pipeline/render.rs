// src/pipeline/render.rs

//! Digest page stage.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Config;
use crate::services::{DigestPage, DigestRenderer};
use crate::storage::DigestStorage;

/// Render this week's digest page from the stored snapshot.
pub async fn run_render(
    config: &Config,
    storage: &dyn DigestStorage,
    now: DateTime<Utc>,
) -> Result<DigestPage> {
    let snapshot = storage.load_snapshot(now).await?;
    log::debug!("Loaded {} items from snapshot", snapshot.len());

    let page = DigestRenderer::new(config.digest.clone()).render(&snapshot.items, now);
    let location = storage.write_page(&page.key, &page.content).await?;

    log::info!(
        "Wrote digest page: {} ({} items)",
        location,
        page.item_count
    );
    Ok(page)
}
