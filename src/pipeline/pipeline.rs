// src/pipeline/pipeline.rs

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::PublishEnv;
use crate::error::Result;
use crate::models::Config;
use crate::storage::DigestStorage;

use super::fetch::run_fetch;
use super::publish::run_publish;
use super::render::run_render;

/// Run the full pipeline: Fetch → Render → Publish.
///
/// The publish step keeps its own weekday and credential gating.
pub async fn run_pipeline(
    config: &Config,
    storage: &dyn DigestStorage,
    site_root: &Path,
    env: &PublishEnv,
    now: DateTime<Utc>,
) -> Result<()> {
    log::info!("[STEP 1/3] Fetch - Updating snapshot");
    run_fetch(config, storage, now).await?;

    log::info!("[STEP 2/3] Render - Writing digest page");
    run_render(config, storage, now).await?;

    log::info!("[STEP 3/3] Publish - Posting weekly digest");
    run_publish(config, storage, site_root, env, now).await?;

    log::info!("Pipeline complete!");
    Ok(())
}
