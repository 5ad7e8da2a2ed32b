// src/pipeline/publish.rs

//! Weekly publish stage.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::{API_KEY_ENV, FORCE_ENV, PublishEnv, resolve_base_url};
use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::{DevToClient, Gate, PublishOutcome, WeeklyPublisher};
use crate::storage::DigestStorage;

/// Publish this week's digest to Dev.to.
///
/// Returns `None` when the run was gated off (wrong weekday or no API key).
/// Nothing touches the network before the gate passes.
pub async fn run_publish(
    config: &Config,
    storage: &dyn DigestStorage,
    site_root: &Path,
    env: &PublishEnv,
    now: DateTime<Utc>,
) -> Result<Option<PublishOutcome>> {
    let api_key = match WeeklyPublisher::gate(env, now) {
        Gate::Proceed { api_key } => api_key,
        Gate::NotPublishDay(weekday) => {
            log::info!(
                "Not weekly posting day ({}); skipping. Set {}=1 to override.",
                weekday,
                FORCE_ENV
            );
            return Ok(None);
        }
        Gate::MissingCredential => {
            log::info!("{} not set; skipping", API_KEY_ENV);
            return Ok(None);
        }
    };

    let base_url = resolve_base_url(site_root, &config.paths.site_config_files);
    if base_url.is_empty() {
        log::warn!("No baseURL found in site config; links will be blank");
    }
    let snapshot = storage.load_snapshot(now).await?;

    let publisher = WeeklyPublisher::new(config.publisher.clone(), config.digest.window_days);
    let client = DevToClient::new(api_key, config.publisher.clone())?;

    match publisher
        .publish(&client, &snapshot.items, &base_url, now)
        .await
    {
        Ok(outcome) => Ok(Some(outcome)),
        Err(e @ AppError::Publish { .. }) => {
            log::error!("Dev.to publish failed: {}", e);
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Log the post that would be submitted, without gating or network calls.
pub async fn preview_publish(
    config: &Config,
    storage: &dyn DigestStorage,
    site_root: &Path,
    now: DateTime<Utc>,
) -> Result<String> {
    let base_url = resolve_base_url(site_root, &config.paths.site_config_files);
    let snapshot = storage.load_snapshot(now).await?;

    let publisher = WeeklyPublisher::new(config.publisher.clone(), config.digest.window_days);
    let article = publisher.prepare(&snapshot.items, &base_url, now);

    log::info!("Dry run: would publish '{}'", article.title);
    log::info!("Tags: {}", article.tags.join(", "));
    log::info!("Body:\n{}", article.body_markdown);
    Ok(article.body_markdown)
}
