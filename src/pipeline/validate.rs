// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate the configuration and list the feed catalog.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    match config.validate() {
        Ok(()) => {
            log::info!("✓ Config OK");
            log::info!("    User agent: {}", config.fetcher.user_agent);
            log::info!("    Timeout: {}s", config.fetcher.timeout_secs);
            log::info!(
                "    Window: {} days, page {} items, post {} items",
                config.digest.window_days,
                config.digest.page_limit,
                config.publisher.post_limit
            );
            log::info!("    Feeds: {}", config.feeds.len());
            for feed in &config.feeds {
                log::info!("      {} <{}>", feed.label, feed.url);
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            Err(e)
        }
    }
}
