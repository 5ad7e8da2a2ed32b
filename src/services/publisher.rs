// src/services/publisher.rs

//! Weekly publisher service.
//!
//! Posts the trailing week's items to the blogging platform at most once per
//! ISO week. The weekly title doubles as the idempotency key.

use chrono::{DateTime, Datelike, Utc, Weekday};

use crate::config::PublishEnv;
use crate::error::Result;
use crate::models::{Item, PublisherConfig, WeekKey};
use crate::services::{ArticlePlatform, NewArticle, WeeklyWindow};

/// Whether a publish run should go ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Publish using this API key
    Proceed { api_key: String },
    /// Not today
    NotPublishDay(Weekday),
    /// No credential configured
    MissingCredential,
}

/// How a publish run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { title: String, item_count: usize },
    AlreadyPublished { title: String },
    NoItems,
}

/// Builds and submits the weekly post.
pub struct WeeklyPublisher {
    config: PublisherConfig,
    window_days: i64,
}

impl WeeklyPublisher {
    pub fn new(config: PublisherConfig, window_days: i64) -> Self {
        Self {
            config,
            window_days,
        }
    }

    /// Decide whether to run at all. Never touches the network.
    pub fn gate(env: &PublishEnv, now: DateTime<Utc>) -> Gate {
        let weekday = now.weekday();
        if !env.force && weekday != Weekday::Mon {
            return Gate::NotPublishDay(weekday);
        }
        match &env.api_key {
            Some(key) => Gate::Proceed {
                api_key: key.clone(),
            },
            None => Gate::MissingCredential,
        }
    }

    /// Assemble the article for this week without submitting it.
    pub fn prepare(&self, snapshot: &[Item], base_url: &str, now: DateTime<Utc>) -> NewArticle {
        let items = self.select(snapshot, now);
        self.article(&items, base_url, now)
    }

    /// Window the snapshot, capped at the post limit.
    fn select(&self, snapshot: &[Item], now: DateTime<Utc>) -> Vec<Item> {
        let window = WeeklyWindow::new(now, self.window_days);
        let mut items = window.select_or(snapshot, self.config.post_limit);
        items.truncate(self.config.post_limit);
        items
    }

    fn article(&self, items: &[Item], base_url: &str, now: DateTime<Utc>) -> NewArticle {
        let week = WeekKey::of(now);
        NewArticle {
            title: week.post_title(),
            published: true,
            body_markdown: build_markdown(base_url, items, &week),
            tags: self.config.tags.clone(),
            series: self.config.series.clone(),
            canonical_url: Some(base_url.to_string()).filter(|url| !url.is_empty()),
        }
    }

    /// Publish this week's post unless it already exists.
    ///
    /// A failed existence check is logged and the post is attempted anyway.
    pub async fn publish(
        &self,
        platform: &dyn ArticlePlatform,
        snapshot: &[Item],
        base_url: &str,
        now: DateTime<Utc>,
    ) -> Result<PublishOutcome> {
        if snapshot.is_empty() {
            log::info!("No items loaded; skipping publish");
            return Ok(PublishOutcome::NoItems);
        }

        let title = WeekKey::of(now).post_title();
        match platform.existing_titles().await {
            Ok(existing) if existing.contains(&title) => {
                log::info!("'{}' is already published; skipping", title);
                return Ok(PublishOutcome::AlreadyPublished { title });
            }
            Ok(_) => {}
            Err(e) => log::warn!("Could not check existing posts: {}", e),
        }

        let items = self.select(snapshot, now);
        let item_count = items.len();
        platform.create_article(&self.article(&items, base_url, now)).await?;

        log::info!("Published '{}' with {} items", title, item_count);
        Ok(PublishOutcome::Published { title, item_count })
    }
}

fn build_markdown(base_url: &str, items: &[Item], week: &WeekKey) -> String {
    let mut lines = vec![
        format!("{}\n", week.page_title()),
        format!("Curated links from reputable sources. More at {}\n", base_url),
    ];
    lines.extend(items.iter().map(Item::bullet));
    lines.push("\n—\n".to_string());
    lines.push(format!("Canonical: {}", base_url));
    lines.join("\n")
}
