// src/services/digest.rs

//! Digest page rendering.

use chrono::{DateTime, Utc};

use crate::models::{DigestConfig, Item, WeekKey};
use crate::services::WeeklyWindow;

/// A rendered page and the key it is stored under.
#[derive(Debug, Clone)]
pub struct DigestPage {
    pub key: String,
    pub content: String,
    pub item_count: usize,
}

/// Renders the weekly digest page for the static site.
pub struct DigestRenderer {
    config: DigestConfig,
}

impl DigestRenderer {
    pub fn new(config: DigestConfig) -> Self {
        Self { config }
    }

    /// Window the snapshot and render this week's page.
    pub fn render(&self, snapshot: &[Item], now: DateTime<Utc>) -> DigestPage {
        let window = WeeklyWindow::new(now, self.config.window_days);
        let items = window.select_or(snapshot, self.config.page_limit);
        let week = WeekKey::of(now);

        let mut lines = vec![
            "---".to_string(),
            format!("title: '{}'", week.page_title()),
            format!("date: {}", now.format("%Y-%m-%d")),
            "draft: false".to_string(),
            "---".to_string(),
            String::new(),
        ];

        let listed: Vec<String> = items
            .iter()
            .take(self.config.page_limit)
            .map(Item::bullet)
            .collect();
        if listed.is_empty() {
            lines.push("No items found this week.".to_string());
        }
        let item_count = listed.len();
        lines.extend(listed);

        DigestPage {
            key: week.page_key(),
            content: lines.join("\n"),
            item_count,
        }
    }
}
