// src/services/feeds.rs

//! Feed fetcher service.
//!
//! Fetches every catalog feed in order, normalizes entries into `Item`s and
//! builds the snapshot. A failing feed is logged and skipped.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{FeedSource, FetcherConfig, Item, Snapshot};
use crate::utils::http;

/// Summary of a fetch run.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub snapshot: Snapshot,
    pub source_total: usize,
    pub source_failures: usize,
    pub duplicates: usize,
}

/// Service for fetching the feed catalog.
pub struct FeedFetcher {
    client: Client,
    config: FetcherConfig,
    sources: Vec<FeedSource>,
}

impl FeedFetcher {
    /// Create a fetcher for the given catalog.
    pub fn new(config: FetcherConfig, sources: Vec<FeedSource>) -> Result<Self> {
        let client = http::create_feed_client(&config)?;
        Ok(Self {
            client,
            config,
            sources,
        })
    }

    /// Fetch and parse a single feed.
    pub async fn fetch_source(&self, source: &FeedSource) -> Result<Vec<Entry>> {
        let bytes = http::fetch_bytes(&self.client, &source.url)
            .await
            .map_err(|e| AppError::feed(&source.url, e))?;
        let feed = parser::parse(&bytes[..]).map_err(|e| AppError::feed(&source.url, e))?;
        Ok(feed.entries)
    }

    /// Fetch every feed in catalog order and build the snapshot.
    pub async fn run(&self, now: DateTime<Utc>) -> FetchOutcome {
        let mut collector = ItemCollector::new(self.config.max_entries_per_feed, now);
        let mut outcome = FetchOutcome {
            source_total: self.sources.len(),
            ..FetchOutcome::default()
        };

        for source in &self.sources {
            match self.fetch_source(source).await {
                Ok(entries) => {
                    let added = collector.add_entries(source, entries);
                    log::info!("{}: {} items", source.label, added);
                }
                Err(error) => {
                    outcome.source_failures += 1;
                    log::warn!("Failed to fetch {}: {}", source.url, error);
                }
            }
        }

        outcome.duplicates = collector.duplicates;
        outcome.snapshot = Snapshot::from_items(collector.into_items(), self.config.max_items);
        outcome
    }
}

/// Accumulates items across feeds, dropping repeated `(title, link)` pairs.
///
/// The first occurrence in catalog order wins.
#[derive(Debug)]
pub struct ItemCollector {
    max_entries: usize,
    now: DateTime<Utc>,
    seen: HashSet<(String, String)>,
    items: Vec<Item>,
    duplicates: usize,
}

impl ItemCollector {
    pub fn new(max_entries: usize, now: DateTime<Utc>) -> Self {
        Self {
            max_entries,
            now,
            seen: HashSet::new(),
            items: Vec::new(),
            duplicates: 0,
        }
    }

    /// Add the head of one feed. Returns the number of new items.
    pub fn add_entries(
        &mut self,
        source: &FeedSource,
        entries: impl IntoIterator<Item = Entry>,
    ) -> usize {
        let before = self.items.len();

        for entry in entries.into_iter().take(self.max_entries) {
            let Some(item) = entry_to_item(&entry, &source.label, self.now) else {
                continue;
            };
            let (title, link) = item.identity();
            if self.seen.insert((title.to_string(), link.to_string())) {
                self.items.push(item);
            } else {
                self.duplicates += 1;
                log::debug!("Skipping duplicate entry: {} ({})", item.title, item.link);
            }
        }

        self.items.len() - before
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

/// Normalize a feed entry. Entries without a title or link are dropped.
///
/// The title is trimmed; the link is kept exactly as the feed gives it.
pub fn entry_to_item(entry: &Entry, source: &str, now: DateTime<Utc>) -> Option<Item> {
    let link = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.as_str())
        .filter(|href| !href.trim().is_empty())?;

    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim())
        .filter(|t| !t.is_empty())?;

    let published = entry.published.or(entry.updated).unwrap_or(now);

    Some(Item {
        title: title.to_string(),
        link: link.to_string(),
        source: source.to_string(),
        published,
    })
}
