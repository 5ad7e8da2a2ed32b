//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Upper bound for `digest.window_days`.
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and feed retrieval settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Digest page rendering settings
    #[serde(default)]
    pub digest: DigestConfig,

    /// External publishing settings
    #[serde(default)]
    pub publisher: PublisherConfig,

    /// File locations relative to the site root
    #[serde(default)]
    pub paths: PathsConfig,

    /// Feed catalog, fetched in this order
    #[serde(default = "defaults::default_feeds")]
    pub feeds: Vec<FeedSource>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.max_entries_per_feed == 0 {
            return Err(AppError::validation(
                "fetcher.max_entries_per_feed must be > 0",
            ));
        }
        if self.fetcher.max_items == 0 {
            return Err(AppError::validation("fetcher.max_items must be > 0"));
        }
        if !(1..=MAX_WINDOW_DAYS).contains(&self.digest.window_days) {
            return Err(AppError::validation(format!(
                "digest.window_days must be between 1 and {MAX_WINDOW_DAYS}"
            )));
        }
        if self.digest.page_limit == 0 {
            return Err(AppError::validation("digest.page_limit must be > 0"));
        }
        if self.publisher.page_size == 0 {
            return Err(AppError::validation("publisher.page_size must be > 0"));
        }
        if self.publisher.post_limit == 0 {
            return Err(AppError::validation("publisher.post_limit must be > 0"));
        }
        if self.publisher.list_timeout_secs == 0 || self.publisher.create_timeout_secs == 0 {
            return Err(AppError::validation("publisher timeouts must be > 0"));
        }
        Url::parse(&self.publisher.api_base)
            .map_err(|e| AppError::validation(format!("publisher.api_base: {e}")))?;
        if self.feeds.is_empty() {
            return Err(AppError::validation("No feeds defined"));
        }
        for feed in &self.feeds {
            if feed.label.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Feed {} has an empty label",
                    feed.url
                )));
            }
            Url::parse(&feed.url)
                .map_err(|e| AppError::validation(format!("Feed URL {}: {e}", feed.url)))?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            digest: DigestConfig::default(),
            publisher: PublisherConfig::default(),
            paths: PathsConfig::default(),
            feeds: defaults::default_feeds(),
        }
    }
}

/// A feed in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    /// RSS/Atom document URL
    pub url: String,

    /// Source name shown next to each item
    pub label: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

/// HTTP client and feed retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Entries taken from the head of each feed
    #[serde(default = "defaults::max_entries_per_feed")]
    pub max_entries_per_feed: usize,

    /// Items kept in the snapshot
    #[serde(default = "defaults::max_items")]
    pub max_items: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_entries_per_feed: defaults::max_entries_per_feed(),
            max_items: defaults::max_items(),
        }
    }
}

/// Digest page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Length of the trailing window in days
    #[serde(default = "defaults::window_days")]
    pub window_days: i64,

    /// Maximum items listed on a page
    #[serde(default = "defaults::page_limit")]
    pub page_limit: usize,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            window_days: defaults::window_days(),
            page_limit: defaults::page_limit(),
        }
    }
}

/// Dev.to publishing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// API root, without trailing slash
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    /// Articles requested per listing page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Maximum items listed in a post
    #[serde(default = "defaults::post_limit")]
    pub post_limit: usize,

    #[serde(default = "defaults::list_timeout")]
    pub list_timeout_secs: u64,

    #[serde(default = "defaults::create_timeout")]
    pub create_timeout_secs: u64,

    #[serde(default = "defaults::tags")]
    pub tags: Vec<String>,

    #[serde(default = "defaults::series")]
    pub series: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
            page_size: defaults::page_size(),
            post_limit: defaults::post_limit(),
            list_timeout_secs: defaults::list_timeout(),
            create_timeout_secs: defaults::create_timeout(),
            tags: defaults::tags(),
            series: defaults::series(),
        }
    }
}

/// File locations, relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::snapshot_file")]
    pub snapshot_file: String,

    #[serde(default = "defaults::digest_dir")]
    pub digest_dir: String,

    /// Site configuration files searched for `baseURL`, highest priority first
    #[serde(default = "defaults::site_config_files")]
    pub site_config_files: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            snapshot_file: defaults::snapshot_file(),
            digest_dir: defaults::digest_dir(),
            site_config_files: defaults::site_config_files(),
        }
    }
}

mod defaults {
    use super::FeedSource;

    // Fetcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; feed-digest/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_entries_per_feed() -> usize {
        50
    }
    pub fn max_items() -> usize {
        200
    }

    // Digest defaults
    pub fn window_days() -> i64 {
        7
    }
    pub fn page_limit() -> usize {
        30
    }

    // Publisher defaults
    pub fn api_base() -> String {
        "https://dev.to/api".into()
    }
    pub fn page_size() -> usize {
        100
    }
    pub fn post_limit() -> usize {
        15
    }
    pub fn list_timeout() -> u64 {
        30
    }
    pub fn create_timeout() -> u64 {
        60
    }
    pub fn tags() -> Vec<String> {
        vec![
            "ai".into(),
            "machine-learning".into(),
            "software".into(),
            "strategy".into(),
        ]
    }
    pub fn series() -> String {
        "weekly-digest".into()
    }

    // Path defaults
    pub fn snapshot_file() -> String {
        "data/feeds.json".into()
    }
    pub fn digest_dir() -> String {
        "content/digest".into()
    }
    pub fn site_config_files() -> Vec<String> {
        vec!["hugo.toml".into(), "config.toml".into()]
    }

    // Feed catalog
    pub fn default_feeds() -> Vec<FeedSource> {
        [
            ("https://ai.googleblog.com/atom.xml", "Google AI"),
            ("https://thegradient.pub/rss/", "The Gradient"),
            (
                "https://machinelearningmastery.com/blog/feed/",
                "Machine Learning Mastery",
            ),
            (
                "https://aws.amazon.com/blogs/machine-learning/feed/",
                "AWS ML Blog",
            ),
            ("https://stackoverflow.blog/feed/", "Stack Overflow Blog"),
            ("https://www.oreilly.com/radar/feed/", "O'Reilly Radar"),
            ("http://export.arxiv.org/rss/cs.LG", "arXiv cs.LG"),
            ("https://deepmind.google/discover/rss/", "Google DeepMind"),
            (
                "https://www.microsoft.com/en-us/research/feed/",
                "Microsoft Research",
            ),
            (
                "https://blogs.nvidia.com/blog/category/ai/feed/",
                "NVIDIA AI Blog",
            ),
            (
                "https://www.technologyreview.com/topic/artificial-intelligence/feed/",
                "MIT Tech Review AI",
            ),
            ("https://engineering.atspotify.com/feed/", "Spotify Engineering"),
            ("https://dropbox.tech/feed.xml", "Dropbox Tech"),
            ("https://lilianweng.github.io/lil-log/atom.xml", "Lilian Weng"),
            ("https://hai.stanford.edu/news/rss.xml", "Stanford HAI"),
            ("https://blog.paperswithcode.com/rss/", "Papers with Code Blog"),
            (
                "https://www.thoughtworks.com/insights/rss.xml",
                "Thoughtworks Insights",
            ),
            ("https://openai.com/blog/rss", "OpenAI Blog"),
            ("https://ai.facebook.com/blog/rss/", "Meta AI Blog"),
            ("https://research.google/blog/rss/", "Google Research"),
        ]
        .into_iter()
        .map(|(url, label)| FeedSource::new(url, label))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetcher.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_window() {
        let mut config = Config::default();
        config.digest.window_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_window() {
        let mut config = Config::default();
        config.digest.window_days = 1_000_000_000_000;
        assert!(config.validate().is_err());

        config.digest.window_days = MAX_WINDOW_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_feed_url() {
        let mut config = Config::default();
        config.feeds = vec![FeedSource::new("not a url", "Broken")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_catalog_has_twenty_feeds() {
        let config = Config::default();
        assert_eq!(config.feeds.len(), 20);
        assert_eq!(config.feeds[0].label, "Google AI");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [digest]
            page_limit = 10

            [[feeds]]
            url = "https://example.com/feed.xml"
            label = "Example"
            "#,
        )
        .unwrap();

        assert_eq!(config.digest.page_limit, 10);
        assert_eq!(config.digest.window_days, 7);
        assert_eq!(config.fetcher.max_items, 200);
        assert_eq!(config.feeds, vec![FeedSource::new("https://example.com/feed.xml", "Example")]);
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/feed-digest.toml");
        assert_eq!(config.publisher.post_limit, 15);
    }
}
