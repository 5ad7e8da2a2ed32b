//! Storage abstractions for the digest pipeline.
//!
//! The fetch stage owns the snapshot; render and publish only read it.
//!
//! ## Directory Structure
//!
//! ```text
//! {site}/
//! ├── data/
//! │   └── feeds.json        # Snapshot, rewritten on every fetch
//! └── content/
//!     └── digest/
//!         ├── 2026-w41.md   # One page per ISO week
//!         └── 2026-w42.md
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Snapshot;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of items written
    pub item_count: usize,
    /// Where the data landed
    pub location: String,
}

/// Trait for snapshot and page storage backends.
#[async_trait]
pub trait DigestStorage: Send + Sync {
    /// Replace the snapshot. Either the whole snapshot is written or nothing is.
    async fn write_snapshot(&self, snapshot: &Snapshot) -> Result<WriteSummary>;

    /// Load the snapshot. A missing or corrupt snapshot loads as empty.
    ///
    /// `now` stands in for timestamps that cannot be parsed.
    async fn load_snapshot(&self, now: DateTime<Utc>) -> Result<Snapshot>;

    /// Write a digest page under `key`, replacing any existing page.
    async fn write_page(&self, key: &str, content: &str) -> Result<String>;
}
