// src/models/mod.rs

//! Domain models for the digest pipeline.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod item;
mod week;

// Re-export all public types
pub use config::{MAX_WINDOW_DAYS, Config, DigestConfig, FeedSource, FetcherConfig, PathsConfig, PublisherConfig};
pub use item::{Item, Snapshot, parse_timestamp};
pub use week::WeekKey;
