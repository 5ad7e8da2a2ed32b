//! Service layer for the digest pipeline.
//!
//! This module contains the business logic for:
//! - Feed retrieval and normalization (`FeedFetcher`)
//! - The trailing weekly window (`WeeklyWindow`)
//! - Digest page rendering (`DigestRenderer`)
//! - Weekly posting to Dev.to (`WeeklyPublisher`, `DevToClient`)

mod digest;
mod feeds;
mod platform;
mod publisher;
mod window;

pub use digest::{DigestPage, DigestRenderer};
pub use feeds::{FeedFetcher, FetchOutcome, ItemCollector, entry_to_item};
pub use platform::{ArticlePlatform, DevToClient, NewArticle};
pub use publisher::{Gate, PublishOutcome, WeeklyPublisher};
pub use window::WeeklyWindow;
