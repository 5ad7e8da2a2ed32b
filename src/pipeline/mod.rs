//! Pipeline entry points, one per scheduled stage.
//!
//! - `run_fetch`: Fetch the catalog and rewrite the snapshot
//! - `run_render`: Write this week's digest page from the snapshot
//! - `run_publish`: Post this week's digest to Dev.to
//! - `run_pipeline`: All three in order

pub mod fetch;
pub mod info;
pub mod pipeline;
pub mod publish;
pub mod render;
pub mod validate;

pub use fetch::run_fetch;
pub use info::run_info;
pub use pipeline::run_pipeline;
pub use publish::{preview_publish, run_publish};
pub use render::run_render;
pub use validate::run_validate;
