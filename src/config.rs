// src/config.rs

//! Configuration loading utilities.
//!
//! Besides the tool's own `Config`, the publisher needs two inputs that live
//! outside it: the site's `baseURL` (read from the static site's TOML
//! configuration) and the process environment.

use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Environment variable that forces publishing on any weekday.
pub const FORCE_ENV: &str = "FORCE_WEEKLY_POST";

/// Environment variable holding the Dev.to API key.
pub const API_KEY_ENV: &str = "DEVTO_API_KEY";

/// Publisher inputs taken from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishEnv {
    /// Publish regardless of weekday
    pub force: bool,
    /// API credential; `None` when unset or blank
    pub api_key: Option<String>,
}

impl PublishEnv {
    /// Read the publisher environment of the current process.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let force = lookup(FORCE_ENV).as_deref() == Some("1");
        let api_key = lookup(API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self { force, api_key }
    }
}

/// The part of a Hugo site configuration we read.
#[derive(Debug, Default, Deserialize)]
struct SiteConfig {
    #[serde(rename = "baseURL", alias = "baseurl", alias = "baseUrl", default)]
    base_url: Option<String>,
}

/// Resolve the site's base URL.
///
/// Candidates are tried in order; the first one that exists, parses, and
/// defines `baseURL` wins. Falls back to an empty string.
pub fn resolve_base_url(root: &Path, candidates: &[String]) -> String {
    for name in candidates {
        let path = root.join(name);
        match read_site_config(&path) {
            Ok(Some(site)) => {
                if let Some(url) = site.base_url {
                    log::debug!("Using baseURL from {}", path.display());
                    return url.trim().to_string();
                }
            }
            Ok(None) => continue,
            Err(e) => log::warn!("Skipping site config {}: {}", path.display(), e),
        }
    }
    String::new()
}

fn read_site_config(path: &Path) -> Result<Option<SiteConfig>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(toml::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Io(e)),
    }
}

/// Load and validate the tool configuration.
///
/// Falls back to defaults if the file is missing or unreadable.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path);
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration: {e}")))?;
    Ok(config)
}
