//! Local filesystem storage implementation.
//!
//! Paths are taken from `PathsConfig` and resolved against the site root.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{PathsConfig, Snapshot};
use crate::storage::{DigestStorage, WriteSummary};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    paths: PathsConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given site directory.
    pub fn new(root_dir: impl Into<PathBuf>, paths: PathsConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            paths,
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    fn page_key(&self, key: &str) -> String {
        format!("{}/{}.md", self.paths.digest_dir.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl DigestStorage for LocalStorage {
    async fn write_snapshot(&self, snapshot: &Snapshot) -> Result<WriteSummary> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let path = self.write_bytes(&self.paths.snapshot_file, &bytes).await?;
        Ok(WriteSummary {
            item_count: snapshot.len(),
            location: path.display().to_string(),
        })
    }

    async fn load_snapshot(&self, now: DateTime<Utc>) -> Result<Snapshot> {
        match self.read_bytes(&self.paths.snapshot_file).await {
            Ok(Some(bytes)) => Ok(Snapshot::decode_lenient(&bytes, now)),
            Ok(None) => {
                log::warn!("No snapshot found at {}", self.paths.snapshot_file);
                Ok(Snapshot::default())
            }
            Err(e) => {
                log::warn!(
                    "Cannot read snapshot {}: {}; treating as empty",
                    self.paths.snapshot_file,
                    e
                );
                Ok(Snapshot::default())
            }
        }
    }

    async fn write_page(&self, key: &str, content: &str) -> Result<String> {
        let path = self
            .write_bytes(&self.page_key(key), content.as_bytes())
            .await?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn storage(tmp: &TempDir) -> LocalStorage {
        LocalStorage::new(tmp.path(), PathsConfig::default())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 12, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_unreadable_snapshot_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        std::fs::create_dir_all(tmp.path().join("data/feeds.json")).unwrap();

        let loaded = storage.load_snapshot(now()).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_custom_paths_are_respected() {
        let tmp = TempDir::new().unwrap();
        let paths = PathsConfig {
            snapshot_file: "cache/items.json".to_string(),
            digest_dir: "site/weekly/".to_string(),
            ..PathsConfig::default()
        };
        let storage = LocalStorage::new(tmp.path(), paths);

        storage.write_snapshot(&Snapshot::default()).await.unwrap();
        storage.write_page("2026-w01", "page").await.unwrap();

        assert!(tmp.path().join("cache/items.json").exists());
        assert!(tmp.path().join("site/weekly/2026-w01.md").exists());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_creates_data_dir() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        let snapshot = Snapshot {
            items: vec![Item {
                title: "Attention".to_string(),
                link: "https://example.com/attention".to_string(),
                source: "Example".to_string(),
                published: now(),
            }],
        };

        let summary = storage.write_snapshot(&snapshot).await.unwrap();
        assert_eq!(summary.item_count, 1);
        assert!(tmp.path().join("data/feeds.json").exists());
        assert!(!tmp.path().join("data/feeds.tmp").exists());

        let loaded = storage.load_snapshot(now()).await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_missing_and_corrupt_snapshot_load_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        assert!(storage.load_snapshot(now()).await.unwrap().is_empty());

        storage.write_bytes("data/feeds.json", b"{\"items\": [").await.unwrap();
        assert!(storage.load_snapshot(now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_page_overwrites() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.write_page("2026-w42", "first").await.unwrap();
        let location = storage.write_page("2026-w42", "second").await.unwrap();

        assert!(location.ends_with("2026-w42.md"));
        let content = std::fs::read_to_string(tmp.path().join("content/digest/2026-w42.md")).unwrap();
        assert_eq!(content, "second");
    }
}
