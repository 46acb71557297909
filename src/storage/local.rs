//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml           # Digest configuration
//! ├── news_log.json         # Seen-set (paths.seen_log)
//! ├── README.md             # Document (paths.document)
//! └── .news_pending.json    # Pending batch (paths.journal)
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{PathsConfig, SeenSet};
use crate::storage::{BatchJournal, DocumentStore, PendingBatch, SeenSetStore};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    paths: PathsConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, paths: PathsConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            paths,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = self.path(&format!("{key}.tmp"));
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
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

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SeenSetStore for LocalStorage {
    async fn load_seen(&self) -> SeenSet {
        match self.read_json::<Vec<String>>(&self.paths.seen_log).await {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => {
                log::info!("No {} found, starting with empty history", self.paths.seen_log);
                SeenSet::new()
            }
            Err(e) => {
                log::warn!(
                    "Unreadable seen-set {}: {}. Treating as empty history.",
                    self.paths.seen_log,
                    e
                );
                SeenSet::new()
            }
        }
    }

    async fn record(&self, identifiers: &[String]) -> Result<()> {
        let key = &self.paths.seen_log;
        // Refuse to replace a store we cannot parse.
        let mut recorded: Vec<String> = self
            .read_json(key)
            .await
            .map_err(|e| AppError::store(self.path(key).display().to_string(), e))?
            .unwrap_or_default();

        recorded.extend(identifiers.iter().cloned());
        self.write_json(key, &recorded).await?;
        log::debug!(
            "Recorded {} identifiers ({} total) in {}",
            identifiers.len(),
            recorded.len(),
            key
        );
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for LocalStorage {
    async fn read_document(&self) -> Option<String> {
        let key = &self.paths.document;
        match self.read_bytes(key).await {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => Some(text),
                Err(e) => {
                    log::warn!("{} is not valid UTF-8 ({}), treating as absent", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}. Treating as absent.", key, e);
                None
            }
        }
    }

    async fn write_document(&self, content: &str) -> Result<()> {
        self.write_bytes(&self.paths.document, content.as_bytes())
            .await
    }
}

#[async_trait]
impl BatchJournal for LocalStorage {
    async fn read_pending(&self) -> Option<PendingBatch> {
        match self.read_json(&self.paths.journal).await {
            Ok(batch) => batch,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable journal {}: {}",
                    self.paths.journal,
                    e
                );
                None
            }
        }
    }

    async fn write_pending(&self, batch: &PendingBatch) -> Result<()> {
        self.write_json(&self.paths.journal, batch).await
    }

    async fn clear_pending(&self) -> Result<()> {
        match tokio::fs::remove_file(self.path(&self.paths.journal)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
