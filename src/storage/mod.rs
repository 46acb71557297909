//! Storage abstractions for run-to-run state.
//!
//! Three pieces of state survive between runs:
//!
//! ```text
//! {storage_dir}/
//! ├── news_log.json         # Seen-set: JSON array of recorded article URLs
//! ├── README.md             # Document: static region + accumulated batches
//! └── .news_pending.json    # Journal: batch being committed (usually absent)
//! ```
//!
//! Every write replaces the whole file through a temporary sibling and a
//! rename, so readers only ever observe the old or the new content.

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::SeenSet;

// Re-export for convenience
pub use local::LocalStorage;

/// Durable record of article identifiers already processed.
#[async_trait]
pub trait SeenSetStore: Send + Sync {
    /// All recorded identifiers. Absence or corruption yields an empty set.
    async fn load_seen(&self) -> SeenSet;

    /// Append identifiers to the store, as given.
    async fn record(&self, identifiers: &[String]) -> Result<()>;
}

/// The persisted markdown document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full document text, or `None` when there is no readable document.
    async fn read_document(&self) -> Option<String>;

    /// Replace the whole document.
    async fn write_document(&self, content: &str) -> Result<()>;
}

/// Write-ahead record of a batch whose commit has started.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingBatch {
    /// When the commit started
    pub created_at: DateTime<Utc>,
    /// Identifiers to be recorded
    pub identifiers: Vec<String>,
    /// Formatted block to be merged into the document
    pub block: String,
}

impl PendingBatch {
    pub fn new(identifiers: Vec<String>, block: String) -> Self {
        Self {
            created_at: Utc::now(),
            identifiers,
            block,
        }
    }
}

/// Storage for the pending-batch journal.
#[async_trait]
pub trait BatchJournal: Send + Sync {
    /// The pending batch, if an earlier commit did not finish.
    async fn read_pending(&self) -> Option<PendingBatch>;

    async fn write_pending(&self, batch: &PendingBatch) -> Result<()>;

    /// Remove the journal once both writes are done.
    async fn clear_pending(&self) -> Result<()>;
}
