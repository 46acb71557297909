// src/pipeline/run.rs

//! One synchronization run.
//!
//! ```text
//! IDLE → READING → FILTERING ─(nothing new)→ IDLE
//!                      └→ FORMATTING → SYNCHRONIZING → RECORDING → IDLE
//! ```
//!
//! The commit is journaled: the batch is written to the pending journal,
//! then the document is synchronized, then the identifiers are recorded,
//! then the journal is removed. A journal left by an interrupted run is
//! replayed before the next read, so the two writes always end up applied
//! together and never twice.

use std::fmt;

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::{DocumentFormatter, DocumentSynchronizer, filter_new, identifiers};
use crate::services::SourceReader;
use crate::storage::{BatchJournal, DocumentStore, PendingBatch, SeenSetStore};
use crate::utils::http::PageFetcher;

/// Everything a run persists to.
pub trait RunStorage: SeenSetStore + DocumentStore + BatchJournal {}

impl<T: SeenSetStore + DocumentStore + BatchJournal> RunStorage for T {}

/// Phase of a run, logged at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Reading,
    Filtering,
    Formatting,
    Synchronizing,
    Recording,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "IDLE",
            RunPhase::Reading => "READING",
            RunPhase::Filtering => "FILTERING",
            RunPhase::Formatting => "FORMATTING",
            RunPhase::Synchronizing => "SYNCHRONIZING",
            RunPhase::Recording => "RECORDING",
        };
        f.write_str(name)
    }
}

/// Options for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Format the batch but write nothing
    pub dry_run: bool,
}

/// Summary of a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Rows on the listing page
    pub listed: usize,
    /// Rows dropped for missing fields
    pub skipped: usize,
    /// Articles whose page could not be fetched
    pub detail_failures: usize,
    /// Items in the new batch
    pub new_items: usize,
    /// Identifiers recorded by this run, including a replayed journal
    pub recorded: usize,
    /// Whether an interrupted commit was completed first
    pub recovered: bool,
    /// Formatted block of the new batch (empty when nothing was new)
    pub block: String,
}

/// Run the pipeline once against the given fetcher and storage.
pub async fn run_sync<F, S>(
    config: &Config,
    fetcher: &F,
    storage: &S,
    options: RunOptions,
) -> Result<RunReport>
where
    F: PageFetcher,
    S: RunStorage,
{
    let synchronizer = DocumentSynchronizer::new(&config.document);
    let formatter = DocumentFormatter::new(&config.document);
    let mut report = RunReport::default();

    if !options.dry_run {
        if let Some(recorded) = recover_pending(&synchronizer, storage).await? {
            report.recovered = true;
            report.recorded += recorded;
        }
    }

    transition(RunPhase::Reading);
    let reader = SourceReader::new(config, fetcher)?;
    let outcome = reader.read().await?;
    report.listed = outcome.listed;
    report.skipped = outcome.skipped;
    report.detail_failures = outcome.detail_failures;

    transition(RunPhase::Filtering);
    let seen = storage.load_seen().await;
    let fresh = filter_new(outcome.items, &seen);
    report.new_items = fresh.len();
    log::info!(
        "{} of {} articles are new ({} already recorded)",
        fresh.len(),
        report.listed - report.skipped,
        seen.len()
    );

    if fresh.is_empty() {
        transition(RunPhase::Idle);
        return Ok(report);
    }

    transition(RunPhase::Formatting);
    report.block = formatter.format_batch(&fresh);
    if options.dry_run {
        log::info!("Dry run: {} articles formatted, nothing written", fresh.len());
        transition(RunPhase::Idle);
        return Ok(report);
    }

    let batch = PendingBatch::new(identifiers(&fresh), report.block.clone());
    storage.write_pending(&batch).await?;

    transition(RunPhase::Synchronizing);
    synchronizer.apply(storage, &batch.block).await?;

    transition(RunPhase::Recording);
    storage.record(&batch.identifiers).await?;
    storage.clear_pending().await?;
    report.recorded += batch.identifiers.len();

    transition(RunPhase::Idle);
    Ok(report)
}

/// Finish a commit an earlier run started but did not complete.
///
/// Returns the number of identifiers recorded, or `None` without a journal.
/// The block counts as applied when its text is already in the document, even
/// if it got there under other identifiers.
pub async fn recover_pending<S: RunStorage + ?Sized>(
    synchronizer: &DocumentSynchronizer,
    storage: &S,
) -> Result<Option<usize>> {
    let Some(batch) = storage.read_pending().await else {
        return Ok(None);
    };
    log::warn!(
        "Completing interrupted commit of {} articles from {}",
        batch.identifiers.len(),
        batch.created_at
    );

    let document = storage.read_document().await;
    let applied = document
        .as_deref()
        .is_some_and(|doc| synchronizer.contains_block(doc, &batch.block));
    if !applied {
        synchronizer.apply(storage, &batch.block).await?;
    }

    let seen = storage.load_seen().await;
    let missing: Vec<String> = batch
        .identifiers
        .iter()
        .filter(|id| !seen.contains(id))
        .cloned()
        .collect();
    if !missing.is_empty() {
        storage.record(&missing).await?;
    }

    storage.clear_pending().await?;
    Ok(Some(missing.len()))
}

fn transition(phase: RunPhase) {
    log::debug!("Run phase: {}", phase);
}
