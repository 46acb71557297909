//! Pipeline stages for a digest run.
//!
//! - `filter`: drop articles recorded by earlier runs
//! - `format`: render a batch as markdown
//! - `sync`: merge a batch into the document
//! - `run`: orchestrate one run with a journaled commit

pub mod filter;
pub mod format;
pub mod run;
pub mod sync;

pub use filter::{filter_new, identifiers};
pub use format::DocumentFormatter;
pub use run::{RunOptions, RunPhase, RunReport, RunStorage, recover_pending, run_sync};
pub use sync::{DocumentParts, DocumentSynchronizer};
