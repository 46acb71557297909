//! Service layer for the digest application.
//!
//! This module contains the site-facing logic:
//! - HTML extraction (`PageExtractor`)
//! - Listing and article fetching (`SourceReader`)

mod extract;
mod source;

pub use extract::PageExtractor;
pub use source::{ReadOutcome, SourceReader};
