// src/models/mod.rs

//! Domain models for the digest application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod item;
mod selectors;

// Re-export all public types
pub use config::{
    CleaningConfig, Config, CrawlerConfig, DocumentConfig, PathsConfig, Replacement,
    SourceConfig, normalize_whitespace,
};
pub use item::{Item, ListingEntry, SeenSet};
pub use selectors::SiteSelectors;
