// src/lib.rs

//! news-digest library
//!
//! Reads the latest articles from a news site and merges the ones not seen
//! before into a markdown document, below its author-maintained header.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
