// src/error.rs

//! Unified error handling for the digest application.

use std::fmt;

use thiserror::Error;

/// Result type alias for digest operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The listing page could not be obtained; nothing to process
    #[error("Listing fetch failed for {url}: {message}")]
    Listing { url: String, message: String },

    /// A required field was missing from a listing row
    #[error("Missing required field '{field}'")]
    Extraction { field: &'static str },

    /// The seen-set store exists but cannot be used
    #[error("Seen-set store error at {path}: {message}")]
    Store { path: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a listing fetch error.
    pub fn listing(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Listing {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing-field extraction error.
    pub fn missing(field: &'static str) -> Self {
        Self::Extraction { field }
    }

    /// Create a store error with the offending path.
    pub fn store(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Store {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
