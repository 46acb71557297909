//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SiteSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where the article listing lives
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Extraction selectors for the news site
    #[serde(default)]
    pub selectors: SiteSelectors,

    /// Text preprocessing settings
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Markdown document layout
    #[serde(default)]
    pub document: DocumentConfig,

    /// Persisted file names
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.source.listing_url).map_err(|e| {
            AppError::validation(format!(
                "source.listing_url '{}' is not a valid URL: {e}",
                self.source.listing_url
            ))
        })?;
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        for (key, css) in self.selectors.css_entries() {
            scraper::Selector::parse(css).map_err(|e| {
                AppError::validation(format!("selectors.{key} '{css}' is invalid: {e:?}"))
            })?;
        }

        for (key, fmt) in [
            ("date_input_format", &self.document.date_input_format),
            ("date_output_format", &self.document.date_output_format),
        ] {
            let invalid = chrono::format::StrftimeItems::new(fmt)
                .any(|item| matches!(item, chrono::format::Item::Error));
            if invalid {
                return Err(AppError::validation(format!(
                    "document.{key} '{fmt}' is not a valid chrono format"
                )));
            }
        }

        let start = self.document.static_start_marker.trim();
        let end = self.document.static_end_marker.trim();
        if start.is_empty() || end.is_empty() {
            return Err(AppError::validation("document static markers must not be empty"));
        }
        if start == end {
            return Err(AppError::validation(
                "document.static_start_marker and static_end_marker must differ",
            ));
        }
        Ok(())
    }
}

/// Remote source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Listing page with the latest articles
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: defaults::listing_url(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay after each detail request in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent detail requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Text cleaning/preprocessing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Patterns to remove from titles
    #[serde(default)]
    pub title_remove_patterns: Vec<String>,

    /// Patterns to remove from dates
    #[serde(default = "defaults::date_remove_patterns")]
    pub date_remove_patterns: Vec<String>,

    /// Text replacements to apply to dates
    #[serde(default)]
    pub date_replacements: Vec<Replacement>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            title_remove_patterns: Vec::new(),
            date_remove_patterns: defaults::date_remove_patterns(),
            date_replacements: Vec::new(),
        }
    }
}

impl CleaningConfig {
    /// Clean text by removing patterns and applying replacements.
    fn clean(&self, text: &str, patterns: &[String], replacements: &[Replacement]) -> String {
        let mut result = normalize_whitespace(text);

        for pattern in patterns {
            result = result.replace(pattern, "");
        }

        for r in replacements {
            result = result.replace(&r.from, &r.to);
        }

        normalize_whitespace(&result)
    }

    /// Clean a title string.
    pub fn clean_title(&self, text: &str) -> String {
        self.clean(text, &self.title_remove_patterns, &[])
    }

    /// Clean a date string.
    pub fn clean_date(&self, text: &str) -> String {
        self.clean(text, &self.date_remove_patterns, &self.date_replacements)
    }
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A text replacement rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// Layout of the generated markdown document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Marker opening the author-maintained region
    #[serde(default = "defaults::static_start")]
    pub static_start_marker: String,

    /// Marker closing the author-maintained region
    #[serde(default = "defaults::static_end")]
    pub static_end_marker: String,

    /// chrono format of the site's raw dates
    #[serde(default = "defaults::date_input_format")]
    pub date_input_format: String,

    /// chrono format used in the published line
    #[serde(default = "defaults::date_output_format")]
    pub date_output_format: String,

    /// Alt text for the image line
    #[serde(default = "defaults::image_label")]
    pub image_label: String,

    /// Body used when the article page has no content container
    #[serde(default = "defaults::missing_body")]
    pub missing_body_placeholder: String,

    /// Render the listing summary under the date line
    #[serde(default)]
    pub show_summary: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            static_start_marker: defaults::static_start(),
            static_end_marker: defaults::static_end(),
            date_input_format: defaults::date_input_format(),
            date_output_format: defaults::date_output_format(),
            image_label: defaults::image_label(),
            missing_body_placeholder: defaults::missing_body(),
            show_summary: false,
        }
    }
}

/// File names, relative to the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON list of already recorded article URLs
    #[serde(default = "defaults::seen_log")]
    pub seen_log: String,

    /// Markdown document receiving new articles
    #[serde(default = "defaults::document")]
    pub document: String,

    /// Pending-batch journal used to finish interrupted commits
    #[serde(default = "defaults::journal")]
    pub journal: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            seen_log: defaults::seen_log(),
            document: defaults::document(),
            journal: defaults::journal(),
        }
    }
}

impl PathsConfig {
    /// Absolute path of the document under the given storage directory.
    pub fn document_path(&self, root: &Path) -> PathBuf {
        root.join(&self.document)
    }
}

mod defaults {
    // Source defaults
    pub fn listing_url() -> String {
        "https://www.ada.lk/latest-news/11".into()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; news-digest/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        0
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Cleaning defaults
    pub fn date_remove_patterns() -> Vec<String> {
        vec!["â€¢".into(), "•".into()]
    }

    // Document defaults
    pub fn static_start() -> String {
        "<!-- STATIC-START -->".into()
    }
    pub fn static_end() -> String {
        "<!-- STATIC-END -->".into()
    }
    pub fn date_input_format() -> String {
        "%d %m %Y %H:%M:%S".into()
    }
    pub fn date_output_format() -> String {
        "%B %d, %Y, %I:%M %p".into()
    }
    pub fn image_label() -> String {
        "Image".into()
    }
    pub fn missing_body() -> String {
        "Full content not found.".into()
    }

    // Path defaults
    pub fn seen_log() -> String {
        "news_log.json".into()
    }
    pub fn document() -> String {
        "README.md".into()
    }
    pub fn journal() -> String {
        ".news_pending.json".into()
    }
}
