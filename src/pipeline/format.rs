//! Document formatter.
//!
//! Renders a batch of items into a markdown block. Each item becomes:
//!
//! ```text
//!
//!
//! ---
//!
//! ## {title}
//!
//!
//! *Published on: {date}*
//!
//! {body}
//!
//! ![Image]({image_url})      <- only when the item has an image
//! ```
//!
//! Output depends only on the items and the configuration.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::models::{DocumentConfig, Item};

/// Formatter configured from the `[document]` section.
#[derive(Debug, Clone)]
pub struct DocumentFormatter {
    date_input_format: String,
    date_output_format: String,
    image_label: String,
    show_summary: bool,
}

impl DocumentFormatter {
    pub fn new(config: &DocumentConfig) -> Self {
        Self {
            date_input_format: config.date_input_format.clone(),
            date_output_format: config.date_output_format.clone(),
            image_label: config.image_label.clone(),
            show_summary: config.show_summary,
        }
    }

    /// Render all items in order. An empty batch renders as `""`.
    pub fn format_batch(&self, items: &[Item]) -> String {
        let mut out = String::new();
        for item in items {
            self.format_item(item, &mut out);
        }
        out
    }

    fn format_item(&self, item: &Item, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = write!(out, "\n\n---\n\n");
        let _ = write!(out, "## {}\n\n", item.title);
        let _ = write!(
            out,
            "\n*Published on: {}*\n\n",
            self.display_date(&item.published_at)
        );
        if self.show_summary {
            if let Some(summary) = item.summary.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(out, "_{summary}_\n\n");
            }
        }
        out.push_str(&item.body);

        if let Some(url) = item.image() {
            let _ = write!(out, "\n\n![{}]({})\n\n", self.image_label, url);
        }
    }

    /// Reformatted date, or the raw text when it does not parse or render.
    pub fn display_date(&self, raw: &str) -> String {
        let parsed = match NaiveDateTime::parse_from_str(raw.trim(), &self.date_input_format) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("Keeping raw date '{}': {}", raw, e);
                return raw.to_string();
            }
        };

        let mut rendered = String::new();
        if write!(rendered, "{}", parsed.format(&self.date_output_format)).is_err() {
            log::warn!(
                "Date output format '{}' is invalid, keeping raw date",
                self.date_output_format
            );
            return raw.to_string();
        }
        rendered
    }
}

impl Default for DocumentFormatter {
    fn default() -> Self {
        Self::new(&DocumentConfig::default())
    }
}
