//! Document synchronizer.
//!
//! Merges a formatted block into the persisted document:
//!
//! ```text
//! <static prefix, up to and including the end marker>   (verbatim)
//!
//! <new block>                                           (newest batch)
//!
//! <previous dynamic content>                            (older batches)
//! ```
//!
//! The static region exists only when the start marker is followed by the
//! end marker. Otherwise the whole prior document is dynamic content.

use crate::error::Result;
use crate::models::DocumentConfig;
use crate::storage::DocumentStore;

/// A prior document split at the static region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentParts<'a> {
    /// Text up to and including the end marker, if both markers exist.
    pub static_prefix: Option<&'a str>,
    /// Everything after the static region, trimmed.
    pub dynamic_suffix: &'a str,
}

/// Merges new batches below the static region of the document.
#[derive(Debug, Clone)]
pub struct DocumentSynchronizer {
    start_marker: String,
    end_marker: String,
}

impl DocumentSynchronizer {
    pub fn new(config: &DocumentConfig) -> Self {
        Self {
            start_marker: config.static_start_marker.clone(),
            end_marker: config.static_end_marker.clone(),
        }
    }

    /// Split a document at the first end marker following the start marker.
    pub fn split<'a>(&self, document: &'a str) -> DocumentParts<'a> {
        match self.static_end(document) {
            Some(end) => {
                DocumentParts {
                    static_prefix: Some(&document[..end]),
                    dynamic_suffix: document[end..].trim(),
                }
            }
            None => DocumentParts {
                static_prefix: None,
                dynamic_suffix: document.trim(),
            },
        }
    }

    /// Byte offset just past the end marker that closes the static region.
    fn static_end(&self, document: &str) -> Option<usize> {
        let start = document.find(&self.start_marker)? + self.start_marker.len();
        let pos = document[start..].find(&self.end_marker)?;
        Some(start + pos + self.end_marker.len())
    }

    /// Compose the updated document text.
    ///
    /// Parts are joined by a blank line; empty parts are left out and the
    /// result ends with a newline.
    pub fn compose(&self, prior: Option<&str>, block: &str) -> String {
        let block = block.trim();
        let parts = prior.map(|doc| self.split(doc));

        let mut sections: Vec<&str> = Vec::with_capacity(3);
        if let Some(prefix) = parts.as_ref().and_then(|p| p.static_prefix) {
            sections.push(prefix);
        }
        if !block.is_empty() {
            sections.push(block);
        }
        if let Some(suffix) = parts.as_ref().map(|p| p.dynamic_suffix) {
            if !suffix.is_empty() {
                sections.push(suffix);
            }
        }

        let mut out = sections.join("\n\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Whether `document` already holds `block` (used to replay a journal).
    ///
    /// This is a text match, so an identical block already present under
    /// other identifiers also counts as applied.
    pub fn contains_block(&self, document: &str, block: &str) -> bool {
        let block = block.trim();
        block.is_empty() || document.contains(block)
    }

    /// Read the document, merge `block` and write it back in one replace.
    pub async fn apply<D: DocumentStore + ?Sized>(&self, store: &D, block: &str) -> Result<()> {
        let prior = store.read_document().await;
        if prior.is_none() {
            log::info!("No existing document, creating a new one");
        }
        let updated = self.compose(prior.as_deref(), block);
        store.write_document(&updated).await
    }
}

impl Default for DocumentSynchronizer {
    fn default() -> Self {
        Self::new(&DocumentConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, PathsConfig};
    use crate::pipeline::DocumentFormatter;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    const STATIC: &str = "# Daily News\n<!-- STATIC-START -->\nAuthor notes, keep me.\n<!-- STATIC-END -->";

    fn block_for(titles: &[&str]) -> String {
        let items: Vec<Item> = titles
            .iter()
            .map(|t| Item {
                identifier: format!("https://example.com/{t}"),
                title: t.to_string(),
                published_at: "raw date".to_string(),
                summary: None,
                body: format!("{t} body"),
                image_url: None,
            })
            .collect();
        DocumentFormatter::default().format_batch(&items)
    }

    #[test]
    fn test_split_with_and_without_marker() {
        let sync = DocumentSynchronizer::default();
        let doc = format!("{STATIC}\n\n  older entries  \n");
        let parts = sync.split(&doc);
        assert_eq!(parts.static_prefix, Some(STATIC));
        assert_eq!(parts.dynamic_suffix, "older entries");

        let parts = sync.split("  just content ");
        assert_eq!(parts.static_prefix, None);
        assert_eq!(parts.dynamic_suffix, "just content");
    }

    #[test]
    fn test_end_marker_alone_is_not_a_static_region() {
        let sync = DocumentSynchronizer::default();
        let doc = "Notes\n<!-- STATIC-END -->\nolder entries";
        let parts = sync.split(doc);
        assert_eq!(parts.static_prefix, None);
        assert_eq!(parts.dynamic_suffix, doc);

        let updated = sync.compose(Some(doc), &block_for(&["U1"]));
        assert!(updated.starts_with("---"));
        assert!(updated.find("## U1").unwrap() < updated.find("Notes").unwrap());
    }

    #[test]
    fn test_end_marker_before_start_marker_is_ignored() {
        let sync = DocumentSynchronizer::default();
        let doc = "<!-- STATIC-END -->\nintro\n<!-- STATIC-START -->\nsigned off";
        assert_eq!(sync.split(doc).static_prefix, None);

        let doc = format!("<!-- STATIC-END -->\n{STATIC}\nolder");
        let parts = sync.split(&doc);
        assert_eq!(parts.static_prefix, Some(&doc[..doc.len() - "\nolder".len()]));
        assert_eq!(parts.dynamic_suffix, "older");
    }

    #[test]
    fn test_custom_markers() {
        let config = DocumentConfig {
            static_start_marker: "<!-- BEGIN -->".to_string(),
            static_end_marker: "<!-- END -->".to_string(),
            ..DocumentConfig::default()
        };
        let sync = DocumentSynchronizer::new(&config);
        let parts = sync.split("<!-- BEGIN -->\nhead\n<!-- END -->\nrest");
        assert_eq!(parts.static_prefix, Some("<!-- BEGIN -->\nhead\n<!-- END -->"));
        assert_eq!(parts.dynamic_suffix, "rest");
        assert_eq!(sync.split(STATIC).static_prefix, None);
    }

    #[test]
    fn test_first_document_is_the_block() {
        let sync = DocumentSynchronizer::default();
        let block = block_for(&["U1"]);
        assert_eq!(sync.compose(None, &block), format!("{}\n", block.trim()));
    }

    #[test]
    fn test_new_batch_goes_between_static_and_older_content() {
        let sync = DocumentSynchronizer::default();
        let first = sync.compose(Some(STATIC), &block_for(&["U1", "U2"]));
        let second = sync.compose(Some(&first), &block_for(&["U3"]));

        assert!(second.starts_with(STATIC));
        let u3 = second.find("## U3").unwrap();
        let u1 = second.find("## U1").unwrap();
        let u2 = second.find("## U2").unwrap();
        assert!(u3 < u1 && u1 < u2);
        assert_eq!(second.matches("## U1").count(), 1);
    }

    #[test]
    fn test_static_region_survives_many_batches() {
        let sync = DocumentSynchronizer::default();
        let mut doc = format!("{STATIC}\n");
        for i in 0..5 {
            let title = format!("Batch{i}");
            doc = sync.compose(Some(&doc), &block_for(&[title.as_str()]));
            assert_eq!(sync.split(&doc).static_prefix, Some(STATIC));
        }
        assert!(doc.find("## Batch4").unwrap() < doc.find("## Batch0").unwrap());
    }

    #[test]
    fn test_empty_batch_only_normalizes_whitespace() {
        let sync = DocumentSynchronizer::default();
        let doc = sync.compose(Some(STATIC), &block_for(&["U1"]));
        assert_eq!(sync.compose(Some(&doc), ""), doc);

        let padded = format!("{doc}\n\n\n");
        assert_eq!(sync.compose(Some(&padded), ""), doc);
    }

    #[test]
    fn test_document_without_markers_keeps_content_below_new_block() {
        let sync = DocumentSynchronizer::default();
        let updated = sync.compose(Some("Hand written notes"), &block_for(&["U9"]));
        assert!(updated.find("## U9").unwrap() < updated.find("Hand written notes").unwrap());
    }

    #[test]
    fn test_contains_block() {
        let sync = DocumentSynchronizer::default();
        let block = block_for(&["U1"]);
        let doc = sync.compose(Some(STATIC), &block);
        assert!(sync.contains_block(&doc, &block));
        assert!(!sync.contains_block(&doc, &block_for(&["U2"])));
    }

    #[tokio::test]
    async fn test_apply_writes_through_store() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), PathsConfig::default());
        std::fs::write(tmp.path().join("README.md"), STATIC).unwrap();

        let sync = DocumentSynchronizer::default();
        sync.apply(&storage, &block_for(&["U1"])).await.unwrap();

        let written = std::fs::read_to_string(tmp.path().join("README.md")).unwrap();
        assert!(written.starts_with(STATIC));
        assert!(written.contains("## U1"));
    }
}
