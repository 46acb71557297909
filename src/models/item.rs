// src/models/item.rs

//! Article data structures.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A row extracted from the listing page, before its body is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingEntry {
    /// Absolute article URL, also the dedup key
    pub identifier: String,

    /// Article title
    pub title: String,

    /// Raw publication date as shown on the site
    pub published_at: String,

    /// Short description, if the row carries one
    pub summary: Option<String>,

    /// Thumbnail URL, if the row carries one
    pub image_url: Option<String>,
}

/// A fully read news article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Absolute article URL, also the dedup key
    pub identifier: String,

    /// Article title
    pub title: String,

    /// Raw publication date as shown on the site
    pub published_at: String,

    /// Short description, if the row carries one
    pub summary: Option<String>,

    /// Extracted article text (empty when the detail fetch failed)
    pub body: String,

    /// Thumbnail URL, if the row carries one
    pub image_url: Option<String>,
}

impl Item {
    /// Complete a listing entry with its body text.
    pub fn from_entry(entry: ListingEntry, body: String) -> Self {
        Self {
            identifier: entry.identifier,
            title: entry.title,
            published_at: entry.published_at,
            summary: entry.summary,
            body,
            image_url: entry.image_url,
        }
    }

    /// Image URL only when present and non-blank.
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Snapshot of identifiers recorded by previous runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the identifier was recorded before.
    pub fn contains(&self, identifier: &str) -> bool {
        self.ids.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ListingEntry {
        ListingEntry {
            identifier: "https://example.com/news/1".to_string(),
            title: "Budget approved".to_string(),
            published_at: "14 10 2026 09:05:00".to_string(),
            summary: Some("Parliament votes".to_string()),
            image_url: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_from_entry_keeps_listing_fields() {
        let item = Item::from_entry(sample_entry(), "Body text".to_string());
        assert_eq!(item.identifier, "https://example.com/news/1");
        assert_eq!(item.summary.as_deref(), Some("Parliament votes"));
        assert_eq!(item.body, "Body text");
    }

    #[test]
    fn test_blank_image_is_absent() {
        let item = Item::from_entry(sample_entry(), String::new());
        assert_eq!(item.image(), None);
    }

    #[test]
    fn test_seen_set_membership_is_exact() {
        let seen: SeenSet = ["https://example.com/news/1"].into_iter().collect();
        assert!(seen.contains("https://example.com/news/1"));
        assert!(!seen.contains("https://example.com/news/1/"));
        assert_eq!(seen.len(), 1);
    }
}
