// src/models/selectors.rs

//! CSS selectors for scraping the news listing and article pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping the news site.
///
/// Row-level selectors are evaluated relative to each match of
/// `row_selector`; detail selectors relative to the whole article page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteSelectors {
    /// Selector for each article card on the listing page
    #[serde(default = "defaults::row")]
    pub row_selector: String,

    /// Selector for the link element within a row
    #[serde(default = "defaults::link")]
    pub link_selector: String,

    /// HTML attribute holding the article URL (usually "href")
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,

    /// Selector for the title element within a row
    #[serde(default = "defaults::title")]
    pub title_selector: String,

    /// Selector for the date element within a row
    #[serde(default = "defaults::date")]
    pub date_selector: String,

    /// Selector for the short description within a row
    #[serde(default = "defaults::summary")]
    pub summary_selector: String,

    /// Selector for the thumbnail image within a row
    #[serde(default = "defaults::image")]
    pub image_selector: String,

    /// HTML attribute holding the image URL
    #[serde(default = "defaults::image_attr")]
    pub image_attr: String,

    /// Selector for the article body container on the detail page
    #[serde(default = "defaults::body")]
    pub body_selector: String,

    /// Selector for paragraphs inside the body container
    #[serde(default = "defaults::paragraph")]
    pub paragraph_selector: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            row_selector: defaults::row(),
            link_selector: defaults::link(),
            link_attr: defaults::link_attr(),
            title_selector: defaults::title(),
            date_selector: defaults::date(),
            summary_selector: defaults::summary(),
            image_selector: defaults::image(),
            image_attr: defaults::image_attr(),
            body_selector: defaults::body(),
            paragraph_selector: defaults::paragraph(),
        }
    }
}

impl SiteSelectors {
    /// All CSS selector strings paired with their config key, for validation.
    pub fn css_entries(&self) -> [(&'static str, &str); 8] {
        [
            ("row_selector", &self.row_selector),
            ("link_selector", &self.link_selector),
            ("title_selector", &self.title_selector),
            ("date_selector", &self.date_selector),
            ("summary_selector", &self.summary_selector),
            ("image_selector", &self.image_selector),
            ("body_selector", &self.body_selector),
            ("paragraph_selector", &self.paragraph_selector),
        ]
    }
}

mod defaults {
    pub fn row() -> String {
        "div.row.bg-white.cat-b-row.mt-3".into()
    }
    pub fn link() -> String {
        "a[href]".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }
    pub fn title() -> String {
        "h5".into()
    }
    pub fn date() -> String {
        "h6".into()
    }
    pub fn summary() -> String {
        "p.cat-b-text".into()
    }
    pub fn image() -> String {
        "img".into()
    }
    pub fn image_attr() -> String {
        "src".into()
    }
    pub fn body() -> String {
        "div.single-body-wrap".into()
    }
    pub fn paragraph() -> String {
        "p".into()
    }
}
