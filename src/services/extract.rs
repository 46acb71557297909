// src/services/extract.rs

//! HTML extraction for the listing and article pages.
//!
//! Selectors are compiled once from [`SiteSelectors`]; extraction itself is
//! synchronous so the parsed `Html` never crosses an await point.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CleaningConfig, ListingEntry, SiteSelectors, normalize_whitespace};
use crate::utils::resolve_url;

/// Compiled selectors for one news site.
#[derive(Debug)]
pub struct PageExtractor {
    row: Selector,
    link: Selector,
    link_attr: String,
    title: Selector,
    date: Selector,
    summary: Selector,
    image: Selector,
    image_attr: String,
    body: Selector,
    paragraph: Selector,
    cleaning: CleaningConfig,
}

impl PageExtractor {
    /// Compile every configured selector.
    pub fn new(selectors: &SiteSelectors, cleaning: &CleaningConfig) -> Result<Self> {
        Ok(Self {
            row: parse_selector(&selectors.row_selector)?,
            link: parse_selector(&selectors.link_selector)?,
            link_attr: selectors.link_attr.clone(),
            title: parse_selector(&selectors.title_selector)?,
            date: parse_selector(&selectors.date_selector)?,
            summary: parse_selector(&selectors.summary_selector)?,
            image: parse_selector(&selectors.image_selector)?,
            image_attr: selectors.image_attr.clone(),
            body: parse_selector(&selectors.body_selector)?,
            paragraph: parse_selector(&selectors.paragraph_selector)?,
            cleaning: cleaning.clone(),
        })
    }

    /// Extract one result per listing row, in page order.
    ///
    /// A row without a usable link or title yields `Err(AppError::Extraction)`.
    pub fn extract_listing(&self, html: &str, base_url: &Url) -> Vec<Result<ListingEntry>> {
        let document = Html::parse_document(html);
        document
            .select(&self.row)
            .map(|row| self.parse_row(&row, base_url))
            .collect()
    }

    /// Concatenated paragraph text of an article page.
    ///
    /// Returns `None` when the page has no body container.
    pub fn extract_body(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let container = document.select(&self.body).next()?;

        let paragraphs: Vec<String> = container
            .select(&self.paragraph)
            .map(|p| normalize_whitespace(&p.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect();

        Some(paragraphs.join("\n\n"))
    }

    fn parse_row(&self, row: &ElementRef, base_url: &Url) -> Result<ListingEntry> {
        let href = row
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr(&self.link_attr))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or(AppError::missing("link"))?;

        let title = row
            .select(&self.title)
            .next()
            .map(|el| self.cleaning.clean_title(&el.text().collect::<String>()))
            .filter(|title| !title.is_empty())
            .ok_or(AppError::missing("title"))?;

        let published_at = row
            .select(&self.date)
            .next()
            .map(|el| self.cleaning.clean_date(&el.text().collect::<String>()))
            .unwrap_or_default();

        let summary = row
            .select(&self.summary)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty());

        let image_url = row
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr(&self.image_attr))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(|src| resolve_url(base_url, src));

        Ok(ListingEntry {
            identifier: resolve_url(base_url, href),
            title,
            published_at,
            summary,
            image_url,
        })
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <div class="row bg-white cat-b-row mt-3">
            <a href="/news/101"><img src="/img/101.jpg"></a>
            <h5> Floods in the south </h5>
            <h6>• 14 10 2026 09:05:00</h6>
            <p class="cat-b-text">Heavy rain continues.</p>
          </div>
          <div class="row bg-white cat-b-row mt-3">
            <a href="https://www.ada.lk/news/102"></a>
            <h5>Cabinet reshuffle</h5>
            <h6>14 10 2026 08:00:00</h6>
          </div>
          <div class="row bg-white cat-b-row mt-3">
            <a href="/news/103"></a>
            <h6>14 10 2026 07:00:00</h6>
          </div>
          <div class="row bg-white cat-b-row mt-3">
            <h5>No link here</h5>
          </div>
        </body></html>
    "#;

    fn extractor() -> PageExtractor {
        PageExtractor::new(&SiteSelectors::default(), &CleaningConfig::default()).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://www.ada.lk/latest-news/11").unwrap()
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
        assert!(parse_selector("div.single-body-wrap").is_ok());
    }

    #[test]
    fn test_extract_listing_rows_in_order() {
        let rows = extractor().extract_listing(LISTING, &base());
        assert_eq!(rows.len(), 4);

        let first = rows[0].as_ref().unwrap();
        assert_eq!(first.identifier, "https://www.ada.lk/news/101");
        assert_eq!(first.title, "Floods in the south");
        assert_eq!(first.published_at, "14 10 2026 09:05:00");
        assert_eq!(first.summary.as_deref(), Some("Heavy rain continues."));
        assert_eq!(
            first.image_url.as_deref(),
            Some("https://www.ada.lk/img/101.jpg")
        );

        let second = rows[1].as_ref().unwrap();
        assert_eq!(second.identifier, "https://www.ada.lk/news/102");
        assert_eq!(second.summary, None);
        assert_eq!(second.image_url, None);
    }

    #[test]
    fn test_rows_missing_required_fields_are_errors() {
        let rows = extractor().extract_listing(LISTING, &base());
        assert!(matches!(
            rows[2],
            Err(AppError::Extraction { field: "title" })
        ));
        assert!(matches!(
            rows[3],
            Err(AppError::Extraction { field: "link" })
        ));
    }

    #[test]
    fn test_extract_body_joins_paragraphs() {
        let html = r#"
            <div class="single-body-wrap">
              <p>First   paragraph.</p>
              <p>  </p>
              <p>Second <b>bold</b> paragraph.</p>
            </div>
            <p>Footer text</p>
        "#;
        assert_eq!(
            extractor().extract_body(html).as_deref(),
            Some("First paragraph.\n\nSecond bold paragraph.")
        );
    }

    #[test]
    fn test_extract_body_without_container() {
        assert_eq!(extractor().extract_body("<p>Just a footer</p>"), None);
    }
}
