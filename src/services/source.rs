// src/services/source.rs

//! Source reader service.
//!
//! Fetches the listing page, then each article page on a bounded pool,
//! and returns items in listing order.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, Item, ListingEntry};
use crate::services::PageExtractor;
use crate::utils::http::PageFetcher;

/// Summary of one read of the source.
#[derive(Debug, Default)]
pub struct ReadOutcome {
    /// Items in listing order
    pub items: Vec<Item>,
    /// Rows found on the listing page
    pub listed: usize,
    /// Rows dropped for missing required fields
    pub skipped: usize,
    /// Article pages that could not be fetched
    pub detail_failures: usize,
}

/// Reads articles from the configured news site.
pub struct SourceReader<'a, F: PageFetcher> {
    fetcher: &'a F,
    extractor: PageExtractor,
    listing_url: String,
    missing_body: String,
    concurrency: usize,
    delay: Duration,
}

impl<'a, F: PageFetcher> SourceReader<'a, F> {
    /// Create a reader for the configured listing page.
    pub fn new(config: &Config, fetcher: &'a F) -> Result<Self> {
        Ok(Self {
            fetcher,
            extractor: PageExtractor::new(&config.selectors, &config.cleaning)?,
            listing_url: config.source.listing_url.clone(),
            missing_body: config.document.missing_body_placeholder.clone(),
            concurrency: config.crawler.max_concurrent.max(1),
            delay: Duration::from_millis(config.crawler.request_delay_ms),
        })
    }

    /// Read the listing and every article body.
    ///
    /// Only a failed listing fetch is an error; per-article problems are
    /// logged and counted in the outcome.
    pub async fn read(&self) -> Result<ReadOutcome> {
        let base_url = Url::parse(&self.listing_url)?;
        let html = self
            .fetcher
            .fetch_text(&self.listing_url)
            .await
            .map_err(|e| AppError::listing(&self.listing_url, e))?;

        let rows = self.extractor.extract_listing(&html, &base_url);
        let mut outcome = ReadOutcome {
            listed: rows.len(),
            ..ReadOutcome::default()
        };

        let mut entries = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match row {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    outcome.skipped += 1;
                    log::warn!("Skipping listing row {}: {}", index + 1, error);
                }
            }
        }
        log::info!(
            "Listing {} has {} usable rows ({} skipped)",
            self.listing_url,
            entries.len(),
            outcome.skipped
        );

        let mut tagged = Vec::with_capacity(entries.len());
        let mut detail_stream = stream::iter(entries.into_iter().enumerate())
            .map(|(index, entry)| async move {
                let body = self.fetch_body(&entry).await;
                (index, entry, body)
            })
            .buffer_unordered(self.concurrency);

        while let Some((index, entry, body)) = detail_stream.next().await {
            let body = body.unwrap_or_else(|| {
                outcome.detail_failures += 1;
                String::new()
            });
            tagged.push((index, Item::from_entry(entry, body)));

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        tagged.sort_by_key(|(index, _)| *index);
        outcome.items = tagged.into_iter().map(|(_, item)| item).collect();
        Ok(outcome)
    }

    /// Body text for one article; `None` when the page could not be fetched.
    async fn fetch_body(&self, entry: &ListingEntry) -> Option<String> {
        match self.fetcher.fetch_text(&entry.identifier).await {
            Ok(html) => Some(
                self.extractor
                    .extract_body(&html)
                    .unwrap_or_else(|| self.missing_body.clone()),
            ),
            Err(error) => {
                log::warn!(
                    "Failed to fetch article {} ({}): {}",
                    entry.title,
                    entry.identifier,
                    error
                );
                None
            }
        }
    }
}
