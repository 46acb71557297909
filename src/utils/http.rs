// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Source of page bodies by URL.
///
/// Any non-success status, connection failure or timeout is an error.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl PageFetcher for reqwest::Client {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::error::AppError;

    /// In-memory fetcher serving canned pages; unknown URLs fail.
    #[derive(Default)]
    pub struct StubFetcher {
        pages: Mutex<HashMap<String, String>>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(self, url: &str, html: &str) -> Self {
            self.set_page(url, html);
            self
        }

        pub fn set_page(&self, url: &str, html: &str) {
            self.pages
                .lock()
                .unwrap()
                .insert(url.to_string(), html.to_string());
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| {
                    AppError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("no stub page for {url}"),
                    ))
                })
        }
    }
}
