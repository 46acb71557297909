//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/latest-news/11").unwrap();
        assert_eq!(
            resolve_url(&base, "/news/42"),
            "https://example.com/news/42"
        );
        assert_eq!(
            resolve_url(&base, "12"),
            "https://example.com/latest-news/12"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_resolve_keeps_unjoinable_href() {
        let base = Url::parse("https://example.com/").unwrap();
        assert_eq!(resolve_url(&base, "https://[broken"), "https://[broken");
    }
}
