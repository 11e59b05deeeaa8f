//! URL handling module for Page-Harvest
//!
//! This module resolves link references against the page they were found on,
//! derives the network authority that bounds a crawl, and decides whether a
//! resolved URL may enter the frontier.

mod domain;
mod resolve;

use std::collections::HashSet;
use url::Url;

// Re-export main functions
pub use domain::{authority, parse_seed};
pub use resolve::{resolve, resolve_or_raw};

/// Decides whether an absolute URL may be crawled
///
/// A URL is crawlable when all of the following hold:
/// 1. It parses as an absolute URL
/// 2. Its scheme is `http` or `https`
/// 3. Its authority is exactly `domain` (subdomains do not match)
/// 4. It has not been visited yet
///
/// Malformed input is simply not crawlable. Membership in the pending queue is
/// not checked here; the frontier owns that.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use page_harvest::url::is_crawlable;
///
/// let visited = HashSet::new();
/// assert!(is_crawlable("https://example.com/page", "example.com", &visited));
/// assert!(!is_crawlable("https://blog.example.com/", "example.com", &visited));
/// assert!(!is_crawlable("ftp://example.com/file", "example.com", &visited));
/// assert!(!is_crawlable("invalid-url", "example.com", &visited));
/// ```
pub fn is_crawlable(url: &str, domain: &str, visited: &HashSet<String>) -> bool {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    match authority(&parsed) {
        Some(found) if found == domain => !visited.contains(url),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_same_domain_is_crawlable() {
        assert!(is_crawlable("https://example.com/page1", "example.com", &empty()));
        assert!(is_crawlable(
            "https://example.com/subfolder/page2",
            "example.com",
            &empty()
        ));
    }

    #[test]
    fn test_http_scheme_is_crawlable() {
        assert!(is_crawlable("http://example.com/page", "example.com", &empty()));
    }

    #[test]
    fn test_other_domain_not_crawlable() {
        assert!(!is_crawlable(
            "https://other-domain.com/page",
            "example.com",
            &empty()
        ));
    }

    #[test]
    fn test_subdomain_not_crawlable() {
        assert!(!is_crawlable("https://www.example.com/", "example.com", &empty()));
        assert!(!is_crawlable("https://api.example.com/", "example.com", &empty()));
    }

    #[test]
    fn test_explicit_port_must_match() {
        assert!(!is_crawlable(
            "https://example.com:8443/",
            "example.com",
            &empty()
        ));
        assert!(is_crawlable(
            "http://127.0.0.1:8080/a",
            "127.0.0.1:8080",
            &empty()
        ));
    }

    #[test]
    fn test_default_port_is_normalized() {
        assert!(is_crawlable("https://example.com:443/", "example.com", &empty()));
    }

    #[test]
    fn test_non_http_scheme_not_crawlable() {
        assert!(!is_crawlable("ftp://example.com/file", "example.com", &empty()));
        assert!(!is_crawlable("mailto:someone@example.com", "example.com", &empty()));
        assert!(!is_crawlable("javascript:void(0)", "example.com", &empty()));
    }

    #[test]
    fn test_malformed_not_crawlable() {
        assert!(!is_crawlable("invalid-url", "example.com", &empty()));
        assert!(!is_crawlable("", "example.com", &empty()));
        assert!(!is_crawlable("http://[::1", "example.com", &empty()));
    }

    #[test]
    fn test_visited_not_crawlable() {
        let mut visited = HashSet::new();
        visited.insert("https://example.com/visited".to_string());

        assert!(!is_crawlable(
            "https://example.com/visited",
            "example.com",
            &visited
        ));
        assert!(is_crawlable(
            "https://example.com/fresh",
            "example.com",
            &visited
        ));
    }
}
