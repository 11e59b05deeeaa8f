//! Storage module for crawl results
//!
//! This module holds the page data model and the result store the crawl loop
//! appends to:
//! - `PageRecord` and its nested heading, link and image records
//! - The `Storage` trait consumed by statistics and exporters
//! - `ResultStore`, the in-memory ordered implementation

mod memory;
mod traits;

pub use memory::ResultStore;
pub use traits::Storage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured content extracted from one fetched page
///
/// Created once per successful fetch and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub fetched_at: DateTime<Utc>,
}

/// A heading element (`<h1>` .. `<h6>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: u8,
    pub text: String,
}

/// An anchor with its destination resolved to absolute form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image with its source resolved to absolute form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub alt: String,
    pub src: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_record_json_field_names() {
        let record = PageRecord {
            url: "https://example.com/".to_string(),
            title: "Home".to_string(),
            headings: vec![Heading {
                level: 1,
                text: "Welcome".to_string(),
            }],
            paragraphs: vec!["Hello".to_string()],
            links: vec![Link {
                text: "About".to_string(),
                href: "https://example.com/about".to_string(),
            }],
            images: vec![Image {
                alt: String::new(),
                src: "https://example.com/logo.png".to_string(),
            }],
            fetched_at: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["url"], "https://example.com/");
        assert_eq!(value["headings"][0]["level"], 1);
        assert_eq!(value["links"][0]["href"], "https://example.com/about");
        assert_eq!(value["images"][0]["alt"], "");
        assert!(value["fetched_at"].is_string());
    }
}
