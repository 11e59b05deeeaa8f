//! HTML extractor for turning a fetched document into a page record
//!
//! This module walks a parsed document and extracts:
//! - The page title
//! - Headings, grouped by level and then in document order
//! - Non-empty paragraphs
//! - Every anchor with an `href`, resolved to absolute form
//! - Every image with a `src`, resolved to absolute form

use crate::crawler::fetcher::Document;
use crate::storage::{Heading, Image, Link, PageRecord};
use crate::url::resolve_or_raw;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts a page record from a fetched document
///
/// Deterministic apart from `fetched_at`, which is stamped with the current
/// time.
///
/// # Arguments
///
/// * `document` - The parsed document
/// * `page_url` - The URL the page was requested from; relative references
///   resolve against it
pub fn extract(document: &Document, page_url: &Url) -> PageRecord {
    extract_at(document.html(), page_url, Utc::now())
}

/// Parses raw HTML and extracts a page record
///
/// # Example
///
/// ```
/// use page_harvest::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let record = parse_html(html, &page_url);
/// assert_eq!(record.title, "Test");
/// assert_eq!(record.links[0].href, "https://example.com/page");
/// ```
pub fn parse_html(html: &str, page_url: &Url) -> PageRecord {
    let document = Html::parse_document(html);
    extract_at(&document, page_url, Utc::now())
}

/// Extracts a page record with an explicit timestamp
pub fn extract_at(document: &Html, page_url: &Url, fetched_at: DateTime<Utc>) -> PageRecord {
    PageRecord {
        url: page_url.to_string(),
        title: extract_title(document),
        headings: extract_headings(document),
        paragraphs: extract_paragraphs(document),
        links: extract_links(document, page_url),
        images: extract_images(document, page_url),
        fetched_at,
    }
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first `<title>`, or empty when there is none
fn extract_title(document: &Html) -> String {
    let title_selector = match Selector::parse("title") {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element_text(&element))
        .unwrap_or_default()
}

/// Headings ordered by level first, then by position within the document
///
/// An `<h2>` that precedes an `<h1>` in the markup still comes after it here.
fn extract_headings(document: &Html) -> Vec<Heading> {
    let mut headings = Vec::new();

    for level in 1..=6u8 {
        let selector = match Selector::parse(&format!("h{}", level)) {
            Ok(selector) => selector,
            Err(_) => continue,
        };

        for element in document.select(&selector) {
            headings.push(Heading {
                level,
                text: element_text(&element),
            });
        }
    }

    headings
}

fn extract_paragraphs(document: &Html) -> Vec<String> {
    let mut paragraphs = Vec::new();

    if let Ok(p_selector) = Selector::parse("p") {
        for element in document.select(&p_selector) {
            let text = element_text(&element);
            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    paragraphs
}

/// Every anchor carrying an `href`
///
/// Nothing is filtered here: external, fragment and non-HTTP links are all
/// kept, and the frontier decides what to follow.
fn extract_links(document: &Html, page_url: &Url) -> Vec<Link> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(Link {
                    text: element_text(&element),
                    href: resolve_or_raw(page_url, href),
                });
            }
        }
    }

    links
}

fn extract_images(document: &Html, page_url: &Url) -> Vec<Image> {
    let mut images = Vec::new();

    if let Ok(img_selector) = Selector::parse("img[src]") {
        for element in document.select(&img_selector) {
            if let Some(src) = element.value().attr("src") {
                images.push(Image {
                    alt: element.value().attr("alt").unwrap_or_default().to_string(),
                    src: resolve_or_raw(page_url, src),
                });
            }
        }
    }

    images
}
