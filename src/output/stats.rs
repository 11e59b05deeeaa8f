//! Statistics generation from collected pages
//!
//! This module provides functionality for summing crawl statistics over a
//! result store and displaying them.

use crate::storage::Storage;
use serde::Serialize;
use std::collections::HashSet;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStatistics {
    /// Number of pages successfully fetched
    pub total_pages: usize,

    /// Link records across all pages
    pub total_links: usize,

    /// Image records across all pages
    pub total_images: usize,

    /// Headings across all pages
    pub total_headings: usize,

    /// Paragraphs across all pages
    pub total_paragraphs: usize,

    /// Distinct page URLs
    pub unique_urls: usize,
}

/// Loads statistics from storage
///
/// An empty store yields all-zero statistics.
///
/// # Arguments
///
/// * `storage` - The store to sum over
pub fn load_statistics(storage: &dyn Storage) -> CrawlStatistics {
    if storage.is_empty() {
        return CrawlStatistics::default();
    }

    let unique_urls = storage
        .pages()
        .iter()
        .map(|page| page.url.as_str())
        .collect::<HashSet<_>>()
        .len();

    CrawlStatistics {
        total_pages: storage.count_pages(),
        total_links: storage.count_links(),
        total_images: storage.count_images(),
        total_headings: storage.count_headings(),
        total_paragraphs: storage.count_paragraphs(),
        unique_urls,
    }
}

/// Renders statistics as the block printed after a crawl
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::from("\n=== CRAWLING STATISTICS ===\n");
    out.push_str(&format!("Total pages crawled: {}\n", stats.total_pages));
    out.push_str(&format!("Total links found: {}\n", stats.total_links));
    out.push_str(&format!("Total images found: {}\n", stats.total_images));
    out.push_str(&format!("Total headings found: {}\n", stats.total_headings));
    out.push_str(&format!(
        "Total paragraphs found: {}\n",
        stats.total_paragraphs
    ));
    out.push_str(&format!("Unique URLs: {}\n", stats.unique_urls));
    out
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    print!("{}", format_statistics(stats));
}
