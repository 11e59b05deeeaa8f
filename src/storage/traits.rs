//! Storage trait
//!
//! Read access to collected pages is all that statistics and exporters need,
//! so the trait is small; the crawl loop is the only writer.

use crate::storage::PageRecord;

/// Trait for result store implementations
pub trait Storage {
    /// Appends a page record, preserving insertion order
    fn insert_page(&mut self, page: PageRecord);

    /// Returns every stored page in insertion order
    fn pages(&self) -> &[PageRecord];

    /// Returns the number of stored pages
    fn count_pages(&self) -> usize {
        self.pages().len()
    }

    /// Returns true when no page has been stored yet
    fn is_empty(&self) -> bool {
        self.pages().is_empty()
    }

    /// Sums the link records across all pages
    fn count_links(&self) -> usize {
        self.pages().iter().map(|p| p.links.len()).sum()
    }

    /// Sums the image records across all pages
    fn count_images(&self) -> usize {
        self.pages().iter().map(|p| p.images.len()).sum()
    }

    /// Sums the headings across all pages
    fn count_headings(&self) -> usize {
        self.pages().iter().map(|p| p.headings.len()).sum()
    }

    /// Sums the paragraphs across all pages
    fn count_paragraphs(&self) -> usize {
        self.pages().iter().map(|p| p.paragraphs.len()).sum()
    }
}
