use crate::storage::{PageRecord, Storage};

/// In-memory, insertion-ordered result store
///
/// Grows monotonically during a crawl and is handed whole to exporters
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    pages: Vec<PageRecord>,
}

impl ResultStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the store and returns its pages
    pub fn into_pages(self) -> Vec<PageRecord> {
        self.pages
    }
}

impl Storage for ResultStore {
    fn insert_page(&mut self, page: PageRecord) {
        self.pages.push(page);
    }

    fn pages(&self) -> &[PageRecord] {
        &self.pages
    }
}

impl From<Vec<PageRecord>> for ResultStore {
    fn from(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }
}
