use std::collections::{HashSet, VecDeque};

/// The crawl frontier: URLs waiting to be fetched plus the URLs already taken
///
/// Invariants:
/// - A URL enters `visited` when it is dequeued for fetching, never earlier
/// - `pending` never holds a URL that is already in `visited`
/// - A URL is enqueued at most once; `seen` indexes `pending ∪ visited` so the
///   duplicate check does not scan the queue
#[derive(Debug, Clone)]
pub struct Frontier {
    pending: VecDeque<String>,
    visited: HashSet<String>,
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding only the seed
    pub fn new(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        let mut seen = HashSet::new();
        seen.insert(seed.clone());

        Self {
            pending: VecDeque::from([seed]),
            visited: HashSet::new(),
            seen,
        }
    }

    /// Removes and returns the oldest pending URL
    pub fn dequeue(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Marks a URL as visited
    ///
    /// Returns false if it was already visited.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.seen.insert(url.to_string());
        self.visited.insert(url.to_string())
    }

    /// Appends a URL to the tail of the queue unless it is visited or pending
    ///
    /// Returns true if the URL was added.
    pub fn enqueue(&mut self, url: &str) -> bool {
        if self.visited.contains(url) || self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        self.pending.push_back(url.to_string());
        true
    }

    /// Returns true if the URL has been dequeued for fetching
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if the URL is waiting in the queue
    pub fn is_pending(&self, url: &str) -> bool {
        self.seen.contains(url) && !self.visited.contains(url)
    }

    /// Returns the visited set
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Returns the number of visited URLs
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns the number of URLs waiting in the queue
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns true when nothing is left to fetch
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns true once `max_pages` URLs have been visited
    pub fn budget_reached(&self, max_pages: u32) -> bool {
        self.visited.len() >= max_pages as usize
    }

    /// Returns the pending URLs in queue order
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }
}
