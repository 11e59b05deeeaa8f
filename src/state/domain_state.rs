use std::time::{Duration, Instant};

/// Tracks request timing for one domain
///
/// Each recorded request carries the gap that must elapse before the next
/// request to the same domain. The gap is chosen by the caller so that random
/// jitter is decided once per request rather than re-rolled on every check.
#[derive(Debug, Clone, Default)]
pub struct DomainState {
    /// Number of requests made to this domain in the current crawl
    pub request_count: u32,

    /// Timestamp of the last request to this domain
    pub last_request_time: Option<Instant>,

    /// Minimum spacing owed after the last request
    pub required_gap: Duration,
}

impl DomainState {
    /// Creates a new DomainState with no recorded requests
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if a request can be made to this domain at `now`
    pub fn can_request(&self, now: Instant) -> bool {
        self.time_until_next_request(now).is_none()
    }

    /// Records that a request was made to this domain
    ///
    /// # Arguments
    ///
    /// * `now` - When the request finished
    /// * `gap` - Spacing required before the next request
    pub fn record_request(&mut self, now: Instant, gap: Duration) {
        self.request_count += 1;
        self.last_request_time = Some(now);
        self.required_gap = gap;
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.required_gap {
            Some(self.required_gap - elapsed)
        } else {
            None
        }
    }
}
