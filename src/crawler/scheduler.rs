//! Politeness gate for spacing requests to a domain
//!
//! This module handles:
//! - Per-domain tracking of the last request time
//! - The fixed delay plus random jitter owed after every request
//! - Waiting until a domain may be requested again
//!
//! The crawl loop fetches one page at a time, but the gate is keyed by domain
//! so the same spacing holds if fetches are ever spread over several workers.

use crate::config::CrawlConfig;
use crate::state::DomainState;
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Fixed-interval gate keyed by domain
#[derive(Debug, Clone)]
pub struct PolitenessGate {
    /// Fixed spacing after every request
    delay: Duration,

    /// Upper bound (exclusive) of the random extra spacing
    jitter: Duration,

    /// Per-domain timing state
    domain_states: HashMap<String, DomainState>,
}

impl PolitenessGate {
    /// Creates a gate from delay and jitter bounds
    pub fn new(delay: Duration, jitter: Duration) -> Self {
        Self {
            delay,
            jitter,
            domain_states: HashMap::new(),
        }
    }

    /// Creates a gate using the crawl configuration's delay settings
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(
            seconds_to_duration(config.delay_seconds),
            seconds_to_duration(config.jitter_seconds),
        )
    }

    /// Draws the spacing owed after one request: `delay + U[0, jitter)`
    pub fn next_gap(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.delay;
        }

        let extra = rand::thread_rng().gen_range(0.0..self.jitter.as_secs_f64());
        self.delay.saturating_add(seconds_to_duration(extra))
    }

    /// Calculates how long a request to `domain` must still wait at `now`
    ///
    /// Returns None if the domain is ready.
    pub fn time_until_ready(&self, domain: &str, now: Instant) -> Option<Duration> {
        self.domain_states
            .get(domain)
            .and_then(|state| state.time_until_next_request(now))
    }

    /// Sleeps until `domain` may be requested again
    pub async fn wait_for(&self, domain: &str) {
        if let Some(wait) = self.time_until_ready(domain, Instant::now()) {
            tracing::debug!("Politeness delay for {}: waiting {:?}", domain, wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records a finished request to `domain` and draws the next gap
    pub fn record_request(&mut self, domain: &str) {
        let gap = self.next_gap();
        self.domain_states
            .entry(domain.to_string())
            .or_insert_with(DomainState::new)
            .record_request(Instant::now(), gap);
    }

    /// Gets the timing state for a specific domain
    pub fn get_domain_state(&self, domain: &str) -> Option<&DomainState> {
        self.domain_states.get(domain)
    }
}

/// Converts validated seconds to a Duration, saturating on overflow
fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}
