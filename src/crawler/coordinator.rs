//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Owning the frontier for the duration of a run
//! - Applying the politeness gate before every fetch
//! - Coordinating fetching, extraction and link enqueueing
//! - Collecting page records into the result store

use crate::config::{validate_client_config, validate_crawl_config, ClientConfig, CrawlConfig};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::extract;
use crate::crawler::scheduler::PolitenessGate;
use crate::output::{load_statistics, CrawlStatistics};
use crate::state::{CrawlPhase, Frontier};
use crate::storage::{PageRecord, ResultStore, Storage};
use crate::url::{is_crawlable, parse_seed};
use crate::{ConfigError, HarvestError};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlConfig,
    seed: Url,
    domain: String,
    fetcher: Fetcher,
    gate: PolitenessGate,
    store: ResultStore,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator with the default HTTP client settings
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl, in the `Idle` phase
    /// * `Err(HarvestError)` - The configuration is invalid or the client
    ///   could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, HarvestError> {
        Self::with_client(config, ClientConfig::default())
    }

    /// Creates a coordinator with explicit HTTP client settings
    pub fn with_client(config: CrawlConfig, client: ClientConfig) -> Result<Self, HarvestError> {
        validate_crawl_config(&config)?;
        validate_client_config(&client)?;

        let (seed, domain) =
            parse_seed(&config.seed_url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        let fetcher = Fetcher::new(&client)?;
        let gate = PolitenessGate::from_config(&config);

        tracing::debug!("Coordinator ready: seed {}, domain {}", seed, domain);

        Ok(Self {
            config,
            seed,
            domain,
            fetcher,
            gate,
            store: ResultStore::new(),
            phase: CrawlPhase::Idle,
        })
    }

    /// The authority every crawled URL must share
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The parsed seed URL
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// The crawl configuration
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// The current lifecycle phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Pages collected so far, in fetch order
    pub fn pages(&self) -> &[PageRecord] {
        self.store.pages()
    }

    /// The result store
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Consumes the coordinator and returns its result store
    pub fn into_store(self) -> ResultStore {
        self.store
    }

    /// Totals over the pages collected so far; all zero before any success
    pub fn statistics(&self) -> CrawlStatistics {
        load_statistics(&self.store)
    }

    /// Runs the crawl to completion
    ///
    /// Returns the collected page records in fetch order. Fetch failures are
    /// logged and skipped; they never end the run.
    pub async fn crawl(&mut self) -> Result<Vec<PageRecord>, HarvestError> {
        self.crawl_with_cancellation(CancellationToken::new()).await
    }

    /// Runs the crawl until done or until `cancel` fires
    ///
    /// The token is checked before every dequeue and while waiting on the
    /// politeness gate; an in-flight fetch is allowed to finish.
    pub async fn crawl_with_cancellation(
        &mut self,
        cancel: CancellationToken,
    ) -> Result<Vec<PageRecord>, HarvestError> {
        self.transition(CrawlPhase::Running)?;

        let max_pages = self.config.max_pages;
        let mut frontier = Frontier::new(self.seed.as_str());
        let mut failures = 0usize;
        let start_time = std::time::Instant::now();

        tracing::info!(
            "Starting crawl of {} (max pages: {}, delay: {}s)",
            self.seed,
            max_pages,
            self.config.delay_seconds
        );

        loop {
            if cancel.is_cancelled() {
                tracing::info!("Crawl cancelled");
                break;
            }
            if frontier.is_exhausted() {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            }
            if frontier.budget_reached(max_pages) {
                tracing::info!("Page budget of {} reached", max_pages);
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Crawl cancelled during politeness delay");
                    break;
                }
                _ = self.gate.wait_for(&self.domain) => {}
            }

            let url = match frontier.dequeue() {
                Some(url) => url,
                None => break,
            };

            if frontier.is_visited(&url) {
                tracing::trace!("Skipping already visited {}", url);
                continue;
            }
            frontier.mark_visited(&url);
            self.transition(CrawlPhase::Running)?;

            tracing::info!(
                "Crawling [{}/{}]: {}",
                frontier.visited_count(),
                max_pages,
                url
            );

            let outcome = self.fetcher.fetch(&url).await;
            self.gate.record_request(&self.domain);

            let document = match outcome {
                Ok(document) => document,
                Err(e) => {
                    failures += 1;
                    tracing::warn!("Failed to scrape {}: {}", url, e.reason());
                    continue;
                }
            };

            let page_url = match Url::parse(&url) {
                Ok(page_url) => page_url,
                Err(e) => {
                    failures += 1;
                    tracing::warn!("Failed to scrape {}: {}", url, e);
                    continue;
                }
            };

            let record = extract(&document, &page_url);

            let mut queued = 0usize;
            for link in &record.links {
                if is_crawlable(&link.href, &self.domain, frontier.visited())
                    && frontier.enqueue(&link.href)
                {
                    queued += 1;
                }
            }

            tracing::info!("Successfully scraped {} ({} new URLs queued)", url, queued);
            self.store.insert_page(record);
        }

        self.transition(CrawlPhase::Done)?;

        tracing::info!(
            "Crawl completed: {} pages scraped, {} failed, {} still pending, in {:?}",
            self.store.count_pages(),
            failures,
            frontier.pending_count(),
            start_time.elapsed()
        );

        Ok(self.store.pages().to_vec())
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), HarvestError> {
        if !self.phase.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }
}
