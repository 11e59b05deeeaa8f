//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with identity rotation and error classification
//! - Charset detection for response bodies
//! - HTML extraction into page records
//! - Per-domain politeness spacing
//! - Overall crawl coordination

mod charset;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use charset::decode_body;
pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, random_user_agent, Document, FetchError, Fetcher};
pub use parser::{extract, extract_at, parse_html};
pub use scheduler::PolitenessGate;

use crate::config::CrawlConfig;
use crate::storage::PageRecord;
use crate::HarvestError;

/// Runs a complete crawl with default client settings
///
/// This is the one-call entry point. It will:
/// 1. Validate the configuration and derive the crawl domain
/// 2. Build the HTTP client
/// 3. Fetch, extract and follow same-domain links breadth-first
/// 4. Return the collected page records in fetch order
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(Vec<PageRecord>)` - Crawl finished
/// * `Err(HarvestError)` - The crawl could not start
pub async fn crawl(config: CrawlConfig) -> Result<Vec<PageRecord>, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.crawl().await
}
