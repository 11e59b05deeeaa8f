//! State module for tracking crawl progress
//!
//! This module provides the mutable state a crawl run threads through its loop.
//!
//! # Components
//!
//! - `CrawlPhase`: Lifecycle of a crawl run (idle, running, done)
//! - `Frontier`: Pending FIFO queue plus the visited set
//! - `DomainState`: Per-domain request timing used by the politeness gate

mod crawl_phase;
mod domain_state;
mod frontier;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use domain_state::DomainState;
pub use frontier::Frontier;
