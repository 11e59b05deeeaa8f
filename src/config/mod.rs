//! Configuration module for Page-Harvest
//!
//! The crawl engine is configured programmatically through [`CrawlConfig`] and
//! [`ClientConfig`]. The command-line front-end can additionally read an
//! optional TOML settings file whose values sit underneath the CLI flags.
//!
//! # Example
//!
//! ```no_run
//! use page_harvest::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("harvest.toml")).unwrap();
//! println!("Max pages: {:?}", settings.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClientConfig, ClientSettings, CrawlConfig, CrawlerSettings, OutputSettings, Settings,
    DEFAULT_DELAY_SECONDS, DEFAULT_JITTER_SECONDS, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENTS,
};

// Re-export parser and validation functions
pub use parser::{load_settings, parse_settings};
pub use validation::{validate_client_config, validate_crawl_config};
