//! Output module for crawl statistics and exports
//!
//! This module handles:
//! - Summing statistics over collected pages
//! - Printing the statistics block shown after a run
//! - Exporting page records to JSON and CSV files

mod csv_output;
mod json;
pub mod stats;
mod traits;

pub use csv_output::CsvExporter;
pub use json::JsonExporter;
pub use stats::{format_statistics, load_statistics, print_statistics, CrawlStatistics};
pub use traits::{default_file_name, ExportFormat, Exporter, OutputError, OutputResult};
