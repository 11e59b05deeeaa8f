//! Exporter trait and shared output types
//!
//! Exporters consume the result store read-only and write one file each.

use crate::storage::PageRecord;
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Which export files to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Both,
}

impl ExportFormat {
    /// Returns true if a JSON file should be written
    pub fn includes_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    /// Returns true if a CSV file should be written
    pub fn includes_csv(&self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}

/// Builds the default export file name, e.g. `crawled_data_20240101_120000.json`
pub fn default_file_name(extension: &str, now: DateTime<Local>) -> String {
    format!("crawled_data_{}.{}", now.format("%Y%m%d_%H%M%S"), extension)
}

/// Trait for export adapters
pub trait Exporter {
    /// File extension used for default file names
    fn extension(&self) -> &'static str;

    /// Serializes `pages` to `writer`
    fn write(&self, pages: &[PageRecord], writer: &mut dyn Write) -> OutputResult<()>;

    /// Writes `pages` to `path`, or to a timestamped default name when None
    ///
    /// # Returns
    ///
    /// The path that was written
    fn export(&self, pages: &[PageRecord], path: Option<&Path>) -> OutputResult<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(default_file_name(self.extension(), Local::now())),
        };

        let mut writer = BufWriter::new(File::create(&path)?);
        self.write(pages, &mut writer)?;
        writer.flush()?;

        tracing::info!("Exported {} pages to {}", pages.len(), path.display());
        Ok(path)
    }
}
