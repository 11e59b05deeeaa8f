use crate::output::traits::{Exporter, OutputResult};
use crate::storage::PageRecord;
use chrono::SecondsFormat;
use std::io::Write;

/// Column header of the CSV export
pub const CSV_HEADER: [&str; 7] = [
    "url",
    "title",
    "num_headings",
    "num_paragraphs",
    "num_links",
    "num_images",
    "fetched_at",
];

/// Writes one flattened row per page record
///
/// Nested content is reduced to counts; the JSON export carries the full
/// records.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, pages: &[PageRecord], writer: &mut dyn Write) -> OutputResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;

        for page in pages {
            csv_writer.write_record([
                page.url.clone(),
                page.title.clone(),
                page.headings.len().to_string(),
                page.paragraphs.len().to_string(),
                page.links.len().to_string(),
                page.images.len().to_string(),
                page.fetched_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
