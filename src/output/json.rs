use crate::output::traits::{Exporter, OutputResult};
use crate::storage::PageRecord;
use std::io::Write;

/// Writes the full page record sequence as pretty-printed JSON
///
/// Output is a single array with 2-space indentation; non-ASCII text is
/// written as UTF-8 rather than escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, pages: &[PageRecord], writer: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *writer, pages)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
