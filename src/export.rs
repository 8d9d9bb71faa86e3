//! Client-side export of the loaded page.
//!
//! Exports use only what is already loaded; nothing is fetched. Columns come
//! from [`Entity::export_headers`] and [`Entity::export_row`].

use std::io;

use chrono::NaiveDate;

use crate::entities::Entity;
use crate::error::{Error, Result};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// One JSON object per line, in wire field naming.
    JsonLines,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::JsonLines => "jsonl",
        }
    }

    /// MIME type for a download response.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::JsonLines => "application/x-ndjson",
        }
    }

    /// Download file name, e.g. `subscribers-2024-03-01.csv`.
    pub fn file_name<E: Entity>(&self, date: NaiveDate) -> String {
        format!("{}-{}.{}", E::RESOURCE, date.format("%Y-%m-%d"), self.extension())
    }
}

/// Writes `items` as CSV to `writer`.
pub fn write_csv<E: Entity, W: io::Write>(items: &[E], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(E::export_headers())?;
    for item in items {
        csv.write_record(item.export_row())?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes `items` as JSON lines to `writer`.
pub fn write_json_lines<E: Entity, W: io::Write>(items: &[E], mut writer: W) -> Result<()> {
    for item in items {
        serde_json::to_writer(&mut writer, item)
            .map_err(|e| Error::internal(format!("export failed: {}", e)).with_source(e))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders `items` in `format`.
pub fn export<E: Entity>(items: &[E], format: ExportFormat) -> Result<String> {
    let mut buffer = Vec::new();
    match format {
        ExportFormat::Csv => write_csv(items, &mut buffer)?,
        ExportFormat::JsonLines => write_json_lines(items, &mut buffer)?,
    }
    tracing::debug!(
        resource = E::RESOURCE,
        rows = items.len(),
        format = format.extension(),
        "exported"
    );
    String::from_utf8(buffer)
        .map_err(|e| Error::internal(format!("export is not UTF-8: {}", e)).with_source(e))
}
