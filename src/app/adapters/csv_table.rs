//! CSV export of a laboratory sheet as a table provider
//!
//! The first worksheet is expected as delimited text. Leading rows can be
//! skipped and the file's own header replaced, which is how the laboratory
//! sheet is read: its two title rows are dropped and the standard header
//! is applied to the remaining rows.

use super::table_provider::TableProvider;
use crate::app::models::{CellValue, RawTable};
use crate::config::SourceConfig;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads a CSV file into a [`RawTable`]
#[derive(Debug, Clone)]
pub struct CsvTableProvider {
    path: PathBuf,
    source: SourceConfig,
}

impl CsvTableProvider {
    pub fn new(path: impl Into<PathBuf>, source: SourceConfig) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV text with this provider's source options
    pub fn parse_str(&self, content: &str) -> Result<RawTable> {
        self.source.validate()?;
        let file = self.path.display().to_string();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.source.delimiter as u8)
            .from_reader(content.as_bytes());

        // Title rows may hold quoted line breaks and any number of fields
        let mut records = reader.records();
        for skipped in 0..self.source.skip_rows {
            match records.next() {
                Some(record) => {
                    record.map_err(|e| {
                        let message = format!("Failed to read title row {}", skipped);
                        Error::csv_parsing(&file, message, Some(e))
                    })?;
                }
                None => break,
            }
        }

        let header: Vec<String> = match &self.source.header {
            Some(header) => header.clone(),
            None => match records.next() {
                Some(record) => {
                    let record = record.map_err(|e| {
                        Error::csv_parsing(&file, "Failed to read header row", Some(e))
                    })?;
                    record.iter().map(|name| name.trim().to_string()).collect()
                }
                None => return Err(Error::format(format!("{}: no header row", file))),
            },
        };
        if let Some(blank) = header.iter().position(|name| name.is_empty()) {
            return Err(Error::format(format!(
                "{}: empty column name at position {}",
                file, blank
            )));
        }

        let mut rows = Vec::new();
        for (line, record) in records.enumerate() {
            let record = record.map_err(|e| {
                Error::csv_parsing(&file, format!("Failed to read data row {}", line), Some(e))
            })?;

            let mut row: Vec<CellValue> = record.iter().map(CellValue::from_text).collect();
            if row.len() > header.len() {
                if row[header.len()..].iter().any(|cell| !cell.is_empty()) {
                    return Err(Error::format(format!(
                        "{}: data row {} has {} cells, header has {} columns",
                        file,
                        line,
                        row.len(),
                        header.len()
                    )));
                }
                row.truncate(header.len());
            }
            // spreadsheet exports drop trailing blank cells
            row.resize(header.len(), CellValue::Empty);
            rows.push(row);
        }

        debug!(
            "{}: {} columns, {} data rows after skipping {} rows",
            file,
            header.len(),
            rows.len(),
            self.source.skip_rows
        );
        RawTable::from_rows(header, rows)
    }
}

impl TableProvider for CsvTableProvider {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_table(&self) -> Result<RawTable> {
        info!("Reading sheet: {}", self.path.display());

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::io(format!("Failed to read file {}", self.path.display()), e)
        })?;

        self.parse_str(&content)
    }
}
