//! Loading tables from CSV text and files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::table::Table;
use super::value::Value;
use crate::{RenderError, Result};

/// Options controlling how CSV input becomes a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// First record holds the column names. When false, columns are named
    /// `column_1`, `column_2`, ...
    pub has_headers: bool,
    /// Field separator
    pub delimiter: u8,
    /// Parse numbers, booleans and empty cells instead of keeping text
    pub infer_types: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            infer_types: false,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set whether the first record is a header row
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Builder: set the field delimiter
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder: enable type inference for cells
    pub fn infer_types(mut self, infer: bool) -> Self {
        self.infer_types = infer;
        self
    }

    fn cell(&self, raw: &str) -> Value {
        if self.infer_types {
            Value::infer(raw)
        } else {
            Value::Text(raw.to_string())
        }
    }
}

impl Table {
    /// Parse CSV text into a table.
    ///
    /// Every record must have as many fields as the header (or the first
    /// record when there is no header); otherwise a malformed-data error
    /// names the offending line.
    pub fn parse_csv(text: &str, options: &LoadOptions) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(options.delimiter)
            .from_reader(text.as_bytes());

        let mut records = reader.records();
        let Some(first) = records.next().transpose()? else {
            return Ok(Table::default());
        };

        let (mut table, pending) = if options.has_headers {
            (Table::new(first.iter())?, None)
        } else {
            let names = (1..=first.len()).map(|i| format!("column_{}", i));
            (Table::new(names)?, Some(first))
        };

        for record in pending.into_iter().map(Ok).chain(records) {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() != table.column_count() {
                return Err(RenderError::MalformedData(format!(
                    "line {}: expected {} fields, found {}",
                    line,
                    table.column_count(),
                    record.len()
                )));
            }
            table.push(record.iter().map(|raw| options.cell(raw)))?;
        }

        log::debug!(
            "loaded CSV table with {} columns and {} rows",
            table.column_count(),
            table.len()
        );
        Ok(table)
    }

    /// Read a CSV file into a table.
    pub fn load_csv(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Table> {
        let path = path.as_ref();
        log::debug!("reading CSV from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Table::parse_csv(&text, options)
    }
}
