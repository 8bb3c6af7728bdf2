//! Flat CSV reading into an in-memory table.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV input has no header row")]
    MissingHeader,

    #[error("row {line} has {found} fields but the header has {expected}")]
    RaggedRow { line: u64, expected: usize, found: usize },
}

/// Reader options for [`read_csv_with`].
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Drop every row that has at least one blank cell.
    pub drop_incomplete: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            drop_incomplete: true,
        }
    }
}

/// Header plus rows of optional cells; a blank cell is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build a table; every row is padded or cut to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Parse CSV from any reader.
    pub fn from_reader<R: Read>(reader: R, options: CsvOptions) -> Result<Self, TextError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if columns.is_empty() || columns.iter().all(String::is_empty) {
            return Err(TextError::MissingHeader);
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            if record.len() > columns.len() {
                return Err(TextError::RaggedRow {
                    line: record.position().map(|p| p.line()).unwrap_or_default(),
                    expected: columns.len(),
                    found: record.len(),
                });
            }

            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|cell| {
                    let cell = cell.trim();
                    (!cell.is_empty()).then(|| cell.to_string())
                })
                .collect();
            row.resize(columns.len(), None);

            if row.iter().all(Option::is_none) {
                continue;
            }
            if options.drop_incomplete && row.iter().any(Option::is_none) {
                continue;
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Cells of column `index`, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }
}

/// Read a comma-separated file, dropping blank rows and rows with blank cells.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table, TextError> {
    read_csv_with(path, CsvOptions::default())
}

pub fn read_csv_with(path: impl AsRef<Path>, options: CsvOptions) -> Result<Table, TextError> {
    let file = std::fs::File::open(path)?;
    Table::from_reader(file, options)
}
