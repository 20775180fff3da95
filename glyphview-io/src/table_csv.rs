//! Delimited text tables
//!
//! Reads CSV-like files into a [`DataTable`]:
//! - Auto-detection of delimiters (comma, semicolon, tab, space)
//! - A header row naming every column is required
//! - Lines starting with `#` and blank lines are skipped
//! - Cells that do not parse as numbers become NaN, short rows are padded with NaN

use crate::error::IoError;
use glyphview_core::DataTable;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Supported delimiters for table files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Space,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Space => ' ',
        }
    }

    /// Detect the delimiter from a header line.
    ///
    /// The most frequent candidate wins; ties prefer the earlier variant.
    pub fn detect_from_line(line: &str) -> Option<Self> {
        let counts = [
            (line.matches(',').count(), Delimiter::Comma),
            (line.matches(';').count(), Delimiter::Semicolon),
            (line.matches('\t').count(), Delimiter::Tab),
            (line.trim().matches(' ').count(), Delimiter::Space),
        ];

        counts
            .iter()
            .rev()
            .max_by_key(|(count, _)| *count)
            .filter(|(count, _)| *count > 0)
            .map(|(_, delimiter)| *delimiter)
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Space => line.split_whitespace().collect(),
            _ => line.split(self.as_char()).map(str::trim).collect(),
        }
    }
}

/// Options for reading a table
#[derive(Debug, Clone, Default)]
pub struct TableReadOptions {
    /// Force a delimiter instead of detecting one
    pub delimiter: Option<Delimiter>,
    /// Dataset label; defaults to the file stem
    pub label: Option<String>,
}

impl TableReadOptions {
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Reader for delimited numeric tables
pub struct TableReader;

impl TableReader {
    /// Read a table from a file, labelled with the file stem
    pub fn read_table<P: AsRef<Path>>(path: P) -> Result<DataTable, IoError> {
        Self::read_table_with_options(path, &TableReadOptions::default())
    }

    pub fn read_table_with_options<P: AsRef<Path>>(
        path: P,
        options: &TableReadOptions,
    ) -> Result<DataTable, IoError> {
        let path = path.as_ref();
        let label = match &options.label {
            Some(label) => label.clone(),
            None => path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("data")
                .to_string(),
        };
        let file = File::open(path)?;
        let table = Self::read_from(BufReader::new(file), label, options.delimiter)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "read table"
        );
        Ok(table)
    }

    /// Read a table from any buffered source
    pub fn read_from<R: BufRead, S: Into<String>>(
        reader: R,
        label: S,
        delimiter: Option<Delimiter>,
    ) -> Result<DataTable, IoError> {
        let mut lines = reader
            .lines()
            .filter(|line| match line {
                Ok(text) => {
                    let trimmed = text.trim();
                    !trimmed.is_empty() && !trimmed.starts_with('#')
                }
                Err(_) => true,
            });

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(IoError::Parse {
                    message: "table has no header row".to_string(),
                })
            }
        };

        let delimiter = match delimiter {
            Some(d) => d,
            // A single-column header has nothing to detect
            None => Delimiter::detect_from_line(&header).unwrap_or(Delimiter::Comma),
        };

        let names: Vec<String> = delimiter
            .split(&header)
            .into_iter()
            .map(str::to_string)
            .collect();
        if let Some(position) = names.iter().position(|n| n.is_empty()) {
            return Err(IoError::Parse {
                message: format!("empty column name at position {}", position + 1),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(IoError::Parse {
                    message: format!("duplicate column name '{}'", name),
                });
            }
        }

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
        for (row, line) in lines.enumerate() {
            let line = line?;
            let cells = delimiter.split(&line);
            if cells.len() > names.len() {
                return Err(IoError::Parse {
                    message: format!(
                        "row {} has {} cells but the header names {} columns",
                        row + 1,
                        cells.len(),
                        names.len()
                    ),
                });
            }
            for (i, column) in columns.iter_mut().enumerate() {
                let value = cells
                    .get(i)
                    .and_then(|cell| cell.parse::<f64>().ok())
                    .unwrap_or(f64::NAN);
                column.push(value);
            }
        }

        let mut table = DataTable::new(label);
        for (name, values) in names.into_iter().zip(columns) {
            table.add_column(name, values).map_err(|e| IoError::Parse {
                message: e.to_string(),
            })?;
        }
        Ok(table)
    }
}
