//! Columnar data tables
//!
//! A [`DataTable`] is the read-only view the mesh pipeline has of a dataset:
//! named numeric columns of equal length plus the dataset label used to name
//! exported assets.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single named numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// A labelled set of equally sized numeric columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    label: String,
    columns: Vec<Column>,
}

impl DataTable {
    /// Create an empty table with the given dataset label
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            columns: Vec::new(),
        }
    }

    /// Builder form of [`DataTable::add_column`]
    pub fn with_column<S: Into<String>>(mut self, name: S, values: Vec<f64>) -> Result<Self> {
        self.add_column(name, values)?;
        Ok(self)
    }

    /// Add a column, replacing any existing column with the same name.
    ///
    /// Every column must have the same number of rows as the columns already
    /// present.
    pub fn add_column<S: Into<String>>(&mut self, name: S, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if let Some(existing) = self.columns.iter().find(|c| c.name != name) {
            if existing.values.len() != values.len() {
                return Err(Error::LengthMismatch {
                    column: name,
                    expected: existing.values.len(),
                    actual: values.len(),
                });
            }
        }

        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(Column { name, values }),
        }
        Ok(())
    }

    /// Dataset label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of rows (zero for a table without columns)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Look up a single cell
    pub fn value(&self, row: usize, name: &str) -> Result<f64> {
        let column = self.column(name)?;
        column.get(row).copied().ok_or_else(|| {
            Error::InvalidData(format!(
                "row {} out of range for column '{}' with {} rows",
                row,
                name,
                column.len()
            ))
        })
    }

    /// Minimum and maximum over the finite values of a column.
    ///
    /// Returns `None` when the column holds no finite value.
    pub fn finite_range(&self, name: &str) -> Result<Option<(f64, f64)>> {
        let range = self
            .column(name)?
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            });
        Ok(range)
    }
}
