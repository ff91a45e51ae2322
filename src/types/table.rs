//! # In-Memory Table
//!
//! A `Table` is the whole CSV file held in memory: ordered column names and
//! ordered rows of text cells.
//!
//! ## Invariants
//!
//! - Column names are unique.
//! - Every row has exactly `column_count()` cells, in column order.
//! - Row identity is the position in `rows()`, valid only for the table
//!   value it was taken from.
//!
//! ## Value Semantics
//!
//! Operations never patch a table in place. Filters, projections and
//! mutations build a new `Table`; the loaded table stays untouched until
//! the caller replaces it with the result.

use crate::error::QueryError;
use crate::types::row::Row;
use eyre::{bail, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table with the given columns and no rows.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        Self::from_rows(columns, Vec::new())
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                bail!(QueryError::CodecError {
                    message: format!("duplicate column name '{}'", column),
                });
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.column_count() != columns.len() {
                bail!(QueryError::CodecError {
                    message: format!(
                        "row {} has {} fields, expected {}",
                        i + 1,
                        row.column_count(),
                        columns.len()
                    ),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Builds a table whose rows are already known to match the columns.
    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.column_count() == columns.len()));
        Self { columns, rows }
    }

    /// An empty table with the same columns.
    pub fn empty_like(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        match self.column_index(name) {
            Some(idx) => Ok(idx),
            None => bail!(QueryError::unknown_column(name)),
        }
    }

    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or_default())
    }

    /// Copies the rows at `indices`, in the order given.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        Self::from_parts(self.columns.clone(), rows)
    }

    /// Copies the rows whose mask entry is `keep`.
    pub fn retain_by_mask(&self, mask: &[bool], keep: bool) -> Self {
        let rows = self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, m)| **m == keep)
            .map(|(row, _)| row.clone())
            .collect();
        Self::from_parts(self.columns.clone(), rows)
    }

    /// A new table holding every row of this one followed by `extra`.
    pub fn with_rows_appended(&self, extra: Vec<Row>) -> Result<Self> {
        let mut rows = Vec::with_capacity(self.rows.len() + extra.len());
        rows.extend(self.rows.iter().cloned());
        rows.extend(extra);
        Self::from_rows(self.columns.clone(), rows)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }
}
