//! # Database Handle
//!
//! A `Database` owns one loaded table and the settings needed to write it
//! back. Reads borrow the table; mutations build a replacement, persist it,
//! and only then swap it in, so a failed write leaves both the file and the
//! in-memory table unchanged.
//!
//! ## Lifecycle
//!
//! ```text
//!   open ──> Table (loaded once)
//!              │
//!              ├── select / aggregate ──> ExecuteResult   (no I/O)
//!              │
//!              └── insert / update / delete / truncate
//!                     │
//!                     ▼
//!                  new Table ──> save_table ──> replaces loaded Table
//! ```
//!
//! A database opened from an in-memory table has no path; its mutations
//! replace the table without writing anything.

use std::path::{Path, PathBuf};

use eyre::Result;
use tracing::instrument;

use crate::database::builder::DatabaseBuilder;
use crate::database::dml::RowMatcher;
use crate::database::{ExecuteResult, Statement};
use crate::storage;
use crate::types::Table;

#[derive(Debug)]
pub struct Database {
    path: Option<PathBuf>,
    table: Table,
    delimiter: u8,
    row_matcher: RowMatcher,
}

impl Database {
    /// Loads the CSV file at `path` with default settings.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().path(path).open()
    }

    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Wraps a table that is never written to disk.
    pub fn in_memory(table: Table) -> Self {
        Self::from_parts(None, table, crate::config::DEFAULT_DELIMITER, RowMatcher::default())
    }

    pub(crate) fn from_parts(
        path: Option<PathBuf>,
        table: Table,
        delimiter: u8,
        row_matcher: RowMatcher,
    ) -> Self {
        Self {
            path,
            table,
            delimiter,
            row_matcher,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn row_matcher(&self) -> RowMatcher {
        self.row_matcher
    }

    /// Persists `table` and makes it the current table.
    pub(crate) fn commit(&mut self, table: Table) -> Result<()> {
        if let Some(path) = &self.path {
            storage::save_table(path, &table, true, self.delimiter)?;
        }
        self.table = table;
        Ok(())
    }

    #[instrument(name = "database::execute", level = "debug", skip(self))]
    pub fn execute(&mut self, statement: Statement) -> Result<ExecuteResult> {
        match statement {
            Statement::Select(query) => self.select(&query),
            Statement::Columns => Ok(ExecuteResult::Columns {
                names: self.columns().to_vec(),
            }),
            Statement::Insert { assignments } => self.execute_insert(&assignments),
            Statement::InsertFrom { source } => {
                let rows_affected = self.insert_from(&source)?;
                Ok(ExecuteResult::Insert { rows_affected })
            }
            Statement::Update {
                assignments,
                where_clause,
            } => self.execute_update(&assignments, &where_clause),
            Statement::Delete { where_clause } => self.execute_delete(&where_clause),
            Statement::DeleteRows { rows } => {
                let rows_affected = self.delete_rows(&rows)?;
                Ok(ExecuteResult::Delete { rows_affected })
            }
            Statement::Truncate => {
                let rows_affected = self.truncate()?;
                Ok(ExecuteResult::Truncate { rows_affected })
            }
        }
    }
}
