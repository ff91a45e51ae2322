//! # Database Builder
//!
//! `DatabaseBuilder` configures how a table file is read and how mutations
//! locate rows, then loads the table.
//!
//! ## Configuration Options
//!
//! | Option      | Default    | Description                                 |
//! |-------------|------------|---------------------------------------------|
//! | path        | none       | CSV file to load and rewrite                |
//! | delimiter   | `,`        | Field delimiter for reading and writing     |
//! | row_matcher | `Position` | How UPDATE/DELETE map WHERE results to rows |
//! | table       | none       | In-memory table; mutations are not saved    |
//!
//! Exactly one of `path` or `table` is required.
//!
//! ## Usage Examples
//!
//! ```ignore
//! let db = Database::builder()
//!     .path("./people.csv")
//!     .delimiter(b';')
//!     .row_matcher(RowMatcher::Signature)
//!     .open()?;
//! ```

use std::path::{Path, PathBuf};

use eyre::{bail, Result};

use crate::config::DEFAULT_DELIMITER;
use crate::database::dml::RowMatcher;
use crate::database::Database;
use crate::storage;
use crate::types::Table;

pub struct DatabaseBuilder {
    path: Option<PathBuf>,
    table: Option<Table>,
    delimiter: u8,
    row_matcher: RowMatcher,
}

impl Default for DatabaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self {
            path: None,
            table: None,
            delimiter: DEFAULT_DELIMITER,
            row_matcher: RowMatcher::default(),
        }
    }

    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Uses `table` directly instead of loading a file.
    pub fn table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn row_matcher(mut self, row_matcher: RowMatcher) -> Self {
        self.row_matcher = row_matcher;
        self
    }

    pub fn open(self) -> Result<Database> {
        let table = match (&self.path, self.table) {
            (Some(_), Some(_)) => bail!("configure either a path or a table, not both"),
            (Some(path), None) => storage::load_table(path, self.delimiter)?,
            (None, Some(table)) => table,
            (None, None) => bail!("no CSV file specified"),
        };

        Ok(Database::from_parts(
            self.path,
            table,
            self.delimiter,
            self.row_matcher,
        ))
    }
}
