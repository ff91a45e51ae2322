//! # Database Module
//!
//! The high-level API: open a CSV file as a table, run reads and mutations
//! against it, and get back an [`ExecuteResult`].
//!
//! ## Architecture
//!
//! The Database struct serves as the main entry point, orchestrating:
//! - storage: loading the table and atomically rewriting it
//! - sql: clause parsing, filtering, sorting, aggregation
//! - dml: row matching and whole-table rebuilds for mutations
//!
//! ## Statement Execution Pipeline
//!
//! ```text
//! Statement
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ 1. VALIDATE: clause text → parsed fragments         │
//! │    Condition, Projection, OrderBy, Assignments      │
//! └─────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ 2. MATCH: WHERE → row positions                     │
//! │    RowMatcher::mask(table, where)                   │
//! └─────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ 3. TRANSFORM: Table → new Table                     │
//! │    sort/project/distinct/limit, or rebuild rows     │
//! └─────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ 4. PERSIST (mutations only)                         │
//! │    save_table → temp file → rename                  │
//! └─────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! ExecuteResult returned to caller
//! ```
//!
//! ## Concurrency
//!
//! A `Database` is a plain owned value and performs no locking. Two
//! handles on the same file do not see each other's writes; callers that
//! share a file across threads or processes must serialize access.
//!
//! ## Usage Example
//!
//! ```ignore
//! use csvql::{Database, SelectQuery};
//!
//! let mut db = Database::open("./people.csv")?;
//!
//! db.insert("id=4,name='D',age=50")?;
//! let updated = db.update("age=99", "name='B'")?;
//!
//! let result = db.select(&SelectQuery::new().filter("age > 25").order_by("age desc"))?;
//! ```

mod builder;
#[allow(clippy::module_inception)]
mod database;
pub mod dml;
pub mod query;

pub use builder::DatabaseBuilder;
pub use database::Database;
pub use dml::{Mutation, RowMatcher};
pub use query::SelectQuery;

use crate::sql::AggregateResult;
use crate::types::Table;
use std::path::PathBuf;

/// One operation against the loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Select(SelectQuery),
    Columns,
    /// One entry per row to insert.
    Insert {
        assignments: Vec<String>,
    },
    InsertFrom {
        source: PathBuf,
    },
    Update {
        assignments: String,
        where_clause: String,
    },
    Delete {
        where_clause: String,
    },
    /// 1-based row numbers.
    DeleteRows {
        rows: Vec<usize>,
    },
    Truncate,
}

#[derive(Debug)]
pub enum ExecuteResult {
    Select { table: Table },
    Aggregate { results: AggregateResult },
    Columns { names: Vec<String> },
    Insert { rows_affected: usize },
    Update { rows_affected: usize },
    Delete { rows_affected: usize },
    Truncate { rows_affected: usize },
}

impl ExecuteResult {
    pub fn rows_affected(&self) -> Option<usize> {
        match self {
            ExecuteResult::Insert { rows_affected }
            | ExecuteResult::Update { rows_affected }
            | ExecuteResult::Delete { rows_affected }
            | ExecuteResult::Truncate { rows_affected } => Some(*rows_affected),
            _ => None,
        }
    }
}
