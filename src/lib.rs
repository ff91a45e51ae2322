//! # csvql - SQL-like Queries on CSV Files
//!
//! csvql loads a single CSV file as an in-memory table and runs a small
//! SQL-like language against it: filtered, sorted and limited reads,
//! aggregates, and INSERT/UPDATE/DELETE that rewrite the file.
//!
//! - **Schema-free**: every cell is text; numeric comparison is chosen on
//!   the fly when both sides parse as numbers
//! - **Whole-table rewrites**: mutations build a new table and replace the
//!   file atomically
//! - **Guarded mutations**: UPDATE and DELETE refuse to run without WHERE
//!
//! ## Quick Start
//!
//! ```ignore
//! use csvql::{Database, SelectQuery};
//!
//! let mut db = Database::builder()
//!     .path("./people.csv")
//!     .open()?;
//!
//! db.insert("id=4,name='D',age=50")?;
//! db.update("age=99", "name='B'")?;
//!
//! let result = db.select(
//!     &SelectQuery::new()
//!         .filter("age > 25")
//!         .order_by("age desc")
//!         .limit(1),
//! )?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (flags, rendering, logging)    │
//! ├─────────────────────────────────────┤
//! │       Public API (Database)          │
//! ├─────────────────────────────────────┤
//! │  SQL fragments  │  DML row matching  │
//! ├─────────────────────────────────────┤
//! │    Table model + dual comparator     │
//! ├─────────────────────────────────────┤
//! │   Storage (csv codec, atomic save)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: `Table`, `Row`, numeric/text `Comparator`
//! - [`sql`]: WHERE, projection, ORDER BY, LIMIT, DISTINCT, aggregates
//! - [`database`]: `Database`, `SelectQuery`, INSERT/UPDATE/DELETE
//! - [`storage`]: CSV decode/encode and file persistence
//! - [`cli`]: flag parsing, output rendering, logging setup
//! - [`error`]: `QueryError`, the domain error kinds

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod parsing;
pub mod sql;
pub mod storage;
pub mod types;

pub use database::{Database, DatabaseBuilder, ExecuteResult, RowMatcher, SelectQuery, Statement};
pub use error::QueryError;
pub use sql::{AggregateResult, AggregateValue};
pub use types::{Row, Table};
