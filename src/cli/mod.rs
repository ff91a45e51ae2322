//! # csvql CLI Module
//!
//! The command-line front end: flag parsing, logging setup and result
//! rendering. One invocation runs one operation against one file.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI Entry Point                        │
//! │                      (bin/csvql.rs)                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Args (clap)  ──>  Statement  ──>  Database::execute        │
//! ├─────────────────────────────────────────────────────────────┤
//! │     Renderer                 │    Table Formatter           │
//! │  bordered / raw / to file    │  ASCII box drawing           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! csvql -f data.csv --select "name,age" --where "age > 30"
//! csvql -f users.csv --update "status='inactive'" --where "last_login<'2024-01-01'"
//! csvql -f customers.csv --delete --where "country='US'"
//! csvql -f data.csv --insert "name='John',age=28,status='active'"
//! csvql -f data.csv --columns
//! csvql -f data.csv --select "COUNT(*), AVG(age)" --raw
//! ```
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. The filter is read from
//! `CSVQL_LOG` (same syntax as `RUST_LOG`) and defaults to `warn`, so
//! stdout only carries results.

pub mod args;
pub mod render;
pub mod table;

pub use args::Args;
pub use render::Renderer;
pub use table::TableFormatter;

use crate::config::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. Calling it twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
