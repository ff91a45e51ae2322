//! # Query Language
//!
//! csvql statements are not parsed from one SQL string. Each clause arrives
//! as its own text fragment (select list, WHERE, ORDER BY, LIMIT,
//! assignments) and is interpreted by a small dedicated parser.
//!
//! ## Module Structure
//!
//! - `condition`: single-comparison WHERE clauses and row matching
//! - `query`: projection, ORDER BY, LIMIT and DISTINCT
//! - `aggregate`: COUNT/SUM/AVG/MIN/MAX select lists and evaluation
//! - `assignment`: `col=value` lists for INSERT and UPDATE
//!
//! ## Supported Fragments
//!
//! | Clause    | Grammar                                          |
//! |-----------|--------------------------------------------------|
//! | SELECT    | `[DISTINCT] col, col` \| `*` \| `FUNC(col), ...` |
//! | WHERE     | `col op literal`, op in `>= <= != = > <`         |
//! | ORDER BY  | `col [asc\|desc]`                                |
//! | LIMIT     | integer, `<= 0` means unlimited                  |
//! | SET/VALUES| `col=value, col=value`                           |
//!
//! Literals may be wrapped in one layer of `'` or `"` quotes.

pub mod aggregate;
pub mod assignment;
pub mod condition;
pub mod query;

pub use aggregate::{
    aggregate, parse_aggregates, AggregateFunction, AggregateResult, AggregateSpec,
    AggregateValue,
};
pub use assignment::Assignments;
pub use condition::{evaluate, matching_rows, Condition, Operator};
pub use query::{distinct, limit, project, sort, OrderBy, Projection, SortDirection};
