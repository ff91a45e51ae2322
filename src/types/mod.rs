//! # Type System for csvql
//!
//! Everything loaded from a CSV file is text. This module holds the table
//! model and the comparator that decides, on demand, whether two cells
//! compare as numbers or as strings.
//!
//! ## Module Structure
//!
//! - `row`: `Row`, an ordered list of text cells, and its signature
//! - `table`: `Table`, the in-memory column/row store
//! - `cell`: `Comparator`, the dual numeric/text ordering
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `Table` | Column names plus rows, immutable by convention |
//! | `Row` | Cells in column order |
//! | `Comparator` | `Numeric` or `Text` ordering between two cells |

mod cell;
mod row;
mod table;

pub use cell::{compare_dual, Comparator};
pub use row::Row;
pub use table::Table;
