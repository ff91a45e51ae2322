//! # DML Operations Module
//!
//! INSERT, UPDATE and DELETE against the loaded table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        DML Operation Flow                           │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │   assignments / WHERE text                                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │   ┌─────────────────────┐                                           │
//! │   │ Parse & Validate    │  EmptyInput, MissingWhereClause,          │
//! │   │                     │  MalformedAssignment, UnknownColumn       │
//! │   └─────────┬───────────┘                                           │
//! │             │                                                       │
//! │             ▼                                                       │
//! │   ┌─────────────────────┐                                           │
//! │   │ Match Rows          │  RowMatcher::Position | Signature         │
//! │   │                     │  -> one bool per full-table row           │
//! │   └─────────┬───────────┘                                           │
//! │             │                                                       │
//! │             ▼                                                       │
//! │   ┌─────────────────────┐                                           │
//! │   │ Rebuild Table       │  new Table value, source untouched        │
//! │   └─────────┬───────────┘                                           │
//! │             │  zero rows affected: stop here, nothing written       │
//! │             ▼                                                       │
//! │   ┌─────────────────────┐                                           │
//! │   │ Persist             │  temp file + rename, then the new table   │
//! │   │                     │  replaces the loaded one                  │
//! │   └─────────────────────┘                                           │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Matching
//!
//! The WHERE filter decides which rows of the full table a mutation
//! touches. Two strategies produce the per-row mask:
//!
//! - `Position` (default): the condition evaluator reports row positions
//!   directly.
//! - `Signature`: the filtered rows are reduced to a set of signatures
//!   (cells joined with `\u{1F}`) and every full-table row whose signature
//!   is in the set matches. Rows with identical content are
//!   indistinguishable and always move together.
//!
//! A WHERE predicate only looks at row content, so identical rows either
//! all pass or all fail it, and both strategies produce the same mask.
//! `Signature` is kept for callers that want the legacy matching rule
//! spelled out.

mod delete;
mod insert;
mod update;

pub use delete::{delete_matching, delete_positions};
pub use insert::{build_row, insert_rows};
pub use update::update_matching;

use crate::sql::condition;
use crate::types::Table;
use eyre::{bail, Result};
use hashbrown::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowMatcher {
    #[default]
    Position,
    Signature,
}

impl RowMatcher {
    /// One entry per row of `table`, true where the row matches
    /// `where_clause`.
    pub fn mask(self, table: &Table, where_clause: &str) -> Result<Vec<bool>> {
        match self {
            RowMatcher::Position => {
                let mut mask = vec![false; table.row_count()];
                for index in condition::matching_rows(table, where_clause)? {
                    mask[index] = true;
                }
                Ok(mask)
            }
            RowMatcher::Signature => {
                let filtered = condition::evaluate(table, where_clause)?;
                let signatures: HashSet<String> =
                    filtered.rows().iter().map(|row| row.signature()).collect();
                Ok(table
                    .rows()
                    .iter()
                    .map(|row| signatures.contains(&row.signature()))
                    .collect())
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RowMatcher::Position => "position",
            RowMatcher::Signature => "signature",
        }
    }
}

impl fmt::Display for RowMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RowMatcher {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "position" => Ok(RowMatcher::Position),
            "signature" => Ok(RowMatcher::Signature),
            other => bail!("unknown row matcher '{}' (use 'position' or 'signature')", other),
        }
    }
}

/// Outcome of a mutation that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub table: Table,
    pub rows_affected: usize,
}

impl Mutation {
    pub fn is_noop(&self) -> bool {
        self.rows_affected == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Row;

    fn with_duplicates() -> Table {
        Table::from_rows(
            vec!["id".into(), "name".into(), "n".into()],
            vec![
                Row::from(vec!["9", "X", "1"]),
                Row::from(vec!["1", "A", "2"]),
                Row::from(vec!["9", "X", "1"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn strategies_agree_on_duplicate_rows() {
        let table = with_duplicates();
        let by_position = RowMatcher::Position.mask(&table, "id = 9").unwrap();
        let by_signature = RowMatcher::Signature.mask(&table, "id = 9").unwrap();

        assert_eq!(by_position, vec![true, false, true]);
        assert_eq!(by_signature, by_position);
    }

    #[test]
    fn empty_where_matches_every_row() {
        let table = with_duplicates();
        assert_eq!(
            RowMatcher::Signature.mask(&table, "").unwrap(),
            vec![true, true, true]
        );
    }

    #[test]
    fn parses_matcher_names() {
        assert_eq!("Signature".parse::<RowMatcher>().unwrap(), RowMatcher::Signature);
        assert_eq!("position".parse::<RowMatcher>().unwrap(), RowMatcher::Position);
        assert!("index".parse::<RowMatcher>().is_err());
    }
}
