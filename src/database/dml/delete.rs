//! # DELETE Operation Module
//!
//! Removes rows from the table, either those matching a WHERE clause or
//! those at explicit 1-based row numbers, and can truncate the table.
//!
//! ## Complement Rebuild
//!
//! The new table is the complement of the deleted rows, in original order:
//!
//! ```text
//!   rows:   r0  r1  r2  r3
//!   mask:   .   X   .   X        X = matched
//!   kept:   r0      r2
//! ```
//!
//! When nothing is kept, the result still carries the original columns, so
//! the file is rewritten as a header-only CSV.
//!
//! Rows deleted is `original count - kept count`.

use crate::database::dml::{Mutation, RowMatcher};
use crate::database::{Database, ExecuteResult};
use crate::error::QueryError;
use crate::types::Table;
use eyre::{bail, Result};
use hashbrown::HashSet;
use tracing::instrument;

pub fn delete_matching(table: &Table, where_clause: &str, matcher: RowMatcher) -> Result<Mutation> {
    if where_clause.trim().is_empty() {
        bail!(QueryError::MissingWhereClause { operation: "DELETE" });
    }
    let mask = matcher.mask(table, where_clause)?;
    let kept = table.retain_by_mask(&mask, false);

    Ok(Mutation {
        rows_affected: table.row_count() - kept.row_count(),
        table: kept,
    })
}

/// Deletes rows by 1-based position. Repeated positions count once.
pub fn delete_positions(table: &Table, rows: &[usize]) -> Result<Mutation> {
    if rows.is_empty() {
        bail!(QueryError::EmptyInput { operation: "DELETE" });
    }

    let row_count = table.row_count();
    let mut targets = HashSet::with_capacity(rows.len());
    for &row in rows {
        if row == 0 || row > row_count {
            bail!(QueryError::RowOutOfRange { row, row_count });
        }
        targets.insert(row - 1);
    }

    let mask: Vec<bool> = (0..row_count).map(|i| targets.contains(&i)).collect();
    let kept = table.retain_by_mask(&mask, false);

    Ok(Mutation {
        rows_affected: row_count - kept.row_count(),
        table: kept,
    })
}

impl Database {
    /// Deletes every row matching `where_clause`. Returns the number of rows
    /// removed.
    #[instrument(name = "database::delete", level = "debug", skip(self))]
    pub fn delete(&mut self, where_clause: &str) -> Result<usize> {
        let mutation = delete_matching(self.table(), where_clause, self.row_matcher())?;
        self.apply_deletion(mutation)
    }

    #[instrument(name = "database::delete_rows", level = "debug", skip(self))]
    pub fn delete_rows(&mut self, rows: &[usize]) -> Result<usize> {
        let mutation = delete_positions(self.table(), rows)?;
        self.apply_deletion(mutation)
    }

    /// Removes every row and keeps the header.
    #[instrument(name = "database::truncate", level = "debug", skip(self))]
    pub fn truncate(&mut self) -> Result<usize> {
        let rows_affected = self.table().row_count();
        let empty = self.table().empty_like();
        self.commit(empty)?;

        tracing::info!(rows = rows_affected, "table truncated");
        Ok(rows_affected)
    }

    fn apply_deletion(&mut self, mutation: Mutation) -> Result<usize> {
        if mutation.is_noop() {
            tracing::info!("no rows matched");
            return Ok(0);
        }
        let rows_affected = mutation.rows_affected;
        self.commit(mutation.table)?;
        tracing::info!(rows = rows_affected, "rows deleted");
        Ok(rows_affected)
    }

    pub(crate) fn execute_delete(&mut self, where_clause: &str) -> Result<ExecuteResult> {
        let rows_affected = self.delete(where_clause)?;
        Ok(ExecuteResult::Delete { rows_affected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::query_error;
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
    fn deletes_every_identical_row() {
        for matcher in [RowMatcher::Position, RowMatcher::Signature] {
            let mutation = delete_matching(&with_duplicates(), "id=9", matcher).unwrap();
            assert_eq!(mutation.rows_affected, 2);
            assert_eq!(mutation.table.rows(), &[Row::from(vec!["1", "A", "2"])]);
        }
    }

    #[test]
    fn deleting_everything_keeps_columns() {
        let mutation = delete_matching(&with_duplicates(), "n >= 1", RowMatcher::Position).unwrap();
        assert_eq!(mutation.rows_affected, 3);
        assert!(mutation.table.is_empty());
        assert_eq!(mutation.table.columns(), &["id", "name", "n"]);
    }

    #[test]
    fn empty_where_is_rejected() {
        let err = delete_matching(&with_duplicates(), "", RowMatcher::Position).unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::MissingWhereClause { operation: "DELETE" })
        );
    }

    #[test]
    fn positions_are_one_based_and_deduplicated() {
        let mutation = delete_positions(&with_duplicates(), &[3, 1, 3]).unwrap();
        assert_eq!(mutation.rows_affected, 2);
        assert_eq!(mutation.table.rows(), &[Row::from(vec!["1", "A", "2"])]);
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let err = delete_positions(&with_duplicates(), &[1, 4]).unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::RowOutOfRange { row: 4, row_count: 3 })
        );

        let err = delete_positions(&with_duplicates(), &[0]).unwrap_err();
        assert!(matches!(
            query_error(&err),
            Some(QueryError::RowOutOfRange { row: 0, .. })
        ));
    }
}
