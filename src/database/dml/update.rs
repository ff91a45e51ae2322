//! # UPDATE Operation Module
//!
//! Rewrites the assigned cells of every row that matches a WHERE clause.
//! A WHERE clause is mandatory; an unconditional UPDATE is rejected before
//! any row is examined.
//!
//! Rows affected counts matched rows, not cell writes. An UPDATE that
//! matches nothing succeeds with zero rows affected and writes nothing.
//!
//! A batch applies several `(assignments, where)` pairs in order, each one
//! seeing the rows the previous pair produced, and persists once. Any
//! failing pair aborts the whole batch.

use crate::database::dml::{Mutation, RowMatcher};
use crate::database::{Database, ExecuteResult};
use crate::error::QueryError;
use crate::sql::Assignments;
use crate::types::{Row, Table};
use eyre::{bail, Result, WrapErr};
use tracing::instrument;

pub fn update_matching(
    table: &Table,
    assignments: &Assignments,
    where_clause: &str,
    matcher: RowMatcher,
) -> Result<Mutation> {
    if where_clause.trim().is_empty() {
        bail!(QueryError::MissingWhereClause { operation: "UPDATE" });
    }
    let targets = assignments.resolve(table)?;
    let mask = matcher.mask(table, where_clause)?;

    let mut rows_affected = 0;
    let rows: Vec<Row> = table
        .rows()
        .iter()
        .zip(&mask)
        .map(|(row, &matched)| {
            let mut row = row.clone();
            if matched {
                rows_affected += 1;
                for &(index, value) in &targets {
                    row.values[index] = value.to_string();
                }
            }
            row
        })
        .collect();

    Ok(Mutation {
        table: Table::from_rows(table.columns().to_vec(), rows)?,
        rows_affected,
    })
}

impl Database {
    /// Applies `assignments` to every row matching `where_clause`. Returns
    /// the number of rows matched.
    #[instrument(name = "database::update", level = "debug", skip(self))]
    pub fn update(&mut self, assignments: &str, where_clause: &str) -> Result<usize> {
        let parsed = Assignments::parse(assignments, "UPDATE")?;
        let mutation = update_matching(self.table(), &parsed, where_clause, self.row_matcher())?;

        if mutation.is_noop() {
            tracing::info!("no rows matched");
            return Ok(0);
        }

        let rows_affected = mutation.rows_affected;
        self.commit(mutation.table)?;
        tracing::info!(rows = rows_affected, "rows updated");
        Ok(rows_affected)
    }

    #[instrument(name = "database::update_batch", level = "debug", skip(self, batch), fields(count = batch.len()))]
    pub fn update_batch<S: AsRef<str>>(&mut self, batch: &[(S, S)]) -> Result<usize> {
        if batch.is_empty() {
            bail!(QueryError::EmptyInput { operation: "UPDATE" });
        }

        let mut table = self.table().clone();
        let mut rows_affected = 0;
        for (i, (assignments, where_clause)) in batch.iter().enumerate() {
            let mutation = Assignments::parse(assignments.as_ref(), "UPDATE")
                .and_then(|parsed| {
                    update_matching(&table, &parsed, where_clause.as_ref(), self.row_matcher())
                })
                .wrap_err_with(|| format!("batch update {} failed", i + 1))?;
            rows_affected += mutation.rows_affected;
            table = mutation.table;
        }

        if rows_affected == 0 {
            tracing::info!("no rows matched");
            return Ok(0);
        }

        self.commit(table)?;
        tracing::info!(rows = rows_affected, "rows updated");
        Ok(rows_affected)
    }

    pub(crate) fn execute_update(
        &mut self,
        assignments: &str,
        where_clause: &str,
    ) -> Result<ExecuteResult> {
        let rows_affected = self.update(assignments, where_clause)?;
        Ok(ExecuteResult::Update { rows_affected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::query_error;

    fn people() -> Table {
        Table::from_rows(
            vec!["id".into(), "name".into(), "age".into()],
            vec![
                Row::from(vec!["1", "A", "20"]),
                Row::from(vec!["2", "B", "30"]),
                Row::from(vec!["3", "C", "40"]),
            ],
        )
        .unwrap()
    }

    fn set(text: &str) -> Assignments {
        Assignments::parse(text, "UPDATE").unwrap()
    }

    #[test]
    fn updates_only_matching_row() {
        let table = people();
        let mutation =
            update_matching(&table, &set("age=99"), "name='B'", RowMatcher::Position).unwrap();

        assert_eq!(mutation.rows_affected, 1);
        assert_eq!(mutation.table.rows()[1].values, vec!["2", "B", "99"]);
        assert_eq!(mutation.table.rows()[0], table.rows()[0]);
        assert_eq!(mutation.table.rows()[2], table.rows()[2]);
    }

    #[test]
    fn empty_where_is_rejected() {
        let err = update_matching(&people(), &set("age=1"), " ", RowMatcher::Position).unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::MissingWhereClause { operation: "UPDATE" })
        );
    }

    #[test]
    fn unknown_assignment_column_is_rejected() {
        let err =
            update_matching(&people(), &set("salary=1"), "id=1", RowMatcher::Position).unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::unknown_column("salary"))
        );
    }

    #[test]
    fn no_match_is_a_noop() {
        let mutation =
            update_matching(&people(), &set("age=1"), "age > 100", RowMatcher::Signature).unwrap();
        assert!(mutation.is_noop());
        assert_eq!(mutation.table, people());
    }

    #[test]
    fn duplicate_rows_are_updated_together() {
        let table = Table::from_rows(
            vec!["id".into(), "v".into()],
            vec![
                Row::from(vec!["9", "x"]),
                Row::from(vec!["1", "y"]),
                Row::from(vec!["9", "x"]),
            ],
        )
        .unwrap();

        for matcher in [RowMatcher::Position, RowMatcher::Signature] {
            let mutation = update_matching(&table, &set("v=z"), "id=9", matcher).unwrap();
            assert_eq!(mutation.rows_affected, 2, "matcher {} SHOULD hit both copies", matcher);
        }
    }

    #[test]
    fn batch_applies_pairs_in_order() {
        let mut db = Database::in_memory(people());

        let affected = db
            .update_batch(&[("age=50", "name='A'"), ("name=Z", "age >= 40")])
            .unwrap();

        assert_eq!(affected, 3, "second pair SHOULD see the first pair's write");
        let names: Vec<&str> = db.table().column_cells(1).collect();
        assert_eq!(names, vec!["Z", "B", "Z"]);
    }

    #[test]
    fn batch_failure_leaves_table_untouched() {
        let mut db = Database::in_memory(people());

        let err = db
            .update_batch(&[("age=1", "id=1"), ("age=2", "")])
            .unwrap_err();

        assert_eq!(
            query_error(&err),
            Some(&QueryError::MissingWhereClause { operation: "UPDATE" })
        );
        assert!(err.to_string().contains("batch update 2"));
        assert_eq!(db.table(), &people());
    }

    #[test]
    fn empty_batch_is_rejected() {
        let mut db = Database::in_memory(people());
        let err = db.update_batch::<&str>(&[]).unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::EmptyInput { operation: "UPDATE" })
        );
    }
}
