//! # SELECT Execution
//!
//! `SelectQuery` carries the clause fragments of one read. Execution picks
//! one of two paths from the select list:
//!
//! ```text
//!   select list
//!       │
//!       ├── every item FUNC(col) ──> WHERE ──> aggregates ──> Aggregate result
//!       │
//!       └── plain columns ─────────> WHERE ──> ORDER BY ──> projection
//!                                          ──> DISTINCT ──> LIMIT ──> Select result
//! ```
//!
//! ORDER BY, DISTINCT and LIMIT do not apply to aggregate queries.

use crate::database::{Database, ExecuteResult};
use crate::sql::{self, Projection};
use crate::types::Table;
use eyre::Result;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectQuery {
    pub columns: String,
    pub where_clause: String,
    pub order_by: String,
    /// `<= 0` means no limit.
    pub limit: i64,
}

impl SelectQuery {
    /// Every column, every row.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn filter(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = where_clause.into();
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

/// Runs `query` against `table` without touching any file.
pub fn run_select(table: &Table, query: &SelectQuery) -> Result<ExecuteResult> {
    if let Some(specs) = sql::parse_aggregates(&query.columns, table.columns())? {
        let results = sql::aggregate(table, &specs, &query.where_clause)?;
        return Ok(ExecuteResult::Aggregate { results });
    }

    let projection = Projection::parse(&query.columns);
    projection.validate(table)?;

    let filtered = sql::evaluate(table, &query.where_clause)?;
    let sorted = sql::sort(filtered, &query.order_by)?;
    let mut result = sql::query::apply_projection(sorted, &projection)?;
    if projection.distinct {
        result = sql::distinct(result);
    }
    let table = sql::limit(result, query.limit);

    Ok(ExecuteResult::Select { table })
}

impl Database {
    #[instrument(name = "database::select", level = "debug", skip(self))]
    pub fn select(&self, query: &SelectQuery) -> Result<ExecuteResult> {
        let result = run_select(self.table(), query)?;
        if let ExecuteResult::Select { table } = &result {
            tracing::debug!(rows = table.row_count(), "select finished");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::AggregateValue;
    use crate::types::Row;

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

    fn rows(result: ExecuteResult) -> Table {
        match result {
            ExecuteResult::Select { table } => table,
            other => panic!("expected Select, got {:?}", other),
        }
    }

    #[test]
    fn filter_sort_limit_scenario() {
        let query = SelectQuery::new()
            .filter("age > 25")
            .order_by("age desc")
            .limit(1);
        let table = rows(run_select(&people(), &query).unwrap());

        assert_eq!(table.rows(), &[Row::from(vec!["3", "C", "40"])]);
    }

    #[test]
    fn order_by_may_use_unselected_column() {
        let query = SelectQuery::new().columns("name").order_by("age desc");
        let table = rows(run_select(&people(), &query).unwrap());

        assert_eq!(table.columns(), &["name"]);
        let names: Vec<&str> = table.column_cells(0).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn distinct_applies_before_limit() {
        let table = Table::from_rows(
            vec!["k".into(), "v".into()],
            vec![
                Row::from(vec!["a", "1"]),
                Row::from(vec!["a", "2"]),
                Row::from(vec!["b", "3"]),
            ],
        )
        .unwrap();
        let query = SelectQuery::new().columns("DISTINCT k").limit(2);
        let result = rows(run_select(&table, &query).unwrap());

        let keys: Vec<&str> = result.column_cells(0).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn aggregate_query_returns_aggregate_result() {
        let query = SelectQuery::new().columns("COUNT(*)").filter("age > 100");
        match run_select(&people(), &query).unwrap() {
            ExecuteResult::Aggregate { results } => {
                assert_eq!(results["COUNT(*)"], AggregateValue::Number(0.0));
            }
            other => panic!("expected Aggregate, got {:?}", other),
        }
    }

    #[test]
    fn unknown_projection_fails_even_with_no_matches() {
        let query = SelectQuery::new().columns("salary").filter("age > 100");
        assert!(run_select(&people(), &query).is_err());
    }
}
