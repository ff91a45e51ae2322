//! # INSERT Operation Module
//!
//! Appends rows built from `col=value` assignment lists, or copied from
//! another CSV file.
//!
//! ## Row Construction
//!
//! Columns not named in the assignment list are left empty, so a partial
//! insert is valid:
//!
//! ```text
//!   columns:      id    name   age
//!   assignments:  name='Zed'
//!   new row:      ""    Zed    ""
//! ```
//!
//! ## Batches
//!
//! `insert_batch` validates every assignment list before building the new
//! table. One bad list rejects the whole batch and nothing is written.
//!
//! ## Insert From File
//!
//! Rows of the source file are mapped onto the target by column name. Every
//! source column must exist in the target; target columns missing from the
//! source are left empty.

use crate::database::dml::Mutation;
use crate::database::{Database, ExecuteResult};
use crate::error::QueryError;
use crate::sql::Assignments;
use crate::storage;
use crate::types::{Row, Table};
use eyre::{bail, Result};
use std::path::Path;
use tracing::instrument;

/// Builds one row in table column order from `assignments`.
pub fn build_row(table: &Table, assignments: &Assignments) -> Result<Row> {
    let mut values = vec![String::new(); table.column_count()];
    for (index, value) in assignments.resolve(table)? {
        values[index] = value.to_string();
    }
    Ok(Row::new(values))
}

/// A new table with one row appended per assignment list.
pub fn insert_rows(table: &Table, batch: &[Assignments]) -> Result<Mutation> {
    let rows = batch
        .iter()
        .map(|assignments| build_row(table, assignments))
        .collect::<Result<Vec<_>>>()?;
    let rows_affected = rows.len();

    Ok(Mutation {
        table: table.with_rows_appended(rows)?,
        rows_affected,
    })
}

/// Maps every row of `source` onto the columns of `target`.
pub fn rows_from_table(target: &Table, source: &Table) -> Result<Vec<Row>> {
    let mapping = source
        .columns()
        .iter()
        .map(|column| target.require_column(column))
        .collect::<Result<Vec<_>>>()?;

    Ok(source
        .rows()
        .iter()
        .map(|row| {
            let mut values = vec![String::new(); target.column_count()];
            for (source_index, &target_index) in mapping.iter().enumerate() {
                values[target_index] = row.values[source_index].clone();
            }
            Row::new(values)
        })
        .collect())
}

impl Database {
    /// Appends one row. Returns the number of rows inserted.
    pub fn insert(&mut self, assignments: &str) -> Result<usize> {
        self.insert_batch(&[assignments])
    }

    #[instrument(name = "database::insert", level = "debug", skip(self, batch), fields(count = batch.len()))]
    pub fn insert_batch<S: AsRef<str>>(&mut self, batch: &[S]) -> Result<usize> {
        if batch.is_empty() {
            bail!(QueryError::EmptyInput { operation: "INSERT" });
        }
        let parsed = batch
            .iter()
            .map(|text| Assignments::parse(text.as_ref(), "INSERT"))
            .collect::<Result<Vec<_>>>()?;

        let mutation = insert_rows(self.table(), &parsed)?;
        let rows_affected = mutation.rows_affected;
        self.commit(mutation.table)?;

        tracing::info!(rows = rows_affected, "rows inserted");
        Ok(rows_affected)
    }

    /// Appends every row of the CSV file at `source`.
    #[instrument(name = "database::insert_from", level = "debug", skip(self, source), fields(source = %source.as_ref().display()))]
    pub fn insert_from<P: AsRef<Path>>(&mut self, source: P) -> Result<usize> {
        let incoming = storage::load_table(source.as_ref(), self.delimiter())?;
        let rows = rows_from_table(self.table(), &incoming)?;
        let rows_affected = rows.len();
        if rows_affected == 0 {
            return Ok(0);
        }

        let table = self.table().with_rows_appended(rows)?;
        self.commit(table)?;

        tracing::info!(rows = rows_affected, "rows inserted from file");
        Ok(rows_affected)
    }

    pub(crate) fn execute_insert(&mut self, batch: &[String]) -> Result<ExecuteResult> {
        let rows_affected = self.insert_batch(batch)?;
        Ok(ExecuteResult::Insert { rows_affected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::query_error;

    fn people() -> Table {
        Table::from_rows(
            vec!["id".into(), "name".into(), "age".into()],
            vec![Row::from(vec!["1", "A", "20"])],
        )
        .unwrap()
    }

    #[test]
    fn partial_insert_leaves_other_columns_empty() {
        let table = people();
        let assignments = Assignments::parse("name='Zed'", "INSERT").unwrap();
        let row = build_row(&table, &assignments).unwrap();
        assert_eq!(row.values, vec!["", "Zed", ""]);
    }

    #[test]
    fn insert_rows_appends_in_order_without_touching_source() {
        let table = people();
        let batch = vec![
            Assignments::parse("id=2,name=B", "INSERT").unwrap(),
            Assignments::parse("id=3", "INSERT").unwrap(),
        ];

        let mutation = insert_rows(&table, &batch).unwrap();
        assert_eq!(mutation.rows_affected, 2);
        assert_eq!(mutation.table.row_count(), 3);
        assert_eq!(mutation.table.rows()[2].values, vec!["3", "", ""]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn one_bad_column_rejects_the_batch() {
        let table = people();
        let batch = vec![
            Assignments::parse("id=2", "INSERT").unwrap(),
            Assignments::parse("salary=2", "INSERT").unwrap(),
        ];

        let err = insert_rows(&table, &batch).unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::unknown_column("salary"))
        );
    }

    #[test]
    fn rows_from_table_maps_by_column_name() {
        let target = people();
        let source = Table::from_rows(
            vec!["age".into(), "id".into()],
            vec![Row::from(vec!["55", "7"])],
        )
        .unwrap();

        let rows = rows_from_table(&target, &source).unwrap();
        assert_eq!(rows, vec![Row::from(vec!["7", "", "55"])]);
    }

    #[test]
    fn rows_from_table_rejects_unknown_source_column() {
        let target = people();
        let source = Table::new(vec!["email".into()]).unwrap();
        let err = rows_from_table(&target, &source).unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::unknown_column("email"))
        );
    }
}
