//! # Result Rendering
//!
//! Turns an [`ExecuteResult`] into text on a writer, or into a CSV file when
//! an output destination is set.
//!
//! ## Modes
//!
//! | Result       | Bordered (default)                     | Raw                        |
//! |--------------|----------------------------------------|----------------------------|
//! | rows         | box table + `N rows in set`            | one comma-joined line/row  |
//! | no rows      | `Empty set`                            | nothing                    |
//! | aggregates   | one-row box table, aliases as headers  | one comma-joined line      |
//! | columns      | `Columns in CSV file:` + `N: name`     | same                       |
//! | mutation     | `Query OK, N rows affected`            | same                       |
//!
//! With an output destination, row and aggregate results are saved as CSV
//! instead (header omitted in raw mode) and `Results saved to: <path>` is
//! printed.

use crate::cli::table::TableFormatter;
use crate::config::{DEFAULT_DELIMITER, RAW_FIELD_SEPARATOR};
use crate::database::ExecuteResult;
use crate::sql::AggregateResult;
use crate::storage;
use crate::types::{Row, Table};
use eyre::Result;
use std::io::Write;
use std::path::PathBuf;

pub struct Renderer<W: Write> {
    out: W,
    raw: bool,
    output: Option<PathBuf>,
    delimiter: u8,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            raw: false,
            output: None,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Saves row results to `path` instead of printing them.
    pub fn output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path;
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, result: &ExecuteResult) -> Result<()> {
        match result {
            ExecuteResult::Select { table } => self.render_table(table),
            ExecuteResult::Aggregate { results } => self.render_aggregates(results),
            ExecuteResult::Columns { names } => self.render_columns(names),
            ExecuteResult::Insert { rows_affected }
            | ExecuteResult::Update { rows_affected }
            | ExecuteResult::Delete { rows_affected }
            | ExecuteResult::Truncate { rows_affected } => {
                writeln!(
                    self.out,
                    "Query OK, {} row{} affected",
                    rows_affected,
                    plural(*rows_affected)
                )?;
                Ok(())
            }
        }
    }

    fn render_table(&mut self, table: &Table) -> Result<()> {
        if self.save_if_requested(table)? {
            return Ok(());
        }

        if table.is_empty() {
            if !self.raw {
                writeln!(self.out, "Empty set")?;
            }
            return Ok(());
        }

        if self.raw {
            for row in table.rows() {
                writeln!(self.out, "{}", row.values.join(RAW_FIELD_SEPARATOR))?;
            }
            return Ok(());
        }

        let formatter = TableFormatter::new(table.columns().to_vec(), table.rows());
        write!(self.out, "{}", formatter.render())?;
        writeln!(
            self.out,
            "{} row{} in set",
            formatter.row_count(),
            plural(formatter.row_count())
        )?;
        Ok(())
    }

    fn render_aggregates(&mut self, results: &AggregateResult) -> Result<()> {
        let table = aggregate_table(results)?;
        if self.save_if_requested(&table)? {
            return Ok(());
        }

        if self.raw {
            let values: Vec<String> = results.values().map(|v| v.to_string()).collect();
            writeln!(self.out, "{}", values.join(RAW_FIELD_SEPARATOR))?;
            return Ok(());
        }

        let formatter = TableFormatter::new(table.columns().to_vec(), table.rows());
        write!(self.out, "{}", formatter.render())?;
        Ok(())
    }

    fn render_columns(&mut self, names: &[String]) -> Result<()> {
        writeln!(self.out, "Columns in CSV file:")?;
        for (i, name) in names.iter().enumerate() {
            writeln!(self.out, "{}: {}", i + 1, name)?;
        }
        Ok(())
    }

    fn save_if_requested(&mut self, table: &Table) -> Result<bool> {
        let Some(path) = &self.output else {
            return Ok(false);
        };
        storage::save_table(path, table, !self.raw, self.delimiter)?;
        writeln!(self.out, "Results saved to: {}", path.display())?;
        Ok(true)
    }
}

/// Aggregate results as a one-row table with aliases as column names.
pub fn aggregate_table(results: &AggregateResult) -> Result<Table> {
    let columns = results.keys().cloned().collect();
    let row = Row::new(results.values().map(|v| v.to_string()).collect());
    Table::from_rows(columns, vec![row])
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
