//! Command-line flags and their mapping to a [`Statement`].

use crate::config::FILE_ENV_VAR;
use crate::database::{RowMatcher, SelectQuery, Statement};
use clap::Parser;
use eyre::{bail, Result};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "csvql")]
#[command(version, about = "SQL-like queries and edits on CSV files", long_about = None)]
pub struct Args {
    /// CSV input file
    #[arg(short, long, env = FILE_ENV_VAR)]
    pub file: PathBuf,

    /// SELECT columns (comma-separated, `*`, `DISTINCT ...` or aggregates like `COUNT(*)`)
    #[arg(long)]
    pub select: Option<String>,

    /// WHERE condition, e.g. "age > 30"
    #[arg(long = "where", default_value = "")]
    pub where_clause: String,

    /// ORDER BY column [asc|desc]
    #[arg(long, default_value = "")]
    pub order: String,

    /// LIMIT number of rows returned (0 = no limit)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub limit: i64,

    /// INSERT a row (col1=val1,col2=val2); repeat for a batch
    #[arg(long)]
    pub insert: Vec<String>,

    /// INSERT every row of another CSV file
    #[arg(long)]
    pub insert_from: Option<PathBuf>,

    /// UPDATE column values (col1=val1,col2=val2), requires --where
    #[arg(long)]
    pub update: Option<String>,

    /// DELETE rows matching --where
    #[arg(long)]
    pub delete: bool,

    /// DELETE rows by 1-based number, e.g. "2,5"
    #[arg(long, value_delimiter = ',')]
    pub delete_rows: Option<Vec<usize>>,

    /// DELETE every row, keeping the header
    #[arg(long)]
    pub truncate: bool,

    /// Show CSV column headers
    #[arg(long)]
    pub columns: bool,

    /// Show only values, without borders or headers
    #[arg(long)]
    pub raw: bool,

    /// Write SELECT results to this CSV file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// How UPDATE/DELETE locate rows: position or signature
    #[arg(long, default_value = "position")]
    pub match_by: String,
}

impl Args {
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }

    pub fn row_matcher(&self) -> Result<RowMatcher> {
        self.match_by.parse()
    }

    /// The single operation requested. No operation means `SELECT *`.
    pub fn statement(&self) -> Result<Statement> {
        let requested = [
            self.select.is_some(),
            !self.insert.is_empty(),
            self.insert_from.is_some(),
            self.update.is_some(),
            self.delete,
            self.delete_rows.is_some(),
            self.truncate,
            self.columns,
        ]
        .iter()
        .filter(|&&set| set)
        .count();

        if requested > 1 {
            bail!(
                "only one operation may be given (select, insert, insert-from, update, delete, delete-rows, truncate, columns)"
            );
        }

        if self.columns {
            return Ok(Statement::Columns);
        }
        if !self.insert.is_empty() {
            return Ok(Statement::Insert {
                assignments: self.insert.clone(),
            });
        }
        if let Some(source) = &self.insert_from {
            return Ok(Statement::InsertFrom {
                source: source.clone(),
            });
        }
        if let Some(assignments) = &self.update {
            return Ok(Statement::Update {
                assignments: assignments.clone(),
                where_clause: self.where_clause.clone(),
            });
        }
        if self.delete {
            return Ok(Statement::Delete {
                where_clause: self.where_clause.clone(),
            });
        }
        if let Some(rows) = &self.delete_rows {
            return Ok(Statement::DeleteRows { rows: rows.clone() });
        }
        if self.truncate {
            return Ok(Statement::Truncate);
        }

        Ok(Statement::Select(
            SelectQuery::new()
                .columns(self.select.clone().unwrap_or_default())
                .filter(self.where_clause.clone())
                .order_by(self.order.clone())
                .limit(self.limit),
        ))
    }
}
