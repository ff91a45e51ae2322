//! # Condition Evaluator
//!
//! Parses a single `column op literal` comparison and applies it to a table.
//!
//! ## Parsing
//!
//! The condition text is scanned for operators in a fixed order:
//!
//! ```text
//!   >=   <=   !=   =   >   <
//! ```
//!
//! The first operator that occurs anywhere in the text wins and the text is
//! split once around it. Scanning the two-character operators first keeps
//! `age >= 30` from being read as `age > "= 30"`. Column and literal are
//! trimmed and one layer of surrounding quotes is removed from the literal.
//!
//! ## Comparison
//!
//! | Operator        | Comparison                                     |
//! |-----------------|------------------------------------------------|
//! | `=`, `!=`       | exact text equality                            |
//! | `>` `<` `>=` `<=` | numeric if both sides parse, else lexicographic |
//!
//! ## Results
//!
//! [`matching_rows`] returns the positions of matching rows, in table order.
//! [`evaluate`] copies those rows into a new table. An empty condition
//! matches every row.

use crate::config::CONDITION_OPERATORS;
use crate::error::QueryError;
use crate::parsing::strip_quotes;
use crate::types::{compare_dual, Row, Table};
use eyre::{bail, Result};
use std::cmp::Ordering;
use std::fmt;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    GtEq,
    LtEq,
    NotEq,
    Eq,
    Gt,
    Lt,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">=" => Some(Operator::GtEq),
            "<=" => Some(Operator::LtEq),
            "!=" => Some(Operator::NotEq),
            "=" => Some(Operator::Eq),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::GtEq => ">=",
            Operator::LtEq => "<=",
            Operator::NotEq => "!=",
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }

    pub fn matches(self, cell: &str, literal: &str) -> bool {
        match self {
            Operator::Eq => cell == literal,
            Operator::NotEq => cell != literal,
            Operator::Gt => compare_dual(cell, literal) == Ordering::Greater,
            Operator::Lt => compare_dual(cell, literal) == Ordering::Less,
            Operator::GtEq => compare_dual(cell, literal) != Ordering::Less,
            Operator::LtEq => compare_dual(cell, literal) != Ordering::Greater,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub literal: String,
}

impl Condition {
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        for symbol in CONDITION_OPERATORS {
            let Some(pos) = text.find(symbol) else {
                continue;
            };
            let column = text[..pos].trim();
            if column.is_empty() {
                break;
            }
            let literal = strip_quotes(&text[pos + symbol.len()..]);
            let operator = match Operator::from_symbol(symbol) {
                Some(op) => op,
                None => break,
            };
            return Ok(Self {
                column: column.to_string(),
                operator,
                literal: literal.to_string(),
            });
        }

        bail!(QueryError::MalformedCondition {
            condition: text.to_string(),
        })
    }

    /// Resolves the column against `table`.
    pub fn compile(&self, table: &Table) -> Result<CompiledCondition<'_>> {
        let column_index = table.require_column(&self.column)?;
        Ok(CompiledCondition {
            column_index,
            operator: self.operator,
            literal: &self.literal,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} '{}'", self.column, self.operator, self.literal)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CompiledCondition<'a> {
    column_index: usize,
    operator: Operator,
    literal: &'a str,
}

impl<'a> CompiledCondition<'a> {
    pub fn evaluate(&self, row: &Row) -> bool {
        match row.get(self.column_index) {
            Some(cell) => self.operator.matches(cell, self.literal),
            None => false,
        }
    }
}

/// Positions of the rows satisfying `condition`, in table order.
#[instrument(name = "sql::condition::matching_rows", level = "debug", skip(table))]
pub fn matching_rows(table: &Table, condition: &str) -> Result<Vec<usize>> {
    if condition.trim().is_empty() {
        return Ok((0..table.row_count()).collect());
    }

    let parsed = Condition::parse(condition)?;
    let compiled = parsed.compile(table)?;

    let indices: Vec<usize> = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| compiled.evaluate(row))
        .map(|(i, _)| i)
        .collect();

    tracing::debug!(matched = indices.len(), total = table.row_count(), "condition applied");
    Ok(indices)
}

/// Copies the rows satisfying `condition` into a new table.
pub fn evaluate(table: &Table, condition: &str) -> Result<Table> {
    if condition.trim().is_empty() {
        return Ok(table.clone());
    }
    let indices = matching_rows(table, condition)?;
    Ok(table.select_rows(&indices))
}
