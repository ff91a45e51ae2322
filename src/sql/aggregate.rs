//! # Aggregation Engine
//!
//! Evaluates `COUNT`, `SUM`, `AVG`, `MIN` and `MAX` over the rows that pass
//! an optional WHERE condition.
//!
//! ## Select List Recognition
//!
//! A select list is an aggregate query when every item has the shape
//! `FUNC(arg)` with a known function name (case-insensitive). A list that
//! mixes aggregates and plain columns is rejected. `COUNT(*)` binds to the
//! first column of the table; since COUNT never reads cell values, the
//! binding only matters for column validation.
//!
//! ```text
//!   "COUNT(*), avg(age)"   ──>  [COUNT(id) as "COUNT(*)", AVG(age) as "AVG(age)"]
//!   "name, COUNT(*)"       ──>  MixedProjection
//!   "name, age"            ──>  not an aggregate query
//! ```
//!
//! ## Column Typing
//!
//! Columns carry no declared type. SUM and AVG refuse a column when any
//! non-blank cell of the *unfiltered* column is not a number; blank cells
//! are skipped. MIN and MAX pick numeric or text ordering per column with
//! [`Comparator::for_column`], and return `Null` when no non-blank cell
//! survives the filter.
//!
//! ## Results
//!
//! Results come back as an `IndexMap` keyed by alias, in select-list order.
//! A repeated alias keeps its first position and its last value.

use crate::config::NULL_DISPLAY;
use crate::error::QueryError;
use crate::parsing::{is_blank, parse_number, split_list};
use crate::sql::condition;
use crate::sql::query::strip_distinct;
use crate::types::{Comparator, Table};
use eyre::{bail, Result};
use indexmap::IndexMap;
use std::fmt;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "COUNT" => Some(AggregateFunction::Count),
            "SUM" => Some(AggregateFunction::Sum),
            "AVG" => Some(AggregateFunction::Avg),
            "MIN" => Some(AggregateFunction::Min),
            "MAX" => Some(AggregateFunction::Max),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSpec {
    pub function: AggregateFunction,
    pub column: String,
    pub alias: String,
}

impl AggregateSpec {
    pub fn new(function: AggregateFunction, column: impl Into<String>) -> Self {
        let column = column.into();
        let alias = format!("{}({})", function.name(), column);
        Self {
            function,
            column,
            alias,
        }
    }

    /// `COUNT(*)` over a table whose first column is `first_column`.
    pub fn count_all(first_column: impl Into<String>) -> Self {
        Self {
            function: AggregateFunction::Count,
            column: first_column.into(),
            alias: "COUNT(*)".to_string(),
        }
    }
}

/// Splits `FUNC(arg)` into a known function and its trimmed argument.
fn parse_call(item: &str) -> Option<(AggregateFunction, &str)> {
    let item = item.trim();
    let open = item.find('(')?;
    if !item.ends_with(')') {
        return None;
    }
    let function = AggregateFunction::from_name(item[..open].trim())?;
    Some((function, item[open + 1..item.len() - 1].trim()))
}

/// Recognizes an aggregate select list.
///
/// Returns `Ok(None)` when the list has no aggregate items, so the caller
/// can fall back to a plain projection.
pub fn parse_aggregates(select: &str, columns: &[String]) -> Result<Option<Vec<AggregateSpec>>> {
    let (_, rest) = strip_distinct(select.trim());
    let items = split_list(rest);
    if items.iter().all(|item| item.is_empty()) {
        return Ok(None);
    }

    let calls: Vec<Option<(AggregateFunction, &str)>> =
        items.iter().map(|item| parse_call(item)).collect();
    let aggregate_count = calls.iter().filter(|c| c.is_some()).count();
    if aggregate_count == 0 {
        return Ok(None);
    }
    if aggregate_count != calls.len() {
        bail!(QueryError::MixedProjection);
    }

    let mut specs = Vec::with_capacity(calls.len());
    for (function, argument) in calls.into_iter().flatten() {
        if argument == "*" {
            if function != AggregateFunction::Count {
                bail!(QueryError::unknown_column("*"));
            }
            match columns.first() {
                Some(first) => specs.push(AggregateSpec::count_all(first.clone())),
                None => bail!(QueryError::unknown_column("*")),
            }
        } else {
            specs.push(AggregateSpec::new(function, argument));
        }
    }
    Ok(Some(specs))
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregateValue {
    Number(f64),
    Text(String),
    Null,
}

impl AggregateValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AggregateValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AggregateValue::Null)
    }
}

impl fmt::Display for AggregateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateValue::Number(n) if n.fract() == 0.0 => write!(f, "{:.0}", n),
            AggregateValue::Number(n) => write!(f, "{:.2}", n),
            AggregateValue::Text(s) => f.write_str(s),
            AggregateValue::Null => f.write_str(NULL_DISPLAY),
        }
    }
}

pub type AggregateResult = IndexMap<String, AggregateValue>;

/// True when some non-blank cell of the column is not a number.
fn has_text_cells(table: &Table, index: usize) -> bool {
    table
        .column_cells(index)
        .any(|cell| !is_blank(cell) && parse_number(cell).is_none())
}

fn numbers(table: &Table, index: usize) -> impl Iterator<Item = f64> + '_ {
    table.column_cells(index).filter_map(parse_number)
}

fn extreme(
    full: &Table,
    filtered: &Table,
    index: usize,
    function: AggregateFunction,
) -> AggregateValue {
    let comparator = Comparator::for_column(full.column_cells(index));
    let cells = filtered.column_cells(index).filter(|c| !is_blank(c));

    let picked = match function {
        AggregateFunction::Min => cells.min_by(|a, b| comparator.compare(a, b)),
        _ => cells.max_by(|a, b| comparator.compare(a, b)),
    };

    match (picked, comparator) {
        (None, _) => AggregateValue::Null,
        (Some(cell), Comparator::Numeric) => match parse_number(cell) {
            Some(n) => AggregateValue::Number(n),
            None => AggregateValue::Text(cell.to_string()),
        },
        (Some(cell), Comparator::Text) => AggregateValue::Text(cell.to_string()),
    }
}

/// Applies `where_clause`, then evaluates every spec over the surviving rows.
#[instrument(name = "sql::aggregate", level = "debug", skip(table, specs), fields(specs = specs.len()))]
pub fn aggregate(table: &Table, specs: &[AggregateSpec], where_clause: &str) -> Result<AggregateResult> {
    let filtered = condition::evaluate(table, where_clause)?;
    let mut results = AggregateResult::with_capacity(specs.len());

    for spec in specs {
        let index = table.require_column(&spec.column)?;

        let value = match spec.function {
            AggregateFunction::Count => AggregateValue::Number(filtered.row_count() as f64),
            AggregateFunction::Sum | AggregateFunction::Avg => {
                if has_text_cells(table, index) {
                    bail!(QueryError::TypeError {
                        function: spec.function.name(),
                        column: spec.column.clone(),
                    });
                }
                let (sum, count) = numbers(&filtered, index)
                    .fold((0.0_f64, 0_usize), |(s, c), n| (s + n, c + 1));
                match spec.function {
                    AggregateFunction::Sum => AggregateValue::Number(sum),
                    _ if count == 0 => AggregateValue::Number(0.0),
                    _ => AggregateValue::Number(sum / count as f64),
                }
            }
            AggregateFunction::Min | AggregateFunction::Max => {
                extreme(table, &filtered, index, spec.function)
            }
        };

        results.insert(spec.alias.clone(), value);
    }

    tracing::debug!(rows = filtered.row_count(), "aggregates computed");
    Ok(results)
}
