//! # Projection, Sort, Limit and Distinct
//!
//! The read-path transforms applied after the WHERE filter. Each takes a
//! table by value and returns a new one, so the pipeline moves rows instead
//! of copying them:
//!
//! ```text
//!   filtered ──> sort ──> project ──> distinct ──> limit ──> result
//! ```
//!
//! Sorting runs before projection so ORDER BY may name a column that is
//! not selected. LIMIT is always last, which makes `ORDER BY ... LIMIT n`
//! deterministic (the sort is stable).

use crate::error::QueryError;
use crate::parsing::split_list;
use crate::types::{Comparator, Row, Table};
use eyre::{bail, Result};
use hashbrown::HashSet;

/// Column list of a plain (non-aggregate) SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    /// Empty means every column.
    pub columns: Vec<String>,
    pub distinct: bool,
}

impl Projection {
    /// Parses `"[DISTINCT] col, col"`. An empty list or `*` selects every
    /// column.
    pub fn parse(text: &str) -> Self {
        let (distinct, rest) = strip_distinct(text.trim());
        let rest = rest.trim();
        let columns = if rest.is_empty() || rest == "*" {
            Vec::new()
        } else {
            split_list(rest).into_iter().map(str::to_string).collect()
        };
        Self { columns, distinct }
    }

    pub fn is_all(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn validate(&self, table: &Table) -> Result<Vec<usize>> {
        if self.is_all() {
            return Ok((0..table.column_count()).collect());
        }
        self.columns
            .iter()
            .map(|c| table.require_column(c))
            .collect()
    }
}

/// Returns whether `text` starts with the DISTINCT keyword, and the rest.
pub(crate) fn strip_distinct(text: &str) -> (bool, &str) {
    const KEYWORD: &str = "DISTINCT";
    match text.get(..KEYWORD.len()) {
        Some(head) if head.eq_ignore_ascii_case(KEYWORD) => {
            let rest = &text[KEYWORD.len()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                (true, rest)
            } else {
                (false, text)
            }
        }
        _ => (false, text),
    }
}

/// Restricts `table` to the columns named in `columns` (comma separated),
/// in the order given.
pub fn project(table: Table, columns: &str) -> Result<Table> {
    let projection = Projection::parse(columns);
    apply_projection(table, &projection)
}

pub fn apply_projection(table: Table, projection: &Projection) -> Result<Table> {
    let indices = projection.validate(&table)?;
    if projection.is_all() {
        return Ok(table);
    }

    let (columns, rows) = table.into_parts();
    let names = indices.iter().map(|&i| columns[i].clone()).collect();
    let rows = rows
        .into_iter()
        .map(|row| {
            Row::new(
                indices
                    .iter()
                    .map(|&i| row.values[i].clone())
                    .collect(),
            )
        })
        .collect();

    Ok(Table::from_parts(names, rows))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    /// Parses `"<column> [asc|desc]"`. Returns `None` for an empty clause.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        let mut parts = text.split_whitespace();
        let Some(column) = parts.next() else {
            return Ok(None);
        };

        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(d) => bail!(QueryError::InvalidDirection {
                direction: d.to_string(),
            }),
        };

        if let Some(extra) = parts.next() {
            bail!(QueryError::InvalidDirection {
                direction: extra.to_string(),
            });
        }

        Ok(Some(Self {
            column: column.to_string(),
            direction,
        }))
    }
}

/// Stable single-key sort. The comparator is chosen once for the whole
/// column: numeric when every non-blank cell is a number, text otherwise.
pub fn sort(table: Table, order_by: &str) -> Result<Table> {
    let Some(order) = OrderBy::parse(order_by)? else {
        return Ok(table);
    };
    let index = table.require_column(&order.column)?;
    let comparator = Comparator::for_column(table.column_cells(index));

    let (columns, mut rows) = table.into_parts();
    rows.sort_by(|a, b| {
        let ord = comparator.compare(
            a.get(index).unwrap_or_default(),
            b.get(index).unwrap_or_default(),
        );
        match order.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    Ok(Table::from_parts(columns, rows))
}

/// Keeps the first `limit` rows. Non-positive limits, and limits at or
/// above the row count, leave the table as is.
pub fn limit(table: Table, limit: i64) -> Table {
    if limit <= 0 || limit as u64 >= table.row_count() as u64 {
        return table;
    }
    let (columns, mut rows) = table.into_parts();
    rows.truncate(limit as usize);
    Table::from_parts(columns, rows)
}

/// Drops rows whose full content repeats an earlier row.
pub fn distinct(table: Table) -> Table {
    let (columns, rows) = table.into_parts();
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    let rows = rows
        .into_iter()
        .filter(|row| seen.insert(row.signature()))
        .collect();
    Table::from_parts(columns, rows)
}
