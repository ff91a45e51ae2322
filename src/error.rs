//! # Query Errors
//!
//! Every failure the engine can report about a query or mutation is a
//! `QueryError`. The engine returns them inside `eyre::Report`, so callers
//! that only want a message can print the report, while callers that need
//! to branch on the kind can recover it:
//!
//! ```ignore
//! match db.update("age=1", "") {
//!     Err(e) if matches!(e.downcast_ref::<QueryError>(), Some(QueryError::MissingWhereClause { .. })) => {}
//!     other => panic!("{:?}", other),
//! }
//! ```
//!
//! I/O failures (open, create, rename) are not `QueryError`s; they carry
//! context through `WrapErr` instead.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    UnknownColumn { column: String },
    MalformedCondition { condition: String },
    InvalidDirection { direction: String },
    TypeError { function: &'static str, column: String },
    MissingWhereClause { operation: &'static str },
    CodecError { message: String },
    EmptyInput { operation: &'static str },
    MalformedAssignment { assignment: String },
    MixedProjection,
    RowOutOfRange { row: usize, row_count: usize },
}

impl QueryError {
    pub fn unknown_column(column: impl Into<String>) -> Self {
        QueryError::UnknownColumn {
            column: column.into(),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnknownColumn { column } => {
                write!(f, "column '{}' does not exist in CSV", column)
            }
            QueryError::MalformedCondition { condition } => {
                write!(f, "invalid WHERE condition: {}", condition)
            }
            QueryError::InvalidDirection { direction } => write!(
                f,
                "invalid ORDER BY direction: {} (use 'asc' or 'desc')",
                direction
            ),
            QueryError::TypeError { function, column } => {
                write!(f, "{} requires numeric column, '{}' is text", function, column)
            }
            QueryError::MissingWhereClause { operation } => write!(
                f,
                "{} requires WHERE condition to prevent accidental mass changes",
                operation
            ),
            QueryError::CodecError { message } => write!(f, "failed to read CSV: {}", message),
            QueryError::EmptyInput { operation } => {
                write!(f, "{} values cannot be empty", operation)
            }
            QueryError::MalformedAssignment { assignment } => write!(
                f,
                "invalid assignment format: {} (expected col=value)",
                assignment
            ),
            QueryError::MixedProjection => {
                write!(f, "cannot mix aggregate functions and plain columns in SELECT")
            }
            QueryError::RowOutOfRange { row, row_count } => write!(
                f,
                "invalid row number: {} (valid range: 1-{})",
                row, row_count
            ),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<csv::Error> for QueryError {
    fn from(err: csv::Error) -> Self {
        QueryError::CodecError {
            message: err.to_string(),
        }
    }
}

/// Returns the `QueryError` carried by a report, if any.
pub fn query_error(report: &eyre::Report) -> Option<&QueryError> {
    report.downcast_ref::<QueryError>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_column_message_names_column() {
        let err = QueryError::unknown_column("salary");
        assert_eq!(err.to_string(), "column 'salary' does not exist in CSV");
    }

    #[test]
    fn report_downcasts_back_to_kind() {
        let report = eyre::Report::new(QueryError::MissingWhereClause { operation: "DELETE" });
        assert_eq!(
            query_error(&report),
            Some(&QueryError::MissingWhereClause { operation: "DELETE" })
        );
    }

    #[test]
    fn wrapped_report_still_downcasts() {
        use eyre::WrapErr;

        let result: eyre::Result<()> =
            Err(eyre::Report::new(QueryError::MixedProjection)).wrap_err("SELECT failed");
        let report = result.unwrap_err();

        assert_eq!(query_error(&report), Some(&QueryError::MixedProjection));
    }
}
