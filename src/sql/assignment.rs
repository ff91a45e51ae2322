//! Parsing of `col=value,col2=value2` assignment lists used by INSERT and
//! UPDATE.

use crate::error::QueryError;
use crate::parsing::strip_quotes;
use crate::types::Table;
use eyre::{bail, Result};
use indexmap::IndexMap;

/// Column name to literal, in the order the columns were first assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignments {
    values: IndexMap<String, String>,
}

impl Assignments {
    /// Parses an assignment list. `operation` names the statement in the
    /// `EmptyInput` error.
    ///
    /// Each item is split once on `=`; the value keeps any further `=`
    /// characters. A later assignment to the same column wins.
    pub fn parse(text: &str, operation: &'static str) -> Result<Self> {
        if text.trim().is_empty() {
            bail!(QueryError::EmptyInput { operation });
        }

        let mut values = IndexMap::new();
        for item in text.split(',') {
            let item = item.trim();
            let Some((column, value)) = item.split_once('=') else {
                bail!(QueryError::MalformedAssignment {
                    assignment: item.to_string(),
                });
            };
            let column = column.trim();
            if column.is_empty() {
                bail!(QueryError::MalformedAssignment {
                    assignment: item.to_string(),
                });
            }
            values.insert(column.to_string(), strip_quotes(value).to_string());
        }

        Ok(Self { values })
    }

    /// Checks every assigned column against `table`, returning
    /// `(column index, value)` pairs.
    pub fn resolve<'a>(&'a self, table: &Table) -> Result<Vec<(usize, &'a str)>> {
        self.values
            .iter()
            .map(|(column, value)| -> Result<(usize, &'a str)> {
                Ok((table.require_column(column)?, value.as_str()))
            })
            .collect()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::query_error;
    use crate::types::Row;

    #[test]
    fn parses_in_order_and_strips_quotes() {
        let parsed = Assignments::parse("name='Zed', age = 7", "INSERT").unwrap();
        let pairs: Vec<(&str, &str)> = parsed.iter().collect();
        assert_eq!(pairs, vec![("name", "Zed"), ("age", "7")]);
    }

    #[test]
    fn later_assignment_overrides_earlier() {
        let parsed = Assignments::parse("age=1,name=X,age=2", "UPDATE").unwrap();
        assert_eq!(parsed.iter().count(), 2);
        assert_eq!(parsed.get("age"), Some("2"));
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let parsed = Assignments::parse("expr=a=b", "UPDATE").unwrap();
        assert_eq!(parsed.get("expr"), Some("a=b"));
    }

    #[test]
    fn empty_text_is_empty_input() {
        let err = Assignments::parse("   ", "UPDATE").unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::EmptyInput { operation: "UPDATE" })
        );
    }

    #[test]
    fn item_without_equals_is_malformed() {
        let err = Assignments::parse("name=A,age", "INSERT").unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::MalformedAssignment {
                assignment: "age".to_string()
            })
        );

        let err = Assignments::parse("=5", "INSERT").unwrap_err();
        assert!(matches!(
            query_error(&err),
            Some(QueryError::MalformedAssignment { .. })
        ));
    }

    #[test]
    fn resolve_rejects_unknown_columns() {
        let table = Table::from_rows(
            vec!["id".into(), "name".into()],
            vec![Row::from(vec!["1", "A"])],
        )
        .unwrap();

        let ok = Assignments::parse("name=B", "UPDATE").unwrap();
        assert_eq!(ok.resolve(&table).unwrap(), vec![(1, "B")]);

        let bad = Assignments::parse("salary=5", "UPDATE").unwrap();
        let err = bad.resolve(&table).unwrap_err();
        assert_eq!(
            query_error(&err),
            Some(&QueryError::unknown_column("salary"))
        );
    }
}
