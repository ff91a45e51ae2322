use crate::config::SIGNATURE_SEPARATOR;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    pub values: Vec<String>,
}

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn column_count(&self) -> usize {
        self.values.len()
    }

    /// Cells joined with the signature separator. Two rows with identical
    /// content share a signature.
    pub fn signature(&self) -> String {
        let capacity = self.values.iter().map(String::len).sum::<usize>() + self.values.len();
        let mut signature = String::with_capacity(capacity);
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                signature.push(SIGNATURE_SEPARATOR);
            }
            signature.push_str(value);
        }
        signature
    }
}

impl From<Vec<String>> for Row {
    fn from(values: Vec<String>) -> Self {
        Self { values }
    }
}

impl<'a> From<Vec<&'a str>> for Row {
    fn from(values: Vec<&'a str>) -> Self {
        Self {
            values: values.into_iter().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_cell_or_none() {
        let row = Row::from(vec!["1", "Alice", ""]);
        assert_eq!(row.get(1), Some("Alice"));
        assert_eq!(row.get(2), Some(""));
        assert_eq!(row.get(9), None);
    }

    #[test]
    fn identical_rows_share_signature() {
        let a = Row::from(vec!["9", "X", "1"]);
        let b = Row::from(vec!["9", "X", "1"]);
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn signature_keeps_cell_boundaries() {
        let a = Row::from(vec!["a|b", "c"]);
        let b = Row::from(vec!["a", "b|c"]);
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn empty_cells_are_part_of_the_signature() {
        let a = Row::from(vec!["", "x"]);
        let b = Row::from(vec!["x", ""]);
        assert_ne!(a.signature(), b.signature());
    }
}
