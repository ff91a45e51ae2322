//! # Dual Comparison
//!
//! Cells are stored as text. Ordering between two cells is decided by a
//! `Comparator` that is either `Numeric` or `Text`:
//!
//! - Conditions select the comparator per comparison: numeric when both the
//!   cell and the literal parse as numbers, text otherwise. This is why
//!   `age > 9` keeps `10` while `name > 'B'` compares names.
//! - Sorting and MIN/MAX select it per column via [`Comparator::for_column`],
//!   so that every pair of keys is compared the same way and the order stays
//!   total.
//!
//! ```text
//!   "9"  vs "10"    Numeric   9 < 10
//!   "9"  vs "abc"   Text      "9" < "abc"
//!   "B"  vs "A"     Text      "B" > "A"
//! ```

use crate::parsing::{is_blank, parse_number};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Numeric,
    Text,
}

impl Comparator {
    pub fn select(left: &str, right: &str) -> Self {
        match (parse_number(left), parse_number(right)) {
            (Some(_), Some(_)) => Comparator::Numeric,
            _ => Comparator::Text,
        }
    }

    /// A column is numeric when every non-blank cell parses as a number and
    /// at least one does.
    pub fn for_column<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut saw_number = false;
        for cell in cells {
            if is_blank(cell) {
                continue;
            }
            if parse_number(cell).is_none() {
                return Comparator::Text;
            }
            saw_number = true;
        }
        if saw_number {
            Comparator::Numeric
        } else {
            Comparator::Text
        }
    }

    /// Under `Numeric`, cells that do not parse (blanks) order before every
    /// number.
    pub fn compare(self, left: &str, right: &str) -> Ordering {
        match self {
            Comparator::Text => left.cmp(right),
            Comparator::Numeric => match (parse_number(left), parse_number(right)) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => left.cmp(right),
            },
        }
    }
}

pub fn compare_dual(left: &str, right: &str) -> Ordering {
    Comparator::select(left, right).compare(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(compare_dual("9", "10"), Ordering::Less);
        assert_eq!(compare_dual("10", "9"), Ordering::Greater);
        assert_eq!(compare_dual("2.50", "2.5"), Ordering::Equal);
    }

    #[test]
    fn mixed_operands_fall_back_to_text() {
        assert_eq!(Comparator::select("9", "abc"), Comparator::Text);
        assert_eq!(compare_dual("10", "9a"), Ordering::Less);
    }

    #[test]
    fn text_compares_lexicographically() {
        assert_eq!(compare_dual("Bob", "Alice"), Ordering::Greater);
        assert_eq!(compare_dual("", "a"), Ordering::Less);
    }

    #[test]
    fn column_with_only_numbers_and_blanks_is_numeric() {
        let cells = ["10", "", "9", "  "];
        assert_eq!(Comparator::for_column(cells), Comparator::Numeric);
    }

    #[test]
    fn column_with_any_text_is_text() {
        let cells = ["10", "ten", "9"];
        assert_eq!(Comparator::for_column(cells), Comparator::Text);
    }

    #[test]
    fn all_blank_column_is_text() {
        let cells = ["", ""];
        assert_eq!(Comparator::for_column(cells), Comparator::Text);
    }

    #[test]
    fn numeric_comparator_orders_blanks_first() {
        let cmp = Comparator::Numeric;
        assert_eq!(cmp.compare("", "-100"), Ordering::Less);
        assert_eq!(cmp.compare("3", ""), Ordering::Greater);
        assert_eq!(cmp.compare("", ""), Ordering::Equal);
    }
}
