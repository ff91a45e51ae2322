//! # Literal Parsing
//!
//! Helpers shared by the condition parser, the assignment parser and the
//! comparator for turning raw query text into values.
//!
//! ## Quote Stripping
//!
//! Literals may be written bare or wrapped in one layer of matching single
//! or double quotes. Only one layer is removed, and only when both ends use
//! the same quote character:
//!
//! | Input        | Output      |
//! |--------------|-------------|
//! | `'Alice'`    | `Alice`     |
//! | `"Bob"`      | `Bob`       |
//! | `''x''`      | `'x'`       |
//! | `'unclosed`  | `'unclosed` |
//! | `42`         | `42`        |
//!
//! ## Numbers
//!
//! Cells carry no type. A cell is numeric for one comparison when its
//! trimmed text parses as a finite `f64`; `inf` and `NaN` stay text so that
//! they cannot break the ordering of a sort.

use crate::config::QUOTE_CHARS;

pub fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && QUOTE_CHARS.contains(&first) => {
            &s[first.len_utf8()..s.len() - last.len_utf8()]
        }
        _ => s,
    }
}

pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Splits a comma-separated list, trimming each item.
pub fn split_list(s: &str) -> Vec<&str> {
    s.split(',').map(str::trim).collect()
}
