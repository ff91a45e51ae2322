//! # ASCII Table Formatter
//!
//! Renders result tables as ASCII boxes, MySQL style.
//!
//! ## Output Format
//!
//! ```text
//! +----+-------+-----+
//! | id | name  | age |
//! +----+-------+-----+
//! |  1 | Alice |  30 |
//! |  2 | Bob   |  25 |
//! +----+-------+-----+
//! ```
//!
//! ## Column Width Calculation
//!
//! Column widths are the maximum of the header width and every cell width,
//! at least 1 and at most `MAX_COLUMN_WIDTH` characters. Widths count
//! characters, not bytes. Longer values are cut and end in `...`.
//!
//! ## Alignment
//!
//! Cells that parse as numbers are right-aligned; everything else,
//! including headers, is left-aligned.

use crate::config::MAX_COLUMN_WIDTH;
use crate::parsing::parse_number;
use crate::types::Row;
use std::fmt::Write;

pub struct TableFormatter {
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl TableFormatter {
    pub fn new(headers: Vec<String>, rows: &[Row]) -> Self {
        let mut widths: Vec<usize> = headers
            .iter()
            .map(|h| display_width(h).clamp(1, MAX_COLUMN_WIDTH))
            .collect();

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.values
                    .iter()
                    .enumerate()
                    .map(|(i, value)| {
                        if i < widths.len() {
                            widths[i] = widths[i].max(display_width(value)).min(MAX_COLUMN_WIDTH);
                        }
                        value.clone()
                    })
                    .collect()
            })
            .collect();

        Self {
            headers,
            widths,
            rows: cells,
        }
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_header_row(&mut output);
        self.write_separator(&mut output);

        for row in &self.rows {
            self.write_data_row(&mut output, row);
        }

        self.write_separator(&mut output);

        output
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            for _ in 0..(*width + 2) {
                output.push('-');
            }
            output.push('+');
        }
        output.push('\n');
    }

    fn write_header_row(&self, output: &mut String) {
        output.push('|');
        for (i, header) in self.headers.iter().enumerate() {
            let width = self.widths.get(i).copied().unwrap_or(1);
            let _ = write!(output, " {:<width$} |", truncate(header, width), width = width);
        }
        output.push('\n');
    }

    fn write_data_row(&self, output: &mut String, row: &[String]) {
        output.push('|');
        for (i, value) in row.iter().enumerate() {
            let width = self.widths.get(i).copied().unwrap_or(1);
            let truncated = truncate(value, width);
            if parse_number(value).is_some() {
                let _ = write!(output, " {:>width$} |", truncated, width = width);
            } else {
                let _ = write!(output, " {:<width$} |", truncated, width = width);
            }
        }
        output.push('\n');
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn truncate(s: &str, max_len: usize) -> String {
    if display_width(s) <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut result: String = s.chars().take(max_len - 3).collect();
        result.push_str("...");
        result
    }
}
