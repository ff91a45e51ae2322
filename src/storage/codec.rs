//! # Table Codec
//!
//! Converts between delimited text and [`Table`]. The first record is the
//! header; every cell is kept as text, including surrounding whitespace.
//!
//! ## Strictness
//!
//! The reader is not `flexible`: a record whose field count differs from
//! the header fails with `CodecError`, naming the line. An input with no
//! header at all also fails, since the table would have no columns.
//!
//! ```text
//!   id,name,age          header  ──> columns
//!   1,A,20               record  ──> Row
//!   2,B                  record  ──> CodecError (2 fields, expected 3)
//! ```

use crate::error::QueryError;
use crate::types::{Row, Table};
use eyre::{bail, Result};
use std::io::{Read, Write};

/// Reads a header plus records from `reader`.
pub fn decode<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(QueryError::from)?;
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    if columns.is_empty() || (columns.len() == 1 && columns[0].is_empty()) {
        bail!(QueryError::CodecError {
            message: "missing header row".to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(QueryError::from)?;
        rows.push(Row::new(record.iter().map(str::to_string).collect()));
    }

    Table::from_rows(columns, rows)
}

/// Writes `table` to `writer`, with the header row when `include_header`.
pub fn encode<W: Write>(table: &Table, writer: W, include_header: bool, delimiter: u8) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    if include_header {
        csv_writer
            .write_record(table.columns())
            .map_err(QueryError::from)?;
    }
    for row in table.rows() {
        csv_writer
            .write_record(&row.values)
            .map_err(QueryError::from)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Encodes into an in-memory buffer.
pub fn encode_to_vec(table: &Table, include_header: bool, delimiter: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode(table, &mut buf, include_header, delimiter)?;
    Ok(buf)
}
