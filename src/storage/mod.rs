//! # Storage Layer
//!
//! A csvql table lives in a single delimited-text file. Every read loads the
//! whole file and every mutation rewrites the whole file.
//!
//! ## Module Structure
//!
//! - `codec`: CSV decode/encode on top of the `csv` crate
//! - `persist`: file load and atomic save (temp file + rename)
//!
//! ## File Format
//!
//! ```text
//! ┌──────────────────────────┐
//! │ header: col,col,col      │  column names, order preserved
//! ├──────────────────────────┤
//! │ record: v,v,v            │  one line per row, RFC 4180 quoting
//! │ record: v,,v             │  empty cell = empty string
//! │ ...                      │
//! └──────────────────────────┘
//! ```
//!
//! The delimiter defaults to `,` and is configurable per database.

pub mod codec;
pub mod persist;

pub use codec::{decode, encode, encode_to_vec};
pub use persist::{load_table, save_table};
