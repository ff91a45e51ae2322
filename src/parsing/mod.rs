//! # Parsing Utilities
//!
//! Small text-level helpers used while reading query fragments. Nothing in
//! here knows about tables; see `sql` for the clause parsers built on top.
//!
//! ## Module Organization
//!
//! - `literal`: Quote stripping, numeric coercion, list splitting

pub mod literal;

pub use literal::{is_blank, parse_number, split_list, strip_quotes};
