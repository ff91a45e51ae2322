//! # csvql Configuration Module
//!
//! Centralizes configuration constants. Values that must agree with each
//! other (operator scan order, the signature separator) live side by side
//! so that a change to one is reviewed against the others.
//!
//! ## Module Organization
//!
//! - [`constants`]: Parsing, row identity, codec and rendering constants

pub mod constants;
pub use constants::*;
