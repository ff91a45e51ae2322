//! # csvql Configuration Constants
//!
//! This module centralizes the constants shared between the condition
//! parser, the row matcher, the codec and the renderer. Constants that
//! depend on each other are co-located.
//!
//! ## Dependency Graph
//!
//! ```text
//! CONDITION_OPERATORS (>=, <=, !=, =, >, <)
//!       │
//!       └─> Two-character operators MUST precede their one-character
//!           prefixes, otherwise "age >= 30" splits on '>' and the
//!           literal becomes "= 30".
//!
//! SIGNATURE_SEPARATOR (U+001F)
//!       │
//!       ├─> DISTINCT row keys
//!       └─> Signature row matching for UPDATE/DELETE
//!             Must not be a character that appears in ordinary CSV data,
//!             otherwise ("a\x1fb", "c") and ("a", "b\x1fc") collide.
//!
//! DEFAULT_DELIMITER (',')
//!       │
//!       └─> RAW_FIELD_SEPARATOR (used by --raw output, always ',')
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use crate::config::{CONDITION_OPERATORS, SIGNATURE_SEPARATOR};
//! ```

// ============================================================================
// CONDITION PARSING
// ============================================================================

/// Comparison operators in scan order. The first operator found anywhere in
/// the condition text wins.
pub const CONDITION_OPERATORS: [&str; 6] = [">=", "<=", "!=", "=", ">", "<"];

/// Quote characters stripped (one layer) from literals and assignment values.
pub const QUOTE_CHARS: [char; 2] = ['\'', '"'];

const _: () = assert!(
    CONDITION_OPERATORS[0].len() == 2
        && CONDITION_OPERATORS[1].len() == 2
        && CONDITION_OPERATORS[2].len() == 2,
    "two-character operators must be scanned before one-character ones"
);

// ============================================================================
// ROW IDENTITY
// ============================================================================

/// Separator placed between cells when building a row signature.
pub const SIGNATURE_SEPARATOR: char = '\u{1F}';

// ============================================================================
// CODEC
// ============================================================================

/// Field delimiter used when none is configured.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Separator between values in `--raw` output.
pub const RAW_FIELD_SEPARATOR: &str = ",";

// ============================================================================
// RENDERING
// ============================================================================

/// Widest a rendered column may grow before values are truncated with "...".
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Placeholder printed for an aggregate with no value (MIN/MAX over no rows).
pub const NULL_DISPLAY: &str = "NULL";

// ============================================================================
// ENVIRONMENT
// ============================================================================

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "CSVQL_LOG";

/// Filter used when `CSVQL_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable that supplies `--file` when the flag is omitted.
pub const FILE_ENV_VAR: &str = "CSVQL_FILE";
