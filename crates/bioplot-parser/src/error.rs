//! Error and diagnostic system for the table readers.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Line numbers pointing into the offending table
//! - Severity levels
//! - A collector that accumulates diagnostics across all rows
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional error code, the 1-based line it
//! refers to and help text. Multiple diagnostics are wrapped in [`ParseError`]
//! so a single read reports every broken row, not just the first.
//!
//! # Example
//!
//! ```
//! # use bioplot_parser::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::error("expected 2 columns, found 3")
//!     .with_code(ErrorCode::E100)
//!     .at_line(4)
//!     .with_help("columns are separated by tabs or commas");
//!
//! assert_eq!(diag.line(), Some(4));
//! assert_eq!(diag.to_string(), "error[E100]: line 4: expected 2 columns, found 3");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;
