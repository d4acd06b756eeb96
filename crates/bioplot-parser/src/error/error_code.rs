//! Error codes for the table readers.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Row errors (columns and field values)
//! - `E2xx` - Table errors (relations between rows)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Row Errors (E1xx)
    // =========================================================================
    /// Wrong number of columns.
    ///
    /// Each table kind has a fixed column count; see the reader functions.
    E100,

    /// Invalid integer.
    ///
    /// Lengths and positions must be non-negative whole numbers of base pairs.
    E101,

    /// Invalid number.
    ///
    /// Numeric annotation values must be finite decimal numbers.
    E102,

    /// Invalid color.
    ///
    /// Colors are CSS color strings such as `red` or `#ff8800`.
    E103,

    /// Invalid marker.
    ///
    /// Markers use single-character codes such as `o`, `s` or `^`.
    E104,

    /// Inverted interval.
    ///
    /// An annotation starts after it ends.
    E105,

    // =========================================================================
    // Table Errors (E2xx)
    // =========================================================================
    /// Duplicate chromosome.
    ///
    /// A chromosome id appears on more than one row of the same table.
    E200,

    /// Unknown chromosome.
    ///
    /// A row names a chromosome missing from the length table.
    E201,

    /// Invalid chromosome.
    ///
    /// The chromosome has a zero length or its centromere lies outside it.
    E202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "wrong column count",
            ErrorCode::E101 => "invalid integer",
            ErrorCode::E102 => "invalid number",
            ErrorCode::E103 => "invalid color",
            ErrorCode::E104 => "invalid marker",
            ErrorCode::E105 => "inverted interval",
            ErrorCode::E200 => "duplicate chromosome",
            ErrorCode::E201 => "unknown chromosome",
            ErrorCode::E202 => "invalid chromosome",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
