//! A single diagnostic message about one table row.

use std::fmt;

use crate::error::{ErrorCode, Severity};

/// An error or warning attached to a table line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    line: Option<usize>,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            line: None,
            message: message.into(),
            help: None,
        }
    }

    /// Attach an error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach the 1-based line number of the offending row.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach help text describing how to fix the row.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": ")?;
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display_plain() {
        let diag = Diagnostic::error("empty table");
        assert_eq!(diag.to_string(), "error: empty table");
        assert!(diag.severity().is_error());
        assert_eq!(diag.help(), None);
    }

    #[test]
    fn test_diagnostic_display_full() {
        let diag = Diagnostic::warning("centromere for unknown chromosome `ChrX`")
            .with_code(ErrorCode::E201)
            .at_line(7)
            .with_help("add `ChrX` to the length table");

        assert_eq!(
            diag.to_string(),
            "warning[E201]: line 7: centromere for unknown chromosome `ChrX`"
        );
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.help(), Some("add `ChrX` to the length table"));
    }
}
