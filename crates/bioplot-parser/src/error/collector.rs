//! Accumulates diagnostics while reading a table.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics so every broken row is reported at once.
///
/// Warnings are logged when emitted and never fail the read.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    errors: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_warning() {
            warn!(line = diagnostic.line().unwrap_or(0); "{}", diagnostic.message());
            return;
        }
        self.errors.push(diagnostic);
    }

    /// Returns `value` if no error was emitted.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, ParseError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ParseError::new(self.errors))
        }
    }
}
