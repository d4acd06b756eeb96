//! Error types for bioplot operations.
//!
//! This module provides the main error type [`BioplotError`] which wraps
//! the error conditions of every stage: reading tables, assembling the
//! model, validating configuration, computing layout and exporting SVG.

use std::io;

use thiserror::Error;

use bioplot_core::model::ModelError;
use bioplot_parser::error::ParseError;

/// The main error type for bioplot operations.
///
/// The `Parse` variant keeps the structured diagnostics of the table
/// readers, including line numbers, for rich error reporting.
#[derive(Debug, Error)]
pub enum BioplotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for BioplotError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_conversion() {
        let err: BioplotError = ModelError::EmptyChromosome("Chr01".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Model error: chromosome `Chr01` must have a positive length"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = BioplotError::Config("cmap_parts must be positive, got 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: cmap_parts must be positive, got 0"
        );
    }
}
