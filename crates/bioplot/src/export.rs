//! Export of computed figure geometry.
//!
//! This is the last stage of the pipeline:
//!
//! ```text
//! Tables / Panel
//!     ↓ layout
//! IdiogramGeometry / GeneClusterGeometry
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! Export operations return [`Error`], which converts into
//! [`BioplotError::Export`](crate::BioplotError::Export) at the crate
//! boundary.

/// SVG export backend.
pub mod svg;

use crate::{genecluster::GeneClusterGeometry, idiogram::IdiogramGeometry};

/// Abstraction for figure export backends.
pub trait Exporter {
    /// Exports an idiogram panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the geometry cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_idiogram(&self, geometry: &IdiogramGeometry) -> Result<(), Error>;

    /// Exports a gene cluster diagram.
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::export_idiogram`].
    fn export_gene_cluster(&self, geometry: &GeneClusterGeometry) -> Result<(), Error>;
}

/// Errors that can occur during figure export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
