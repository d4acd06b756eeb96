//! Readers for the tables that feed bioplot figures.
//!
//! Tables are plain text, one record per line, with tab- or comma-separated
//! columns. Blank lines and lines starting with `#` are skipped. Every row
//! of a table is checked before the read fails, so a [`ParseError`]
//! lists all broken rows with their line numbers.
//!
//! | Reader | Row layout |
//! |--------|------------|
//! | [`parse_chromosome_lengths`] | `id, length` |
//! | [`parse_centromeres`] | `id, position` |
//! | [`parse_display_order`] | `id` |
//! | [`parse_annotations`] | `id, start, end, value` / `color` / `marker, color` |
//!
//! [`parse_panel`] combines a length table and a centromere table into a
//! validated [`Panel`](bioplot_core::model::Panel).
//!
//! # Example
//!
//! ```
//! use bioplot_core::model::ValueType;
//!
//! let panel = bioplot_parser::parse_panel("Chr01\t2000000\n", Some("Chr01\t1000000\n"))?;
//! let track = bioplot_parser::parse_annotations("Chr01\t500000\t500010\t0.8\n", ValueType::Numeric)?;
//! let panel = panel.with_inner(track);
//! assert_eq!(panel.inner().unwrap().annotations().len(), 1);
//! # Ok::<(), bioplot_parser::error::ParseError>(())
//! ```

pub mod error;

mod row;
mod tables;

pub use error::ParseError;
pub use tables::{
    parse_annotations, parse_centromeres, parse_chromosome_lengths, parse_display_order,
    parse_panel,
};
