//! bioplot Core Types and Definitions
//!
//! This crate provides the foundational types shared by the bioplot crates:
//!
//! - **Geometry**: Points, sizes and bounds in data coordinates ([`geometry`] module)
//! - **Colors**: CSS color parsing ([`color::Color`]) and continuous colormaps ([`colormap`])
//! - **Model**: Chromosomes, annotations and panels ([`model`] module)
//! - **Draw**: Stroke definitions and layered SVG output ([`draw`] module)

pub mod color;
pub mod colormap;
pub mod draw;
pub mod geometry;
pub mod model;
