//! Drawing definitions shared by the renderers.
//!
//! - [`StrokeDefinition`] and friends describe how lines are stroked
//! - [`LayeredOutput`] collects SVG nodes by [`RenderLayer`] for z-ordering

mod layer;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
