//! Chromosome idiogram geometry.
//!
//! [`IdiogramLayout`] turns a [`Panel`](crate::model::Panel) into an
//! [`IdiogramGeometry`]: capsule outlines, annotation rectangles tapered
//! inside the caps, marker placements, outer-track polylines, axis ticks and
//! an optional colorbar. The geometry is plain data in data coordinates;
//! the SVG exporter maps it to pixels.

mod arc;
mod layout;
mod outline;
mod scale;
mod taper;
mod ticks;
mod track;

pub use arc::{ARC_STEP, Arc, ArcPoints, Quadrant};
pub use layout::{AnnotationRect, IdiogramGeometry, IdiogramLayout, MarkerPlacement};
pub use outline::{ArcPath, ChromosomeOutline, Segment};
pub use scale::{ColorScale, ColorbarLegend};
pub use taper::Taper;
pub use ticks::{MEGABASE, Tick, Ticks, chromosome_ticks, position_ticks};
pub use track::{TrackLine, TrackScale, outer_marker_position};
