//! Outer-ring tracks drawn beside each chromosome.
//!
//! Numeric outer annotations become one polyline per chromosome: the value
//! sets the distance from the chromosome and the interval midpoint sets the
//! position along it. Marker annotations sit one slot unit beside the body.

use log::{trace, warn};

use bioplot_core::{
    geometry::Point,
    model::{Annotation, Mark, Orientation},
};

/// Value-to-offset mapping of a numeric outer track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackScale {
    min: f64,
    max: f64,
    offset: f64,
    width: f64,
}

impl TrackScale {
    /// Creates a scale placing `min` at `offset` and `max` at
    /// `offset + width` from the chromosome center.
    ///
    /// An inverted domain collapses onto `min`.
    pub fn new(min: f64, max: f64, offset: f64, width: f64) -> Self {
        let max = if max < min {
            warn!(min, max; "Outer track maximum below minimum, collapsing domain");
            min
        } else {
            max
        };
        Self {
            min,
            max,
            offset,
            width,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Offset of `value` from the chromosome center, in slot units.
    ///
    /// Values saturate at the domain bounds. A degenerate domain puts every
    /// value at `offset`.
    pub fn offset_of(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return self.offset;
        }
        let clamped = value.max(self.min).min(self.max);
        self.offset + (clamped - self.min) / span * self.width
    }
}

/// Polyline of one chromosome's numeric outer track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLine {
    chromosome: String,
    points: Vec<Point>,
}

impl TrackLine {
    /// Builds the polyline for the numeric annotations of the chromosome at
    /// `slot`, ordered by position along the chromosome.
    ///
    /// Non-numeric annotations are ignored.
    pub fn build<'a>(
        chromosome: &str,
        slot: f64,
        annotations: impl IntoIterator<Item = &'a Annotation>,
        scale: &TrackScale,
        orientation: Orientation,
    ) -> Self {
        let mut points: Vec<Point> = annotations
            .into_iter()
            .filter_map(|annotation| match annotation.mark() {
                Mark::Value(value) => Some(Point::new(
                    slot + scale.offset_of(*value),
                    annotation.midpoint(),
                )),
                _ => None,
            })
            .collect();
        points.sort_by(|a, b| a.y().total_cmp(&b.y()));
        trace!(chromosome, points = points.len(); "Built outer track line");

        Self {
            chromosome: chromosome.to_string(),
            points: points.into_iter().map(|p| orientation.orient(p)).collect(),
        }
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Position of an outer marker for `annotation` on the chromosome at `slot`.
pub fn outer_marker_position(slot: f64, annotation: &Annotation, orientation: Orientation) -> Point {
    orientation.orient(Point::new(slot + 1.0, annotation.midpoint()))
}
