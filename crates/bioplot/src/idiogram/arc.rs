//! Quarter-circle arc generation for chromosome end caps.
//!
//! An [`Arc`] is a quarter of an ellipse: a circle of radius `r` whose
//! vertical axis is stretched by `ratio`, so that caps stay round on screen
//! once base pairs and slot units are scaled to pixels.
//!
//! Points are sampled every [`ARC_STEP`] radians from the quadrant's start
//! angle. The sampled span is the smallest multiple of the step covering the
//! full quarter turn, so the last point may lie slightly past the boundary
//! angle.
//!
//! # Example
//!
//! ```
//! # use bioplot::idiogram::{Arc, Quadrant};
//! # use bioplot::geometry::Point;
//! let arc = Arc::new(0.35, Point::new(0.0, 10.0), Quadrant::TopRight, 2.0);
//! let first = arc.points().next().unwrap();
//! assert_eq!(first, Point::new(0.35, 10.0));
//! ```

use std::f64::consts::FRAC_PI_2;

use bioplot_core::geometry::Point;

/// Angular distance between consecutive arc points, in radians.
pub const ARC_STEP: f64 = 0.01;

/// One quarter of the circle, counter-clockwise from the positive x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Angles `[0, π/2]`
    TopRight,
    /// Angles `[π/2, π]`
    TopLeft,
    /// Angles `[π, 3π/2]`
    BottomLeft,
    /// Angles `[3π/2, 2π]`
    BottomRight,
}

impl Quadrant {
    /// Quadrants closing the top of a capsule, right to left.
    pub const TOP: [Quadrant; 2] = [Quadrant::TopRight, Quadrant::TopLeft];

    /// Quadrants closing the bottom of a capsule, left to right.
    pub const BOTTOM: [Quadrant; 2] = [Quadrant::BottomLeft, Quadrant::BottomRight];

    /// Returns the quadrant index, 0 to 3.
    pub fn index(self) -> u8 {
        match self {
            Self::TopRight => 0,
            Self::TopLeft => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }

    /// Angle of the first point of the quadrant.
    pub fn start_angle(self) -> f64 {
        f64::from(self.index()) * FRAC_PI_2
    }
}

impl TryFrom<u8> for Quadrant {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::TopRight),
            1 => Ok(Self::TopLeft),
            2 => Ok(Self::BottomLeft),
            3 => Ok(Self::BottomRight),
            _ => Err(format!("invalid quadrant `{value}`, valid values: 0, 1, 2, 3")),
        }
    }
}

/// A quarter ellipse with a vertical squash ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    radius: f64,
    center: Point,
    quadrant: Quadrant,
    ratio: f64,
}

impl Arc {
    pub fn new(radius: f64, center: Point, quadrant: Quadrant, ratio: f64) -> Self {
        Self {
            radius,
            center,
            quadrant,
            ratio,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Number of points every arc produces.
    pub fn point_count() -> usize {
        (FRAC_PI_2 / ARC_STEP).ceil() as usize + 1
    }

    /// Returns a fresh iterator over the arc points.
    pub fn points(&self) -> ArcPoints {
        ArcPoints {
            arc: *self,
            index: 0,
            count: Self::point_count(),
        }
    }

    fn point_at(&self, index: usize) -> Point {
        // Angles are computed from the index so the error does not accumulate
        let theta = self.quadrant.start_angle() + index as f64 * ARC_STEP;
        Point::new(
            self.radius * theta.cos() + self.center.x(),
            self.radius * theta.sin() * self.ratio + self.center.y(),
        )
    }
}

/// Iterator over the points of an [`Arc`], see [`Arc::points`].
#[derive(Debug, Clone)]
pub struct ArcPoints {
    arc: Arc,
    index: usize,
    count: usize,
}

impl Iterator for ArcPoints {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let point = self.arc.point_at(self.index);
        self.index += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcPoints {}
