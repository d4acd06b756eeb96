//! Geometric primitives for figure layout.
//!
//! This module provides the geometric types every bioplot figure is built
//! from: chromosome outlines, annotation rectangles and tick placements are
//! all expressed with them.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in data space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Geometry is produced in *data* coordinates, the same frame a plotting
//! axes object would use:
//!
//! ```text
//!    +Y (base pairs in a vertical panel)
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X (chromosome slots)
//! ```
//!
//! Horizontal panels exchange the two axes, see [`Point::transpose`].
//! Conversion to canvas pixels (where Y grows downward) is done by the
//! renderer, never by the geometry itself.
//!
//! Coordinates are `f64`: positions on large chromosomes exceed the range
//! `f32` represents exactly.

/// A 2D point in data coordinate space.
///
/// # Examples
///
/// ```
/// # use bioplot_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Exchanges the two coordinates.
    ///
    /// This is the axis swap used for horizontal panels. Applying it twice
    /// yields the original point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bioplot_core::geometry::Point;
    /// let p = Point::new(1.0, 250_000.0);
    /// assert_eq!(p.transpose(), Point::new(250_000.0, 1.0));
    /// assert_eq!(p.transpose().transpose(), p);
    /// ```
    pub fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Exchanges width and height
    pub fn transpose(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from explicit minimum and maximum coordinates.
    ///
    /// The arguments are reordered so that `min <= max` on both axes.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Exchanges the two axes
    pub fn transpose(self) -> Self {
        Self {
            min_x: self.min_y,
            min_y: self.min_x,
            max_x: self.max_y,
            max_y: self.max_x,
        }
    }

    /// Merges two bounds into the smallest bounds containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bioplot_core::geometry::Bounds;
    /// let a = Bounds::new(0.0, 0.0, 100.0, 30.0);
    /// let b = Bounds::new(10.0, 40.0, 130.0, 120.0);
    ///
    /// let combined = a.merge(&b);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Padding values for the four sides of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// Creates insets with individual values for each side.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on every side.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the top inset
    pub fn top(self) -> f64 {
        self.top
    }

    /// Returns the right inset
    pub fn right(self) -> f64 {
        self.right
    }

    /// Returns the bottom inset
    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Returns the left inset
    pub fn left(self) -> f64 {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(10.0, 20.0);
        assert_eq!(point.x(), 10.0);
        assert_eq!(point.y(), 20.0);
    }

    #[test]
    fn test_point_transpose() {
        let point = Point::new(-0.35, 1_250_000.0);
        let swapped = point.transpose();
        assert_eq!(swapped.x(), 1_250_000.0);
        assert_eq!(swapped.y(), -0.35);
    }

    #[test]
    fn test_size_transpose() {
        let size = Size::new(0.7, 10.0);
        assert_eq!(size.transpose(), Size::new(10.0, 0.7));
    }

    #[test]
    fn test_bounds_new_orders_corners() {
        let bounds = Bounds::new(5.0, 8.0, 1.0, 2.0);
        assert_eq!(bounds.min_x(), 1.0);
        assert_eq!(bounds.min_y(), 2.0);
        assert_eq!(bounds.max_x(), 5.0);
        assert_eq!(bounds.max_y(), 8.0);
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 6.0);
    }

    #[test]
    fn test_bounds_transpose() {
        let bounds = Bounds::new(-0.5, 0.0, 3.5, 100.0);
        let swapped = bounds.transpose();
        assert_eq!(swapped, Bounds::new(0.0, -0.5, 100.0, 3.5));
    }

    #[test]
    fn test_bounds_merge() {
        let a = Bounds::new(-0.35, 0.0, 0.35, 2e6);
        let b = Bounds::new(0.65, -1.0, 1.35, 1.5e6);
        assert_eq!(a.merge(&b), Bounds::new(-0.35, -1.0, 1.35, 2e6));
    }

    #[test]
    fn test_insets() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.top(), 1.0);
        assert_eq!(insets.right(), 2.0);
        assert_eq!(insets.bottom(), 3.0);
        assert_eq!(insets.left(), 4.0);
        assert_eq!(Insets::uniform(5.0), Insets::new(5.0, 5.0, 5.0, 5.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1e9f64..1e9, -1e9f64..1e9).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (-1e6f64..1e6, -1e6f64..1e6, 0.0f64..1e6, 0.0f64..1e6)
            .prop_map(|(x, y, w, h)| Bounds::new(x, y, x + w, y + h))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Transposing twice returns the original point.
    fn check_point_transpose_is_involutive(p: Point) -> Result<(), TestCaseError> {
        prop_assert_eq!(p.transpose().transpose(), p);
        Ok(())
    }

    /// Transposing twice returns the original bounds.
    fn check_bounds_transpose_is_involutive(b: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(b.transpose().transpose(), b);
        Ok(())
    }

    /// Merged bounds contain both inputs.
    fn check_bounds_merge_contains_both(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(&b2);
        prop_assert!(merged.min_x() <= b1.min_x() && merged.min_x() <= b2.min_x());
        prop_assert!(merged.min_y() <= b1.min_y() && merged.min_y() <= b2.min_y());
        prop_assert!(merged.max_x() >= b1.max_x() && merged.max_x() >= b2.max_x());
        prop_assert!(merged.max_y() >= b1.max_y() && merged.max_y() >= b2.max_y());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn point_transpose_is_involutive(p in point_strategy()) {
            check_point_transpose_is_involutive(p)?;
        }

        #[test]
        fn bounds_transpose_is_involutive(b in bounds_strategy()) {
            check_bounds_transpose_is_involutive(b)?;
        }

        #[test]
        fn bounds_merge_contains_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_bounds_merge_contains_both(b1, b2)?;
        }
    }
}
