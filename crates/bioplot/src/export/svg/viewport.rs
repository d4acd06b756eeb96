//! Mapping from data coordinates to canvas pixels.

use bioplot_core::geometry::{Bounds, Insets, Point, Size};

/// Maps a data-space extent onto the plot area of the canvas.
///
/// Data y grows upward and SVG y grows downward, so the mapping flips the
/// vertical axis. The plot area is the canvas minus `padding`, minus an
/// extra `legend_width` on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    extent: Bounds,
    plot: Bounds,
}

impl Viewport {
    pub fn new(extent: Bounds, canvas: Size, padding: Insets, legend_width: f64) -> Self {
        let plot = Bounds::new(
            padding.left(),
            padding.top(),
            (canvas.width() - padding.right() - legend_width).max(padding.left()),
            (canvas.height() - padding.bottom()).max(padding.top()),
        );
        Self { extent, plot }
    }

    /// Pixel rectangle the extent is drawn into.
    pub fn plot(&self) -> Bounds {
        self.plot
    }

    /// Pixel position of a data point.
    pub fn to_pixel(&self, point: Point) -> Point {
        let fx = (point.x() - self.extent.min_x()) / span(self.extent.width());
        let fy = (point.y() - self.extent.min_y()) / span(self.extent.height());
        Point::new(
            self.plot.min_x() + fx * self.plot.width(),
            self.plot.max_y() - fy * self.plot.height(),
        )
    }

    /// Pixel rectangle of a data rectangle.
    pub fn to_pixel_bounds(&self, bounds: Bounds) -> Bounds {
        let a = self.to_pixel(Point::new(bounds.min_x(), bounds.min_y()));
        let b = self.to_pixel(Point::new(bounds.max_x(), bounds.max_y()));
        Bounds::new(a.x(), a.y(), b.x(), b.y())
    }

    /// Horizontal pixel position of a data x coordinate.
    pub fn x(&self, x: f64) -> f64 {
        self.to_pixel(Point::new(x, self.extent.min_y())).x()
    }

    /// Vertical pixel position of a data y coordinate.
    pub fn y(&self, y: f64) -> f64 {
        self.to_pixel(Point::new(self.extent.min_x(), y)).y()
    }
}

/// Guards against an empty extent axis.
fn span(length: f64) -> f64 {
    if length > 0.0 { length } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(
            Bounds::new(-0.5, 0.0, 1.5, 1000.0),
            Size::new(300.0, 200.0),
            Insets::uniform(50.0),
            0.0,
        )
    }

    #[test]
    fn test_corners() {
        let viewport = viewport();
        assert_eq!(viewport.to_pixel(Point::new(-0.5, 0.0)), Point::new(50.0, 150.0));
        assert_eq!(viewport.to_pixel(Point::new(1.5, 1000.0)), Point::new(250.0, 50.0));
    }

    #[test]
    fn test_y_axis_flipped() {
        let viewport = viewport();
        assert!(viewport.y(800.0) < viewport.y(200.0));
        assert_approx_eq!(f64, viewport.y(500.0), 100.0);
        assert_approx_eq!(f64, viewport.x(0.5), 150.0);
    }

    #[test]
    fn test_bounds_normalized() {
        let viewport = viewport();
        let bounds = viewport.to_pixel_bounds(Bounds::new(0.0, 0.0, 1.0, 500.0));
        assert_approx_eq!(f64, bounds.min_y(), 100.0);
        assert_approx_eq!(f64, bounds.max_y(), 150.0);
        assert_approx_eq!(f64, bounds.width(), 100.0);
    }

    #[test]
    fn test_legend_narrows_plot() {
        let viewport = Viewport::new(
            Bounds::new(0.0, 0.0, 1.0, 1.0),
            Size::new(300.0, 200.0),
            Insets::uniform(50.0),
            80.0,
        );
        assert_approx_eq!(f64, viewport.plot().max_x(), 170.0);
    }

    #[test]
    fn test_degenerate_extent() {
        let viewport = Viewport::new(
            Bounds::new(0.0, 0.0, 0.0, 0.0),
            Size::new(100.0, 100.0),
            Insets::uniform(0.0),
            0.0,
        );
        let pixel = viewport.to_pixel(Point::new(0.0, 0.0));
        assert!(pixel.x().is_finite() && pixel.y().is_finite());
    }
}
