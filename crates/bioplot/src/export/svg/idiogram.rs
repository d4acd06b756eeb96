//! SVG rendering for idiogram panels.

use log::trace;
use svg::node::element as svg_element;

use bioplot_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Point},
    model::Orientation,
};

use super::{Svg, TICK_LABEL_GAP, Viewport, marker::marker_node};
use crate::idiogram::{ColorbarLegend, IdiogramGeometry};

/// Width of the colorbar, in pixels.
const COLORBAR_WIDTH: f64 = 16.0;

/// Gap between the plot area and the colorbar, in pixels.
const COLORBAR_GAP: f64 = 12.0;

impl Svg {
    pub(super) fn render_idiogram_layers(&self, geometry: &IdiogramGeometry) -> LayeredOutput {
        let legend_width = if geometry.legend().is_some() {
            self.legend_width
        } else {
            0.0
        };
        let viewport = Viewport::new(geometry.extent(), self.canvas, self.padding, legend_width);

        let mut output = LayeredOutput::new();
        self.render_annotations(geometry, &viewport, &mut output);
        self.render_outlines(geometry, &viewport, &mut output);
        self.render_track_lines(geometry, &viewport, &mut output);
        for placement in geometry.markers() {
            let center = viewport.to_pixel(placement.position());
            let node = marker_node(placement.symbol(), center, placement.size(), placement.color());
            output.add_to_layer(RenderLayer::Marker, node);
        }
        self.render_idiogram_axes(geometry, &viewport, &mut output);
        if let Some(legend) = geometry.legend() {
            self.render_colorbar(legend, viewport.plot(), &mut output);
        }
        output
    }

    fn render_annotations(
        &self,
        geometry: &IdiogramGeometry,
        viewport: &Viewport,
        output: &mut LayeredOutput,
    ) {
        for rect in geometry.rects() {
            let bounds = viewport.to_pixel_bounds(rect.bounds());
            let color = rect.color();
            let node = svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", color.to_hex())
                .set("fill-opacity", color.alpha())
                .set("stroke", "none");
            output.add_to_layer(RenderLayer::Annotation, Box::new(node));
        }
    }

    fn render_outlines(
        &self,
        geometry: &IdiogramGeometry,
        viewport: &Viewport,
        output: &mut LayeredOutput,
    ) {
        for outline in geometry.outlines() {
            let mut group = svg_element::Group::new().set("data-chromosome", outline.chromosome());
            for segment in outline.segments() {
                let start = viewport.to_pixel(segment.start());
                let end = viewport.to_pixel(segment.end());
                let line = svg_element::Line::new()
                    .set("x1", start.x())
                    .set("y1", start.y())
                    .set("x2", end.x())
                    .set("y2", end.y());
                group = group.add(apply_stroke!(line, &self.outline_stroke));
            }
            for arc in outline.arcs() {
                let points = arc.points().iter().map(|&point| viewport.to_pixel(point));
                let polyline = svg_element::Polyline::new()
                    .set("points", points_attribute(points))
                    .set("fill", "none");
                group = group.add(apply_stroke!(polyline, &self.outline_stroke));
            }
            trace!(chromosome = outline.chromosome(); "Rendered chromosome outline");
            output.add_to_layer(RenderLayer::Outline, Box::new(group));
        }
    }

    fn render_track_lines(
        &self,
        geometry: &IdiogramGeometry,
        viewport: &Viewport,
        output: &mut LayeredOutput,
    ) {
        for line in geometry.track_lines() {
            let points = line.points().iter().map(|&point| viewport.to_pixel(point));
            let polyline = svg_element::Polyline::new()
                .set("points", points_attribute(points))
                .set("fill", "none")
                .set("data-chromosome", line.chromosome());
            let polyline = apply_stroke!(polyline, &self.outer_line_stroke);
            output.add_to_layer(RenderLayer::Track, Box::new(polyline));
        }
    }

    /// Tick labels below and left of the plot area.
    ///
    /// Chromosome labels on the x axis of a vertical panel are rotated to
    /// stand upright.
    fn render_idiogram_axes(
        &self,
        geometry: &IdiogramGeometry,
        viewport: &Viewport,
        output: &mut LayeredOutput,
    ) {
        let plot = viewport.plot();
        let x_rotation = match geometry.orientation() {
            Orientation::Vertical => -90.0,
            Orientation::Horizontal => 0.0,
        };
        let x_anchor = if x_rotation == 0.0 { "middle" } else { "end" };

        for tick in geometry.ticks().x() {
            let position = Point::new(viewport.x(tick.value()), plot.max_y() + TICK_LABEL_GAP);
            let label = self.label(tick.label(), position, x_anchor, x_rotation);
            output.add_to_layer(RenderLayer::Axis, Box::new(label));
        }
        for tick in geometry.ticks().y() {
            let position = Point::new(plot.min_x() - TICK_LABEL_GAP, viewport.y(tick.value()));
            let label = self.label(tick.label(), position, "end", 0.0);
            output.add_to_layer(RenderLayer::Axis, Box::new(label));
        }
    }

    /// A vertical stack of sampled swatches, low values at the bottom, with
    /// the domain bounds written beside it.
    fn render_colorbar(&self, legend: &ColorbarLegend, plot: Bounds, output: &mut LayeredOutput) {
        let samples = legend.samples();
        if samples.is_empty() {
            return;
        }

        let x = plot.max_x() + COLORBAR_GAP;
        let swatch_height = plot.height() / samples.len() as f64;
        let mut group = svg_element::Group::new().set("data-colormap", legend.colormap());
        for (i, color) in samples.iter().enumerate() {
            let y = plot.max_y() - (i + 1) as f64 * swatch_height;
            let swatch = svg_element::Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", COLORBAR_WIDTH)
                // Overlap by one pixel to hide seams between swatches
                .set("height", swatch_height + 1.0)
                .set("fill", color.to_hex())
                .set("stroke", "none");
            group = group.add(swatch);
        }
        output.add_to_layer(RenderLayer::Legend, Box::new(group));

        let label_x = x + COLORBAR_WIDTH + TICK_LABEL_GAP / 2.0;
        for (value, y) in [(legend.min(), plot.max_y()), (legend.max(), plot.min_y())] {
            let label = self.label(&format_value(value), Point::new(label_x, y), "start", 0.0);
            output.add_to_layer(RenderLayer::Legend, Box::new(label));
        }
    }
}

/// Formats points for a `points` attribute.
pub(super) fn points_attribute(points: impl Iterator<Item = Point>) -> String {
    points
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short colorbar label: integers without decimals, others with up to
/// three significant decimals.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.3}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
