//! SVG rendering for gene cluster diagrams.

use svg::node::element as svg_element;

use bioplot_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer},
    geometry::Point,
};

use super::{Svg, TICK_LABEL_GAP, Viewport, idiogram::points_attribute};
use crate::genecluster::GeneClusterGeometry;

impl Svg {
    pub(super) fn render_gene_cluster_layers(&self, geometry: &GeneClusterGeometry) -> LayeredOutput {
        let viewport = Viewport::new(geometry.extent(), self.canvas, self.padding, 0.0);
        let mut output = LayeredOutput::new();

        let backbone = geometry.backbone();
        let start = viewport.to_pixel(backbone.start());
        let end = viewport.to_pixel(backbone.end());
        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y());
        output.add_to_layer(
            RenderLayer::Outline,
            Box::new(apply_stroke!(line, &self.backbone_stroke)),
        );

        for arrow in geometry.arrows() {
            let points = arrow.polygon().iter().map(|&point| viewport.to_pixel(point));
            let fill = arrow.fill();
            let mut polygon = svg_element::Polygon::new()
                .set("points", points_attribute(points))
                .set("fill", fill.to_hex())
                .set("fill-opacity", fill.alpha())
                .set("data-gene", arrow.name());
            polygon = match arrow.edge() {
                Some(edge) => polygon
                    .set("stroke", edge.to_hex())
                    .set("stroke-opacity", edge.alpha())
                    .set("stroke-width", self.gene_edge_width),
                None => polygon.set("stroke", "none"),
            };
            output.add_to_layer(RenderLayer::Track, Box::new(polygon));
        }

        // Gene names hang below the backbone, slanted
        let label_y = viewport.plot().max_y() + TICK_LABEL_GAP;
        for tick in geometry.ticks() {
            let position = Point::new(viewport.x(tick.value()), label_y);
            let label = self.label(tick.label(), position, "start", 45.0);
            output.add_to_layer(RenderLayer::Axis, Box::new(label));
        }

        output
    }
}
