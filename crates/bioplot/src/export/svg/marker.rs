//! SVG shapes for marker symbols.

use std::f64::consts::PI;

use svg::node::element as svg_element;

use bioplot_core::{color::Color, draw::SvgNode, geometry::Point, model::MarkerSymbol};

/// Renders `symbol` centered on `center` with an edge length of `size` pixels.
///
/// Filled symbols use `color` as fill; line symbols (`+`, `x`) use it as
/// stroke.
pub fn marker_node(symbol: MarkerSymbol, center: Point, size: f64, color: Color) -> SvgNode {
    let half = size / 2.0;
    let (cx, cy) = (center.x(), center.y());

    match symbol {
        MarkerSymbol::Circle => filled(
            svg_element::Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", half),
            color,
        ),
        MarkerSymbol::Point => filled(
            svg_element::Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", half / 2.0),
            color,
        ),
        MarkerSymbol::Square => filled(
            svg_element::Rectangle::new()
                .set("x", cx - half)
                .set("y", cy - half)
                .set("width", size)
                .set("height", size),
            color,
        ),
        MarkerSymbol::TriangleUp => polygon(
            &[(cx, cy - half), (cx + half, cy + half), (cx - half, cy + half)],
            color,
        ),
        MarkerSymbol::TriangleDown => polygon(
            &[(cx, cy + half), (cx + half, cy - half), (cx - half, cy - half)],
            color,
        ),
        MarkerSymbol::Diamond => polygon(
            &[(cx, cy - half), (cx + half, cy), (cx, cy + half), (cx - half, cy)],
            color,
        ),
        MarkerSymbol::Star => {
            // Five outer points alternating with five inner points
            let points: Vec<(f64, f64)> = (0..10)
                .map(|i| {
                    let radius = if i % 2 == 0 { half } else { half * 0.4 };
                    let angle = -PI / 2.0 + f64::from(i) * PI / 5.0;
                    (cx + radius * angle.cos(), cy + radius * angle.sin())
                })
                .collect();
            polygon(&points, color)
        }
        MarkerSymbol::Plus => stroked(
            format!(
                "M {} {} L {} {} M {} {} L {} {}",
                cx - half,
                cy,
                cx + half,
                cy,
                cx,
                cy - half,
                cx,
                cy + half
            ),
            color,
        ),
        MarkerSymbol::Cross => stroked(
            format!(
                "M {} {} L {} {} M {} {} L {} {}",
                cx - half,
                cy - half,
                cx + half,
                cy + half,
                cx - half,
                cy + half,
                cx + half,
                cy - half
            ),
            color,
        ),
    }
}

fn filled<T>(element: T, color: Color) -> SvgNode
where
    T: svg::Node + SetFill,
{
    Box::new(element.with_fill(color))
}

fn polygon(points: &[(f64, f64)], color: Color) -> SvgNode {
    let points = points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ");
    filled(svg_element::Polygon::new().set("points", points), color)
}

fn stroked(data: String, color: Color) -> SvgNode {
    Box::new(
        svg_element::Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", color.to_hex())
            .set("stroke-opacity", color.alpha())
            .set("stroke-width", 1.5),
    )
}

/// Elements that accept a fill color.
trait SetFill {
    fn with_fill(self, color: Color) -> Self;
}

macro_rules! impl_set_fill {
    ($($element:ty),*) => {
        $(
            impl SetFill for $element {
                fn with_fill(self, color: Color) -> Self {
                    self.set("fill", color.to_hex())
                        .set("fill-opacity", color.alpha())
                        .set("stroke", "none")
                }
            }
        )*
    };
}

impl_set_fill!(svg_element::Circle, svg_element::Rectangle, svg_element::Polygon);

#[cfg(test)]
mod tests {
    use super::*;

    fn render(symbol: MarkerSymbol) -> String {
        let red = Color::new("red").unwrap();
        marker_node(symbol, Point::new(10.0, 10.0), 6.0, red).to_string()
    }

    #[test]
    fn test_circle() {
        let node = render(MarkerSymbol::Circle);
        assert!(node.starts_with("<circle"));
        assert!(node.contains("r=\"3\""));
        assert!(node.contains("fill=\"#ff0000\""));
    }

    #[test]
    fn test_square() {
        let node = render(MarkerSymbol::Square);
        assert!(node.starts_with("<rect"));
        assert!(node.contains("x=\"7\""));
    }

    #[test]
    fn test_polygons() {
        for symbol in [
            MarkerSymbol::TriangleUp,
            MarkerSymbol::TriangleDown,
            MarkerSymbol::Diamond,
            MarkerSymbol::Star,
        ] {
            assert!(render(symbol).starts_with("<polygon"), "{symbol:?}");
        }
        assert!(render(MarkerSymbol::TriangleUp).contains("points=\"10,7 13,13 7,13\""));
    }

    #[test]
    fn test_line_symbols_are_stroked() {
        for symbol in [MarkerSymbol::Plus, MarkerSymbol::Cross] {
            let node = render(symbol);
            assert!(node.starts_with("<path"));
            assert!(node.contains("stroke=\"#ff0000\""));
            assert!(node.contains("fill=\"none\""));
        }
    }
}
