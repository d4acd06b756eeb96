//! Gene cluster diagrams: stranded genes drawn as arrows on a backbone.
//!
//! Genes lie along `y = 0` in base-pair coordinates. Each gene becomes a
//! seven-point arrow polygon pointing right on the `+` strand and left on
//! the `-` strand; a backbone line joins the leftmost start to the rightmost
//! end, and one axis tick labels each gene at its midpoint.
//!
//! # Example
//!
//! ```
//! # use bioplot::{color::Color, geometry::Size};
//! # use bioplot::genecluster::{Gene, Strand, layout_gene_cluster};
//! let genes = vec![
//!     Gene::new("dnaA", 100, 1600, Strand::Forward, Color::new("steelblue").unwrap()).unwrap(),
//!     Gene::new("dnaN", 1800, 2900, "-".parse().unwrap(), Color::new("orange").unwrap()).unwrap(),
//! ];
//! let geometry = layout_gene_cluster(&genes, None, Size::new(800.0, 200.0)).unwrap();
//! assert_eq!(geometry.arrows().len(), 2);
//! assert_eq!(geometry.ticks()[1].label(), "dnaN");
//! ```

use std::{fmt, str::FromStr};

use log::{debug, info, trace};

use bioplot_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

use crate::{
    BioplotError,
    idiogram::{Segment, Tick},
};

/// Width of an arrow shaft in data units.
pub const SHAFT_WIDTH: f64 = 0.4;

/// Width of an arrow head in data units.
pub const HEAD_WIDTH: f64 = 0.75;

/// Arrow heads are at most `max_end / HEAD_LENGTH_DIVISOR` base pairs long.
pub const HEAD_LENGTH_DIVISOR: f64 = 50.0;

/// Strand of a gene, which sets the arrow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    /// `+`, pointing right
    Forward,
    /// `-`, pointing left
    Reverse,
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Forward),
            "-" => Ok(Self::Reverse),
            _ => Err(format!("invalid strand `{s}`, valid values: +, -")),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// A gene of the cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    name: String,
    start: u64,
    end: u64,
    strand: Strand,
    color: Color,
    edge_color: Option<Color>,
}

impl Gene {
    /// Creates a gene spanning `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`BioplotError::Layout`] if `start > end` or `end` is
    /// `u64::MAX`.
    pub fn new(
        name: impl Into<String>,
        start: u64,
        end: u64,
        strand: Strand,
        color: Color,
    ) -> Result<Self, BioplotError> {
        let name = name.into();
        if start > end {
            return Err(BioplotError::Layout(format!(
                "gene `{name}` has start {start} after end {end}"
            )));
        }
        if end == u64::MAX {
            return Err(BioplotError::Layout(format!(
                "gene `{name}` end {end} is out of range"
            )));
        }
        Ok(Self {
            name,
            start,
            end,
            strand,
            color,
            edge_color: None,
        })
    }

    /// Sets an edge color for this gene only.
    pub fn with_edge_color(mut self, edge_color: Color) -> Self {
        self.edge_color = Some(edge_color);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn edge_color(&self) -> Option<Color> {
        self.edge_color
    }

    /// Drawn length: both ends are inclusive.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    fn midpoint(&self) -> f64 {
        (self.start as f64 + self.end as f64) / 2.0
    }
}

/// The arrow polygon of one gene.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneArrow {
    name: String,
    polygon: Vec<Point>,
    fill: Color,
    edge: Option<Color>,
}

impl GeneArrow {
    fn build(gene: &Gene, max_end: u64, edge: Option<Color>) -> Self {
        let length = gene.length() as f64;
        let head = (max_end as f64 / HEAD_LENGTH_DIVISOR).min(length);
        let (origin, direction) = match gene.strand {
            Strand::Forward => (gene.start as f64, 1.0),
            Strand::Reverse => (gene.end as f64, -1.0),
        };
        let neck = origin + direction * (length - head);
        let tip = origin + direction * length;
        let shaft = SHAFT_WIDTH / 2.0;
        let barb = HEAD_WIDTH / 2.0;

        let polygon = vec![
            Point::new(origin, -shaft),
            Point::new(neck, -shaft),
            Point::new(neck, -barb),
            Point::new(tip, 0.0),
            Point::new(neck, barb),
            Point::new(neck, shaft),
            Point::new(origin, shaft),
        ];
        trace!(gene = gene.name.as_str(), head, tip; "Built gene arrow");

        Self {
            name: gene.name.clone(),
            polygon,
            fill: gene.color,
            edge: gene.edge_color.or(edge),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Closed outline; the last point connects back to the first.
    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn edge(&self) -> Option<Color> {
        self.edge
    }
}

/// Everything a renderer needs to draw a gene cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneClusterGeometry {
    arrows: Vec<GeneArrow>,
    backbone: Segment,
    ticks: Vec<Tick>,
    extent: Bounds,
}

impl GeneClusterGeometry {
    pub fn arrows(&self) -> &[GeneArrow] {
        &self.arrows
    }

    pub fn backbone(&self) -> Segment {
        self.backbone
    }

    /// One tick per gene, in input order.
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn extent(&self) -> Bounds {
        self.extent
    }
}

/// Lays out `genes` as arrows along a backbone.
///
/// `edge` applies to every gene without its own edge color. The canvas only
/// sets the vertical extent, `[-0.5, max(0.5, 10 * height / width - 0.5)]`,
/// which keeps arrows thin on wide canvases.
///
/// # Errors
///
/// Returns [`BioplotError::Layout`] when `genes` is empty or the canvas has
/// no width.
pub fn layout_gene_cluster(
    genes: &[Gene],
    edge: Option<Color>,
    canvas: Size,
) -> Result<GeneClusterGeometry, BioplotError> {
    let (Some(min_start), Some(max_end)) = (
        genes.iter().map(Gene::start).min(),
        genes.iter().map(Gene::end).max(),
    ) else {
        return Err(BioplotError::Layout("gene cluster has no genes".to_string()));
    };
    if !(canvas.width() > 0.0 && canvas.height().is_finite()) {
        return Err(BioplotError::Layout(format!(
            "canvas {}x{} has no usable aspect ratio",
            canvas.width(),
            canvas.height()
        )));
    }

    info!(genes = genes.len(); "Computing gene cluster layout");
    debug!(min_start, max_end; "Gene cluster span");

    let arrows: Vec<GeneArrow> = genes
        .iter()
        .map(|gene| GeneArrow::build(gene, max_end, edge))
        .collect();
    let backbone = Segment::new(
        Point::new(min_start as f64, 0.0),
        Point::new(max_end as f64, 0.0),
    );
    let ticks = genes
        .iter()
        .map(|gene| Tick::new(gene.midpoint(), gene.name()))
        .collect();

    let (left, right) = arrows
        .iter()
        .flat_map(|arrow| arrow.polygon.iter().map(|point| point.x()))
        .fold((min_start as f64, max_end as f64), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    let top = (canvas.height() * 10.0 / canvas.width() - 0.5).max(0.5);
    let extent = Bounds::new(left, -0.5, right, top);

    Ok(GeneClusterGeometry {
        arrows,
        backbone,
        ticks,
        extent,
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn gene(name: &str, start: u64, end: u64, strand: &str) -> Gene {
        Gene::new(name, start, end, strand.parse().unwrap(), Color::new("red").unwrap()).unwrap()
    }

    fn wide() -> Size {
        Size::new(1000.0, 200.0)
    }

    #[test]
    fn test_strand_from_str() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-".parse::<Strand>().unwrap(), Strand::Reverse);
        let err = "*".parse::<Strand>().unwrap_err();
        assert_eq!(err, "invalid strand `*`, valid values: +, -");
    }

    #[test]
    fn test_inverted_gene_is_an_error() {
        let result = Gene::new("g", 10, 5, Strand::Forward, Color::default());
        assert!(matches!(result, Err(BioplotError::Layout(_))));
    }

    #[test]
    fn test_gene_end_at_u64_max() {
        let result = Gene::new("g", u64::MAX - 10, u64::MAX, Strand::Forward, Color::default());
        assert!(matches!(result, Err(BioplotError::Layout(_))));

        let gene = Gene::new("g", 0, u64::MAX - 1, Strand::Forward, Color::default()).unwrap();
        assert_eq!(gene.length(), u64::MAX);
    }

    #[test]
    fn test_forward_arrow() {
        let genes = [gene("a", 0, 999, "+"), gene("b", 4000, 4999, "+")];
        let geometry = layout_gene_cluster(&genes, None, wide()).unwrap();

        // head = min(4999 / 50, 1000)
        let polygon = geometry.arrows()[0].polygon();
        assert_eq!(polygon.len(), 7);
        assert_approx_eq!(f64, polygon[0].x(), 0.0);
        assert_approx_eq!(f64, polygon[0].y(), -0.2);
        assert_approx_eq!(f64, polygon[1].x(), 1000.0 - 99.98, epsilon = 1e-9);
        assert_approx_eq!(f64, polygon[2].y(), -0.375);
        assert_approx_eq!(f64, polygon[3].x(), 1000.0);
        assert_approx_eq!(f64, polygon[3].y(), 0.0);
    }

    #[test]
    fn test_reverse_arrow_points_left() {
        let genes = [gene("a", 100, 199, "-")];
        let geometry = layout_gene_cluster(&genes, None, wide()).unwrap();

        let polygon = geometry.arrows()[0].polygon();
        assert_approx_eq!(f64, polygon[0].x(), 199.0);
        assert_approx_eq!(f64, polygon[3].x(), 99.0);
        assert!(polygon[1].x() < polygon[0].x());
    }

    #[test]
    fn test_short_gene_is_all_head() {
        let genes = [gene("tiny", 10, 10, "+"), gene("big", 20, 100_000, "+")];
        let geometry = layout_gene_cluster(&genes, None, wide()).unwrap();

        let polygon = geometry.arrows()[0].polygon();
        assert_approx_eq!(f64, polygon[1].x(), 10.0);
        assert_approx_eq!(f64, polygon[3].x(), 11.0);
    }

    #[test]
    fn test_edge_colors() {
        let blue = Color::new("blue").unwrap();
        let green = Color::new("green").unwrap();
        let genes = [gene("a", 0, 10, "+"), gene("b", 20, 30, "-").with_edge_color(green)];

        let geometry = layout_gene_cluster(&genes, Some(blue), wide()).unwrap();
        assert_eq!(geometry.arrows()[0].edge(), Some(blue));
        assert_eq!(geometry.arrows()[1].edge(), Some(green));

        let geometry = layout_gene_cluster(&genes, None, wide()).unwrap();
        assert_eq!(geometry.arrows()[0].edge(), None);
    }

    #[test]
    fn test_backbone_and_ticks() {
        let genes = [gene("b", 500, 900, "-"), gene("a", 100, 300, "+")];
        let geometry = layout_gene_cluster(&genes, None, wide()).unwrap();

        assert_eq!(geometry.backbone().start(), Point::new(100.0, 0.0));
        assert_eq!(geometry.backbone().end(), Point::new(900.0, 0.0));

        let ticks: Vec<_> = geometry.ticks().iter().map(|t| (t.value(), t.label())).collect();
        assert_eq!(ticks, vec![(700.0, "b"), (200.0, "a")]);
    }

    #[test]
    fn test_vertical_extent() {
        let genes = [gene("a", 0, 10, "+")];

        let geometry = layout_gene_cluster(&genes, None, Size::new(1000.0, 200.0)).unwrap();
        assert_approx_eq!(f64, geometry.extent().min_y(), -0.5);
        assert_approx_eq!(f64, geometry.extent().max_y(), 1.5);

        let geometry = layout_gene_cluster(&genes, None, Size::new(1000.0, 50.0)).unwrap();
        assert_approx_eq!(f64, geometry.extent().max_y(), 0.5);
    }

    #[test]
    fn test_empty_cluster_is_an_error() {
        let err = layout_gene_cluster(&[], None, wide()).unwrap_err();
        assert!(matches!(err, BioplotError::Layout(_)));
    }
}
