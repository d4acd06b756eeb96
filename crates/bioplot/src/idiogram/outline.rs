//! Capsule outlines of chromosome bodies.
//!
//! An outline is built in the vertical frame, where the chromosome stands at
//! `x` and positions grow along y, then transposed for horizontal panels.
//!
//! Without a centromere the outline is two side segments and two caps
//! (four arcs). A centromere splits each side in two and pinches the body
//! with two more caps facing each other across the centromere (eight arcs
//! in total).

use bioplot_core::{
    geometry::{Bounds, Point},
    model::{Chromosome, Orientation},
};

use super::arc::{Arc, Quadrant};

/// A straight side line of an outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    fn transpose(self) -> Self {
        Self::new(self.start.transpose(), self.end.transpose())
    }
}

/// The sampled points of one cap quadrant.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPath {
    quadrant: Quadrant,
    points: Vec<Point>,
}

impl ArcPath {
    fn from_arc(arc: &Arc) -> Self {
        Self {
            quadrant: arc.quadrant(),
            points: arc.points().collect(),
        }
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn transpose(self) -> Self {
        Self {
            quadrant: self.quadrant,
            points: self.points.into_iter().map(Point::transpose).collect(),
        }
    }
}

/// Side segments and cap arcs outlining one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromosomeOutline {
    chromosome: String,
    segments: Vec<Segment>,
    arcs: Vec<ArcPath>,
}

impl ChromosomeOutline {
    /// Builds the outline of `chromosome` centered on `x`.
    ///
    /// `radius` is the cap radius in slot units and `ratio` the number of
    /// base pairs per slot unit along the chromosome.
    pub fn build(
        chromosome: &Chromosome,
        x: f64,
        radius: f64,
        ratio: f64,
        orientation: Orientation,
    ) -> Self {
        let inset = radius * ratio;
        let length = chromosome.length() as f64;

        // Each span is a [from, to] range along the chromosome between two caps
        let spans = match chromosome.centromere() {
            Some(centromere) => {
                let centromere = centromere as f64;
                vec![
                    (inset, centromere - inset),
                    (centromere + inset, length - inset),
                ]
            }
            None => vec![(inset, length - inset)],
        };

        let mut segments = Vec::with_capacity(spans.len() * 2);
        for side in [x - radius, x + radius] {
            for &(from, to) in &spans {
                segments.push(Segment::new(Point::new(side, from), Point::new(side, to)));
            }
        }

        let mut arcs = Vec::with_capacity(spans.len() * 4);
        for &(from, to) in &spans {
            // A span is closed by a bottom cap at its start and a top cap at its end
            for quadrant in Quadrant::BOTTOM {
                let arc = Arc::new(radius, Point::new(x, from), quadrant, ratio);
                arcs.push(ArcPath::from_arc(&arc));
            }
            for quadrant in Quadrant::TOP {
                let arc = Arc::new(radius, Point::new(x, to), quadrant, ratio);
                arcs.push(ArcPath::from_arc(&arc));
            }
        }

        let outline = Self {
            chromosome: chromosome.id().to_string(),
            segments,
            arcs,
        };
        match orientation {
            Orientation::Vertical => outline,
            Orientation::Horizontal => outline.transpose(),
        }
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn arcs(&self) -> &[ArcPath] {
        &self.arcs
    }

    /// Swaps x and y of every point.
    pub fn transpose(self) -> Self {
        Self {
            chromosome: self.chromosome,
            segments: self.segments.into_iter().map(Segment::transpose).collect(),
            arcs: self.arcs.into_iter().map(ArcPath::transpose).collect(),
        }
    }

    /// Smallest bounds containing every outline point.
    pub fn bounds(&self) -> Bounds {
        let mut points = self
            .segments
            .iter()
            .flat_map(|segment| [segment.start, segment.end])
            .chain(self.arcs.iter().flat_map(|arc| arc.points.iter().copied()));

        let Some(first) = points.next() else {
            return Bounds::default();
        };
        points.fold(
            Bounds::new(first.x(), first.y(), first.x(), first.y()),
            |bounds, point| bounds.merge(&Bounds::new(point.x(), point.y(), point.x(), point.y())),
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn chromosome(length: u64, centromere: Option<u64>) -> Chromosome {
        let chromosome = Chromosome::new("Chr01", length).unwrap();
        match centromere {
            Some(position) => chromosome.with_centromere(position).unwrap(),
            None => chromosome,
        }
    }

    #[test]
    fn test_outline_without_centromere() {
        let outline =
            ChromosomeOutline::build(&chromosome(1000, None), 2.0, 0.35, 10.0, Orientation::Vertical);

        assert_eq!(outline.segments().len(), 2);
        assert_eq!(outline.arcs().len(), 4);

        let left = outline.segments()[0];
        assert_approx_eq!(f64, left.start().x(), 1.65);
        assert_approx_eq!(f64, left.start().y(), 3.5);
        assert_approx_eq!(f64, left.end().y(), 996.5);

        let right = outline.segments()[1];
        assert_approx_eq!(f64, right.start().x(), 2.35);
    }

    #[test]
    fn test_outline_with_centromere() {
        let chr = chromosome(2_000_000, Some(1_000_000));
        let outline = ChromosomeOutline::build(&chr, 0.0, 0.35, 1.0, Orientation::Vertical);

        assert_eq!(outline.segments().len(), 4);
        assert_eq!(outline.arcs().len(), 8);

        let lower_left = outline.segments()[0];
        assert_approx_eq!(f64, lower_left.end().y(), 1_000_000.0 - 0.35);
        let upper_left = outline.segments()[1];
        assert_approx_eq!(f64, upper_left.start().y(), 1_000_000.0 + 0.35);

        let quadrants: Vec<_> = outline.arcs().iter().map(|arc| arc.quadrant().index()).collect();
        assert_eq!(quadrants, vec![2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_caps_close_the_sides() {
        let outline =
            ChromosomeOutline::build(&chromosome(1000, None), 0.0, 0.35, 10.0, Orientation::Vertical);

        // The bottom-left cap starts where the left side starts
        let cap_start = outline.arcs()[0].points()[0];
        let side_start = outline.segments()[0].start();
        assert_approx_eq!(f64, cap_start.x(), side_start.x(), epsilon = 1e-12);
        assert_approx_eq!(f64, cap_start.y(), side_start.y(), epsilon = 1e-12);
    }

    #[test]
    fn test_horizontal_is_transposed_vertical() {
        let chr = chromosome(5000, Some(2000));
        let vertical = ChromosomeOutline::build(&chr, 4.0, 0.35, 50.0, Orientation::Vertical);
        let horizontal = ChromosomeOutline::build(&chr, 4.0, 0.35, 50.0, Orientation::Horizontal);

        assert_eq!(vertical.clone().transpose(), horizontal);
        assert_eq!(horizontal.transpose(), vertical);
    }

    #[test]
    fn test_bounds() {
        let outline =
            ChromosomeOutline::build(&chromosome(1000, None), 1.0, 0.35, 10.0, Orientation::Vertical);
        let bounds = outline.bounds();
        assert_approx_eq!(f64, bounds.min_x(), 0.65, epsilon = 1e-9);
        assert_approx_eq!(f64, bounds.max_x(), 1.35, epsilon = 1e-9);
        assert_approx_eq!(f64, bounds.min_y(), 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bounds.max_y(), 1000.0, epsilon = 1e-9);
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn chromosome_strategy() -> impl Strategy<Value = Chromosome> {
            (2u64..10_000_000, any::<bool>(), 0.01f64..0.99).prop_map(
                |(length, has_centromere, fraction)| {
                    let chromosome = Chromosome::new("ChrP", length).expect("length is positive");
                    let position = ((length as f64 * fraction) as u64).clamp(1, length - 1);
                    if has_centromere {
                        chromosome
                            .with_centromere(position)
                            .expect("position is inside the body")
                    } else {
                        chromosome
                    }
                },
            )
        }

        fn check_part_counts(chromosome: &Chromosome, ratio: f64) -> Result<(), TestCaseError> {
            let outline = ChromosomeOutline::build(chromosome, 0.0, 0.35, ratio, Orientation::Vertical);
            let (segments, arcs) = if chromosome.centromere().is_some() {
                (4, 8)
            } else {
                (2, 4)
            };
            prop_assert_eq!(outline.segments().len(), segments);
            prop_assert_eq!(outline.arcs().len(), arcs);
            Ok(())
        }

        fn check_transpose_involution(chromosome: &Chromosome, ratio: f64) -> Result<(), TestCaseError> {
            let outline = ChromosomeOutline::build(chromosome, 3.0, 0.35, ratio, Orientation::Vertical);
            prop_assert_eq!(outline.clone().transpose().transpose(), outline);
            Ok(())
        }

        proptest! {
            #[test]
            fn part_counts(chromosome in chromosome_strategy(), ratio in 0.001f64..1e5) {
                check_part_counts(&chromosome, ratio)?;
            }

            #[test]
            fn transpose_involution(chromosome in chromosome_strategy(), ratio in 0.001f64..1e5) {
                check_transpose_involution(&chromosome, ratio)?;
            }
        }
    }
}
