//! Annotation width tapering near chromosome ends and centromeres.
//!
//! Annotation rectangles fill the chromosome body, which narrows inside the
//! rounded caps. The body is pinched at both ends and at the centromere; an
//! annotation whose midpoint lies within one cap radius of a pinch gets the
//! chord width of the cap at that distance, reaching zero at the pinch.

use bioplot_core::model::Chromosome;

/// Width profile of one chromosome body.
#[derive(Debug, Clone, PartialEq)]
pub struct Taper {
    radius: f64,
    ratio: f64,
    pinches: Vec<f64>,
}

impl Taper {
    /// Creates the profile of `chromosome` drawn with cap `radius` and
    /// `ratio` base pairs per slot unit.
    pub fn new(chromosome: &Chromosome, radius: f64, ratio: f64) -> Self {
        let mut pinches = vec![0.0, chromosome.length() as f64];
        pinches.extend(chromosome.centromere().map(|c| c as f64));
        Self {
            radius,
            ratio,
            pinches,
        }
    }

    /// Depth of the cap at `midpoint`: how far inside a cap the point sits,
    /// in slot units, clamped to `[0, radius]`.
    fn cap_depth(&self, midpoint: f64) -> f64 {
        self.pinches
            .iter()
            .map(|pinch| (midpoint - pinch).abs() / self.ratio)
            .filter(|distance| *distance < self.radius)
            .map(|distance| self.radius - distance)
            .fold(0.0, f64::max)
            .clamp(0.0, self.radius)
    }

    /// Half of the body width at `midpoint` base pairs.
    pub fn half_width(&self, midpoint: f64) -> f64 {
        let depth = self.cap_depth(midpoint);
        (self.radius * self.radius - depth * depth).max(0.0).sqrt()
    }

    /// Full body width at `midpoint` base pairs, `2 * radius` away from pinches.
    pub fn width(&self, midpoint: f64) -> f64 {
        2.0 * self.half_width(midpoint)
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
    fn test_full_width_away_from_pinches() {
        let taper = Taper::new(&chromosome(2_000_000, None), 0.35, 1.0);
        assert_approx_eq!(f64, taper.width(500_005.0), 0.7);
    }

    #[test]
    fn test_zero_width_at_pinches() {
        let taper = Taper::new(&chromosome(2_000_000, Some(1_000_000)), 0.35, 1000.0);
        assert_approx_eq!(f64, taper.half_width(0.0), 0.0);
        assert_approx_eq!(f64, taper.half_width(1_000_000.0), 0.0);
        assert_approx_eq!(f64, taper.half_width(2_000_000.0), 0.0);
    }

    #[test]
    fn test_chord_inside_cap() {
        // Halfway into the cap: depth r/2, half-width sqrt(r² - r²/4)
        let taper = Taper::new(&chromosome(1_000_000, None), 0.35, 1000.0);
        let expected = (0.35f64 * 0.35 - 0.175 * 0.175).sqrt();
        assert_approx_eq!(f64, taper.half_width(175.0), expected, epsilon = 1e-12);
        assert_approx_eq!(f64, taper.half_width(1_000_000.0 - 175.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_nearest_pinch_wins() {
        // Short chromosome where both ends constrain the midpoint
        let taper = Taper::new(&chromosome(500, None), 0.35, 1000.0);

        // 0.2 from the start (depth 0.15) beats 0.3 from the end (depth 0.05)
        let depth = 0.35 - 0.2;
        let expected = (0.35f64 * 0.35 - depth * depth).sqrt();
        assert_approx_eq!(f64, taper.half_width(200.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_far_pinch_wins() {
        let taper = Taper::new(&chromosome(500, None), 0.35, 1000.0);

        // 0.35 from the start is outside its cap; 0.15 from the end has depth 0.2
        let depth = 0.35 - 0.15;
        let expected = (0.35f64 * 0.35 - depth * depth).sqrt();
        assert_approx_eq!(f64, taper.half_width(350.0), expected, epsilon = 1e-12);

        // Same chord on the centromere side of a long chromosome
        let taper = Taper::new(&chromosome(2_000_000, Some(1_000_000)), 0.35, 1000.0);
        assert_approx_eq!(f64, taper.half_width(999_850.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_centromere_pinch() {
        let taper = Taper::new(&chromosome(2_000_000, Some(1_000_000)), 0.35, 1000.0);
        assert!(taper.width(1_000_100.0) < 0.7);
        assert_approx_eq!(f64, taper.width(1_000_350.0), 0.7);
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn check_width_bounds(taper: &Taper, midpoint: f64) -> Result<(), TestCaseError> {
            let width = taper.width(midpoint);
            prop_assert!(width >= 0.0);
            prop_assert!(width <= 0.7 + 1e-12);
            Ok(())
        }

        fn check_full_width_far_from_pinches(
            length: u64,
            ratio: f64,
            fraction: f64,
        ) -> Result<(), TestCaseError> {
            let taper = Taper::new(&chromosome(length, None), 0.35, ratio);
            let margin = 0.35 * ratio;
            let midpoint = margin + (length as f64 - 2.0 * margin) * fraction;
            prop_assume!(midpoint >= margin && midpoint <= length as f64 - margin);
            prop_assert!((taper.width(midpoint) - 0.7).abs() < 1e-9);
            Ok(())
        }

        proptest! {
            #[test]
            fn width_bounds(
                length in 1u64..10_000_000,
                ratio in 0.001f64..1e6,
                midpoint in -1e7f64..2e7,
            ) {
                let taper = Taper::new(&chromosome(length, None), 0.35, ratio);
                check_width_bounds(&taper, midpoint)?;
            }

            #[test]
            fn full_width_far_from_pinches(
                length in 1_000u64..10_000_000,
                ratio in 0.001f64..100.0,
                fraction in 0.0f64..=1.0,
            ) {
                check_full_width_far_from_pinches(length, ratio, fraction)?;
            }
        }
    }
}
