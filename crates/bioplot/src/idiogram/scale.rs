//! Mapping numeric annotation values to colors.
//!
//! A [`ColorScale`] clamps values into a `[min, max]` domain, normalizes
//! them to `[0, 1]` and samples a [`Colormap`]. The domain comes from the
//! data unless explicit bounds override it. A [`ColorbarLegend`] carries the
//! evenly spaced samples a renderer needs to draw the colorbar.

use log::warn;

use bioplot_core::{color::Color, colormap::Colormap};

/// A continuous value-to-color mapping with a clamped domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    colormap: Colormap,
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Creates a scale over `[min, max]`.
    ///
    /// An inverted domain collapses onto `min`.
    pub fn new(colormap: Colormap, min: f64, max: f64) -> Self {
        let max = if max < min {
            warn!(min, max; "Color scale maximum below minimum, collapsing domain");
            min
        } else {
            max
        };
        Self { colormap, min, max }
    }

    /// Creates a scale whose domain spans `values`, with `vmin` and `vmax`
    /// overriding each bound independently.
    ///
    /// Returns `None` when a bound is neither given nor derivable because
    /// `values` holds no finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bioplot::{colormap::Colormap, idiogram::ColorScale};
    /// let scale = ColorScale::from_values(Colormap::default(), [3.0, 1.0, 2.0], None, Some(10.0)).unwrap();
    /// assert_eq!((scale.min(), scale.max()), (1.0, 10.0));
    /// ```
    pub fn from_values(
        colormap: Colormap,
        values: impl IntoIterator<Item = f64>,
        vmin: Option<f64>,
        vmax: Option<f64>,
    ) -> Option<Self> {
        let (min, max) = value_domain(values, vmin, vmax)?;
        Some(Self::new(colormap, min, max))
    }

    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Saturates `value` into the domain; NaN saturates to the minimum.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Position of `value` along the colormap, in `[0, 1]`.
    ///
    /// A degenerate domain maps every value to `0`.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / span
    }

    /// Maps a value to its color.
    pub fn color(&self, value: f64) -> Color {
        self.colormap.sample(self.normalize(value))
    }

    /// Builds a colorbar carrying `parts` evenly spaced samples.
    pub fn legend(&self, parts: u32) -> ColorbarLegend {
        let parts = parts.max(1);
        let last = f64::from(parts.saturating_sub(1).max(1));
        let samples = (0..parts)
            .map(|i| self.colormap.sample(f64::from(i) / last))
            .collect();
        ColorbarLegend {
            min: self.min,
            max: self.max,
            colormap: self.colormap.name().to_string(),
            samples,
        }
    }
}

/// Resolves a `[min, max]` domain from the finite `values`, with `vmin` and
/// `vmax` overriding each bound.
pub(crate) fn value_domain(
    values: impl IntoIterator<Item = f64>,
    vmin: Option<f64>,
    vmax: Option<f64>,
) -> Option<(f64, f64)> {
    let (data_min, data_max) = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold((None, None), |(lo, hi): (Option<f64>, Option<f64>), value| {
            (
                Some(lo.map_or(value, |lo| lo.min(value))),
                Some(hi.map_or(value, |hi| hi.max(value))),
            )
        });
    Some((vmin.or(data_min)?, vmax.or(data_max)?))
}

/// Samples and domain of a colorbar, from low to high values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarLegend {
    min: f64,
    max: f64,
    colormap: String,
    samples: Vec<Color>,
}

impl ColorbarLegend {
    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Name of the sampled colormap.
    pub fn colormap(&self) -> &str {
        &self.colormap
    }

    pub fn samples(&self) -> &[Color] {
        &self.samples
    }
}
