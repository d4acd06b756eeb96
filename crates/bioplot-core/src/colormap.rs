//! Continuous colormaps.
//!
//! A [`Colormap`] is a piecewise-linear gradient over `[0, 1]` defined by a
//! list of color stops. The named maps follow the matplotlib maps of the same
//! name closely enough for figures to look alike; any name may carry an `_r`
//! suffix to reverse it.
//!
//! # Example
//!
//! ```
//! # use bioplot_core::colormap::Colormap;
//! let blues: Colormap = "Blues".parse().unwrap();
//! let light = blues.sample(0.0);
//! let dark = blues.sample(1.0);
//! assert_ne!(light, dark);
//!
//! let reversed: Colormap = "Blues_r".parse().unwrap();
//! assert_eq!(reversed.sample(0.0), dark);
//! ```

use std::{fmt, str::FromStr};

use color::{OpaqueColor, Srgb};

use crate::color::Color;

/// Name of the colormap used when none is configured.
pub const DEFAULT_COLORMAP: &str = "gist_rainbow";

const REVERSED_SUFFIX: &str = "_r";

const GIST_RAINBOW: &[(f32, [f32; 3])] = &[
    (0.000, [1.00, 0.00, 0.16]),
    (0.030, [1.00, 0.00, 0.00]),
    (0.215, [1.00, 1.00, 0.00]),
    (0.400, [0.00, 1.00, 0.00]),
    (0.586, [0.00, 1.00, 1.00]),
    (0.770, [0.00, 0.00, 1.00]),
    (0.954, [1.00, 0.00, 1.00]),
    (1.000, [1.00, 0.00, 0.75]),
];

const VIRIDIS: &[u32] = &[
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];

const BLUES: &[u32] = &[
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];

const GREENS: &[u32] = &[
    0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
];

const REDS: &[u32] = &[
    0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
];

const GREYS: &[u32] = &[
    0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525, 0x000000,
];

const ORANGES: &[u32] = &[
    0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
];

const PURPLES: &[u32] = &[
    0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
];

const COOLWARM: &[u32] = &[
    0x3b4cc0, 0x6788ee, 0x9abbff, 0xc9d7f0, 0xedd1c2, 0xf7a889, 0xe26952, 0xb40426,
];

/// All colormap names accepted by [`Colormap::from_name`] (without the `_r` suffix).
pub const COLORMAP_NAMES: &[&str] = &[
    "gist_rainbow",
    "viridis",
    "Blues",
    "Greens",
    "Reds",
    "Greys",
    "Oranges",
    "Purples",
    "coolwarm",
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct ColorStop {
    position: f32,
    color: OpaqueColor<Srgb>,
}

/// A continuous gradient sampled with a position in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<ColorStop>,
}

impl Colormap {
    /// Looks up a named colormap.
    ///
    /// # Errors
    ///
    /// Returns an error naming the available colormaps if `name` is unknown.
    pub fn from_name(name: &str) -> Result<Self, String> {
        let (base, reversed) = match name.strip_suffix(REVERSED_SUFFIX) {
            Some(base) => (base, true),
            None => (name, false),
        };

        let stops = match base {
            "gist_rainbow" => GIST_RAINBOW
                .iter()
                .map(|&(position, rgb)| ColorStop {
                    position,
                    color: OpaqueColor::new(rgb),
                })
                .collect(),
            "viridis" => evenly_spaced(VIRIDIS),
            "Blues" => evenly_spaced(BLUES),
            "Greens" => evenly_spaced(GREENS),
            "Reds" => evenly_spaced(REDS),
            "Greys" => evenly_spaced(GREYS),
            "Oranges" => evenly_spaced(ORANGES),
            "Purples" => evenly_spaced(PURPLES),
            "coolwarm" => evenly_spaced(COOLWARM),
            _ => {
                return Err(format!(
                    "invalid colormap `{name}`, valid values: {} (optionally suffixed with `{REVERSED_SUFFIX}`)",
                    COLORMAP_NAMES.join(", ")
                ));
            }
        };

        let colormap = Self {
            name: base.to_string(),
            stops,
        };
        Ok(if reversed {
            colormap.reversed()
        } else {
            colormap
        })
    }

    /// Returns the colormap name, including the `_r` suffix when reversed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the same gradient traversed from the other end.
    pub fn reversed(self) -> Self {
        let name = match self.name.strip_suffix(REVERSED_SUFFIX) {
            Some(base) => base.to_string(),
            None => format!("{}{REVERSED_SUFFIX}", self.name),
        };
        let stops = self
            .stops
            .iter()
            .rev()
            .map(|stop| ColorStop {
                position: 1.0 - stop.position,
                color: stop.color,
            })
            .collect();
        Self { name, stops }
    }

    /// Samples the gradient at `position`, clamped to `[0, 1]`.
    ///
    /// A NaN position samples the start of the gradient.
    pub fn sample(&self, position: f64) -> Color {
        let t = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0) as f32
        };

        let upper = self
            .stops
            .iter()
            .position(|stop| stop.position >= t)
            .unwrap_or(self.stops.len() - 1);
        if upper == 0 {
            return to_color(self.stops[0].color);
        }

        let lo = self.stops[upper - 1];
        let hi = self.stops[upper];
        let span = hi.position - lo.position;
        let f = if span > 0.0 {
            (t - lo.position) / span
        } else {
            1.0
        };
        to_color(lo.color.lerp_rect(hi.color, f))
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::from_name(DEFAULT_COLORMAP).expect("default colormap is always available")
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn evenly_spaced(hexes: &[u32]) -> Vec<ColorStop> {
    let last = (hexes.len() - 1).max(1) as f32;
    hexes
        .iter()
        .enumerate()
        .map(|(i, &hex)| {
            let [_, r, g, b] = hex.to_be_bytes();
            ColorStop {
                position: i as f32 / last,
                color: OpaqueColor::from_rgb8(r, g, b),
            }
        })
        .collect()
}

fn to_color(color: OpaqueColor<Srgb>) -> Color {
    let [r, g, b] = color.components;
    Color::from_srgb(r, g, b)
}
