//! Stroke and line-style definitions.
//!
//! # Overview
//!
//! - [`StrokeDefinition`]: color, width and dash style of a line
//! - [`StrokeStyle`]: line pattern, parsed from the short codes common to
//!   plotting tools (`-`, `--`, `:`, `-.`) or from names
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element
//!
//! # Example
//!
//! ```
//! use bioplot_core::{color::Color, draw::{StrokeDefinition, StrokeStyle}};
//! use svg::node::element as svg_element;
//!
//! let mut stroke = StrokeDefinition::new(Color::new("blue").unwrap(), 1.5);
//! stroke.set_style("--".parse().unwrap());
//! assert_eq!(*stroke.style(), StrokeStyle::Dashed);
//!
//! let line = svg_element::Polyline::new().set("points", "0,0 10,10");
//! let line = bioplot_core::apply_stroke!(line, &stroke);
//! ```
//!
//! # SVG Attribute Mapping
//!
//! | Property | SVG Attribute | Example Values |
//! |----------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"`, `"10,5,2,5"` |

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke.
///
/// Each variant maps to an SVG `stroke-dasharray` value:
/// - `Solid`: no dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `DashDot`: "10,5,2,5"
/// - `Custom(pattern)`: the provided pattern string
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Raw SVG dasharray, e.g. "10,5,2,3"
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" | "solid" => Ok(Self::Solid),
            "--" | "dashed" => Ok(Self::Dashed),
            ":" | "dotted" => Ok(Self::Dotted),
            "-." | "dashdot" | "dash-dot" => Ok(Self::DashDot),
            _ if is_dash_pattern(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(format!(
                "invalid line style `{s}`, valid values: -, --, :, -., or a dash pattern such as 10,5"
            )),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::DashDot => Some("10,5,2,5".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

fn is_dash_pattern(s: &str) -> bool {
    !s.is_empty()
        && s.split([',', ' '])
            .filter(|part| !part.is_empty())
            .all(|part| part.parse::<f32>().is_ok_and(|n| n >= 0.0))
}

/// A stroke definition for outlines, tracks and marker edges.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Sets the stroke style.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity and width, plus the dash array for patterned styles.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_hex())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
