//! Configuration types for bioplot figures.
//!
//! This module provides configuration structures that control how figures
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! loading from TOML, and every field has a documented default so a
//! partial file, or none at all, is always usable.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`IdiogramConfig`] - Geometry parameters of chromosome idiograms.
//! - [`StyleConfig`] - Colors, line styles and fonts of the SVG output.
//! - [`CanvasConfig`] - Pixel size and padding of the SVG canvas.
//! - [`load_config`] - Reads and validates an [`AppConfig`] from a TOML file.
//!
//! # Example
//!
//! ```
//! # use bioplot::config::AppConfig;
//! let config = AppConfig::from_toml_str(r#"
//!     [idiogram]
//!     orientation = "horizontal"
//!     colormap = "Blues"
//!
//!     [canvas]
//!     width = 1200.0
//! "#).unwrap();
//!
//! assert!(config.idiogram().orientation().is_horizontal());
//! assert_eq!(config.canvas().height(), 800.0);
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use bioplot_core::{
    color::Color,
    colormap::{Colormap, DEFAULT_COLORMAP},
    draw::{StrokeDefinition, StrokeStyle},
    geometry::{Insets, Size},
    model::Orientation,
};

use crate::BioplotError;

/// Radius of chromosome end caps in slot units; a chromosome body is
/// `2 * DEFAULT_CAP_RADIUS` wide.
pub const DEFAULT_CAP_RADIUS: f64 = 0.35;

/// Number of samples carried by the colorbar legend.
pub const DEFAULT_CMAP_PARTS: i64 = 100;

/// Distance from a chromosome center to the start of its outer track.
pub const DEFAULT_OUTER_OFFSET: f64 = 0.65;

/// Width of the outer track in slot units.
pub const DEFAULT_OUTER_WIDTH: f64 = 0.7;

/// Marker edge length in pixels when no size is configured.
pub const DEFAULT_MARKER_SIZE: f64 = 6.0;

/// Top-level configuration combining idiogram, style and canvas settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Idiogram geometry section.
    #[serde(default)]
    idiogram: IdiogramConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,

    /// Canvas section.
    #[serde(default)]
    canvas: CanvasConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(idiogram: IdiogramConfig, style: StyleConfig, canvas: CanvasConfig) -> Self {
        Self {
            idiogram,
            style,
            canvas,
        }
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BioplotError::Config`] for malformed TOML or invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self, BioplotError> {
        let config: Self = toml::from_str(content).map_err(|err| {
            BioplotError::Config(format!("failed to parse TOML configuration: {err}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the idiogram configuration.
    pub fn idiogram(&self) -> &IdiogramConfig {
        &self.idiogram
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`BioplotError::Config`] naming the first invalid value.
    pub fn validate(&self) -> Result<(), BioplotError> {
        self.idiogram.validate()?;
        self.style.validate()?;
        self.canvas.validate()
    }
}

/// Geometry parameters of chromosome idiograms.
///
/// Defaults:
///
/// | Field | Default |
/// |-------|---------|
/// | `orientation` | `vertical` |
/// | `cap_radius` | [`DEFAULT_CAP_RADIUS`] |
/// | `colormap` | [`DEFAULT_COLORMAP`] |
/// | `cmap_parts` | [`DEFAULT_CMAP_PARTS`] |
/// | `inner_vmin`, `inner_vmax`, `outer_vmin`, `outer_vmax` | derived from data |
/// | `outer_offset` | [`DEFAULT_OUTER_OFFSET`] |
/// | `outer_width` | [`DEFAULT_OUTER_WIDTH`] |
/// | `inner_marker_size`, `outer_marker_size` | [`DEFAULT_MARKER_SIZE`] |
/// | `fig_ratio` | canvas width / height (vertical), height / width (horizontal) |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IdiogramConfig {
    orientation: Orientation,
    cap_radius: f64,
    colormap: String,
    cmap_parts: i64,
    inner_vmin: Option<f64>,
    inner_vmax: Option<f64>,
    outer_vmin: Option<f64>,
    outer_vmax: Option<f64>,
    outer_offset: f64,
    outer_width: f64,
    inner_marker_size: Option<f64>,
    outer_marker_size: Option<f64>,
    fig_ratio: Option<f64>,
}

impl Default for IdiogramConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            cap_radius: DEFAULT_CAP_RADIUS,
            colormap: DEFAULT_COLORMAP.to_string(),
            cmap_parts: DEFAULT_CMAP_PARTS,
            inner_vmin: None,
            inner_vmax: None,
            outer_vmin: None,
            outer_vmax: None,
            outer_offset: DEFAULT_OUTER_OFFSET,
            outer_width: DEFAULT_OUTER_WIDTH,
            inner_marker_size: None,
            outer_marker_size: None,
            fig_ratio: None,
        }
    }
}

impl IdiogramConfig {
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_cap_radius(mut self, cap_radius: f64) -> Self {
        self.cap_radius = cap_radius;
        self
    }

    /// Sets the colormap by name; an `_r` suffix reverses it.
    pub fn with_colormap(mut self, colormap: impl Into<String>) -> Self {
        self.colormap = colormap.into();
        self
    }

    pub fn with_cmap_parts(mut self, cmap_parts: i64) -> Self {
        self.cmap_parts = cmap_parts;
        self
    }

    /// Overrides the color scale domain; `None` keeps the data bound.
    pub fn with_inner_range(mut self, vmin: Option<f64>, vmax: Option<f64>) -> Self {
        self.inner_vmin = vmin;
        self.inner_vmax = vmax;
        self
    }

    /// Overrides the outer track domain; `None` keeps the data bound.
    pub fn with_outer_range(mut self, vmin: Option<f64>, vmax: Option<f64>) -> Self {
        self.outer_vmin = vmin;
        self.outer_vmax = vmax;
        self
    }

    pub fn with_outer_track(mut self, offset: f64, width: f64) -> Self {
        self.outer_offset = offset;
        self.outer_width = width;
        self
    }

    pub fn with_marker_sizes(mut self, inner: Option<f64>, outer: Option<f64>) -> Self {
        self.inner_marker_size = inner;
        self.outer_marker_size = outer;
        self
    }

    /// Fixes the aspect-ratio correction instead of deriving it from the canvas.
    pub fn with_fig_ratio(mut self, fig_ratio: f64) -> Self {
        self.fig_ratio = Some(fig_ratio);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cap_radius(&self) -> f64 {
        self.cap_radius
    }

    /// Resolves the configured colormap.
    ///
    /// # Errors
    ///
    /// Returns [`BioplotError::Config`] naming the valid colormaps.
    pub fn colormap(&self) -> Result<Colormap, BioplotError> {
        Colormap::from_name(&self.colormap).map_err(BioplotError::Config)
    }

    pub fn cmap_parts(&self) -> i64 {
        self.cmap_parts
    }

    pub fn inner_range(&self) -> (Option<f64>, Option<f64>) {
        (self.inner_vmin, self.inner_vmax)
    }

    pub fn outer_range(&self) -> (Option<f64>, Option<f64>) {
        (self.outer_vmin, self.outer_vmax)
    }

    pub fn outer_offset(&self) -> f64 {
        self.outer_offset
    }

    pub fn outer_width(&self) -> f64 {
        self.outer_width
    }

    pub fn inner_marker_size(&self) -> f64 {
        self.inner_marker_size.unwrap_or(DEFAULT_MARKER_SIZE)
    }

    pub fn outer_marker_size(&self) -> f64 {
        self.outer_marker_size.unwrap_or(DEFAULT_MARKER_SIZE)
    }

    pub fn fig_ratio(&self) -> Option<f64> {
        self.fig_ratio
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`BioplotError::Config`] for a non-positive `cmap_parts`,
    /// radius, track width, marker size or `fig_ratio`, an inverted explicit
    /// range, or an unknown colormap.
    pub fn validate(&self) -> Result<(), BioplotError> {
        if self.cmap_parts <= 0 {
            return Err(BioplotError::Config(format!(
                "cmap_parts must be positive, got {}",
                self.cmap_parts
            )));
        }

        let positives = [
            ("cap_radius", Some(self.cap_radius)),
            ("outer_width", Some(self.outer_width)),
            ("inner_marker_size", self.inner_marker_size),
            ("outer_marker_size", self.outer_marker_size),
            ("fig_ratio", self.fig_ratio),
        ];
        for (name, value) in positives {
            match value {
                Some(value) if !(value.is_finite() && value > 0.0) => {
                    return Err(BioplotError::Config(format!(
                        "{name} must be a positive number, got {value}"
                    )));
                }
                _ => {}
            }
        }

        if !self.outer_offset.is_finite() {
            return Err(BioplotError::Config(format!(
                "outer_offset must be finite, got {}",
                self.outer_offset
            )));
        }

        for (name, range) in [("inner", self.inner_range()), ("outer", self.outer_range())] {
            match range {
                (Some(vmin), Some(vmax)) if vmin > vmax => {
                    return Err(BioplotError::Config(format!(
                        "{name}_vmin ({vmin}) is greater than {name}_vmax ({vmax})"
                    )));
                }
                _ => {}
            }
        }

        self.colormap().map(|_| ())
    }
}

/// Visual styling of the SVG output.
///
/// Colors are CSS color strings and line styles accept `-`, `--`, `:`, `-.`
/// or a dash pattern; both are parsed when the figure is rendered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Canvas background; transparent when unset.
    background_color: Option<String>,
    outline_color: String,
    outline_width: f32,
    outer_line_color: String,
    outer_line_style: String,
    outer_line_width: f32,
    font_family: String,
    font_size: f32,
    font_color: String,
    /// Gene arrow edge color; arrows have no edge when unset.
    gene_edge_color: Option<String>,
    gene_edge_width: f32,
    backbone_color: String,
    backbone_width: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            outline_color: "black".to_string(),
            outline_width: 1.0,
            outer_line_color: "blue".to_string(),
            outer_line_style: "-".to_string(),
            outer_line_width: 1.5,
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            font_color: "black".to_string(),
            gene_edge_color: None,
            gene_edge_width: 1.0,
            backbone_color: "#d3d3d3".to_string(),
            backbone_width: 3.0,
        }
    }
}

fn parse_color(name: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("invalid {name} in config: {err}"))
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(|color| parse_color("background_color", color))
            .transpose()
    }

    /// Stroke used for chromosome outlines.
    pub fn outline_stroke(&self) -> Result<StrokeDefinition, String> {
        let color = parse_color("outline_color", &self.outline_color)?;
        Ok(StrokeDefinition::new(color, self.outline_width))
    }

    /// Stroke used for numeric outer tracks.
    pub fn outer_line_stroke(&self) -> Result<StrokeDefinition, String> {
        let color = parse_color("outer_line_color", &self.outer_line_color)?;
        let style: StrokeStyle = self.outer_line_style.parse()?;
        let mut stroke = StrokeDefinition::new(color, self.outer_line_width);
        stroke.set_style(style);
        Ok(stroke)
    }

    /// Edge color of gene arrows, if any.
    pub fn gene_edge_color(&self) -> Result<Option<Color>, String> {
        self.gene_edge_color
            .as_deref()
            .map(|color| parse_color("gene_edge_color", color))
            .transpose()
    }

    pub fn gene_edge_width(&self) -> f32 {
        self.gene_edge_width
    }

    /// Stroke of the gene cluster backbone line.
    pub fn backbone_stroke(&self) -> Result<StrokeDefinition, String> {
        let color = parse_color("backbone_color", &self.backbone_color)?;
        Ok(StrokeDefinition::new(color, self.backbone_width))
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_color(&self) -> Result<Color, String> {
        parse_color("font_color", &self.font_color)
    }

    /// Parses every color and line style once.
    ///
    /// # Errors
    ///
    /// Returns [`BioplotError::Config`] for the first unparsable entry.
    pub fn validate(&self) -> Result<(), BioplotError> {
        self.background_color()
            .and(self.outline_stroke())
            .and(self.outer_line_stroke())
            .and(self.gene_edge_color())
            .and(self.backbone_stroke())
            .and(self.font_color())
            .map(|_| ())
            .map_err(BioplotError::Config)
    }
}

/// Pixel dimensions of the SVG canvas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    width: f64,
    height: f64,
    /// Space between the canvas edge and the plot area, holding tick labels.
    padding: f64,
    /// Extra space on the right for the colorbar legend, when one is drawn.
    legend_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            padding: 60.0,
            legend_width: 80.0,
        }
    }
}

impl CanvasConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn padding(&self) -> Insets {
        Insets::uniform(self.padding)
    }

    pub fn legend_width(&self) -> f64 {
        self.legend_width
    }

    /// Checks that the canvas has room for a plot area.
    ///
    /// # Errors
    ///
    /// Returns [`BioplotError::Config`] for non-positive sizes or a padding
    /// that leaves no plot area.
    pub fn validate(&self) -> Result<(), BioplotError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(BioplotError::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.padding >= 0.0 && self.legend_width >= 0.0) {
            return Err(BioplotError::Config(
                "canvas padding and legend width must not be negative".to_string(),
            ));
        }
        if self.padding * 2.0 + self.legend_width >= self.width.min(self.height) {
            return Err(BioplotError::Config(format!(
                "canvas padding {} leaves no plot area in a {}x{} canvas",
                self.padding, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Loads and validates a configuration from a TOML file.
///
/// Sections and fields that are missing keep their defaults.
///
/// # Errors
///
/// Returns [`BioplotError::Io`] if the file cannot be read, or
/// [`BioplotError::Config`] if it cannot be parsed or holds invalid values.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, BioplotError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading configuration");

    let content = fs::read_to_string(path)?;
    let config = AppConfig::from_toml_str(&content)?;

    debug!(
        orientation = config.idiogram().orientation().to_string(),
        colormap = config.idiogram().colormap.as_str();
        "Configuration loaded"
    );
    Ok(config)
}
