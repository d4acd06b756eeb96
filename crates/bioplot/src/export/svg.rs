//! SVG export backend.
//!
//! [`SvgBuilder`] resolves the style and canvas configuration once into an
//! [`Svg`] exporter. Renderers for each figure kind live in submodules and
//! produce a [`LayeredOutput`] that is flattened into the document here.

mod genecluster;
mod idiogram;
mod marker;
mod viewport;

use std::{fs::File, io::Write, path::PathBuf};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use bioplot_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Insets, Point, Size},
};

use crate::{
    config::{CanvasConfig, StyleConfig},
    export,
    genecluster::GeneClusterGeometry,
    idiogram::IdiogramGeometry,
};

pub use viewport::Viewport;

/// Distance between an axis and its tick labels, in pixels.
const TICK_LABEL_GAP: f64 = 8.0;

/// Builder for [`Svg`] exporters.
#[derive(Debug)]
pub struct SvgBuilder {
    path: PathBuf,
    style: StyleConfig,
    canvas: CanvasConfig,
}

impl SvgBuilder {
    /// Creates a builder for an exporter writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            style: StyleConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    pub fn with_canvas(mut self, canvas: &CanvasConfig) -> Self {
        self.canvas = canvas.clone();
        self
    }

    /// Parses every configured color and line style.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] naming the first invalid entry.
    pub fn build(self) -> Result<Svg, export::Error> {
        self.resolve().map_err(export::Error::Render)
    }

    fn resolve(self) -> Result<Svg, String> {
        let style = &self.style;
        Ok(Svg {
            canvas: self.canvas.size(),
            padding: self.canvas.padding(),
            legend_width: self.canvas.legend_width(),
            background: style.background_color()?,
            outline_stroke: style.outline_stroke()?,
            outer_line_stroke: style.outer_line_stroke()?,
            gene_edge_width: style.gene_edge_width(),
            backbone_stroke: style.backbone_stroke()?,
            font: Font {
                family: style.font_family().to_string(),
                size: style.font_size(),
                color: style.font_color()?,
            },
            path: self.path,
        })
    }
}

#[derive(Debug, Clone)]
struct Font {
    family: String,
    size: f32,
    color: Color,
}

/// SVG exporter with resolved style and canvas settings.
#[derive(Debug, Clone)]
pub struct Svg {
    path: PathBuf,
    canvas: Size,
    padding: Insets,
    legend_width: f64,
    background: Option<Color>,
    outline_stroke: StrokeDefinition,
    outer_line_stroke: StrokeDefinition,
    gene_edge_width: f32,
    backbone_stroke: StrokeDefinition,
    font: Font,
}

impl Svg {
    /// Creates an empty document with the canvas size and optional background.
    fn new_document(&self, output: &mut LayeredOutput) -> Document {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        debug!(width, height; "Creating SVG document");

        if let Some(background) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", background.to_hex())
                .set("fill-opacity", background.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
    }

    /// Flattens layered output into `doc`.
    fn finish_document(&self, mut doc: Document, output: LayeredOutput) -> Document {
        for node in output.render() {
            doc = doc.add(node);
        }
        doc
    }

    /// A text label in the configured font.
    ///
    /// `anchor` is the SVG `text-anchor`; a non-zero `rotation` turns the
    /// label around its anchor point, in degrees.
    fn label(&self, content: &str, position: Point, anchor: &str, rotation: f64) -> svg_element::Text {
        let mut text = svg_element::Text::new(content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", anchor)
            .set("dominant-baseline", "middle")
            .set("font-family", self.font.family.as_str())
            .set("font-size", self.font.size)
            .set("fill", self.font.color.to_hex());
        if rotation != 0.0 {
            text = text.set(
                "transform",
                format!("rotate({rotation} {} {})", position.x(), position.y()),
            );
        }
        text
    }

    /// Renders an idiogram panel to a document.
    pub fn render_idiogram(&self, geometry: &IdiogramGeometry) -> Document {
        let mut output = LayeredOutput::new();
        let doc = self.new_document(&mut output);
        output.merge(self.render_idiogram_layers(geometry));
        debug!(nodes = output.len(); "Idiogram rendered to layers");
        self.finish_document(doc, output)
    }

    /// Renders a gene cluster to a document.
    pub fn render_gene_cluster(&self, geometry: &GeneClusterGeometry) -> Document {
        let mut output = LayeredOutput::new();
        let doc = self.new_document(&mut output);
        output.merge(self.render_gene_cluster_layers(geometry));
        debug!(nodes = output.len(); "Gene cluster rendered to layers");
        self.finish_document(doc, output)
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(path:% = self.path.display(); "Creating SVG file");
        let f = match File::create(&self.path) {
            Ok(file) => file,
            Err(err) => {
                error!(path:% = self.path.display(), err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(path:% = self.path.display(), err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_idiogram(&self, geometry: &IdiogramGeometry) -> Result<(), export::Error> {
        let doc = self.render_idiogram(geometry);
        debug!("SVG document rendered");

        self.write_document(doc)
    }

    fn export_gene_cluster(&self, geometry: &GeneClusterGeometry) -> Result<(), export::Error> {
        let doc = self.render_gene_cluster(geometry);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_invalid_style() {
        let style: StyleConfig = toml::from_str("outline_color = \"not-a-color\"").unwrap();
        let err = SvgBuilder::new("out.svg").with_style(&style).build().unwrap_err();
        assert!(matches!(err, export::Error::Render(_)));
    }

    #[test]
    fn test_background_layer() {
        let style: StyleConfig = toml::from_str("background_color = \"white\"").unwrap();
        let svg = SvgBuilder::new("out.svg").with_style(&style).build().unwrap();

        let mut output = LayeredOutput::new();
        let doc = svg.new_document(&mut output);
        let rendered = svg.finish_document(doc, output).to_string();
        assert!(rendered.contains("data-layer=\"background\""));
        assert!(rendered.contains("fill=\"#ffffff\""));
        assert!(rendered.contains("viewBox=\"0 0 800 800\""));
    }

    #[test]
    fn test_rotated_label() {
        let svg = SvgBuilder::new("out.svg").build().unwrap();
        let text = svg.label("Chr01", Point::new(10.0, 20.0), "end", -45.0).to_string();
        assert!(text.contains("Chr01"));
        assert!(text.contains("rotate(-45 10 20)"));

        let straight = svg.label("1Mb", Point::new(0.0, 0.0), "end", 0.0).to_string();
        assert!(!straight.contains("transform"));
    }

    #[test]
    fn test_write_document_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.svg");
        let svg = SvgBuilder::new(&path).build().unwrap();
        let err = svg.write_document(Document::new()).unwrap_err();
        assert!(matches!(err, export::Error::Io(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_document_to_non_utf8_path() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"fig\xFF.svg"));
        let svg = SvgBuilder::new(&path).build().unwrap();
        svg.write_document(Document::new()).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("fig\u{FFFD}.svg").exists());
    }
}
