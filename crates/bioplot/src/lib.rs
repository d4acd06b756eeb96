//! Bioplot - chromosome idiograms and gene cluster diagrams.
//!
//! Reading tables, computing figure geometry and rendering it to SVG. The
//! geometry engine in [`idiogram`] and [`genecluster`] is independent of any
//! output format; [`FigureBuilder`] wires it to the SVG backend.
//!
//! The library logs through the [`log`] facade and never installs a logger.

pub mod config;
pub mod genecluster;
pub mod idiogram;

mod error;
mod export;

pub use bioplot_core::{color, colormap, draw, geometry, model};

pub use error::BioplotError;

use std::path::Path;

use log::{debug, info, trace};
use svg::Document;

use bioplot_core::model::{Panel, Track, ValueType};

use config::AppConfig;
use export::Exporter;
use genecluster::{Gene, GeneClusterGeometry};
use idiogram::{IdiogramGeometry, IdiogramLayout};

/// Builder for reading, laying out and rendering bioplot figures.
///
/// # Examples
///
/// ```rust
/// use bioplot::{FigureBuilder, config::AppConfig, model::ValueType};
///
/// let builder = FigureBuilder::new(AppConfig::default());
///
/// // Read a panel and its annotations from tables
/// let panel = builder
///     .parse_panel("Chr01\t2000000\nChr02\t1500000\n", Some("Chr01\t1000000\n"), None)
///     .expect("Failed to read panel");
/// let track = builder
///     .parse_track("Chr01\t500000\t600000\t0.8\n", ValueType::Numeric)
///     .expect("Failed to read annotations");
///
/// // Render to an SVG string
/// let svg = builder
///     .render_svg(&panel.with_inner(track))
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct FigureBuilder {
    config: AppConfig,
}

impl FigureBuilder {
    /// Create a new figure builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including idiogram, style and canvas settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read a panel from a length table, an optional centromere table and an
    /// optional display order table.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError::Parse` for malformed rows and
    /// `BioplotError::Model` for an order that does not match the panel.
    pub fn parse_panel(
        &self,
        lengths: &str,
        centromeres: Option<&str>,
        order: Option<&str>,
    ) -> Result<Panel, BioplotError> {
        info!("Reading chromosome tables");
        let panel = bioplot_parser::parse_panel(lengths, centromeres)?;

        let panel = match order {
            Some(order) => panel.with_order(bioplot_parser::parse_display_order(order)?)?,
            None => panel,
        };

        debug!(chromosomes = panel.chromosomes().len(); "Panel read successfully");
        trace!(panel:?; "Parsed panel");
        Ok(panel)
    }

    /// Read an annotation table whose rows all carry `value_type` marks.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError::Parse` listing every malformed row.
    pub fn parse_track(&self, src: &str, value_type: ValueType) -> Result<Track, BioplotError> {
        info!(value_type = value_type.as_str(); "Reading annotation table");
        let track = bioplot_parser::parse_annotations(src, value_type)?;
        debug!(annotations = track.annotations().len(); "Annotations read successfully");
        Ok(track)
    }

    /// Compute the idiogram geometry of a panel.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError::Config` for an invalid idiogram configuration
    /// and `BioplotError::Layout` for an empty panel or degenerate canvas.
    pub fn layout(&self, panel: &Panel) -> Result<IdiogramGeometry, BioplotError> {
        IdiogramLayout::new(self.config.idiogram(), self.config.canvas().size()).compute(panel)
    }

    /// Compute the geometry of a gene cluster.
    ///
    /// Genes without their own edge color use the configured one.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError::Config` for an invalid edge color and
    /// `BioplotError::Layout` for an empty gene list.
    pub fn layout_gene_cluster(&self, genes: &[Gene]) -> Result<GeneClusterGeometry, BioplotError> {
        let edge = self
            .config
            .style()
            .gene_edge_color()
            .map_err(BioplotError::Config)?;
        genecluster::layout_gene_cluster(genes, edge, self.config.canvas().size())
    }

    /// Render a panel to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError` for layout errors or an invalid style.
    pub fn render_document(&self, panel: &Panel) -> Result<Document, BioplotError> {
        info!(chromosomes = panel.chromosomes().len(); "Rendering idiogram");
        let geometry = self.layout(panel)?;
        let svg = self.exporter(Path::new(""))?;
        Ok(svg.render_idiogram(&geometry))
    }

    /// Render a panel to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError` for layout errors or an invalid style.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bioplot::{FigureBuilder, model::{Chromosome, Panel}};
    ///
    /// let panel = Panel::new(vec![Chromosome::new("Chr01", 2_000_000).unwrap()]).unwrap();
    /// let svg = FigureBuilder::default()
    ///     .render_svg(&panel)
    ///     .expect("Failed to render idiogram");
    ///
    /// println!("{}", svg);
    /// ```
    pub fn render_svg(&self, panel: &Panel) -> Result<String, BioplotError> {
        let svg_string = self.render_document(panel)?.to_string();
        info!("SVG rendered successfully");
        Ok(svg_string)
    }

    /// Render a panel and write the SVG to `path`.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError` for layout errors, an invalid style or a
    /// failed write.
    pub fn write_svg(&self, panel: &Panel, path: impl AsRef<Path>) -> Result<(), BioplotError> {
        info!(chromosomes = panel.chromosomes().len(); "Rendering idiogram");
        let geometry = self.layout(panel)?;
        self.exporter(path.as_ref())?.export_idiogram(&geometry)?;
        Ok(())
    }

    /// Render a gene cluster to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError` for layout errors or an invalid style.
    pub fn render_gene_cluster_svg(&self, genes: &[Gene]) -> Result<String, BioplotError> {
        info!(genes = genes.len(); "Rendering gene cluster");
        let geometry = self.layout_gene_cluster(genes)?;
        let svg = self.exporter(Path::new(""))?;
        Ok(svg.render_gene_cluster(&geometry).to_string())
    }

    /// Render a gene cluster and write the SVG to `path`.
    ///
    /// # Errors
    ///
    /// Returns `BioplotError` for layout errors, an invalid style or a
    /// failed write.
    pub fn write_gene_cluster_svg(
        &self,
        genes: &[Gene],
        path: impl AsRef<Path>,
    ) -> Result<(), BioplotError> {
        info!(genes = genes.len(); "Rendering gene cluster");
        let geometry = self.layout_gene_cluster(genes)?;
        self.exporter(path.as_ref())?.export_gene_cluster(&geometry)?;
        Ok(())
    }

    fn exporter(&self, path: &Path) -> Result<export::svg::Svg, BioplotError> {
        let svg = export::svg::SvgBuilder::new(path)
            .with_style(self.config.style())
            .with_canvas(self.config.canvas())
            .build()?;
        Ok(svg)
    }
}
