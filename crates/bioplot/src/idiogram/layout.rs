//! Panel layout: from a [`Panel`] to every shape of an idiogram figure.
//!
//! Layout works in data coordinates. In a vertical panel chromosome `i` of
//! the display order stands at `x = i * fold`, with positions in base pairs
//! along y; `fold` is 2 when an outer track needs room beside each body and
//! 1 otherwise. Horizontal panels are computed in the vertical frame and
//! transposed.
//!
//! Body caps are drawn with the same on-screen radius across and along the
//! chromosome, so the y axis is stretched by
//! `ratio = max_length / count * fig_ratio` base pairs per slot unit.

use indexmap::IndexMap;
use log::{debug, info, trace, warn};

use bioplot_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    model::{Annotation, Chromosome, Mark, MarkerSymbol, Orientation, Panel, Track, ValueType},
};

use super::{
    outline::ChromosomeOutline,
    scale::{ColorScale, ColorbarLegend, value_domain},
    taper::Taper,
    ticks::{Ticks, chromosome_ticks, position_ticks},
    track::{TrackLine, TrackScale, outer_marker_position},
};
use crate::{BioplotError, config::IdiogramConfig};

/// A filled rectangle inside a chromosome body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationRect {
    bounds: Bounds,
    color: Color,
}

impl AnnotationRect {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A marker symbol placed at a data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    position: Point,
    symbol: MarkerSymbol,
    color: Color,
    /// Edge length in pixels.
    size: f64,
}

impl MarkerPlacement {
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn symbol(&self) -> MarkerSymbol {
        self.symbol
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f64 {
        self.size
    }
}

/// Everything a renderer needs to draw one idiogram panel.
#[derive(Debug, Clone, PartialEq)]
pub struct IdiogramGeometry {
    orientation: Orientation,
    outlines: Vec<ChromosomeOutline>,
    rects: Vec<AnnotationRect>,
    markers: Vec<MarkerPlacement>,
    track_lines: Vec<TrackLine>,
    ticks: Ticks,
    extent: Bounds,
    legend: Option<ColorbarLegend>,
}

impl IdiogramGeometry {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Outlines in display order.
    pub fn outlines(&self) -> &[ChromosomeOutline] {
        &self.outlines
    }

    pub fn rects(&self) -> &[AnnotationRect] {
        &self.rects
    }

    /// Inner markers first, then outer markers.
    pub fn markers(&self) -> &[MarkerPlacement] {
        &self.markers
    }

    pub fn track_lines(&self) -> &[TrackLine] {
        &self.track_lines
    }

    pub fn ticks(&self) -> &Ticks {
        &self.ticks
    }

    /// Data-space rectangle the figure shows.
    pub fn extent(&self) -> Bounds {
        self.extent
    }

    /// Colorbar of the inner numeric track, if there is one.
    pub fn legend(&self) -> Option<&ColorbarLegend> {
        self.legend.as_ref()
    }
}

/// Where a chromosome stands and how its body narrows.
#[derive(Debug)]
struct Slot {
    x: f64,
    taper: Taper,
}

/// Computes [`IdiogramGeometry`] for panels with a given configuration.
#[derive(Debug, Clone, Copy)]
pub struct IdiogramLayout<'a> {
    config: &'a IdiogramConfig,
    canvas: Size,
}

impl<'a> IdiogramLayout<'a> {
    /// Creates a layout; `canvas` only feeds the default aspect ratio.
    pub fn new(config: &'a IdiogramConfig, canvas: Size) -> Self {
        Self { config, canvas }
    }

    /// Lays out every chromosome and annotation of `panel`.
    ///
    /// # Errors
    ///
    /// Returns [`BioplotError::Config`] for an invalid configuration and
    /// [`BioplotError::Layout`] for a panel without chromosomes or a
    /// degenerate canvas.
    pub fn compute(&self, panel: &Panel) -> Result<IdiogramGeometry, BioplotError> {
        self.config.validate()?;
        if panel.is_empty() {
            return Err(BioplotError::Layout("panel has no chromosomes".to_string()));
        }

        let orientation = self.config.orientation();
        let radius = self.config.cap_radius();
        let order = panel.display_order();
        let count = order.len();
        let fold = if panel.outer().is_some_and(|track| !track.is_empty()) {
            2.0
        } else {
            1.0
        };
        let max_length = panel.max_length();
        let ratio = max_length as f64 / count as f64 * self.fig_ratio()?;

        info!(chromosomes = count, orientation:% = orientation; "Computing idiogram layout");
        debug!(fold, ratio, max_length; "Derived panel parameters");

        let slots: IndexMap<&str, Slot> = order
            .iter()
            .enumerate()
            .map(|(index, chromosome)| {
                let slot = Slot {
                    x: index as f64 * fold,
                    taper: Taper::new(chromosome, radius, ratio),
                };
                (chromosome.id(), slot)
            })
            .collect();

        let outlines = order
            .iter()
            .map(|chromosome| {
                let outline = self.outline(chromosome, &slots, ratio);
                trace!(
                    chromosome = chromosome.id(),
                    segments = outline.segments().len(),
                    arcs = outline.arcs().len();
                    "Built chromosome outline"
                );
                outline
            })
            .collect();

        let mut rects = Vec::new();
        let mut markers = Vec::new();
        let mut legend = None;
        if let Some(track) = panel.inner() {
            let inner = self.inner_track(track, &slots)?;
            rects = inner.rects;
            markers = inner.markers;
            legend = inner.legend;
        }

        let mut track_lines = Vec::new();
        if let Some(track) = panel.outer() {
            let (lines, outer_markers) = self.outer_track(track, &slots);
            track_lines = lines;
            markers.extend(outer_markers);
        }

        let chromosome_axis = chromosome_ticks(order.iter().map(|c| c.id()), fold);
        let position_axis = position_ticks(max_length);
        let last_position = position_axis.last().map_or(0.0, |tick| tick.value());
        let extent = Bounds::new(-0.5, 0.0, count as f64 * fold - 0.5, last_position);
        let extent = match orientation {
            Orientation::Vertical => extent,
            Orientation::Horizontal => extent.transpose(),
        };

        info!(
            rects = rects.len(),
            markers = markers.len(),
            track_lines = track_lines.len();
            "Idiogram layout complete"
        );

        Ok(IdiogramGeometry {
            orientation,
            outlines,
            rects,
            markers,
            track_lines,
            ticks: Ticks::new(chromosome_axis, position_axis, orientation),
            extent,
            legend,
        })
    }

    /// Aspect correction: configured, or derived from the canvas.
    fn fig_ratio(&self) -> Result<f64, BioplotError> {
        if let Some(fig_ratio) = self.config.fig_ratio() {
            return Ok(fig_ratio);
        }
        let size = match self.config.orientation() {
            Orientation::Vertical => self.canvas,
            Orientation::Horizontal => self.canvas.transpose(),
        };
        let fig_ratio = size.width() / size.height();
        if !(fig_ratio.is_finite() && fig_ratio > 0.0) {
            return Err(BioplotError::Layout(format!(
                "canvas {}x{} has no usable aspect ratio",
                self.canvas.width(),
                self.canvas.height()
            )));
        }
        Ok(fig_ratio)
    }

    fn outline(
        &self,
        chromosome: &Chromosome,
        slots: &IndexMap<&str, Slot>,
        ratio: f64,
    ) -> ChromosomeOutline {
        let x = slots.get(chromosome.id()).map_or(0.0, |slot| slot.x);
        ChromosomeOutline::build(
            chromosome,
            x,
            self.config.cap_radius(),
            ratio,
            self.config.orientation(),
        )
    }

    fn inner_track(
        &self,
        track: &Track,
        slots: &IndexMap<&str, Slot>,
    ) -> Result<InnerTrack, BioplotError> {
        let orientation = self.config.orientation();
        let mut inner = InnerTrack::default();

        let scale = match track.value_type() {
            ValueType::Numeric => {
                let (vmin, vmax) = self.config.inner_range();
                let scale =
                    ColorScale::from_values(self.config.colormap()?, values(track), vmin, vmax);
                if scale.is_none() {
                    warn!("Numeric inner track has no finite value, skipping color scale");
                }
                scale
            }
            _ => None,
        };

        for (annotation, slot) in placed(track, slots, "inner") {
            let color = match annotation.mark() {
                Mark::Value(value) => match &scale {
                    Some(scale) => scale.color(*value),
                    None => continue,
                },
                Mark::Fill(color) => *color,
                Mark::Marker(marker) => {
                    let position = orientation
                        .orient(Point::new(slot.x, annotation.start() as f64));
                    inner.markers.push(MarkerPlacement {
                        position,
                        symbol: marker.symbol(),
                        color: marker.color(),
                        size: self.config.inner_marker_size(),
                    });
                    continue;
                }
            };
            let width = slot.taper.width(annotation.midpoint());
            inner.rects.push(AnnotationRect {
                bounds: body_rect(annotation, slot.x, width, orientation),
                color,
            });
        }

        if let Some(scale) = &scale {
            let parts = u32::try_from(self.config.cmap_parts()).map_err(|_| {
                BioplotError::Config(format!(
                    "cmap_parts must fit in 32 bits, got {}",
                    self.config.cmap_parts()
                ))
            })?;
            debug!(min = scale.min(), max = scale.max(), parts; "Built inner color scale");
            inner.legend = Some(scale.legend(parts));
        }
        Ok(inner)
    }

    fn outer_track(
        &self,
        track: &Track,
        slots: &IndexMap<&str, Slot>,
    ) -> (Vec<TrackLine>, Vec<MarkerPlacement>) {
        let orientation = self.config.orientation();

        let mut markers = Vec::new();
        for (annotation, slot) in placed(track, slots, "outer") {
            if let Mark::Marker(marker) = annotation.mark() {
                markers.push(MarkerPlacement {
                    position: outer_marker_position(slot.x, annotation, orientation),
                    symbol: marker.symbol(),
                    color: marker.color(),
                    size: self.config.outer_marker_size(),
                });
            }
        }

        let (vmin, vmax) = self.config.outer_range();
        let Some((min, max)) = value_domain(values(track), vmin, vmax) else {
            return (Vec::new(), markers);
        };
        let scale = TrackScale::new(
            min,
            max,
            self.config.outer_offset(),
            self.config.outer_width(),
        );
        debug!(min = scale.min(), max = scale.max(); "Built outer track scale");

        let lines = slots
            .iter()
            .map(|(id, slot)| {
                let annotations = track
                    .annotations()
                    .iter()
                    .filter(|annotation| annotation.chromosome() == *id);
                TrackLine::build(id, slot.x, annotations, &scale, orientation)
            })
            .filter(|line| !line.is_empty())
            .collect();
        (lines, markers)
    }
}

#[derive(Debug, Default)]
struct InnerTrack {
    rects: Vec<AnnotationRect>,
    markers: Vec<MarkerPlacement>,
    legend: Option<ColorbarLegend>,
}

fn values(track: &Track) -> impl Iterator<Item = f64> + '_ {
    track
        .annotations()
        .iter()
        .filter_map(|annotation| match annotation.mark() {
            Mark::Value(value) => Some(*value),
            _ => None,
        })
}

/// Pairs each annotation with its chromosome slot, skipping unknown
/// chromosomes with a warning.
fn placed<'t, 's>(
    track: &'t Track,
    slots: &'s IndexMap<&str, Slot>,
    name: &'static str,
) -> impl Iterator<Item = (&'t Annotation, &'s Slot)> {
    track.annotations().iter().filter_map(move |annotation| {
        let slot = slots.get(annotation.chromosome());
        if slot.is_none() {
            warn!(
                track = name,
                chromosome = annotation.chromosome();
                "Skipping annotation on unknown chromosome"
            );
        }
        slot.map(|slot| (annotation, slot))
    })
}

/// Rectangle of an annotation centered on the chromosome at `x`.
fn body_rect(annotation: &Annotation, x: f64, width: f64, orientation: Orientation) -> Bounds {
    let left = x - width / 2.0;
    let start = annotation.start() as f64;
    let height = (annotation.end() - annotation.start()) as f64 + 1.0;
    let bounds = Bounds::new(left, start, left + width, start + height);
    match orientation {
        Orientation::Vertical => bounds,
        Orientation::Horizontal => bounds.transpose(),
    }
}
