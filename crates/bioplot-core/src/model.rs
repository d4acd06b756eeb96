//! Input data model for idiogram figures.
//!
//! These types describe *what* a figure shows: the chromosomes of a panel,
//! their centromeres and the annotated intervals drawn on or beside them.
//! They are immutable once built and never carry geometry; the layout stage
//! derives all coordinates from them on every render.
//!
//! # Overview
//!
//! - [`Chromosome`] - identifier, length and optional centromere
//! - [`Annotation`] - a genomic interval carrying a [`Mark`]
//! - [`Track`] - a homogeneous list of annotations of one [`ValueType`]
//! - [`Panel`] - chromosomes, display order and tracks of one figure
//! - [`Orientation`] - vertical or horizontal chromosome bodies

use std::{fmt, str::FromStr};

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::{color::Color, geometry::Point};

/// Errors raised while assembling the input model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("chromosome `{0}` must have a positive length")]
    EmptyChromosome(String),

    #[error("centromere of `{id}` at {position} lies outside (0, {length})")]
    CentromereOutOfRange { id: String, position: u64, length: u64 },

    #[error("chromosome `{0}` is defined more than once")]
    DuplicateChromosome(String),

    #[error("invalid display order: {0}")]
    InvalidOrder(String),

    #[error("annotation on `{chromosome}` has start {start} after end {end}")]
    InvertedInterval { chromosome: String, start: u64, end: u64 },

    #[error("{track} track expects `{expected}` marks, found `{found}`")]
    MarkMismatch {
        track: &'static str,
        expected: ValueType,
        found: ValueType,
    },

    #[error("{0}")]
    InvalidKeyword(String),
}

/// Direction in which chromosome bodies extend.
///
/// Deserializing never fails: unknown strings fall back to
/// [`Orientation::Vertical`] with a warning, see [`Orientation::parse_lenient`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Orientation {
    /// Chromosomes stand side by side, positions grow upward.
    #[default]
    Vertical,
    /// Chromosomes are stacked, positions grow to the right.
    Horizontal,
}

impl Orientation {
    /// Parses an orientation, falling back to vertical on unknown input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bioplot_core::model::Orientation;
    /// assert_eq!(Orientation::parse_lenient("horizontal"), Orientation::Horizontal);
    /// assert_eq!(Orientation::parse_lenient("diagonal"), Orientation::Vertical);
    /// ```
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|err: String| {
            warn!(orientation = s; "{err}, falling back to vertical");
            Self::Vertical
        })
    }

    /// Returns true for horizontal panels.
    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }

    /// Maps a point from the vertical frame into this orientation.
    ///
    /// Vertical panels keep the point, horizontal panels swap its axes.
    pub fn orient(self, point: Point) -> Point {
        match self {
            Self::Vertical => point,
            Self::Horizontal => point.transpose(),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            _ => Err(format!(
                "invalid orientation `{s}`, valid values: vertical, horizontal"
            )),
        }
    }
}

impl From<String> for Orientation {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Keyword form of a [`Mark`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Values mapped through a color scale
    Numeric,
    /// Explicit fill colors
    Color,
    /// Marker symbol and color pairs
    Marker,
}

impl ValueType {
    const ALL: [Self; 3] = [Self::Numeric, Self::Color, Self::Marker];

    /// Returns the keyword for this value type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Color => "color",
            Self::Marker => "marker",
        }
    }

    /// Parses a keyword restricted to the `allowed` subset.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidKeyword`] naming the allowed set.
    pub fn parse_within(s: &str, allowed: &[ValueType]) -> Result<Self, ModelError> {
        let lowered = s.to_lowercase();
        allowed
            .iter()
            .copied()
            .find(|value_type| value_type.as_str() == lowered)
            .ok_or_else(|| {
                let names: Vec<_> = allowed.iter().map(|v| v.as_str()).collect();
                ModelError::InvalidKeyword(format!(
                    "invalid value type `{s}`, valid values: {}",
                    names.join(", ")
                ))
            })
    }
}

impl FromStr for ValueType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_within(s, &Self::ALL)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Symbols available for point annotations.
///
/// Parsed from the single-character codes used by common plotting tools
/// (`o`, `s`, `^`, `v`, `D`, `+`, `x`, `*`, `.`) or from the full names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSymbol {
    #[default]
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    Diamond,
    Plus,
    Cross,
    Star,
    Point,
}

impl FromStr for MarkerSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "o" | "circle" => Ok(Self::Circle),
            "s" | "square" => Ok(Self::Square),
            "^" | "triangle-up" => Ok(Self::TriangleUp),
            "v" | "triangle-down" => Ok(Self::TriangleDown),
            "D" | "d" | "diamond" => Ok(Self::Diamond),
            "+" | "plus" => Ok(Self::Plus),
            "x" | "cross" => Ok(Self::Cross),
            "*" | "star" => Ok(Self::Star),
            "." | "point" => Ok(Self::Point),
            _ => Err(format!(
                "invalid marker `{s}`, valid values: o, s, ^, v, D, +, x, *, ."
            )),
        }
    }
}

/// A marker symbol drawn in a given color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    symbol: MarkerSymbol,
    color: Color,
}

impl Marker {
    pub fn new(symbol: MarkerSymbol, color: Color) -> Self {
        Self { symbol, color }
    }

    pub fn symbol(&self) -> MarkerSymbol {
        self.symbol
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// What an annotation carries, and therefore how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    /// A value mapped through the panel's color scale; drawn as a rectangle.
    Value(f64),
    /// An explicit fill color; drawn as a rectangle.
    Fill(Color),
    /// A marker; drawn as a point.
    Marker(Marker),
}

impl Mark {
    /// Returns the keyword kind of this mark.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Value(_) => ValueType::Numeric,
            Self::Fill(_) => ValueType::Color,
            Self::Marker(_) => ValueType::Marker,
        }
    }
}

/// A genomic interval on one chromosome carrying a [`Mark`].
///
/// Intervals are trusted: they are not checked against the chromosome
/// length or the centromere region.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    chromosome: String,
    start: u64,
    end: u64,
    mark: Mark,
}

impl Annotation {
    /// Creates an annotation over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvertedInterval`] if `start > end`.
    pub fn new(
        chromosome: impl Into<String>,
        start: u64,
        end: u64,
        mark: Mark,
    ) -> Result<Self, ModelError> {
        let chromosome = chromosome.into();
        if start > end {
            return Err(ModelError::InvertedInterval {
                chromosome,
                start,
                end,
            });
        }
        Ok(Self {
            chromosome,
            start,
            end,
            mark,
        })
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn mark(&self) -> &Mark {
        &self.mark
    }

    /// Midpoint of the interval in base pairs.
    pub fn midpoint(&self) -> f64 {
        (self.start as f64 + self.end as f64) / 2.0
    }
}

/// A chromosome with its length and optional centromere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    id: String,
    length: u64,
    centromere: Option<u64>,
}

impl Chromosome {
    /// Creates a chromosome without centromere.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyChromosome`] for a zero length.
    pub fn new(id: impl Into<String>, length: u64) -> Result<Self, ModelError> {
        let id = id.into();
        if length == 0 {
            return Err(ModelError::EmptyChromosome(id));
        }
        Ok(Self {
            id,
            length,
            centromere: None,
        })
    }

    /// Sets the centromere position.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::CentromereOutOfRange`] unless `0 < position < length`.
    pub fn with_centromere(mut self, position: u64) -> Result<Self, ModelError> {
        if position == 0 || position >= self.length {
            return Err(ModelError::CentromereOutOfRange {
                id: self.id,
                position,
                length: self.length,
            });
        }
        self.centromere = Some(position);
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn centromere(&self) -> Option<u64> {
        self.centromere
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A list of annotations that all carry the same [`ValueType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    value_type: ValueType,
    annotations: Vec<Annotation>,
}

impl Track {
    /// Value types allowed on the inner (body) track.
    pub const INNER_TYPES: &'static [ValueType] =
        &[ValueType::Numeric, ValueType::Color, ValueType::Marker];

    /// Value types allowed on the outer track.
    pub const OUTER_TYPES: &'static [ValueType] = &[ValueType::Numeric, ValueType::Marker];

    /// Creates a track, checking that every annotation matches `value_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MarkMismatch`] for the first annotation whose
    /// mark is of another kind.
    pub fn new(value_type: ValueType, annotations: Vec<Annotation>) -> Result<Self, ModelError> {
        if let Some(found) = annotations
            .iter()
            .map(|annotation| annotation.mark().value_type())
            .find(|found| *found != value_type)
        {
            return Err(ModelError::MarkMismatch {
                track: "annotation",
                expected: value_type,
                found,
            });
        }
        Ok(Self {
            value_type,
            annotations,
        })
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

/// Chromosomes, display order and annotation tracks of one idiogram figure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    chromosomes: Vec<Chromosome>,
    order: Option<Vec<String>>,
    inner: Option<Track>,
    outer: Option<Track>,
}

impl Panel {
    /// Creates a panel from uniquely named chromosomes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateChromosome`] if two chromosomes share an id.
    pub fn new(chromosomes: Vec<Chromosome>) -> Result<Self, ModelError> {
        for (i, chromosome) in chromosomes.iter().enumerate() {
            if chromosomes[..i].iter().any(|c| c.id() == chromosome.id()) {
                return Err(ModelError::DuplicateChromosome(chromosome.id().to_string()));
            }
        }
        Ok(Self {
            chromosomes,
            ..Self::default()
        })
    }

    /// Sets an explicit display order.
    ///
    /// The order must name every chromosome of the panel exactly once.
    pub fn with_order(mut self, order: Vec<String>) -> Result<Self, ModelError> {
        for (i, id) in order.iter().enumerate() {
            if self.chromosome(id).is_none() {
                return Err(ModelError::InvalidOrder(format!(
                    "unknown chromosome `{id}`"
                )));
            }
            if order[..i].contains(id) {
                return Err(ModelError::InvalidOrder(format!(
                    "chromosome `{id}` listed twice"
                )));
            }
        }
        if order.len() != self.chromosomes.len() {
            return Err(ModelError::InvalidOrder(format!(
                "{} of {} chromosomes listed",
                order.len(),
                self.chromosomes.len()
            )));
        }
        self.order = Some(order);
        Ok(self)
    }

    /// Sets the inner (body) annotation track.
    pub fn with_inner(mut self, track: Track) -> Self {
        self.inner = Some(track);
        self
    }

    /// Sets the outer annotation track.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MarkMismatch`] for a color track, which the
    /// outer ring cannot draw.
    pub fn with_outer(mut self, track: Track) -> Result<Self, ModelError> {
        if !Track::OUTER_TYPES.contains(&track.value_type()) {
            return Err(ModelError::MarkMismatch {
                track: "outer",
                expected: ValueType::Numeric,
                found: track.value_type(),
            });
        }
        self.outer = Some(track);
        Ok(self)
    }

    /// Returns all chromosomes in insertion order.
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Looks up a chromosome by id.
    pub fn chromosome(&self, id: &str) -> Option<&Chromosome> {
        self.chromosomes.iter().find(|c| c.id() == id)
    }

    /// Returns chromosomes in display order: the explicit order when set,
    /// otherwise sorted lexically by id.
    pub fn display_order(&self) -> Vec<&Chromosome> {
        match &self.order {
            Some(order) => order.iter().filter_map(|id| self.chromosome(id)).collect(),
            None => {
                let mut sorted: Vec<_> = self.chromosomes.iter().collect();
                sorted.sort_by(|a, b| a.id().cmp(b.id()));
                sorted
            }
        }
    }

    pub fn inner(&self) -> Option<&Track> {
        self.inner.as_ref()
    }

    pub fn outer(&self) -> Option<&Track> {
        self.outer.as_ref()
    }

    /// Length of the longest chromosome, zero for an empty panel.
    pub fn max_length(&self) -> u64 {
        self.chromosomes.iter().map(Chromosome::length).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chromosome(id: &str, length: u64) -> Chromosome {
        Chromosome::new(id, length).unwrap()
    }

    #[test]
    fn test_orientation_from_str() {
        assert_eq!("vertical".parse(), Ok(Orientation::Vertical));
        assert_eq!("horizontal".parse(), Ok(Orientation::Horizontal));
        let err = "sideways".parse::<Orientation>().unwrap_err();
        assert!(err.contains("valid values: vertical, horizontal"));
    }

    #[test]
    fn test_orientation_lenient_fallback() {
        assert_eq!(Orientation::parse_lenient("Horizontal"), Orientation::Vertical);
        assert_eq!(Orientation::from("horizontal".to_string()), Orientation::Horizontal);
    }

    #[test]
    fn test_orientation_orient() {
        let p = Point::new(2.0, 300.0);
        assert_eq!(Orientation::Vertical.orient(p), p);
        assert_eq!(Orientation::Horizontal.orient(p), Point::new(300.0, 2.0));
    }

    #[test]
    fn test_value_type_parse() {
        assert_eq!("NUMERIC".parse::<ValueType>(), Ok(ValueType::Numeric));
        assert_eq!("color".parse::<ValueType>(), Ok(ValueType::Color));
        assert_eq!("Marker".parse::<ValueType>(), Ok(ValueType::Marker));

        let err = "heatmap".parse::<ValueType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value type `heatmap`, valid values: numeric, color, marker"
        );
    }

    #[test]
    fn test_value_type_parse_within_outer() {
        let err = ValueType::parse_within("color", Track::OUTER_TYPES).unwrap_err();
        assert!(err.to_string().contains("valid values: numeric, marker"));
    }

    #[test]
    fn test_marker_symbol_parse() {
        assert_eq!("o".parse(), Ok(MarkerSymbol::Circle));
        assert_eq!("^".parse(), Ok(MarkerSymbol::TriangleUp));
        assert_eq!("D".parse(), Ok(MarkerSymbol::Diamond));
        assert_eq!("star".parse(), Ok(MarkerSymbol::Star));
        assert!("@".parse::<MarkerSymbol>().unwrap_err().contains("invalid marker"));
    }

    #[test]
    fn test_chromosome_validation() {
        assert_eq!(
            Chromosome::new("Chr01", 0),
            Err(ModelError::EmptyChromosome("Chr01".to_string()))
        );

        let chr = chromosome("Chr01", 2_000_000);
        assert!(chr.clone().with_centromere(0).is_err());
        assert!(chr.clone().with_centromere(2_000_000).is_err());

        let chr = chr.with_centromere(1_000_000).unwrap();
        assert_eq!(chr.centromere(), Some(1_000_000));
        assert_eq!(chr.to_string(), "Chr01");
    }

    #[test]
    fn test_annotation_rejects_inverted_interval() {
        let err = Annotation::new("Chr01", 10, 5, Mark::Value(1.0)).unwrap_err();
        assert!(matches!(err, ModelError::InvertedInterval { .. }));

        let annotation = Annotation::new("Chr01", 500_000, 500_010, Mark::Value(1.0)).unwrap();
        assert_eq!(annotation.midpoint(), 500_005.0);
    }

    #[test]
    fn test_track_rejects_mixed_marks() {
        let value = Annotation::new("Chr01", 0, 10, Mark::Value(0.5)).unwrap();
        let fill = Annotation::new("Chr01", 20, 30, Mark::Fill(Color::default())).unwrap();

        let err = Track::new(ValueType::Numeric, vec![value.clone(), fill]).unwrap_err();
        assert_eq!(
            err,
            ModelError::MarkMismatch {
                track: "annotation",
                expected: ValueType::Numeric,
                found: ValueType::Color,
            }
        );

        let track = Track::new(ValueType::Numeric, vec![value]).unwrap();
        assert_eq!(track.annotations().len(), 1);
    }

    #[test]
    fn test_panel_rejects_duplicates() {
        let err = Panel::new(vec![chromosome("a", 1), chromosome("a", 2)]).unwrap_err();
        assert_eq!(err, ModelError::DuplicateChromosome("a".to_string()));
    }

    #[test]
    fn test_panel_display_order_defaults_to_lexical() {
        let panel = Panel::new(vec![
            chromosome("Chr10", 5),
            chromosome("Chr02", 7),
            chromosome("Chr01", 3),
        ])
        .unwrap();
        let ids: Vec<_> = panel.display_order().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["Chr01", "Chr02", "Chr10"]);
        assert_eq!(panel.max_length(), 7);
    }

    #[test]
    fn test_panel_explicit_order() {
        let panel = Panel::new(vec![chromosome("a", 1), chromosome("b", 2)])
            .unwrap()
            .with_order(vec!["b".to_string(), "a".to_string()])
            .unwrap();
        let ids: Vec<_> = panel.display_order().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_panel_invalid_order() {
        let panel = Panel::new(vec![chromosome("a", 1), chromosome("b", 2)]).unwrap();
        assert!(panel.clone().with_order(vec!["a".to_string()]).is_err());
        assert!(
            panel
                .clone()
                .with_order(vec!["a".to_string(), "a".to_string()])
                .is_err()
        );
        assert!(
            panel
                .with_order(vec!["a".to_string(), "z".to_string()])
                .is_err()
        );
    }

    #[test]
    fn test_panel_outer_rejects_color_track() {
        let panel = Panel::new(vec![chromosome("a", 100)]).unwrap();
        let track = Track::new(ValueType::Color, vec![]).unwrap();
        assert!(panel.with_outer(track).is_err());
    }
}
