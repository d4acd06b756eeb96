//! Axis ticks of an idiogram panel.

use bioplot_core::model::Orientation;

/// Base pairs per megabase.
pub const MEGABASE: u64 = 1_000_000;

/// A labelled tick at a data coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    value: f64,
    label: String,
}

impl Tick {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ticks of both axes, already assigned to x and y for the panel orientation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ticks {
    x: Vec<Tick>,
    y: Vec<Tick>,
}

impl Ticks {
    /// Assigns chromosome and position ticks to axes.
    ///
    /// Vertical panels put chromosomes on x; horizontal panels swap them.
    pub fn new(chromosomes: Vec<Tick>, positions: Vec<Tick>, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => Self {
                x: chromosomes,
                y: positions,
            },
            Orientation::Horizontal => Self {
                x: positions,
                y: chromosomes,
            },
        }
    }

    pub fn x(&self) -> &[Tick] {
        &self.x
    }

    pub fn y(&self) -> &[Tick] {
        &self.y
    }
}

/// One tick per chromosome at `index * fold`, labelled with its id.
pub fn chromosome_ticks<'a>(ids: impl IntoIterator<Item = &'a str>, fold: f64) -> Vec<Tick> {
    ids.into_iter()
        .enumerate()
        .map(|(index, id)| Tick::new(index as f64 * fold, id))
        .collect()
}

/// Megabase ticks from zero up to `max_length`.
///
/// Every whole megabase strictly below `max_length` gets a tick; the axis
/// is closed by a tick at `max_length` rounded up to the next megabase.
///
/// # Examples
///
/// ```
/// # use bioplot::idiogram::position_ticks;
/// let ticks = position_ticks(2_500_000);
/// let labels: Vec<_> = ticks.iter().map(|t| t.label()).collect();
/// assert_eq!(labels, ["0Mb", "1Mb", "2Mb", "3Mb"]);
/// ```
pub fn position_ticks(max_length: u64) -> Vec<Tick> {
    // The last whole megabase below the length is `closing - 1`
    let closing = max_length.div_ceil(MEGABASE);
    (0..=closing)
        .map(|n| Tick::new((n * MEGABASE) as f64, format!("{n}Mb")))
        .collect()
}
