//! Metric → chart series encoding.
//!
//! `encode` is pure and reentrant: it only reads the metrics it is given and
//! keeps their order.

use std::fmt;

use api::{Metric, MetricStatus};

use crate::core::format;

/// An RGBA color as used by the chart stylesheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Same hue, ignoring opacity.
    pub fn same_hue(&self, other: &Rgba) -> bool {
        (self.r, self.g, self.b) == (other.r, other.g, other.b)
    }

    /// CSS `rgba(...)` notation.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

pub const CRITICAL_RED: Rgba = Rgba::new(220, 38, 38, 1.0);
pub const OUT_OF_RANGE_ORANGE: Rgba = Rgba::new(251, 146, 60, 1.0);
pub const NORMAL_GREEN: Rgba = Rgba::new(34, 197, 94, 1.0);
pub const UNKNOWN_GRAY: Rgba = Rgba::new(156, 163, 175, 1.0);
pub const BAND_BLUE: Rgba = Rgba::new(59, 130, 246, 0.8);

const FILL_ALPHA: f32 = 0.8;

/// Fill and border of one bar. Both share a hue; the fill is translucent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    pub fill: Rgba,
    pub border: Rgba,
}

impl ColorPair {
    const fn from_hue(hue: Rgba) -> Self {
        Self {
            fill: hue.with_alpha(FILL_ALPHA),
            border: hue.with_alpha(1.0),
        }
    }
}

/// Fixed status → color lookup with gray for anything unrecognized.
pub fn status_colors(status: &MetricStatus) -> ColorPair {
    match status {
        MetricStatus::Critical => ColorPair::from_hue(CRITICAL_RED),
        MetricStatus::High | MetricStatus::Low => ColorPair::from_hue(OUT_OF_RANGE_ORANGE),
        MetricStatus::Normal => ColorPair::from_hue(NORMAL_GREEN),
        MetricStatus::Unknown | MetricStatus::Other(_) => ColorPair::from_hue(UNKNOWN_GRAY),
    }
}

/// The three datasets drawn for every metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Observed,
    MinNormal,
    MaxNormal,
}

impl SeriesKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Observed => "Your Value",
            Self::MinNormal => "Min Normal",
            Self::MaxNormal => "Max Normal",
        }
    }
}

/// Chart-ready parallel sequences, one entry per input metric, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSeries {
    pub labels: Vec<String>,
    pub observed: Vec<f64>,
    pub min_band: Vec<f64>,
    pub max_band: Vec<f64>,
    pub colors: Vec<ColorPair>,
    pub units: Vec<String>,
    pub statuses: Vec<MetricStatus>,
}

impl EncodedSeries {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            observed: Vec::with_capacity(capacity),
            min_band: Vec::with_capacity(capacity),
            max_band: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            units: Vec::with_capacity(capacity),
            statuses: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn value(&self, kind: SeriesKind, index: usize) -> Option<f64> {
        let series = match kind {
            SeriesKind::Observed => &self.observed,
            SeriesKind::MinNormal => &self.min_band,
            SeriesKind::MaxNormal => &self.max_band,
        };
        series.get(index).copied()
    }

    /// Largest value across all three series (0 when everything is ≤ 0).
    pub fn max_value(&self) -> f64 {
        self.observed
            .iter()
            .chain(&self.min_band)
            .chain(&self.max_band)
            .copied()
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    }

    /// Tooltip line for one data point.
    ///
    /// The observed series carries unit and status, the band series the unit only:
    /// `Your Value: 95 mg/dL (normal)`, `Min Normal: 70 mg/dL`.
    pub fn tooltip(&self, kind: SeriesKind, index: usize) -> Option<String> {
        let value = self.value(kind, index)?;
        let unit = self.units.get(index)?;
        let reading = format::format_with_unit(value, unit);
        Some(match kind {
            SeriesKind::Observed => {
                let status = self.statuses.get(index)?;
                format!("{}: {reading} ({status})", kind.label())
            }
            SeriesKind::MinNormal | SeriesKind::MaxNormal => {
                format!("{}: {reading}", kind.label())
            }
        })
    }
}

/// Encode metrics for charting. `None` means there is nothing to render.
pub fn encode(metrics: Option<&[Metric]>) -> Option<EncodedSeries> {
    let metrics = metrics.filter(|metrics| !metrics.is_empty())?;

    let mut series = EncodedSeries::with_capacity(metrics.len());
    for metric in metrics {
        series.labels.push(metric.name.clone());
        series.observed.push(metric.value);
        series.min_band.push(metric.band_min());
        series.max_band.push(metric.band_max());
        series.colors.push(status_colors(&metric.status));
        series.units.push(metric.unit.clone());
        series.statuses.push(metric.status.clone());
    }
    Some(series)
}
