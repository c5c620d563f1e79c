//! SVG rendering of an [`EncodedSeries`].
//!
//! `plotters` draws the axes, bars, dashed reference band and series legend.
//! Plotters has no tooltip element, so an overlay is appended afterwards with
//! invisible hit areas carrying `<title>` text, plus the rotated metric names.

use std::error::Error;
use std::fmt::Write as _;

use plotters::prelude::*;

use super::encoder::{EncodedSeries, Rgba, SeriesKind, BAND_BLUE, NORMAL_GREEN};
use crate::core::format;

pub const CHART_TITLE: &str = "Blood Test Metrics Visualization";

const WIDTH: u32 = 960;
const HEIGHT: u32 = 440;
const LABEL_AREA_BOTTOM: u32 = 104;
const LABEL_AREA_LEFT: u32 = 64;
const GRID_LINES: usize = 5;
const BAR_RATIO: f64 = 0.6;
const FONT: &str = "sans-serif";

/// Render the chart as standalone SVG markup. Empty input renders nothing.
pub fn render_chart(series: &EncodedSeries) -> String {
    if series.is_empty() {
        return String::new();
    }

    let mut markup = String::new();
    let overlay = match draw(&mut markup, series) {
        Ok(overlay) => overlay,
        Err(err) => {
            tracing::warn!(target: "bloodreport::chart", %err, "chart rendering failed");
            return String::new();
        }
    };

    let mut markup = markup.replacen(
        "<svg ",
        &format!("<svg class='metrics-chart__svg' role='img' aria-label='{CHART_TITLE}' "),
        1,
    );
    if let Some(end) = markup.rfind("</svg>") {
        markup.insert_str(end, &overlay.to_markup());
    }
    markup
}

/// Pixel positions collected while plotting, used for the overlay.
#[derive(Debug, Default)]
struct Overlay {
    bars: Vec<(i32, i32, i32, i32, String)>,
    points: Vec<(i32, i32, String)>,
    labels: Vec<(i32, i32, String)>,
}

impl Overlay {
    fn to_markup(&self) -> String {
        let mut out = String::from("<g class='metrics-chart__bars'>");
        for (x, y, width, height, tooltip) in &self.bars {
            let _ = write!(
                out,
                "<rect class='metrics-chart__bar' x='{x}' y='{y}' width='{width}' height='{height}' fill='transparent'><title>{}</title></rect>",
                escape_xml(tooltip)
            );
        }
        out.push_str("</g><g class='metrics-chart__band'>");
        for (x, y, tooltip) in &self.points {
            let _ = write!(
                out,
                "<circle cx='{x}' cy='{y}' r='5' fill='transparent'><title>{}</title></circle>",
                escape_xml(tooltip)
            );
        }
        let _ = write!(
            out,
            "</g><g class='metrics-chart__labels' font-family='{FONT}' font-size='11'>"
        );
        for (x, y, label) in &self.labels {
            let _ = write!(
                out,
                "<text x='{x}' y='{y}' text-anchor='end' transform='rotate(-45 {x} {y})'>{}</text>",
                escape_xml(label)
            );
        }
        out.push_str("</g>");
        out
    }
}

fn draw(markup: &mut String, series: &EncodedSeries) -> Result<Overlay, Box<dyn Error>> {
    let y_max = nice_ceiling(series.max_value());
    let slots = series.len() as f64;

    let root = SVGBackend::with_string(markup, (WIDTH, HEIGHT)).into_drawing_area();
    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(CHART_TITLE, (FONT, 18).into_font().style(FontStyle::Bold))
        .x_label_area_size(LABEL_AREA_BOTTOM)
        .y_label_area_size(LABEL_AREA_LEFT)
        .build_cartesian_2d(0.0..slots, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_labels(GRID_LINES + 1)
        .y_label_formatter(&|value| format::format_value(*value))
        .bold_line_style(BLACK.mix(0.05))
        .light_line_style(TRANSPARENT)
        .label_style((FONT, 11))
        .draw()?;

    let half_bar = BAR_RATIO / 2.0;
    let bar_corners = |index: usize| {
        let center = index as f64 + 0.5;
        let top = on_axis(series.observed[index], y_max);
        [(center - half_bar, 0.0), (center + half_bar, top)]
    };

    chart
        .draw_series(series.colors.iter().enumerate().map(|(index, colors)| {
            Rectangle::new(bar_corners(index), color(colors.fill).filled())
        }))?
        .label(SeriesKind::Observed.label())
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color(NORMAL_GREEN).filled()));
    chart.draw_series(series.colors.iter().enumerate().map(|(index, colors)| {
        Rectangle::new(bar_corners(index), color(colors.border).stroke_width(2))
    }))?;

    let band_style = color(BAND_BLUE).stroke_width(1);
    for (kind, values) in [
        (SeriesKind::MinNormal, &series.min_band),
        (SeriesKind::MaxNormal, &series.max_band),
    ] {
        let points = values
            .iter()
            .enumerate()
            .map(|(index, value)| (index as f64 + 0.5, on_axis(*value, y_max)));
        chart
            .draw_series(DashedLineSeries::new(points, 5, 5, band_style))?
            .label(kind.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], band_style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperMiddle)
        .background_style(TRANSPARENT)
        .border_style(TRANSPARENT)
        .label_font((FONT, 12))
        .draw()?;

    let mut overlay = Overlay::default();
    for index in 0..series.len() {
        let [(left, _), (right, top)] = bar_corners(index);
        let (x0, y0) = chart.backend_coord(&(left, top));
        let (x1, y1) = chart.backend_coord(&(right, 0.0));
        let tooltip = series.tooltip(SeriesKind::Observed, index).unwrap_or_default();
        overlay.bars.push((x0, y0, x1 - x0, y1 - y0, tooltip));

        for (kind, values) in [
            (SeriesKind::MinNormal, &series.min_band),
            (SeriesKind::MaxNormal, &series.max_band),
        ] {
            let (x, y) = chart.backend_coord(&(index as f64 + 0.5, on_axis(values[index], y_max)));
            overlay
                .points
                .push((x, y, series.tooltip(kind, index).unwrap_or_default()));
        }

        let (x, y) = chart.backend_coord(&(index as f64 + 0.5, 0.0));
        overlay.labels.push((x, y + 16, series.labels[index].clone()));
    }

    root.present()?;
    Ok(overlay)
}

fn color(rgba: Rgba) -> RGBAColor {
    RGBAColor(rgba.r, rgba.g, rgba.b, f64::from(rgba.a))
}

/// Value as plotted; the axis starts at zero so negatives and NaN sit on the baseline.
fn on_axis(value: f64, y_max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, y_max)
    } else {
        0.0
    }
}

/// Round the axis maximum up to 1, 2 or 5 × 10ⁿ with some headroom.
fn nice_ceiling(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let padded = max * 1.1;
    let magnitude = 10f64.powf(padded.log10().floor());
    let normalized = padded / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
