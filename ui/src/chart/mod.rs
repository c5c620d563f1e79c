//! Metric chart: pure encoding of lab metrics plus a `plotters` SVG renderer.

pub mod encoder;
pub mod svg;

mod view;

pub use encoder::{encode, status_colors, ColorPair, EncodedSeries, Rgba, SeriesKind};
pub use svg::render_chart;
pub use view::MetricsChart;
