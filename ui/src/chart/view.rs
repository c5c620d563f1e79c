use api::Metric;
use dioxus::prelude::*;

use super::{encode, render_chart};

#[component]
pub fn MetricsChart(metrics: Vec<Metric>) -> Element {
    let Some(series) = encode(Some(&metrics)) else {
        return rsx! {};
    };
    let markup = render_chart(&series);

    rsx! {
        section { class: "metrics-chart",
            div { class: "metrics-chart__canvas", dangerous_inner_html: "{markup}" }
            div { class: "metrics-chart__legend",
                div { class: "metrics-chart__legend-item",
                    span { class: "metrics-chart__legend-swatch metrics-chart__legend-swatch--normal" }
                    span { {crate::t!("chart-legend-normal")} }
                }
                div { class: "metrics-chart__legend-item",
                    span { class: "metrics-chart__legend-swatch metrics-chart__legend-swatch--warning" }
                    span { {crate::t!("chart-legend-out-of-range")} }
                }
                div { class: "metrics-chart__legend-item",
                    span { class: "metrics-chart__legend-swatch metrics-chart__legend-swatch--critical" }
                    span { {crate::t!("chart-legend-critical")} }
                }
            }
        }
    }
}
