use api::AnalysisResult;
use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::chart::MetricsChart;
use crate::core::format;

/// Rendered analysis: warnings, chart, risk factors, advice and disclaimer.
///
/// Insight strings are markdown; they are shown as plain text here.
#[component]
pub fn AnalysisReport(
    result: AnalysisResult,
    completed_at: Option<OffsetDateTime>,
    on_reset: EventHandler<()>,
) -> Element {
    let analyzed_label = completed_at
        .map(|at| crate::t!("report-analyzed-at", time = format::format_clock(at)));
    let has_warnings = !result.validation_warnings.is_empty();
    let has_metrics = !result.metrics.is_empty();

    rsx! {
        section { class: "report",
            div { class: "report__header",
                div { class: "report__title",
                    h1 { {crate::t!("report-title")} }
                    p { class: "report__subtitle", {crate::t!("report-subtitle")} }
                    if let Some(label) = analyzed_label {
                        span { class: "report__meta", "{label}" }
                    }
                }
                button {
                    r#type: "button",
                    class: "button button--ghost report__reset",
                    onclick: move |_| on_reset.call(()),
                    {crate::t!("report-new-upload")}
                    span { class: "report__reset-icon", aria_hidden: "true", "↻" }
                }
            }

            if has_warnings {
                div { class: "report-warnings",
                    div { class: "report-warnings__header",
                        span { aria_hidden: "true", "🔍" }
                        h3 { {crate::t!("report-warnings-title")} }
                    }
                    ul { class: "report-warnings__list",
                        for (index, warning) in result.validation_warnings.iter().enumerate() {
                            li { key: "{index}", class: "report-warnings__item", "{warning}" }
                        }
                    }
                }
            }

            if has_metrics {
                MetricsChart { metrics: result.metrics.clone() }
            }

            div { class: "report__grid",
                div { class: "report-card report-card--risk",
                    div { class: "report-card__header",
                        span { class: "report-card__icon", aria_hidden: "true", "⚠️" }
                        div {
                            h2 { {crate::t!("report-risk-title")} }
                            p { class: "report-card__subtitle", {crate::t!("report-risk-subtitle")} }
                        }
                    }
                    if result.risk_factors.is_empty() {
                        p { class: "report-card__placeholder", {crate::t!("report-risk-empty")} }
                    }
                    ol { class: "report-card__items",
                        for (index, risk) in result.risk_factors.iter().enumerate() {
                            li { key: "{index}", class: "report-card__item",
                                span { class: "report-card__marker", {(index + 1).to_string()} }
                                div { class: "report-card__text", "{risk}" }
                            }
                        }
                    }
                }

                div { class: "report-card report-card--advice",
                    div { class: "report-card__header",
                        span { class: "report-card__icon", aria_hidden: "true", "💪" }
                        div {
                            h2 { {crate::t!("report-advice-title")} }
                            p { class: "report-card__subtitle", {crate::t!("report-advice-subtitle")} }
                        }
                    }
                    ul { class: "report-card__items",
                        for (index, advice) in result.lifestyle_advice.iter().enumerate() {
                            li { key: "{index}", class: "report-card__item",
                                span { class: "report-card__marker report-card__marker--check", "✓" }
                                div { class: "report-card__text", "{advice}" }
                            }
                        }
                    }
                }
            }

            div { class: "report__disclaimer",
                span { aria_hidden: "true", "ℹ️" }
                p { {crate::t!("report-disclaimer")} }
            }
        }
    }
}
