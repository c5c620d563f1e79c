use std::rc::Rc;

use api::{AnalysisService, HttpAnalysisService, ReportFile};
use dioxus::prelude::*;

use super::engine::UploadOrchestrator;
use super::session::{self, AttemptStore, SubmitOutcome};
use crate::core::file_hints::{self, ACCEPT_ATTRIBUTE};
use crate::core::{format, platform};
use crate::results::AnalysisReport;

impl AttemptStore for Signal<UploadOrchestrator> {
    fn update<R>(&mut self, f: impl FnOnce(&mut UploadOrchestrator) -> R) -> R {
        self.with_mut(f)
    }
}

/// Create the app-wide upload session. Call once in the root component, above
/// anything keyed on the language code, so a remount keeps the attempt.
pub fn provide_upload_session() -> Signal<UploadOrchestrator> {
    use_context_provider(|| Signal::new(UploadOrchestrator::default()))
}

/// The session provided by [`provide_upload_session`], or a view-local one.
pub fn use_upload_session() -> Signal<UploadOrchestrator> {
    use_hook(|| {
        try_consume_context::<Signal<UploadOrchestrator>>()
            .unwrap_or_else(|| Signal::new(UploadOrchestrator::default()))
    })
}

#[component]
pub fn AnalyzerView() -> Element {
    let mut orchestrator = use_upload_session();
    let service = use_hook(|| Rc::new(HttpAnalysisService::from_env()));

    let health_service = service.clone();
    let health = use_resource(move || {
        let service = health_service.clone();
        async move { service.health().await.map(|status| status.is_ok()).unwrap_or(false) }
    });

    let on_file_change = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(path) = engine.files().into_iter().next() else {
            return;
        };
        match engine.read_file(&path).await {
            Some(bytes) => {
                let file = ReportFile::from_name(display_name(&path), bytes);
                orchestrator.with_mut(|o| o.select_file(file));
            }
            None => tracing::warn!(target: "bloodreport::upload", %path, "unable to read picked file"),
        }
    };

    let submit_service = service.clone();
    let on_submit = move |_| {
        let service = submit_service.clone();
        platform::spawn_detached(async move {
            match session::submit(orchestrator, &*service).await {
                SubmitOutcome::Failed(err) => {
                    tracing::debug!(target: "bloodreport::upload", kind = %err.kind, "attempt failed")
                }
                outcome => tracing::debug!(target: "bloodreport::upload", ?outcome, "attempt finished"),
            }
        });
    };

    let state = orchestrator.read();
    let progress = state.progress();
    let submitting = state.is_submitting();
    let can_submit = state.can_submit();
    let error = state.error().cloned();
    let result = state.result().cloned();
    let completed_at = state.completed_at();
    let file_label = state
        .file()
        .map(|file| format!("{} · {}", file.name, format::format_file_size(file.size())));
    let advisories = state
        .file()
        .map(file_hints::advise)
        .unwrap_or_default()
        .into_iter()
        .map(|advisory| advisory.message())
        .collect::<Vec<_>>();
    drop(state);

    if let Some(result) = result {
        return rsx! {
            AnalysisReport {
                result,
                completed_at,
                on_reset: move |_| orchestrator.with_mut(|o| o.reset()),
            }
        };
    }

    let (badge_class, badge_text) = match health() {
        None => ("analyzer__service analyzer__service--pending", crate::t!("analyzer-service-pending")),
        Some(true) => ("analyzer__service analyzer__service--online", crate::t!("analyzer-service-online")),
        Some(false) => ("analyzer__service analyzer__service--offline", crate::t!("analyzer-service-offline")),
    };
    let error_view = error.map(|err| {
        let class = format!("analyzer__error analyzer__error--{}", err.kind);
        let hint = err
            .retry_after_secs
            .map(|secs| format!(" {}", crate::t!("analyzer-retry-hint", secs = secs)));
        (class, err.message, hint)
    });

    rsx! {
        article { class: "analyzer",
            div { class: "analyzer__card",
                span { class: "{badge_class}", "{badge_text}" }

                div { class: "analyzer__picker",
                    input {
                        r#type: "file",
                        id: "report-input",
                        class: "analyzer__input",
                        accept: ACCEPT_ATTRIBUTE,
                        multiple: false,
                        disabled: submitting,
                        onchange: on_file_change,
                    }
                    label { r#for: "report-input", class: "analyzer__drop",
                        span { class: "analyzer__drop-icon", aria_hidden: "true", "📄" }
                        span { class: "analyzer__drop-text",
                            match file_label {
                                Some(label) => rsx! { "{label}" },
                                None => rsx! { {crate::t!("analyzer-drop-prompt")} },
                            }
                        }
                        span { class: "analyzer__drop-hint", {crate::t!("analyzer-drop-hint")} }
                    }
                }

                if !advisories.is_empty() {
                    ul { class: "analyzer__advisories",
                        for (index, message) in advisories.iter().enumerate() {
                            li { key: "{index}", class: "analyzer__advisory", "{message}" }
                        }
                    }
                }

                if progress > 0 && progress < 100 {
                    div {
                        class: "analyzer__progress",
                        role: "progressbar",
                        aria_valuenow: "{progress}",
                        aria_valuemin: "0",
                        aria_valuemax: "100",
                        div { class: "analyzer__progress-bar", style: "width: {progress}%" }
                    }
                }

                button {
                    r#type: "button",
                    class: "button button--primary analyzer__submit",
                    disabled: !can_submit,
                    onclick: on_submit,
                    if submitting {
                        span { class: "analyzer__spinner", aria_hidden: "true" }
                        {crate::t!("analyzer-analyzing")}
                    } else {
                        {crate::t!("analyzer-analyze")}
                        span { class: "analyzer__arrow", aria_hidden: "true", "→" }
                    }
                }

                if let Some((class, message, hint)) = error_view {
                    div { class: "{class}", role: "alert",
                        span { aria_hidden: "true", "⚠️ " }
                        "{message}"
                        if let Some(hint) = hint {
                            span { class: "analyzer__error-hint", "{hint}" }
                        }
                    }
                }
            }
        }
    }
}

/// Last path segment; desktop file engines report absolute paths.
fn display_name(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
        .to_string()
}
