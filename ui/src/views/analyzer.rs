use dioxus::prelude::*;

use crate::upload::AnalyzerView;

#[component]
pub fn Analyzer() -> Element {
    // Subscribe to global language code (if provided) so this view re-renders
    // on a language switch. The upload session itself lives in the app root.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    rsx! {
        // Hidden marker node retains reactive dependency on language signal.
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page page-analyzer",
            h1 { {crate::t!("page-analyzer-title")} }
            p { {crate::t!("page-analyzer-intro")} }
            AnalyzerView {}
        }
    }
}
