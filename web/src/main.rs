use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Analyzer, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/analyze")]
    Analyzer {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_analyzer(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Analyzer {},
        "{label}"
    })
}

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!(target: "bloodreport::web", "starting web client");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        home: nav_home,
        analyzer: nav_analyzer,
    });

    // Global language code; AppNavbar updates it on selection.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);
    // Held above the language-keyed wrapper so a remount keeps the attempt.
    ui::upload::provide_upload_session();

    rsx! {
        // Global app resources
        document::Title { "BloodReport.ai" }
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        div { key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
