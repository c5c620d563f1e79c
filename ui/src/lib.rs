//! Shared UI crate for BloodReport. Cross-platform state, views and charting live here.

pub mod chart;
pub mod core;
pub mod i18n;
pub mod results;
pub mod upload;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

use dioxus::prelude::{asset, manganis, Asset};

/// Shared theme stylesheet; desktop inlines the same file with `include_str!`.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
