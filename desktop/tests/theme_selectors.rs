#![cfg(test)]
/*!
Theme selector lint for the desktop build.

The analyzer, report and chart components emit class names that must exist in
the shared theme (`ui/assets/theme/main.css`). A substring check is enough to
catch a selector being dropped or renamed before it ships in an embedded build.

When a component's markup changes, adjust REQUIRED_SELECTORS accordingly.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--ghost",
    // Analyzer card
    ".analyzer__card",
    ".analyzer__service--online",
    ".analyzer__service--offline",
    ".analyzer__drop",
    ".analyzer__drop-hint",
    ".analyzer__advisories",
    ".analyzer__progress",
    ".analyzer__progress-bar",
    ".analyzer__spinner",
    ".analyzer__error",
    ".analyzer__error--rate-limited",
    // Report
    ".report__header",
    ".report__grid",
    ".report__disclaimer",
    ".report-warnings",
    ".report-card",
    ".report-card--risk",
    ".report-card--advice",
    ".report-card__marker",
    ".report-card__placeholder",
    // Chart
    ".metrics-chart",
    ".metrics-chart__svg",
    ".metrics-chart__legend",
    ".metrics-chart__legend-swatch--normal",
    ".metrics-chart__legend-swatch--warning",
    ".metrics-chart__legend-swatch--critical",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing = REQUIRED_SELECTORS
        .iter()
        .filter(|sel| !THEME_CSS.contains(**sel))
        .copied()
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn chart_swatches_match_status_palette() {
    // Swatch variables resolve to the same hues the SVG bars use.
    for (var, hex) in [
        ("--color-success", "#22c55e"),
        ("--color-warning", "#fb923c"),
        ("--color-danger", "#dc2626"),
    ] {
        assert!(
            THEME_CSS.contains(&format!("{var}: {hex};")),
            "{var} should be {hex}"
        );
    }
}
