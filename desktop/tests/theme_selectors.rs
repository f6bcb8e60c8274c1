#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure that critical CSS selectors required by the desktop UI (the content
  area, the inline code runner and the tabbed examples) remain present in the
  unified shared theme: ui/assets/theme/main.css
- Fail fast if a refactor accidentally drops or renames core classes, preventing a
  silent styling regression in packaged (embedded) desktop builds.

How it works:
- We compile‑time embed the unified theme using `include_str!` pointing to the shared
  `ui/` location (mirrors the constant in `desktop/src/main.rs`).
- We assert presence of a curated set of selectors / tokens.
- If you intentionally rename or remove a selector:
    1. Update the Dioxus component markup (or the fragment files).
    2. Adjust this test's REQUIRED_SELECTORS accordingly.

Why not parse CSS properly?
- A lightweight substring presence check is sufficient as an early warning.
- Keeping zero extra dependencies avoids increasing compile times.

Extending:
- Add new selectors to REQUIRED_SELECTORS when introducing structural CSS relied
  upon by Rust components (runner blocks, tab groups, status messages, etc).
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
    ".content",
    ".content__status",
    ".content__error",
    // Landing panel
    ".page-home__cta",
    // Code blocks & inline runner
    "pre {",
    ".code-runner",
    ".code-runner__input",
    ".runButton",
    ".output",
    // Tabbed examples
    ".tab-buttons",
    ".tab-button",
    ".tab-button.active",
    ".tab-content",
    ".tab-content.active",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

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
        non_ws_len > 1_500,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn runner_block_consistency() {
    // The runner's sink and trigger classes must stay paired with the markup
    // contract the fragment scanner recognizes.
    let has_trigger = THEME_CSS.contains(".runButton");
    let has_sink = THEME_CSS.contains(".output");
    assert!(
        has_trigger && has_sink,
        "Code-runner sub‑selectors missing (trigger: {has_trigger}, sink: {has_sink})"
    );
}
