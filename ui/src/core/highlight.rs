//! Hook into the page-level syntax highlighter.
//!
//! Prism is loaded by the page shell, not by us. The call is guarded so a
//! shell without Prism degrades to a no-op, and `highlightAll` is idempotent
//! on already-highlighted markup.

/// Re-highlight the whole document. Invoked after every fragment injection.
pub fn highlight_all() {
    let _ = dioxus::document::eval(
        "if (typeof Prism !== 'undefined') { Prism.highlightAll(); }",
    );
}
