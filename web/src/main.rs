use dioxus::prelude::*;

use ui::components::{AppNavbar, ContentView};
use ui::core::state::use_app_state_provider;

// Shared theme, inlined so web and desktop render from the same stylesheet.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

// Prism is the page-shell syntax highlighter; the ui crate only ever calls it
// through a guarded hook, so a failed CDN load degrades to unhighlighted code.
const PRISM_CSS: &str = "https://cdn.jsdelivr.net/npm/prismjs@1.29.0/themes/prism-tomorrow.min.css";
const PRISM_JS: &str = "https://cdn.jsdelivr.net/npm/prismjs@1.29.0/prism.min.js";
const PRISM_JSX_JS: &str =
    "https://cdn.jsdelivr.net/npm/prismjs@1.29.0/components/prism-jsx.min.js";

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    use_app_state_provider();

    rsx! {
        // Global app resources
        document::Style { "{MAIN_CSS_INLINE}" }
        document::Link { rel: "stylesheet", href: PRISM_CSS }
        document::Script { src: PRISM_JS }
        document::Script { src: PRISM_JSX_JS }

        AppNavbar {}
        ContentView {}
    }
}
