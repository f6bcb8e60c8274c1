//! The content container: renders whatever the loader last resolved.

use dioxus::prelude::*;

use crate::components::code_runner::CodeRunner;
use crate::components::tabs::{TabBarView, TabPaneView, TabsState};
use crate::content::loader::ContentState;
use crate::content::scan::{FragmentDocument, Segment};
use crate::core::state::use_app_state;
use crate::t;
use crate::views::Home;

#[component]
pub fn ContentView() -> Element {
    let app = use_app_state();
    let lang_marker = (app.language)();
    let state = (app.content)();

    let body = match state {
        ContentState::Idle => rsx! { Home {} },
        ContentState::Loading { .. } => rsx! {
            p { class: "content__status", {t!("content-loading")} }
        },
        ContentState::Failed { section } => rsx! {
            p { class: "content__error", {t!("content-error", section = section)} }
        },
        ContentState::Ready {
            generation,
            document,
            ..
        } => rsx! {
            // Keyed by load generation: a fragment swap remounts the whole
            // subtree, so runner and tab bindings never survive a load.
            FragmentView { key: "{generation}", document }
        },
    };

    rsx! {
        main { id: "content", class: "content",
            div { style: "display:none", "{lang_marker.locale_tag()}" }
            {body}
        }
    }
}

#[component]
fn FragmentView(document: FragmentDocument) -> Element {
    // One flat tab activation set per load cycle.
    let tabs = use_signal(TabsState::default);

    rsx! {
        div { class: "content__fragment",
            for (index, segment) in document.segments.iter().enumerate() {
                {render_segment(index, segment, tabs)}
            }
        }
    }
}

fn render_segment(index: usize, segment: &Segment, tabs: Signal<TabsState>) -> Element {
    match segment {
        Segment::Markup(html) => rsx! {
            div {
                key: "{index}",
                class: "content__markup",
                dangerous_inner_html: "{html}",
            }
        },
        Segment::Runner(block) => rsx! {
            CodeRunner { key: "{index}", block: block.clone() }
        },
        Segment::TabBar(buttons) => rsx! {
            TabBarView { key: "{index}", buttons: buttons.clone(), state: tabs }
        },
        Segment::TabPane(pane) => rsx! {
            TabPaneView { key: "{index}", pane: pane.clone(), state: tabs }
        },
    }
}
