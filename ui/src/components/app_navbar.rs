//! Localized application navbar: brand, responsive menu, accordion topic
//! groups, section links and the language toggle.
//!
//! Link activation goes through [`AppState::activate_section`], so "at most
//! one active link" needs no class bookkeeping here. Accordion groups expand
//! to their measured natural height (captured when the group body mounts) and
//! collapse to zero; the CSS transition does the animation.

use std::collections::HashMap;

use dioxus::prelude::*;

use crate::core::sections::NAV_GROUPS;
use crate::core::state::{use_app_state, AppState};
use crate::i18n::{self, tr};
use crate::t;

// Navbar stylesheet (inlined as a fallback in release native builds).
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Collapse height used until a group's natural height has been measured.
const FALLBACK_PANEL_HEIGHT: f64 = 480.0;

/// Which accordion groups are expanded. Groups toggle independently; any
/// number may be open at once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccordionState {
    open: Vec<&'static str>,
}

impl AccordionState {
    pub fn toggle(&mut self, key: &'static str) {
        if let Some(index) = self.open.iter().position(|k| *k == key) {
            self.open.remove(index);
        } else {
            self.open.push(key);
        }
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.open.iter().any(|k| *k == key)
    }
}

#[component]
pub fn AppNavbar() -> Element {
    i18n::init();

    let app = use_app_state();
    let lang_marker = (app.language)();
    let menu_open = (app.menu_open)();
    let active_section = (app.active_section)();

    let accordion = use_signal(AccordionState::default);
    let heights = use_signal(HashMap::<&'static str, f64>::new);

    #[cfg(debug_assertions)]
    println!("[i18n] AppNavbar render lang={}", lang_marker.locale_tag());

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: if menu_open { "navbar navbar--open" } else { "navbar" },
            div { style: "display:none", "{lang_marker.locale_tag()}" }
            div { class: "navbar__inner",
                // Brand
                div { class: "navbar__brand",
                    span { id: "title", class: "navbar__brand-mark", {t!("app-title")} }
                    span { class: "navbar__brand-subtitle", {t!("tagline")} }
                }

                // Responsive menu toggle
                button {
                    r#type: "button",
                    id: "menuToggle",
                    class: if menu_open { "navbar__menu-toggle active" } else { "navbar__menu-toggle" },
                    aria_label: t!("nav-menu-label"),
                    onclick: move |_| app.toggle_menu(),
                    span { class: "navbar__menu-icon", aria_hidden: "true" }
                }

                // Accordion topic groups
                nav {
                    class: if menu_open { "navbar__links navbar__links--open" } else { "navbar__links" },
                    for group_index in 0..NAV_GROUPS.len() {
                        AccordionGroup {
                            group_index,
                            accordion,
                            heights,
                            active_section: active_section.clone(),
                        }
                    }
                }

                // Language toggle; its label names the language to switch TO.
                button {
                    r#type: "button",
                    id: "languageToggle",
                    class: "navbar__locale-toggle",
                    onclick: move |_| app.toggle_language(),
                    {t!("language-toggle")}
                }
            }
        }
    }
}

#[component]
fn AccordionGroup(
    group_index: usize,
    accordion: Signal<AccordionState>,
    heights: Signal<HashMap<&'static str, f64>>,
    active_section: Option<String>,
) -> Element {
    let group = &NAV_GROUPS[group_index];
    let key = group.key;
    let open = accordion().is_open(key);
    let mut accordion = accordion;
    let mut heights = heights;

    let panel_style = if open {
        let height = heights()
            .get(key)
            .copied()
            .unwrap_or(FALLBACK_PANEL_HEIGHT);
        format!("max-height: {height}px")
    } else {
        "max-height: 0px".to_string()
    };

    rsx! {
        div { class: "nav-accordion",
            button {
                r#type: "button",
                class: if open { "accordion-header active" } else { "accordion-header" },
                "data-translate": key,
                onclick: move |_| accordion.with_mut(|state| state.toggle(key)),
                {tr(key)}
            }
            div {
                class: "accordion-content",
                style: panel_style,
                onmounted: move |event: MountedEvent| async move {
                    if let Ok(size) = event.data().get_scroll_size().await {
                        heights.write().insert(key, size.height);
                    }
                },
                ul { class: "nav-accordion__list",
                    for link in group.links.iter() {
                        NavLinkView {
                            section: link.section,
                            is_active: active_section.as_deref() == Some(link.section),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NavLinkView(section: &'static str, is_active: bool) -> Element {
    let app: AppState = use_app_state();

    rsx! {
        li {
            a {
                href: "#",
                class: if is_active { "navbar__link active" } else { "navbar__link" },
                "data-section": section,
                onclick: move |event| {
                    event.prevent_default();
                    app.activate_section(section);
                },
                {tr(section)}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accordion_groups_toggle_independently() {
        let mut state = AccordionState::default();
        state.toggle("fundamentals");
        state.toggle("hooks");
        assert!(state.is_open("fundamentals"));
        assert!(state.is_open("hooks"));

        // Re-toggling one collapses only that one.
        state.toggle("fundamentals");
        assert!(!state.is_open("fundamentals"));
        assert!(state.is_open("hooks"));
    }

    #[test]
    fn unknown_groups_are_closed() {
        assert!(!AccordionState::default().is_open("routing"));
    }
}
