//! Tabbed examples inside loaded fragments.
//!
//! One `TabsState` is shared by every tab bar and pane of a load cycle — a
//! single flat activation set, exactly like the original's page-wide query.
//! Before the first click, the markup's own `active` flags decide what shows.

use dioxus::prelude::*;

use crate::content::scan::{TabButton, TabPane};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabsState {
    selection: Option<String>,
}

impl TabsState {
    /// Activate `target`: every other button and pane deactivates. A target
    /// with no matching pane still wins the button half; no pane shows.
    pub fn activate(&mut self, target: &str) {
        self.selection = Some(target.to_string());
    }

    pub fn button_is_active(&self, button: &TabButton) -> bool {
        match &self.selection {
            Some(selected) => selected == &button.target,
            None => button.active,
        }
    }

    pub fn pane_is_visible(&self, pane: &TabPane) -> bool {
        match &self.selection {
            Some(selected) => !pane.id.is_empty() && selected == &pane.id,
            None => pane.active,
        }
    }
}

#[component]
pub fn TabBarView(buttons: Vec<TabButton>, state: Signal<TabsState>) -> Element {
    let current = state();
    let mut state = state;

    rsx! {
        div { class: "tab-buttons",
            for button in buttons.into_iter() {
                button {
                    r#type: "button",
                    class: if current.button_is_active(&button) { "tab-button active" } else { "tab-button" },
                    "data-tab": button.target.clone(),
                    onclick: {
                        let target = button.target.clone();
                        move |_| state.with_mut(|tabs| tabs.activate(&target))
                    },
                    "{button.label}"
                }
            }
        }
    }
}

#[component]
pub fn TabPaneView(pane: TabPane, state: Signal<TabsState>) -> Element {
    let visible = state().pane_is_visible(&pane);

    rsx! {
        div {
            id: "{pane.id}",
            class: if visible { "tab-content active" } else { "tab-content" },
            dangerous_inner_html: "{pane.body}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(target: &str, active: bool) -> TabButton {
        TabButton {
            target: target.into(),
            label: target.to_uppercase(),
            active,
        }
    }

    fn pane(id: &str, active: bool) -> TabPane {
        TabPane {
            id: id.into(),
            body: String::new(),
            active,
        }
    }

    #[test]
    fn markup_flags_apply_before_any_click() {
        let tabs = TabsState::default();
        assert!(tabs.button_is_active(&button("a", true)));
        assert!(!tabs.button_is_active(&button("b", false)));
        assert!(tabs.pane_is_visible(&pane("a", true)));
        assert!(!tabs.pane_is_visible(&pane("b", false)));
    }

    #[test]
    fn activation_selects_exactly_the_clicked_pair() {
        let mut tabs = TabsState::default();
        tabs.activate("b");

        assert!(!tabs.button_is_active(&button("a", true)));
        assert!(tabs.button_is_active(&button("b", false)));
        assert!(!tabs.pane_is_visible(&pane("a", true)));
        assert!(tabs.pane_is_visible(&pane("b", false)));

        // Groups share one activation set per load cycle.
        assert!(!tabs.button_is_active(&button("other-group", true)));
    }

    #[test]
    fn missing_target_pane_is_a_silent_no_op_for_the_pane_half() {
        let mut tabs = TabsState::default();
        tabs.activate("ghost");

        assert!(tabs.button_is_active(&button("ghost", false)));
        assert!(!tabs.pane_is_visible(&pane("a", true)));
        assert!(!tabs.pane_is_visible(&pane("", false)));
    }
}
