//! Application-level state, provided once via context.
//!
//! Everything that outlives a fragment swap lives here: the current language,
//! the single active section, menu visibility and the content state machine.
//! Holding the active link as an `Option` makes "at most one active link" an
//! invariant by construction rather than a class-juggling discipline.

use dioxus::logger::tracing;
use dioxus::prelude::*;

use super::language::Language;
use crate::content::loader::{self, ContentState};
use crate::i18n;

#[derive(Clone, Copy)]
pub struct AppState {
    pub language: Signal<Language>,
    pub active_section: Signal<Option<String>>,
    pub menu_open: Signal<bool>,
    pub content: Signal<ContentState>,
}

/// Create and provide the app state. Call once from the launcher's root
/// component, before any consumer renders.
pub fn use_app_state_provider() -> AppState {
    use_context_provider(|| AppState {
        language: Signal::new(Language::default()),
        active_section: Signal::new(None),
        menu_open: Signal::new(false),
        content: Signal::new(ContentState::Idle),
    })
}

pub fn use_app_state() -> AppState {
    use_context()
}

impl AppState {
    /// Activate a nav link: it becomes the only active link, the menu
    /// closes, and the section loads in the current language.
    pub fn activate_section(mut self, section: &str) {
        self.active_section.set(Some(section.to_string()));
        self.menu_open.set(false);
        loader::load_section(self.content, section, *self.language.peek());
    }

    pub fn toggle_menu(mut self) {
        let open = *self.menu_open.peek();
        self.menu_open.set(!open);
    }

    /// Flip the display language and re-load the active section, if any.
    /// This is the only place a language change triggers a fetch.
    pub fn toggle_language(mut self) {
        let next = self.language.peek().toggled();
        self.language.set(next);
        if let Err(err) = i18n::set_language(next.locale_tag()) {
            tracing::warn!("failed switching locale to {}: {err}", next.locale_tag());
        }

        let active = self.active_section.peek().clone();
        if let Some(section) = active {
            loader::load_section(self.content, &section, next);
        }
    }
}
