//! The static navigation table and fragment path derivation.
//!
//! Section identifiers double as translation keys: the navbar looks each one
//! up through `i18n::tr`, and the content loader turns the active one into a
//! fragment resource path. Group keys are translation keys only; accordion
//! headers never navigate.

use super::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavGroup {
    /// Translation key for the accordion header.
    pub key: &'static str,
    pub links: &'static [NavLink],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Section identifier; also the translation key for the link label.
    pub section: &'static str,
}

pub const NAV_GROUPS: &[NavGroup] = &[
    NavGroup {
        key: "fundamentals",
        links: &[
            NavLink { section: "virtual-dom" },
            NavLink { section: "life-cycle" },
        ],
    },
    NavGroup {
        key: "hooks",
        links: &[
            NavLink { section: "use-state" },
            NavLink { section: "use-effect" },
            NavLink { section: "use-context" },
        ],
    },
    NavGroup {
        key: "routing",
        links: &[NavLink { section: "router-browser" }],
    },
];

/// All known section identifiers, in nav order.
pub fn all_sections() -> impl Iterator<Item = &'static str> {
    NAV_GROUPS
        .iter()
        .flat_map(|group| group.links.iter().map(|link| link.section))
}

/// Fragment filename for a section in a language, e.g. `hooks_eng.html`.
pub fn fragment_file(section: &str, language: Language) -> String {
    format!("{section}{}.html", language.fragment_suffix())
}

/// Full fragment resource path, e.g. `sections/hooks_eng.html`.
pub fn fragment_path(section: &str, language: Language) -> String {
    format!("sections/{}", fragment_file(section, language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_path_is_pure_per_language() {
        assert_eq!(
            fragment_path("hooks", Language::English),
            "sections/hooks_eng.html"
        );
        assert_eq!(
            fragment_path("hooks", Language::Spanish),
            "sections/hooks_es.html"
        );
        // Deterministic: repeated calls agree.
        assert_eq!(
            fragment_path("hooks", Language::English),
            fragment_path("hooks", Language::English)
        );
    }

    #[test]
    fn toggling_language_switches_the_derived_path() {
        let lang = Language::default();
        assert_eq!(fragment_path("hooks", lang), "sections/hooks_eng.html");
        assert_eq!(
            fragment_path("hooks", lang.toggled()),
            "sections/hooks_es.html"
        );
    }

    #[test]
    fn nav_table_sections_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for section in all_sections() {
            assert!(seen.insert(section), "duplicate section id: {section}");
        }
        assert!(seen.len() >= 6);
    }
}
