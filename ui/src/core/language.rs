//! The two display languages and their derived tokens.

/// Display language for the whole app. Default is English; the toggle in the
/// navbar is the only thing that flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// BCP 47 tag matching the locale folders under `ui/i18n/`.
    pub fn locale_tag(self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Spanish => "es-ES",
        }
    }

    /// Filename suffix used by the fragment resource convention
    /// (`sections/{section}{suffix}.html`).
    pub fn fragment_suffix(self) -> &'static str {
        match self {
            Language::English => "_eng",
            Language::Spanish => "_es",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Spanish,
            Language::Spanish => Language::English,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        assert_eq!(Language::English.toggled().toggled(), Language::English);
        assert_eq!(Language::Spanish.toggled().toggled(), Language::Spanish);
    }

    #[test]
    fn default_language_is_english() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn suffixes_differ_per_language() {
        assert_eq!(Language::English.fragment_suffix(), "_eng");
        assert_eq!(Language::Spanish.fragment_suffix(), "_es");
    }
}
