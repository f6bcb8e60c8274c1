use dioxus::prelude::*;

use crate::core::state::use_app_state;
use crate::t;

/// Landing panel shown while no section has been activated yet.
#[component]
pub fn Home() -> Element {
    let app = use_app_state();
    let lang_marker = (app.language)();

    #[cfg(debug_assertions)]
    println!("[i18n] Home render lang={}", lang_marker.locale_tag());

    rsx! {
        section { class: "page page-home",
            div { style: "display:none", "{lang_marker.locale_tag()}" }
            h1 { {t!("home-title")} }
            p { {t!("home-intro")} }
            p { class: "page-home__cta", {t!("home-cta")} }
        }
    }
}
