//! Content loading state machine.
//!
//! `load_section` is fire-and-forget: it spawns the fetch and walks away.
//! Nothing cancels an in-flight load, so overlapping requests may complete
//! out of order and the last one to resolve wins — the same behavior the
//! original fetch chain had.

use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::logger::tracing;
use dioxus::prelude::*;

use super::scan::{self, FragmentDocument};
use crate::core::fetch;
use crate::core::highlight;
use crate::core::language::Language;
use crate::core::sections;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContentState {
    #[default]
    Idle,
    Loading {
        section: String,
    },
    Ready {
        section: String,
        /// Monotonic per successful load; keys the rendered subtree so
        /// runner and tab bindings remount fresh on every fragment swap.
        generation: u64,
        document: FragmentDocument,
    },
    Failed {
        section: String,
    },
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Fetch `section` in `language` and publish the outcome into `content`.
///
/// On failure the error is logged and the state carries just enough for the
/// view to name the section in its inline message. No retry: the next
/// navigation or language toggle simply issues a new attempt.
pub fn load_section(mut content: Signal<ContentState>, section: &str, language: Language) {
    let section = section.to_string();
    content.set(ContentState::Loading {
        section: section.clone(),
    });

    spawn(async move {
        let file = sections::fragment_file(&section, language);
        let path = sections::fragment_path(&section, language);

        match fetch::fetch_fragment(&file).await {
            Ok(html) => {
                let document = scan::scan_fragment(&html);
                let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
                tracing::info!(
                    "loaded {path}: {} segment(s), generation {generation}",
                    document.segments.len()
                );
                content.set(ContentState::Ready {
                    section,
                    generation,
                    document,
                });
                highlight::highlight_all();
            }
            Err(err) => {
                tracing::error!("error loading content from {path}: {err}");
                content.set(ContentState::Failed { section });
            }
        }
    });
}
