//! Platform-split fragment retrieval.
//!
//! Fragments are opaque HTML blobs shipped under `ui/assets/sections/`. On
//! wasm they are served out of the bundled asset folder and retrieved with the
//! browser `fetch`; on native builds they are read straight from the resolved
//! resource directory.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("read failure: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(target_arch = "wasm32")]
    #[error("no window available")]
    NoWindow,
}

#[cfg(target_arch = "wasm32")]
const SECTIONS_DIR: dioxus::prelude::Asset = dioxus::prelude::asset!("/assets/sections");

/// Fetch one fragment by bare filename (e.g. `hooks_eng.html`).
///
/// Any non-success outcome maps to a `FetchError`; callers decide how to
/// surface it. Nothing here retries or cancels.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_fragment(file: &str) -> Result<String, FetchError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or(FetchError::NoWindow)?;
    let url = format!("{SECTIONS_DIR}/{file}");

    let response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|err| FetchError::Transport(format!("{err:?}")))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|err| FetchError::Transport(format!("{err:?}")))?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let text = response
        .text()
        .map_err(|err| FetchError::Transport(format!("{err:?}")))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|err| FetchError::Transport(format!("{err:?}")))?;

    text.as_string()
        .ok_or_else(|| FetchError::Transport("response body was not text".into()))
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_fragment(file: &str) -> Result<String, FetchError> {
    let path = sections_dir().join(file);
    Ok(tokio::fs::read_to_string(path).await?)
}

/// Where the fragment files live on native builds. During `cargo run` /
/// `dx serve` load directly from the crate; packaged builds expect an
/// `assets` directory next to the executable.
#[cfg(not(target_arch = "wasm32"))]
fn sections_dir() -> std::path::PathBuf {
    #[cfg(debug_assertions)]
    {
        std::path::PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/sections"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets/sections")))
            .unwrap_or_else(|| std::path::PathBuf::from("assets/sections"))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("test runtime")
            .block_on(future)
    }

    #[test]
    fn reads_a_shipped_fragment() {
        let html = block_on(fetch_fragment("use-state_eng.html")).expect("fragment present");
        assert!(html.contains("code-runner"));
    }

    #[test]
    fn missing_fragment_is_an_error() {
        let result = block_on(fetch_fragment("no-such-section_eng.html"));
        assert!(result.is_err());
    }
}
