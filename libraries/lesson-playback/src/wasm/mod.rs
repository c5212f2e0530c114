//! WASM bindings for lesson-playback
//!
//! Runs the lesson player in the browser: the `<audio>` element is the
//! media element and `window.localStorage` is the preference store.

pub mod media;
pub mod player;
pub mod storage;

pub use media::HtmlMedia;
pub use player::WasmLessonPlayer;
pub use storage::LocalStorage;

/// Readable message for a thrown JS value
pub(crate) fn js_error(err: &wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
