//! WASM-compatible LessonPlayer wrapper

use super::{HtmlMedia, LocalStorage};
use crate::{LayoutDirection, LessonPlayer, PlayerConfig, PlayerError};
use js_sys::Function;
use lesson_core::{
    search::{filter_titles, global_search, SearchScope},
    Catalog,
};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::prelude::*;
use web_sys::HtmlMediaElement;

/// Controller plus the JS event callback
///
/// Shared with the media element's rejection handler, which runs from a
/// promise callback after the call that started playback has returned.
struct Shared {
    player: LessonPlayer<HtmlMedia, LocalStorage>,

    // Event callback, receives each PlayerEvent as a plain object
    on_event: Option<Function>,
}

impl Shared {
    fn finish<T>(&mut self, result: crate::Result<T>) -> Result<T, JsValue> {
        self.flush_events();
        result.map_err(handle_error)
    }

    fn flush_events(&mut self) {
        let events = self.player.drain_events();
        let Some(ref cb) = self.on_event else {
            return;
        };

        for event in events {
            if let Ok(value) = serde_wasm_bindgen::to_value(&event) {
                cb.call1(&JsValue::NULL, &value).ok();
            }
        }
    }
}

/// Browser lesson player
///
/// Wire the `<audio>` element's `timeupdate`, `loadedmetadata`, `ended` and
/// `pause` events to `onTimeUpdate`, `onLoadedMetadata`, `onEnded` and
/// `onPause`. Autoplay refusals are picked up from the `play()` promise.
#[wasm_bindgen]
pub struct WasmLessonPlayer {
    shared: Rc<RefCell<Shared>>,
}

#[wasm_bindgen]
impl WasmLessonPlayer {
    /// Create a player from the `lessons.json` text and an audio element
    ///
    /// A malformed catalog yields an empty player rather than an error.
    #[wasm_bindgen(constructor)]
    pub fn new(
        catalog_json: &str,
        element: HtmlMediaElement,
        right_to_left: bool,
    ) -> Result<WasmLessonPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let catalog = Catalog::from_json_or_empty(catalog_json);
        let store = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = PlayerConfig {
            direction: if right_to_left {
                LayoutDirection::RightToLeft
            } else {
                LayoutDirection::LeftToRight
            },
            ..PlayerConfig::default()
        };

        let player = LessonPlayer::new(catalog, HtmlMedia::new(element), store, config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let shared = Rc::new(RefCell::new(Shared {
            player,
            on_event: None,
        }));

        let weak = Rc::downgrade(&shared);
        shared
            .borrow_mut()
            .player
            .media_mut()
            .set_rejection_handler(Rc::new(move |reason: String| {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                // Runs from a promise callback, never inside another call
                if let Ok(mut shared) = shared.try_borrow_mut() {
                    shared.player.on_play_rejected(&reason);
                    shared.flush_events();
                }
            }));

        Ok(Self { shared })
    }

    // ===== Lesson Selection =====

    #[wasm_bindgen(js_name = loadLesson)]
    pub fn load_lesson(&mut self, index: usize, should_play: bool) -> Result<(), JsValue> {
        let mut shared = self.shared.borrow_mut();
        let result = shared.player.load_lesson(index, should_play);
        shared.finish(result)
    }

    #[wasm_bindgen(js_name = playNext)]
    pub fn play_next(&mut self) -> Result<bool, JsValue> {
        let mut shared = self.shared.borrow_mut();
        let result = shared.player.play_next();
        shared.finish(result)
    }

    #[wasm_bindgen(js_name = playPrevious)]
    pub fn play_previous(&mut self) -> Result<bool, JsValue> {
        let mut shared = self.shared.borrow_mut();
        let result = shared.player.play_previous();
        shared.finish(result)
    }

    // ===== Transport =====

    /// Toggle playback; returns "playing" or "paused"
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) -> Result<String, JsValue> {
        let mut shared = self.shared.borrow_mut();
        let result = shared
            .player
            .toggle_play_pause()
            .map(|state| format!("{state:?}").to_lowercase());
        shared.finish(result)
    }

    /// Skip by seconds (negative skips back)
    pub fn skip(&mut self, seconds: f64) -> Result<f64, JsValue> {
        let mut shared = self.shared.borrow_mut();
        let result = shared.player.skip(seconds);
        shared.finish(result)
    }

    /// Seek from a click on the progress bar
    #[wasm_bindgen(js_name = seekToPointer)]
    pub fn seek_to_pointer(
        &mut self,
        client_x: f64,
        bar_left: f64,
        bar_width: f64,
    ) -> Result<f64, JsValue> {
        let fraction = crate::pointer_fraction(client_x, bar_left, bar_width);
        let mut shared = self.shared.borrow_mut();
        let result = shared.player.seek_to_fraction(fraction);
        shared.finish(result)
    }

    #[wasm_bindgen(js_name = setPlaybackSpeed)]
    pub fn set_playback_speed(&mut self, speed: f64) -> Result<(), JsValue> {
        let mut shared = self.shared.borrow_mut();
        let result = shared.player.set_playback_speed(speed);
        shared.finish(result)
    }

    #[wasm_bindgen(js_name = setAutoPlayNext)]
    pub fn set_auto_play_next(&mut self, enabled: bool) {
        let mut shared = self.shared.borrow_mut();
        shared.player.set_auto_play_next(enabled);
        shared.flush_events();
    }

    // ===== Media Events =====

    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&mut self) {
        let mut shared = self.shared.borrow_mut();
        shared.player.on_time_update();
        shared.flush_events();
    }

    #[wasm_bindgen(js_name = onLoadedMetadata)]
    pub fn on_loaded_metadata(&mut self) {
        let mut shared = self.shared.borrow_mut();
        shared.player.on_loaded_metadata();
        shared.flush_events();
    }

    #[wasm_bindgen(js_name = onEnded)]
    pub fn on_ended(&mut self) -> Result<(), JsValue> {
        let mut shared = self.shared.borrow_mut();
        let result = shared.player.on_ended();
        shared.finish(result)
    }

    #[wasm_bindgen(js_name = onPause)]
    pub fn on_pause(&mut self) {
        let mut shared = self.shared.borrow_mut();
        shared.player.on_paused();
        shared.flush_events();
    }

    // ===== State Queries =====

    /// Current `PlayerView` as a plain object
    pub fn view(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.shared.borrow().player.view()).unwrap_or(JsValue::NULL)
    }

    /// Sidebar rows as an array of plain objects
    #[wasm_bindgen(js_name = lessonList)]
    pub fn lesson_list(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.shared.borrow().player.lesson_list())
            .unwrap_or(JsValue::NULL)
    }

    /// Sidebar filter: visibility flag per lesson
    #[wasm_bindgen(js_name = filterTitles)]
    pub fn filter_titles(&self, term: &str) -> JsValue {
        let shared = self.shared.borrow();
        serde_wasm_bindgen::to_value(&filter_titles(shared.player.catalog(), term))
            .unwrap_or(JsValue::NULL)
    }

    /// Global search results
    pub fn search(&self, term: &str, titles: bool, descriptions: bool, dates: bool) -> JsValue {
        let scope = SearchScope {
            titles,
            descriptions,
            dates,
        };
        let shared = self.shared.borrow();
        serde_wasm_bindgen::to_value(&global_search(shared.player.catalog(), term, scope))
            .unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Register the event callback
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.shared.borrow_mut().on_event = Some(callback);
    }
}

fn handle_error(error: PlayerError) -> JsValue {
    let err_msg = error.to_string();
    web_sys::console::error_1(&JsValue::from_str(&err_msg));
    JsValue::from_str(&err_msg)
}
