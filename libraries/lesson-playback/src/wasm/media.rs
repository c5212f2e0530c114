//! `HTMLMediaElement` adapter

use super::js_error;
use crate::{
    error::{PlayerError, Result},
    media::MediaElement,
};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlMediaElement;

/// Called with the reason when a `play()` promise rejects
pub type RejectionHandler = Rc<dyn Fn(String)>;

/// Media element backed by a DOM `<audio>`/`<video>` node
pub struct HtmlMedia {
    element: HtmlMediaElement,
    on_rejected: Option<RejectionHandler>,
}

impl HtmlMedia {
    pub fn new(element: HtmlMediaElement) -> Self {
        Self {
            element,
            on_rejected: None,
        }
    }

    /// Route late `play()` rejections (autoplay policy) to `handler`
    pub fn set_rejection_handler(&mut self, handler: RejectionHandler) {
        self.on_rejected = Some(handler);
    }

    pub fn element(&self) -> &HtmlMediaElement {
        &self.element
    }
}

impl MediaElement for HtmlMedia {
    fn set_src(&mut self, url: &str) {
        self.element.set_src(url);
    }

    fn load(&mut self) {
        self.element.load();
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlayerError::MediaElement(js_error(&e)))?;

        // Autoplay refusals arrive later as a rejected promise
        let on_rejected = self.on_rejected.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let reason = js_error(&e);
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "Autoplay blocked: {reason}"
                )));
                if let Some(handler) = on_rejected {
                    handler(reason);
                }
            }
        });

        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            web_sys::console::warn_1(&e);
        }
    }

    fn paused(&self) -> bool {
        self.element.paused()
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.element.set_playback_rate(rate);
    }
}
