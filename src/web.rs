//! Browser binding
//!
//! [`WebHost`] drives an `HTMLMediaElement` in the page through `web-sys`
//! and schedules with the global `setTimeout`. The exported functions are the
//! JavaScript entry points, under both naming conventions the page uses.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlMediaElement;

use crate::facade::AudioFacade;
use crate::host::{DeferredTask, MediaElement, MediaHost};

#[wasm_bindgen]
extern "C" {
    // Takes the delay as a JS number so the browser does its own coercion
    #[wasm_bindgen(js_name = setTimeout)]
    fn set_timeout(handler: &js_sys::Function, timeout: f64) -> JsValue;
}

/// The current page's document and timer queue
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHost;

/// Handle to an element found in the page
#[derive(Debug, Clone)]
pub struct WebElement {
    inner: HtmlMediaElement,
}

impl MediaElement for WebElement {
    fn reset(&self) {
        self.inner.load();
    }

    fn play(&self) {
        // A rejected play promise is left to the page's unhandled-rejection path
        let _ = self.inner.play();
    }

    fn pause(&self) {
        let _ = self.inner.pause();
    }

    fn seek(&self, seconds: f64) {
        self.inner.set_current_time(seconds);
    }
}

impl MediaHost for WebHost {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        let element = web_sys::window()?.document()?.get_element_by_id(id)?;
        element
            .dyn_into::<HtmlMediaElement>()
            .ok()
            .map(|inner| WebElement { inner })
    }

    fn schedule_after(&self, delay_ms: f64, task: DeferredTask) {
        let callback = Closure::once_into_js(move || task());
        set_timeout(callback.unchecked_ref::<js_sys::Function>(), delay_ms);
    }
}

thread_local! {
    static FACADE: AudioFacade<WebHost> = AudioFacade::new(WebHost);
}

#[wasm_bindgen(js_name = loadAudio)]
pub fn load_audio_camel() {
    FACADE.with(|facade| facade.load_audio());
}

#[wasm_bindgen(js_name = load_audio)]
pub fn load_audio() {
    FACADE.with(|facade| facade.load_audio());
}

#[wasm_bindgen(js_name = playFrom)]
pub fn play_from_camel(position: f64, duration: f64) {
    FACADE.with(|facade| facade.play_from(position, duration));
}

#[wasm_bindgen(js_name = play_from)]
pub fn play_from(position: f64, duration: f64) {
    FACADE.with(|facade| facade.play_from(position, duration));
}
