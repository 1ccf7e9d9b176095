//! Browser Tests
//!
//! The JavaScript exports and `WebHost` against a real page. Run with
//! `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use audio_cue::web::{self, WebHost};
use audio_cue::MediaHost;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlMediaElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Helper to add an element with the player's identifier to the page
fn insert_player(tag: &str) -> Element {
    let element = document().create_element(tag).unwrap();
    element.set_id("audio-player");
    document().body().unwrap().append_child(&element).unwrap();
    element
}

fn insert_audio() -> (Element, HtmlMediaElement) {
    let element = insert_player("audio");
    let media = element.clone().dyn_into::<HtmlMediaElement>().unwrap();
    (element, media)
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

// === Lookup Tests ===

#[wasm_bindgen_test]
fn test_audio_element_found() {
    let (element, _) = insert_audio();
    assert!(WebHost.element_by_id("audio-player").is_some());
    element.remove();
}

#[wasm_bindgen_test]
fn test_non_media_element_counts_as_absent() {
    let element = insert_player("div");
    assert!(WebHost.element_by_id("audio-player").is_none());

    // Neither export touches the div
    web::load_audio();
    web::play_from(5.0, 0.01);
    assert!(element.get_attribute("src").is_none());
    element.remove();
}

#[wasm_bindgen_test]
fn test_missing_element_is_noop() {
    assert!(WebHost.element_by_id("audio-player").is_none());
    web::load_audio_camel();
    web::play_from_camel(1.0, 0.01);
}

// === Export Tests ===

#[wasm_bindgen_test]
fn test_both_load_names_reset_position() {
    let (element, media) = insert_audio();

    media.set_current_time(12.0);
    web::load_audio_camel();
    assert_eq!(media.current_time(), 0.0);

    media.set_current_time(7.0);
    web::load_audio();
    assert_eq!(media.current_time(), 0.0);

    element.remove();
}

#[wasm_bindgen_test]
async fn test_play_from_camel_seeks_then_pauses() {
    let (element, media) = insert_audio();

    web::play_from_camel(30.0, 0.05);
    assert_eq!(media.current_time(), 30.0);

    sleep(200).await;
    assert!(media.paused());
    element.remove();
}

#[wasm_bindgen_test]
async fn test_play_from_snake_seeks_then_pauses() {
    let (element, media) = insert_audio();

    web::play_from(12.0, 0.05);
    assert_eq!(media.current_time(), 12.0);

    sleep(200).await;
    assert!(media.paused());
    element.remove();
}

// === Scheduling Tests ===

#[wasm_bindgen_test]
async fn test_out_of_range_delays_reach_browser_unchanged() {
    let fired = Rc::new(Cell::new(0));
    for delay_ms in [f64::INFINITY, 3e9, -10.0, f64::NAN] {
        let fired = Rc::clone(&fired);
        WebHost.schedule_after(delay_ms, Box::new(move || fired.set(fired.get() + 1)));
    }

    // The browser's own conversion turns every one of these into 0ms
    sleep(50).await;
    assert_eq!(fired.get(), 4);
}
