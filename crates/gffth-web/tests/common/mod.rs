//! DOM fixtures shared by the wasm tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn document() -> Document {
    web_sys::window()
        .expect("should have window")
        .document()
        .expect("should have document")
}

/// Creates `<tag>` with the given attributes and appends it to the body
pub fn mount(tag: &str, attrs: &[(&str, &str)]) -> Element {
    let document = document();
    let element = document.create_element(tag).unwrap();
    for (name, value) in attrs {
        element.set_attribute(name, value).unwrap();
    }
    document.body().unwrap().append_child(&element).unwrap();
    element
}

/// Creates a child element with text content
pub fn mount_with_text(tag: &str, attrs: &[(&str, &str)], text: &str) -> Element {
    let element = mount(tag, attrs);
    element.set_text_content(Some(text));
    element
}

/// Resolves on the next animation frame
pub async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Waits out `count` animation frames
pub async fn frames(count: usize) {
    for _ in 0..count {
        next_frame().await;
    }
}
