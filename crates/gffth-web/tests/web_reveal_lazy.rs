//! Browser tests for scroll reveal and deferred images

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used)]

mod common;

use std::cell::Cell;

use gffth_web::animations::{self, RevealOutcome, reveal};
use gffth_web::config::{LazyConfig, RevealConfig, SiteConfig};
use gffth_web::lazy_loader::{self, LoadOutcome, Unobserve, load_image};
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Default)]
struct CountingSubscription {
    unobserved: Cell<usize>,
}

impl Unobserve for CountingSubscription {
    fn unobserve(&self, _target: &Element) {
        self.unobserved.set(self.unobserved.get() + 1);
    }
}

#[wasm_bindgen_test]
fn test_reveal_only_when_visible() {
    let element = common::mount("div", &[("class", "animate-on-scroll")]);
    let config = RevealConfig::default();

    assert_eq!(reveal(&element, false, &config).unwrap(), RevealOutcome::Hidden);
    assert!(!element.class_list().contains("animate"));

    assert_eq!(reveal(&element, true, &config).unwrap(), RevealOutcome::Revealed);
    assert!(element.class_list().contains("animate"));
}

#[wasm_bindgen_test]
fn test_reveal_is_monotonic() {
    let element = common::mount("div", &[("class", "animate-on-scroll")]);
    let config = RevealConfig::default();

    assert_eq!(reveal(&element, true, &config).unwrap(), RevealOutcome::Revealed);
    assert_eq!(reveal(&element, true, &config).unwrap(), RevealOutcome::AlreadyRevealed);
    assert_eq!(reveal(&element, false, &config).unwrap(), RevealOutcome::Hidden);
    assert!(element.class_list().contains("animate"), "class must never be removed");
}

#[wasm_bindgen_test]
fn test_lazy_image_loads_once_and_unsubscribes() {
    let image = common::mount("img", &[("class", "lazy"), ("data-src", "/img/hero.webp")]);
    let config = LazyConfig::default();
    let subscription = CountingSubscription::default();

    assert_eq!(load_image(&image, false, &config, &subscription).unwrap(), LoadOutcome::Pending);
    assert_eq!(image.get_attribute("src"), None);

    let outcome = load_image(&image, true, &config, &subscription).unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded("/img/hero.webp".to_string()));
    assert_eq!(image.get_attribute("src").as_deref(), Some("/img/hero.webp"));
    assert!(!image.class_list().contains("lazy"));
    assert_eq!(subscription.unobserved.get(), 1);

    // a stray later intersection changes nothing
    image.set_attribute("data-src", "/img/other.webp").unwrap();
    assert_eq!(load_image(&image, true, &config, &subscription).unwrap(), LoadOutcome::AlreadyLoaded);
    assert_eq!(image.get_attribute("src").as_deref(), Some("/img/hero.webp"));
}

#[wasm_bindgen_test]
fn test_lazy_image_without_source_keeps_src() {
    let image = common::mount("img", &[("class", "lazy"), ("src", "/img/placeholder.svg")]);
    let subscription = CountingSubscription::default();

    let outcome = load_image(&image, true, &LazyConfig::default(), &subscription).unwrap();

    assert_eq!(outcome, LoadOutcome::MissingSource);
    assert_eq!(image.get_attribute("src").as_deref(), Some("/img/placeholder.svg"));
    assert!(!image.class_list().contains("lazy"));
    assert_eq!(subscription.unobserved.get(), 1);
}

#[wasm_bindgen_test]
fn test_observers_watch_marked_elements() {
    common::mount("div", &[("class", "reveal-count-test")]);
    common::mount("div", &[("class", "reveal-count-test")]);
    common::mount("img", &[("class", "lazy-count-test"), ("data-src", "/a.png")]);
    let document = common::document();
    let config = SiteConfig {
        reveal: RevealConfig {
            selector: ".reveal-count-test".to_string(),
            ..RevealConfig::default()
        },
        lazy: LazyConfig {
            selector: "img.lazy-count-test".to_string(),
            ..LazyConfig::default()
        },
        ..SiteConfig::default()
    };

    let reveal = animations::init(&document, &config).unwrap();
    let lazy = lazy_loader::init(&document, &config).unwrap();

    assert_eq!(reveal.watched(), 2);
    assert_eq!(lazy.pending(), 1);
}
