//! WASM page enhancements for the GFFTH marketing site
//!
//! This crate wires cosmetic interactivity onto server-rendered markup:
//! smooth in-page scrolling, the mobile menu, scroll-reveal animations,
//! deferred images, parallax, baseline ARIA patching and global error
//! logging. It renders nothing itself.
//!
//! ## Architecture
//! - WASM compilation target (wasm32-unknown-unknown), `web-sys` bindings
//! - One [`config::SiteConfig`] context object passed to every module
//! - Each module owns its listeners/observers through drop guards
//! - Logging through `tracing`, rendered to the browser console
//!
//! ## Module Structure
//! - `app`: start-up order, ready-state gating, page-lifetime ownership
//! - `config`: selectors, class names and thresholds
//! - `dom`: lookups and listener/observer guards
//! - `navigation`, `animations`, `lazy_loader`, `parallax`,
//!   `accessibility`, `error_handler`: the page behaviours
//! - `logging`: console layer for `tracing`
//! - `error`: error types and handling

#![forbid(unsafe_code)]

pub mod accessibility;
pub mod animations;
pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod error_handler;
pub mod lazy_loader;
pub mod logging;
pub mod navigation;
pub mod parallax;

#[cfg(test)]
mod tests;

use wasm_bindgen::prelude::*;

pub use app::Site;
pub use config::SiteConfig;
pub use error::{Result, SiteError};

/// Starts the site with the inline config block or defaults
///
/// # Errors
///
/// Fails outside a browser or if the ready listener cannot be attached.
#[wasm_bindgen]
pub fn start() -> std::result::Result<(), JsError> {
    app::start(None)?;
    Ok(())
}

/// Starts the site with a config object supplied from JavaScript
///
/// # Errors
///
/// Fails if the object does not describe a valid config, or as [`start`].
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config: JsValue) -> std::result::Result<(), JsError> {
    let config = config::from_js(config)?;
    app::start(Some(config))?;
    Ok(())
}

/// Detaches every listener and observer installed by `start`
#[wasm_bindgen]
pub fn stop() {
    app::stop();
}
