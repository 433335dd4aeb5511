//! Site start-up
//!
//! `Site::init` runs the modules in a fixed order against one config. A
//! module that fails is logged and left out; the rest still start. The
//! running `Site` is parked in thread-local storage for the page lifetime.

use std::cell::RefCell;

use web_sys::{Document, Window};

use crate::accessibility::{self, Accessibility};
use crate::animations::{self, Animations};
use crate::config::{self, SiteConfig};
use crate::dom;
use crate::error::{Result, SiteError};
use crate::error_handler::{self, ErrorHandler};
use crate::lazy_loader::{self, LazyLoader};
use crate::logging;
use crate::navigation::{self, Navigation};
use crate::parallax::{self, Parallax};

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Module names in initialisation order
pub const MODULES: [&str; 6] = [
    "navigation",
    "animations",
    "lazy_loader",
    "parallax",
    "accessibility",
    "error_handler",
];

/// Every running module, each present only if it started
#[derive(Debug, Default)]
pub struct Site {
    pub navigation: Option<Navigation>,
    pub animations: Option<Animations>,
    pub lazy_loader: Option<LazyLoader>,
    pub parallax: Option<Parallax>,
    pub accessibility: Option<Accessibility>,
    pub error_handler: Option<ErrorHandler>,
    failures: Vec<(&'static str, SiteError)>,
}

impl Site {
    /// Starts all modules against `document`
    #[must_use]
    pub fn init(window: &Window, document: &Document, config: &SiteConfig) -> Self {
        let mut site = Self::default();

        site.navigation = site.keep("navigation", navigation::init(document, config));
        site.animations = site.keep("animations", animations::init(document, config));
        site.lazy_loader = site.keep("lazy_loader", lazy_loader::init(document, config));
        site.parallax = site.keep("parallax", parallax::init(window, document, config));
        site.accessibility = site.keep("accessibility", accessibility::init(document, config));
        site.error_handler = site.keep("error_handler", error_handler::init(window));

        tracing::info!(
            started = MODULES.len() - site.failures.len(),
            failed = site.failures.len(),
            "site enhancements ready"
        );
        site
    }

    fn keep<T>(&mut self, module: &'static str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(module, error = %e, "module failed to start");
                self.failures.push((module, e));
                None
            }
        }
    }

    /// Modules that failed to start, with their errors
    #[must_use]
    pub fn failures(&self) -> &[(&'static str, SiteError)] {
        &self.failures
    }
}

/// Picks the config to run with
///
/// An explicit config wins, then the inline JSON block, then defaults. An
/// inline block that fails to parse is reported and defaults are used.
#[must_use]
pub fn resolve_config(document: &Document, explicit: Option<SiteConfig>) -> SiteConfig {
    if let Some(config) = explicit {
        return config;
    }
    match config::load_inline(document) {
        Ok(Some(config)) => config,
        Ok(None) => SiteConfig::default(),
        Err(e) => {
            web_sys::console::warn_1(&format!("gffth: {e}; using defaults").into());
            SiteConfig::default()
        }
    }
}

/// Installs logging, waits for the DOM, then starts the site
///
/// # Errors
///
/// Returns an error if there is no window/document or the ready listener
/// cannot be attached.
pub fn start(explicit: Option<SiteConfig>) -> Result<()> {
    console_error_panic_hook::set_once();

    let window = dom::window()?;
    let document = window.document().ok_or(SiteError::DocumentNotAvailable)?;
    let config = resolve_config(&document, explicit);

    let level = config.level_filter().unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);
    logging::init(level);

    let ready_document = document.clone();
    dom::on_ready(&document, move || {
        let site = Site::init(&window, &ready_document, &config);
        SITE.with(|slot| {
            if slot.borrow_mut().replace(site).is_some() {
                tracing::warn!("site started twice; previous bindings dropped");
            }
        });
    })
}

/// Drops the running site, detaching every listener and observer
pub fn stop() {
    if SITE.with(|slot| slot.borrow_mut().take()).is_some() {
        tracing::info!("site enhancements stopped");
    }
}
