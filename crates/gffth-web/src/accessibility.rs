//! Baseline accessibility patches
//!
//! Escape inside the open mobile menu closes it through the toggle's own
//! click path, and a one-time sweep gives button-like elements an explicit
//! role and a label derived from their text.

use web_sys::{Document, Element, Event, KeyboardEvent};
use wasm_bindgen::JsCast;

use crate::config::SiteConfig;
use crate::dom::{self, Listener};
use crate::error::{Result, SiteError};
use crate::navigation::menu_state;

/// Key that closes the mobile menu
pub const CLOSE_KEY: &str = "Escape";

/// What the sweep did to one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome {
    /// `aria-label` set from text content
    Labelled(String),
    /// An `aria-label` was already present
    Kept,
    /// No visible text to derive a label from
    NoText,
}

/// Label derived from an element's text content
///
/// Whitespace is trimmed; blank text yields `None`.
#[must_use]
pub fn derive_label(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

/// Assigns `role="button"` and, when missing, an `aria-label`
///
/// # Errors
///
/// Returns `SiteError::Dom` if an attribute update throws.
pub fn patch_element(element: &Element) -> Result<LabelOutcome> {
    element
        .set_attribute("role", "button")
        .map_err(|e| SiteError::dom(&e))?;

    if element.has_attribute("aria-label") {
        return Ok(LabelOutcome::Kept);
    }

    match derive_label(element.text_content().as_deref()) {
        Some(label) => {
            element
                .set_attribute("aria-label", &label)
                .map_err(|e| SiteError::dom(&e))?;
            Ok(LabelOutcome::Labelled(label))
        }
        None => Ok(LabelOutcome::NoText),
    }
}

/// Counts from the one-time sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub patched: usize,
    pub labelled: usize,
    pub unlabelled: usize,
    /// Elements whose attribute update threw
    pub failed: usize,
}

impl SweepReport {
    /// Folds one element's result into the counts
    ///
    /// A failed element is logged and counted; it never stops the sweep.
    #[must_use]
    pub fn tally(mut self, outcome: Result<LabelOutcome>) -> Self {
        match outcome {
            Ok(LabelOutcome::Labelled(_)) => self.labelled += 1,
            Ok(LabelOutcome::NoText) => self.unlabelled += 1,
            Ok(LabelOutcome::Kept) => {}
            Err(e) => {
                tracing::warn!(error = %e, "accessibility patch failed");
                self.failed += 1;
                return self;
            }
        }
        self.patched += 1;
        self
    }
}

/// Patches every interactive element present right now
///
/// Elements inserted later are not visited.
///
/// # Errors
///
/// Returns an error only if the selector is invalid.
pub fn sweep(document: &Document, selector: &str) -> Result<SweepReport> {
    Ok(dom::query_all(document, selector)?
        .iter()
        .map(patch_element)
        .fold(SweepReport::default(), SweepReport::tally))
}

/// Closes the menu if `event` is the close key and the menu is open
///
/// Returns true when the toggle was clicked.
///
/// # Errors
///
/// Returns `SiteError::ElementNotFound` if the toggle has disappeared.
pub fn close_on_escape(document: &Document, event: &Event, toggle_id: &str) -> Result<bool> {
    let is_close_key = event
        .dyn_ref::<KeyboardEvent>()
        .is_some_and(|e| e.key() == CLOSE_KEY);
    if !is_close_key {
        return Ok(false);
    }

    let toggle = dom::html_element_by_id(document, toggle_id)?;
    if !menu_state(&toggle).is_open() {
        return Ok(false);
    }

    toggle.click();
    Ok(true)
}

/// Escape binding plus sweep results
#[derive(Debug)]
pub struct Accessibility {
    escape: Option<Listener>,
    report: SweepReport,
}

impl Accessibility {
    #[must_use]
    pub const fn report(&self) -> SweepReport {
        self.report
    }

    #[must_use]
    pub const fn has_escape_binding(&self) -> bool {
        self.escape.is_some()
    }
}

/// Binds escape-to-close on the menu and runs the sweep
///
/// A page without a mobile menu still gets the sweep.
///
/// # Errors
///
/// Returns an error if the sweep fails or the keydown listener cannot be attached.
pub fn init(document: &Document, config: &SiteConfig) -> Result<Accessibility> {
    let escape = match dom::element_by_id(document, &config.navigation.menu_id) {
        Ok(menu) => Some(bind_escape(document, &menu, &config.navigation.menu_toggle_id)?),
        Err(SiteError::ElementNotFound { id }) => {
            tracing::warn!(%id, "mobile menu missing; escape-to-close disabled");
            None
        }
        Err(e) => return Err(e),
    };

    let report = sweep(document, &config.interactive_selector)?;
    tracing::debug!(
        patched = report.patched,
        labelled = report.labelled,
        unlabelled = report.unlabelled,
        failed = report.failed,
        "accessibility sweep done"
    );

    Ok(Accessibility { escape, report })
}

fn bind_escape(document: &Document, menu: &Element, toggle_id: &str) -> Result<Listener> {
    let document = document.clone();
    let toggle_id = toggle_id.to_string();

    Listener::new(menu, "keydown", move |event: Event| {
        match close_on_escape(&document, &event, &toggle_id) {
            Ok(true) => tracing::debug!("mobile menu closed with escape"),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "escape-to-close failed"),
        }
    })
}
