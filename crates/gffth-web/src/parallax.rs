//! Frame-batched parallax scrolling
//!
//! Scroll events only mark a frame as wanted; the offsets are recomputed in
//! a `requestAnimationFrame` callback, so recomputation happens at most once
//! per rendered frame regardless of how often the browser fires `scroll`.
//! HTML and SVG elements are both moved through their inline style.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CssStyleDeclaration, Document, Element, Event, HtmlElement, SvgElement, Window};

use crate::config::{ParallaxConfig, SiteConfig};
use crate::dom::{self, Listener};
use crate::error::{Result, SiteError, describe_js};

/// Parses a per-element speed attribute
///
/// Absent, blank, unparsable and non-finite values fall back to `default`.
///
/// # Example
///
/// ```
/// use gffth_web::parallax::speed_factor;
///
/// assert_eq!(speed_factor(Some("0.25"), 0.5), 0.25);
/// assert_eq!(speed_factor(None, 0.5), 0.5);
/// assert_eq!(speed_factor(Some("fast"), 0.5), 0.5);
/// ```
#[must_use]
pub fn speed_factor(raw: Option<&str>, default: f64) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Vertical offset for a scroll position and speed factor
#[must_use]
pub fn offset(scroll_y: f64, speed: f64) -> f64 {
    scroll_y * speed
}

/// CSS `transform` value for an offset in pixels
#[must_use]
pub fn transform_value(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// Coalesces scroll events into a single pending frame
#[derive(Debug, Default)]
pub struct FrameGate {
    scheduled: Cell<bool>,
}

impl FrameGate {
    /// Marks a frame as wanted
    ///
    /// Returns true only for the first request since the last
    /// [`FrameGate::complete`], i.e. when the caller must schedule a frame.
    pub fn request(&self) -> bool {
        !self.scheduled.replace(true)
    }

    /// Called at the start of the frame callback
    pub fn complete(&self) {
        self.scheduled.set(false);
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled.get()
    }
}

/// Inline style of an HTML or SVG element
///
/// Other element types (MathML, plain `Element`) have no style to move.
#[must_use]
pub fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(SvgElement::style)
}

/// A parallax element with its speed read once at start-up
#[derive(Debug, Clone)]
pub struct ParallaxItem {
    pub element: Element,
    pub speed: f64,
    style: CssStyleDeclaration,
}

impl ParallaxItem {
    /// Reads the speed attribute of `element`
    ///
    /// Returns `None` for elements without an inline style.
    #[must_use]
    pub fn new(element: &Element, config: &ParallaxConfig) -> Option<Self> {
        let style = style_of(element)?;
        let speed = speed_factor(
            element.get_attribute(&config.speed_attribute).as_deref(),
            config.default_speed,
        );
        Some(Self {
            element: element.clone(),
            speed,
            style,
        })
    }

    /// Applies the transform for `scroll_y`
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Dom` if the style update throws.
    pub fn apply(&self, scroll_y: f64) -> Result<()> {
        self.style
            .set_property("transform", &transform_value(offset(scroll_y, self.speed)))
            .map_err(|e| SiteError::dom(&e))
    }
}

/// Applies transforms for `scroll_y` to every item
///
/// A failing element is logged and does not stop the rest.
pub fn apply_all(items: &[ParallaxItem], scroll_y: f64) {
    for item in items {
        if let Err(e) = item.apply(scroll_y) {
            tracing::warn!(error = %e, "parallax update failed");
        }
    }
}

fn current_scroll(window: &Window) -> f64 {
    window.scroll_y().unwrap_or_else(|e| {
        tracing::warn!(error = %describe_js(&e), "scrollY unavailable");
        0.0
    })
}

/// Scroll listener plus the shared frame callback
pub struct Parallax {
    _scroll: Listener,
    window: Window,
    request_id: Rc<Cell<Option<i32>>>,
    _frame: Rc<Closure<dyn FnMut(f64)>>,
    gate: Rc<FrameGate>,
    items: Rc<[ParallaxItem]>,
}

impl Parallax {
    #[must_use]
    pub fn items(&self) -> &[ParallaxItem] {
        &self.items
    }

    /// Whether a frame is currently pending
    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.gate.is_scheduled()
    }
}

impl Drop for Parallax {
    fn drop(&mut self) {
        // the frame closure is freed with us, so a pending frame must not fire
        if let Some(id) = self.request_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

impl std::fmt::Debug for Parallax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parallax")
            .field("items", &self.items.len())
            .field("frame_pending", &self.frame_pending())
            .finish_non_exhaustive()
    }
}

/// Collects parallax elements and binds the scroll listener
///
/// Offsets are applied once immediately so a restored scroll position is
/// reflected before the first scroll event.
///
/// # Errors
///
/// Returns an error if the selector is invalid or the listener cannot be attached.
pub fn init(window: &Window, document: &Document, config: &SiteConfig) -> Result<Parallax> {
    let elements = dom::query_all(document, &config.parallax.selector)?;
    let total = elements.len();
    let items: Rc<[ParallaxItem]> = elements
        .iter()
        .filter_map(|el| ParallaxItem::new(el, &config.parallax))
        .collect();
    if items.len() < total {
        tracing::debug!(skipped = total - items.len(), "unstyleable parallax elements ignored");
    }

    let gate = Rc::new(FrameGate::default());
    let request_id = Rc::new(Cell::new(None::<i32>));

    let frame = {
        let window = window.clone();
        let gate = Rc::clone(&gate);
        let items = Rc::clone(&items);
        let request_id = Rc::clone(&request_id);
        Rc::new(Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            gate.complete();
            request_id.set(None);
            apply_all(&items, current_scroll(&window));
        }))
    };

    let scroll = {
        let window_for_frame = window.clone();
        let gate = Rc::clone(&gate);
        let frame = Rc::clone(&frame);
        let request_id = Rc::clone(&request_id);
        Listener::new(window, "scroll", move |_event: Event| {
            if !gate.request() {
                return;
            }
            match window_for_frame.request_animation_frame(frame.as_ref().as_ref().unchecked_ref()) {
                Ok(id) => request_id.set(Some(id)),
                Err(e) => {
                    gate.complete();
                    tracing::warn!(error = %describe_js(&e), "failed to request animation frame");
                }
            }
        })?
    };

    apply_all(&items, current_scroll(window));

    tracing::debug!(elements = items.len(), "parallax ready");
    Ok(Parallax {
        _scroll: scroll,
        window: window.clone(),
        request_id,
        _frame: frame,
        gate,
        items,
    })
}
