//! Panic-free DOM helpers
//!
//! Lookups return explicit not-found results. Event listeners and
//! intersection observers are owned by guards that detach on drop, so a
//! module's bindings live exactly as long as the module value.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, DocumentReadyState, Element, Event, EventTarget,
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use crate::error::{Result, SiteError, describe_js};

/// Get window object
///
/// # Errors
///
/// Returns `SiteError::WindowNotAvailable` outside a browser context.
pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SiteError::WindowNotAvailable)
}

/// Get document from the global window
///
/// # Errors
///
/// Returns an error if window or document are missing.
pub fn document() -> Result<Document> {
    window()?.document().ok_or(SiteError::DocumentNotAvailable)
}

/// Looks up an element by id
///
/// # Errors
///
/// Returns `SiteError::ElementNotFound` when no element carries `id`.
pub fn element_by_id(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::ElementNotFound { id: id.to_string() })
}

/// Looks up an element by id and narrows it to `HtmlElement`
///
/// # Errors
///
/// Returns `SiteError::ElementNotFound` when absent, `SiteError::Dom` when
/// the element is not an HTML element (e.g. inline SVG).
pub fn html_element_by_id(document: &Document, id: &str) -> Result<HtmlElement> {
    element_by_id(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::Dom(format!("#{id} is not an HTML element")))
}

/// Collects every element matching `selector` into a `Vec`
///
/// # Errors
///
/// Returns `SiteError::InvalidSelector` if the selector does not parse.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| SiteError::InvalidSelector {
            selector: selector.to_string(),
            reason: describe_js(&e),
        })?;

    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Whether start-up must wait for `DOMContentLoaded`
#[must_use]
pub fn should_defer(state: DocumentReadyState) -> bool {
    state == DocumentReadyState::Loading
}

/// Runs `f` once the document has been parsed
///
/// Runs immediately if parsing already finished.
///
/// # Errors
///
/// Returns `SiteError::Listener` if the `DOMContentLoaded` listener cannot be added.
pub fn on_ready<F>(document: &Document, f: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    if !should_defer(document.ready_state()) {
        f();
        return Ok(());
    }

    let options = AddEventListenerOptions::new();
    options.set_once(true);

    // once_into_js frees itself after the single invocation
    let callback = Closure::once_into_js(move |_event: Event| f());
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            callback.unchecked_ref(),
            &options,
        )
        .map_err(|e| SiteError::Listener {
            event: "DOMContentLoaded".to_string(),
            reason: describe_js(&e),
        })
}

/// An event listener that is removed when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attaches `handler` to `target` for `event`
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Listener` if `addEventListener` throws.
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| SiteError::Listener {
                event: event.to_string(),
                reason: describe_js(&e),
            })?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Event name this listener is bound to
    #[must_use]
    pub const fn event(&self) -> &'static str {
        self.event
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener").field("event", &self.event).finish_non_exhaustive()
    }
}

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// An `IntersectionObserver` that disconnects when dropped
pub struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverClosure,
}

impl Observer {
    /// Creates an observer firing at `threshold` visibility
    ///
    /// `on_entry` receives each entry together with the observer so it can
    /// unsubscribe the target.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Observer` if the browser rejects the options.
    pub fn new<F>(threshold: f64, mut on_entry: F) -> Result<Self>
    where
        F: FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
    {
        let callback: ObserverClosure = Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .for_each(|entry| on_entry(&entry, &observer));
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|e| SiteError::Observer(describe_js(&e)))?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Starts watching every element in `targets`
    pub fn observe_all(&self, targets: &[Element]) {
        targets.iter().for_each(|el| self.observer.observe(el));
    }

    /// Underlying browser observer
    #[must_use]
    pub const fn inner(&self) -> &IntersectionObserver {
        &self.observer
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl std::fmt::Debug for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}
