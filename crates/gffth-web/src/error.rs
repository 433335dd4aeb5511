//! Error types for page enhancement modules
//!
//! DOM lookups that the page markup is expected to satisfy still return
//! explicit errors so that a missing element is a handled branch rather
//! than an uncaught exception.

use wasm_bindgen::JsValue;

/// Errors that can occur while wiring page behaviour
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteError {
    /// No `window` global (not running in a browser)
    #[error("failed to get window: window is not available")]
    WindowNotAvailable,

    /// Window has no document
    #[error("failed to get document: document is not available")]
    DocumentNotAvailable,

    /// Element with the given id is absent from the page
    #[error("element not found: #{id}")]
    ElementNotFound { id: String },

    /// `querySelectorAll` rejected a selector
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Adding an event listener failed
    #[error("failed to add '{event}' listener: {reason}")]
    Listener { event: String, reason: String },

    /// Creating or driving an `IntersectionObserver` failed
    #[error("intersection observer error: {0}")]
    Observer(String),

    /// Any other DOM call that threw
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Configuration could not be parsed or failed validation
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SiteError {
    /// Wraps a thrown JS value as a [`SiteError::Dom`]
    #[must_use]
    pub fn dom(err: &JsValue) -> Self {
        Self::Dom(describe_js(err))
    }

    /// Returns true for the not-found branch
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}

/// Renders a thrown JS value as text
///
/// Prefers `Error.message`, then plain strings, then the debug form.
#[must_use]
pub fn describe_js(value: &JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Result type alias for page enhancement operations
pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SiteError::ElementNotFound {
            id: "mobile-menu".to_string(),
        };
        assert_eq!(error.to_string(), "element not found: #mobile-menu");

        let error = SiteError::InvalidSelector {
            selector: "a[".to_string(),
            reason: "syntax".to_string(),
        };
        assert_eq!(error.to_string(), "invalid selector 'a[': syntax");

        let error = SiteError::Config("threshold out of range".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration: threshold out of range"
        );
    }

    #[test]
    fn test_not_found_branch() {
        let missing = SiteError::ElementNotFound {
            id: "x".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(!SiteError::WindowNotAvailable.is_not_found());
    }

    #[test]
    fn test_error_clone() {
        let error = SiteError::Dom("boom".to_string());
        assert_eq!(error.clone(), error);
    }
}
