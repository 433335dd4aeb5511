//! Global error capture
//!
//! Uncaught errors and unhandled promise rejections are converted into an
//! [`ErrorReport`] and handed to an [`ErrorSink`]. Nothing is retried or
//! shown to the visitor.

use std::fmt;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ErrorEvent, Event, EventTarget, PromiseRejectionEvent, Window};

use crate::dom::Listener;
use crate::error::{Result, describe_js};

/// Which global hook caught the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `error` event: uncaught synchronous exception
    Uncaught,
    /// `unhandledrejection` event
    UnhandledRejection,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncaught => write!(f, "uncaught error"),
            Self::UnhandledRejection => write!(f, "unhandled rejection"),
        }
    }
}

/// Script position reported by an `ErrorEvent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A captured failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub stack: Option<String>,
}

impl ErrorReport {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
            stack: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Builds a report from a dispatched `error` event
    #[must_use]
    pub fn from_error_event(event: &ErrorEvent) -> Self {
        let file = event.filename();
        let location = (!file.is_empty()).then(|| SourceLocation {
            file,
            line: event.lineno(),
            column: event.colno(),
        });

        Self {
            kind: ErrorKind::Uncaught,
            message: event.message(),
            location,
            stack: stack_of(&event.error()),
        }
    }

    /// Builds a report from an `unhandledrejection` event
    #[must_use]
    pub fn from_rejection(event: &PromiseRejectionEvent) -> Self {
        let reason = event.reason();
        Self {
            kind: ErrorKind::UnhandledRejection,
            message: describe_js(&reason),
            location: None,
            stack: stack_of(&reason),
        }
    }

    /// Builds a report from any event delivered to one of the global hooks
    #[must_use]
    pub fn from_event(event: &Event) -> Self {
        if let Some(e) = event.dyn_ref::<ErrorEvent>() {
            return Self::from_error_event(e);
        }
        if let Some(e) = event.dyn_ref::<PromiseRejectionEvent>() {
            return Self::from_rejection(e);
        }
        let kind = if event.type_() == REJECTION_EVENT {
            ErrorKind::UnhandledRejection
        } else {
            ErrorKind::Uncaught
        };
        Self::new(kind, event.type_())
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Application Error: {}: {}", self.kind, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " at {location}")?;
        }
        Ok(())
    }
}

fn stack_of(value: &JsValue) -> Option<String> {
    value
        .dyn_ref::<js_sys::Error>()
        .and_then(|err| js_sys::Reflect::get(err, &JsValue::from_str("stack")).ok())
        .and_then(|stack| stack.as_string())
}

/// Destination for captured failures
pub trait ErrorSink {
    fn record(&self, report: &ErrorReport);
}

/// Logs reports through `tracing` at error level
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ErrorSink for ConsoleSink {
    fn record(&self, report: &ErrorReport) {
        match &report.stack {
            Some(stack) => tracing::error!(kind = %report.kind, %stack, "{report}"),
            None => tracing::error!(kind = %report.kind, "{report}"),
        }
    }
}

const ERROR_EVENT: &str = "error";
const REJECTION_EVENT: &str = "unhandledrejection";

/// The two global listeners
#[derive(Debug)]
pub struct ErrorHandler {
    _error: Listener,
    _rejection: Listener,
}

/// Installs the global listeners with the console sink
///
/// # Errors
///
/// Returns `SiteError::Listener` if either listener cannot be attached.
pub fn init(window: &Window) -> Result<ErrorHandler> {
    install(window, Rc::new(ConsoleSink))
}

/// Installs both listeners on `target` (normally the window) feeding `sink`
///
/// # Errors
///
/// Returns `SiteError::Listener` if either listener cannot be attached.
pub fn install(target: &EventTarget, sink: Rc<dyn ErrorSink>) -> Result<ErrorHandler> {
    let error = {
        let sink = Rc::clone(&sink);
        Listener::new(target, ERROR_EVENT, move |event: Event| {
            sink.record(&ErrorReport::from_event(&event));
        })?
    };
    let rejection = Listener::new(target, REJECTION_EVENT, move |event: Event| {
        sink.record(&ErrorReport::from_event(&event));
    })?;

    tracing::debug!("global error handlers installed");
    Ok(ErrorHandler {
        _error: error,
        _rejection: rejection,
    })
}
