//! Browser tests for global error capture
//!
//! Events are dispatched on a standalone `EventTarget` so the test
//! harness's own window hooks never see them.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use gffth_web::error_handler::{ErrorKind, ErrorReport, ErrorSink, install};
use wasm_bindgen_test::*;
use web_sys::{ErrorEvent, ErrorEventInit, Event, EventTarget};

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Default)]
struct RecordingSink {
    reports: RefCell<Vec<ErrorReport>>,
}

impl ErrorSink for RecordingSink {
    fn record(&self, report: &ErrorReport) {
        self.reports.borrow_mut().push(report.clone());
    }
}

fn error_event(message: &str) -> ErrorEvent {
    let init = ErrorEventInit::new();
    init.set_message(message);
    init.set_filename("https://example.test/app.js");
    init.set_lineno(42);
    init.set_colno(7);
    ErrorEvent::new_with_event_init_dict("error", &init).unwrap()
}

#[wasm_bindgen_test]
fn test_uncaught_error_logged_exactly_once() {
    let target = EventTarget::new().unwrap();
    let sink = Rc::new(RecordingSink::default());
    let _handler = install(&target, sink.clone()).unwrap();

    target.dispatch_event(&error_event("boom")).unwrap();

    let reports = sink.reports.borrow();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, ErrorKind::Uncaught);
    assert_eq!(reports[0].message, "boom");
    assert_eq!(
        reports[0].location.as_ref().map(ToString::to_string).as_deref(),
        Some("https://example.test/app.js:42:7")
    );
}

#[wasm_bindgen_test]
fn test_handling_continues_after_error() {
    let target = EventTarget::new().unwrap();
    let sink = Rc::new(RecordingSink::default());
    let _handler = install(&target, sink.clone()).unwrap();

    target.dispatch_event(&error_event("first")).unwrap();
    target.dispatch_event(&error_event("second")).unwrap();

    let messages: Vec<String> = sink.reports.borrow().iter().map(|r| r.message.clone()).collect();
    assert_eq!(messages, ["first", "second"]);
}

#[wasm_bindgen_test]
fn test_plain_rejection_event_classified() {
    let target = EventTarget::new().unwrap();
    let sink = Rc::new(RecordingSink::default());
    let _handler = install(&target, sink.clone()).unwrap();

    target
        .dispatch_event(&Event::new("unhandledrejection").unwrap())
        .unwrap();

    let reports = sink.reports.borrow();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, ErrorKind::UnhandledRejection);
}

#[wasm_bindgen_test]
fn test_dropped_handler_stops_recording() {
    let target = EventTarget::new().unwrap();
    let sink = Rc::new(RecordingSink::default());
    let handler = install(&target, sink.clone()).unwrap();

    drop(handler);
    target.dispatch_event(&error_event("ignored")).unwrap();

    assert!(sink.reports.borrow().is_empty());
}
