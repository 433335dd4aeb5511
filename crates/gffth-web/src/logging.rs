//! Browser console logging for `tracing`
//!
//! `ConsoleLayer` renders each event as `LEVEL target: message key=value ...`
//! and writes it through the console method matching its level, so the
//! devtools severity filter keeps working.

use std::fmt::{self, Write as _};
use std::sync::OnceLock;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};

static INSTALLED: OnceLock<LevelFilter> = OnceLock::new();

/// Collects the message and structured fields of an event
#[derive(Debug, Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}

/// Formats a single console line
#[must_use]
pub fn format_line(level: &Level, target: &str, message: &str, fields: &str) -> String {
    format!("{level} {target}: {message}{fields}")
}

/// `tracing` layer that writes to `web_sys::console`
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let line = format_line(meta.level(), meta.target(), &visitor.message, &visitor.fields);
        let line = wasm_bindgen::JsValue::from_str(&line);

        match *meta.level() {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            Level::DEBUG => web_sys::console::debug_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }
}

/// Installs the console subscriber as the global default
///
/// Only the first call takes effect; later calls return the level that
/// was installed.
pub fn init(level: LevelFilter) -> LevelFilter {
    *INSTALLED.get_or_init(|| {
        let subscriber = tracing_subscriber::registry()
            .with(level)
            .with(ConsoleLayer);
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            web_sys::console::warn_1(&"gffth: a global tracing subscriber was already set".into());
        }
        level
    })
}
