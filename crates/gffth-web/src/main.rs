//! WASM entry point for bundlers that expect a binary (Trunk)
//!
//! Starts the enhancements once the document is ready.

fn main() {
    if let Err(e) = gffth_web::app::start(None) {
        web_sys::console::error_1(&format!("gffth: failed to start: {e}").into());
    }
}
