use log::Level;
use pw_toc_traits::{DIAGNOSTIC_TAG, Diagnostics};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Writes diagnostics to the browser console, tag first.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn emit(&self, level: Level, message: &str) {
        let tag = JsValue::from_str(DIAGNOSTIC_TAG);
        let message = JsValue::from_str(message);
        match level {
            Level::Error => console::error_2(&tag, &message),
            Level::Warn => console::warn_2(&tag, &message),
            _ => console::log_2(&tag, &message),
        }
    }
}
