//! Injected diagnostics for developer-facing messages.
//!
//! Whether diagnostics are enabled is decided once, when a sink is chosen.
//! Disabled instances get [`NoopDiagnostics`] and log unconditionally.

use log::Level;
use std::cell::RefCell;

/// Fixed tag prefixed to every diagnostic message.
pub const DIAGNOSTIC_TAG: &str = "[TOC]";

/// A sink for diagnostic messages.
pub trait Diagnostics {
    fn emit(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn emit(&self, _level: Level, _message: &str) {}
}

/// Forwards to the `log` facade under the `pw_toc` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn emit(&self, level: Level, message: &str) {
        log::log!(target: "pw_toc", level, "{} {}", DIAGNOSTIC_TAG, message);
    }
}

/// A single captured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub level: Level,
    pub message: String,
}

impl DiagnosticRecord {
    /// The message as it would appear on a console.
    pub fn line(&self) -> String {
        format!("{} {}", DIAGNOSTIC_TAG, self.message)
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    records: RefCell<Vec<DiagnosticRecord>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.borrow().clone()
    }

    /// Messages emitted at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Whether a message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, level: Level, message: &str) {
        self.records.borrow_mut().push(DiagnosticRecord {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_levels() {
        let sink = RecordingDiagnostics::new();
        sink.info("TOC initialized");
        sink.warn("No headings found using selector: h2");
        sink.error("Missing content");

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.messages_at(Level::Warn), vec!["No headings found using selector: h2"]);
        assert!(sink.contains(Level::Error, "content"));
        assert!(!sink.contains(Level::Info, "content"));
    }

    #[test]
    fn test_record_line_is_tagged() {
        let record = DiagnosticRecord {
            level: Level::Info,
            message: "Scroll spy initialized".to_string(),
        };
        assert_eq!(record.line(), "[TOC] Scroll spy initialized");
    }

    #[test]
    fn test_noop_accepts_everything() {
        let sink = NoopDiagnostics;
        sink.info("ignored");
        sink.error("ignored");
    }
}
