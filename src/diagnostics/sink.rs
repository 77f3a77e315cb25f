//! Destinations for dispatch diagnostics.

use super::record::DispatchRecord;
use std::sync::{Arc, Mutex, PoisonError};

/// Receiver for dispatch diagnostics.
///
/// Emission must not fail or block dispatch; sinks that can lose output
/// drop it quietly.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, record: &DispatchRecord);
}

/// Forwards diagnostics to `tracing` at `DEBUG` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, record: &DispatchRecord) {
        tracing::debug!(
            machine = %record.machine,
            event = %record.event,
            from = %record.from,
            to = %record.to,
            "{}",
            record
        );
    }
}

/// Collects rendered diagnostic lines in memory.
///
/// Clones share the same buffer, so a host can keep one handle and give
/// another to the engine.
///
/// # Example
///
/// ```rust
/// use statewise::diagnostics::MemorySink;
/// use statewise::engine::TransitionEngine;
/// use statewise::core::Rule;
///
/// let sink = MemorySink::new();
/// let mut engine: TransitionEngine<String, String> = TransitionEngine::new("idle");
/// engine.set_sink(sink.clone());
/// engine.set_debug(true);
/// engine.register_transition("start", "idle", Rule::to("running"));
///
/// engine.dispatch("start").unwrap();
/// assert_eq!(sink.lines(), vec!["FSM: start: idle -> running".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, record: &DispatchRecord) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.to_string());
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn emit(&self, record: &DispatchRecord) {
        (**self).emit(record)
    }
}
