//! Diagnostic side channel for dispatches.
//!
//! When debug output is enabled on an engine, every successful lookup
//! produces a [`DispatchRecord`] that is handed to the engine's
//! [`DiagnosticSink`] before the state changes. Engines without a sink
//! skip emission entirely.

mod record;
mod sink;

pub use record::DispatchRecord;
pub use sink::{DiagnosticSink, MemorySink, TracingSink};
