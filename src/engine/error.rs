//! Errors raised while dispatching events.

use thiserror::Error;

/// Errors that can occur during resolution and dispatch.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No specific, wildcard or default rule matched.
    #[error("Transition is undefined: ({event}, {state})")]
    TransitionUndefined { event: String, state: String },

    /// The matched action returned an error. `state` is the state the
    /// machine had already entered when the action ran.
    #[error("Action for event '{event}' failed in state '{state}': {source}")]
    ActionFailed {
        event: String,
        state: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl EngineError {
    /// True for [`EngineError::TransitionUndefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::TransitionUndefined { .. })
    }
}
