//! Build errors for the engine builder.

use thiserror::Error;

/// Errors that can occur when building an engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,
}
