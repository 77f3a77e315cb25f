//! The transition engine.
//!
//! # Key Concepts
//!
//! - **Rule tables**: specific `(event, state)` rules, wildcard rules keyed by
//!   event, and a single default rule
//! - **Resolution**: pure lookup with specific → wildcard → default precedence
//! - **Dispatch**: resolve, record the action, change state, then run the action

mod error;
mod machine;

pub use error::EngineError;
pub use machine::TransitionEngine;
