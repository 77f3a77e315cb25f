//! Statewise: a table-driven finite state machine engine
//!
//! Control flow is described as a table of transition rules instead of
//! nested conditionals. Given the current state and an incoming event, the
//! engine picks a rule, moves to the rule's next state, and runs the rule's
//! action.
//!
//! # Core Concepts
//!
//! - **Specific rules**: keyed by an exact `(event, state)` pair
//! - **Wildcard rules**: keyed by event only, apply in any state
//! - **Default rule**: fallback when nothing else matches
//! - **Actions**: optional callbacks run after the state has changed
//! - **Diagnostics**: optional one-line dispatch records sent to a sink
//!
//! Lookup precedence is specific, then wildcard, then default. When no tier
//! matches, dispatch fails with [`EngineError::TransitionUndefined`] and
//! leaves the machine untouched.
//!
//! # Example
//!
//! ```rust
//! use statewise::{EngineError, Rule, TransitionEngine};
//!
//! let mut engine: TransitionEngine<String, String> = TransitionEngine::new("locked");
//! engine.register_transition("coin", "locked", Rule::to("unlocked"));
//! engine.register_transition("push", "unlocked", Rule::to("locked"));
//! engine.register_transition("push", "locked", Rule::stay());
//!
//! engine.dispatch("push").unwrap();
//! assert_eq!(engine.current_state(), "locked");
//!
//! engine.dispatch("coin").unwrap();
//! assert_eq!(engine.current_state(), "unlocked");
//!
//! let err = engine.dispatch("kick").unwrap_err();
//! assert!(matches!(err, EngineError::TransitionUndefined { .. }));
//! assert_eq!(engine.current_state(), "unlocked");
//! ```

pub mod builder;
pub mod core;
pub mod diagnostics;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, EngineBuilder};
pub use self::core::{Action, ActionResult, Identifier, IntoIdentifiers, MachineData, Rule};
pub use diagnostics::{DiagnosticSink, DispatchRecord, MemorySink, TracingSink};
pub use engine::{EngineError, TransitionEngine};
