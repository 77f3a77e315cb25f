//! Builder API for ergonomic engine construction.
//!
//! This module provides a fluent builder for configuring engines and the
//! `identifier_enum!` macro for declaring enum identifiers with minimal
//! boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::EngineBuilder;
