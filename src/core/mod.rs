//! Core value types the engine is built from.
//!
//! This module contains the pieces a transition table is made of:
//! - Identifiers for states and events via the `Identifier` trait
//! - Transition rules and their actions
//! - The opaque machine data record

mod data;
mod identifier;
mod rule;

pub use data::{MachineData, DEFAULT_MACHINE_NAME};
pub use identifier::{Identifier, IntoIdentifiers};
pub use rule::{Action, ActionResult, Resolution, Rule};
