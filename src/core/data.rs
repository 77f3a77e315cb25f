//! Machine data carried by every engine.
//!
//! The record is opaque to the engine except for `name`, which labels
//! diagnostic output. Hosts keep whatever else they need in `fields`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label used in diagnostics when the machine has no name.
pub const DEFAULT_MACHINE_NAME: &str = "FSM";

/// Opaque data attached to an engine at construction.
///
/// # Example
///
/// ```rust
/// use statewise::core::MachineData;
/// use serde_json::json;
///
/// let data = MachineData::named("checkout").with_field("retries", json!(3));
///
/// assert_eq!(data.display_name(), "checkout");
/// assert_eq!(data.field("retries"), Some(&json!(3)));
///
/// let parsed: MachineData =
///     serde_json::from_str(r#"{ "name": "login", "theme": "dark" }"#).unwrap();
/// assert_eq!(parsed.display_name(), "login");
/// assert_eq!(parsed.field("theme"), Some(&json!("dark")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineData {
    /// Human-readable machine name used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Any other host-defined fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MachineData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data carrying only a display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: Map::new(),
        }
    }

    /// Add or replace a host-defined field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Look up a host-defined field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Name for diagnostics, falling back to [`DEFAULT_MACHINE_NAME`].
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_MACHINE_NAME,
        }
    }
}
