//! Structured description of a single dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a dispatch is about to do, captured before the state changes.
///
/// The `Display` form is the one-line diagnostic written by sinks:
///
/// ```rust
/// use statewise::diagnostics::DispatchRecord;
/// use chrono::Utc;
///
/// let record = DispatchRecord {
///     machine: "door".to_string(),
///     event: "open".to_string(),
///     from: "closed".to_string(),
///     to: "opened".to_string(),
///     with_data: false,
///     with_action: true,
///     at: Utc::now(),
/// };
///
/// assert_eq!(record.to_string(), "door: open: closed -> opened; with callback");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Display name of the machine
    pub machine: String,
    /// Event being dispatched
    pub event: String,
    /// State before the transition
    pub from: String,
    /// State after the transition
    pub to: String,
    /// Whether the event carried a payload
    pub with_data: bool,
    /// Whether the matched rule has an action
    pub with_action: bool,
    /// When the dispatch happened
    pub at: DateTime<Utc>,
}

impl fmt::Display for DispatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {} -> {}",
            self.machine, self.event, self.from, self.to
        )?;
        if self.with_data {
            f.write_str("; with event data")?;
        }
        if self.with_action {
            f.write_str("; with callback")?;
        }
        Ok(())
    }
}
