//! Transition rules and the actions they carry.

use crate::engine::TransitionEngine;
use std::fmt;
use std::sync::Arc;

/// Result returned by transition actions.
///
/// An `Err` is propagated out of `dispatch` as
/// [`EngineError::ActionFailed`](crate::engine::EngineError::ActionFailed).
pub type ActionResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Signature of a transition action: the engine (already in its new state)
/// and the optional event payload.
type ActionFn<S, E, P> = dyn Fn(&TransitionEngine<S, E, P>, Option<&P>) -> ActionResult + Send + Sync;

/// Shared handle to a transition callback.
///
/// Cloning is cheap and keeps identity, so the engine's
/// [`last_action`](TransitionEngine::last_action) can be compared against a
/// handle the host kept with [`Action::ptr_eq`].
pub struct Action<S, E, P = ()> {
    callback: Arc<ActionFn<S, E, P>>,
}

impl<S, E, P> Action<S, E, P> {
    /// Wrap a closure as an action.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&TransitionEngine<S, E, P>, Option<&P>) -> ActionResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the action against an engine.
    pub fn invoke(&self, engine: &TransitionEngine<S, E, P>, payload: Option<&P>) -> ActionResult {
        (self.callback)(engine, payload)
    }

    /// True when both handles point at the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<S, E, P> Clone for Action<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<S, E, P> fmt::Debug for Action<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

/// A transition rule: an optional action and an optional next state.
///
/// A rule without a next state keeps the machine where it is. The target is
/// left unresolved until lookup, so a rule registered for several states
/// stays in whichever of those states the machine occupies at dispatch time.
///
/// # Example
///
/// ```rust
/// use statewise::core::Rule;
///
/// let submit: Rule<String, String> = Rule::to("review");
/// assert_eq!(submit.next_state().map(String::as_str), Some("review"));
/// assert!(!submit.has_action());
///
/// let ping: Rule<String, String> = Rule::stay().action(|_engine, _payload| Ok(()));
/// assert!(ping.next_state().is_none());
/// assert!(ping.has_action());
/// ```
pub struct Rule<S, E, P = ()> {
    action: Option<Action<S, E, P>>,
    next: Option<S>,
}

impl<S, E, P> Rule<S, E, P> {
    /// Rule with no action that stays in the current state.
    pub fn new() -> Self {
        Self {
            action: None,
            next: None,
        }
    }

    /// Same as [`Rule::new`], reads better at registration sites.
    pub fn stay() -> Self {
        Self::new()
    }

    /// Rule that moves to `next`.
    pub fn to(next: impl Into<S>) -> Self {
        Self {
            action: None,
            next: Some(next.into()),
        }
    }

    /// Attach a callback, replacing any previous one.
    pub fn action<F>(mut self, callback: F) -> Self
    where
        F: Fn(&TransitionEngine<S, E, P>, Option<&P>) -> ActionResult + Send + Sync + 'static,
    {
        self.action = Some(Action::new(callback));
        self
    }

    /// Attach an existing action handle.
    pub fn with_action(mut self, action: Action<S, E, P>) -> Self {
        self.action = Some(action);
        self
    }

    /// Declared next state, `None` when the rule stays in place.
    pub fn next_state(&self) -> Option<&S> {
        self.next.as_ref()
    }

    /// Attached action handle, if any.
    pub fn action_handle(&self) -> Option<&Action<S, E, P>> {
        self.action.as_ref()
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

impl<S: Clone, E, P> Rule<S, E, P> {
    /// Resolve the rule against the state it was looked up for.
    pub(crate) fn resolve(&self, state: &S) -> Resolution<S, E, P> {
        Resolution {
            action: self.action.clone(),
            next: self.next.clone().unwrap_or_else(|| state.clone()),
        }
    }
}

impl<S, E, P> Default for Rule<S, E, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, E, P> Clone for Rule<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
            next: self.next.clone(),
        }
    }
}

impl<S: fmt::Debug, E, P> fmt::Debug for Rule<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("action", &self.action)
            .field("next", &self.next)
            .finish()
    }
}

/// Outcome of a successful lookup: the action to run and the state to enter.
pub struct Resolution<S, E, P = ()> {
    pub action: Option<Action<S, E, P>>,
    pub next: S,
}

impl<S: fmt::Debug, E, P> fmt::Debug for Resolution<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("action", &self.action)
            .field("next", &self.next)
            .finish()
    }
}
