//! Table-driven state machine that resolves and dispatches events.

use crate::builder::EngineBuilder;
use crate::core::{Action, Identifier, IntoIdentifiers, MachineData, Resolution, Rule};
use crate::diagnostics::{DiagnosticSink, DispatchRecord, TracingSink};
use crate::engine::error::EngineError;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// State machine driven by a three-tier rule table.
///
/// Lookup for an `(event, state)` pair tries, in order, the specific rule
/// for that pair, the wildcard rule for the event, and the default rule.
/// The first tier that has a rule wins.
///
/// Actions receive `&TransitionEngine`, while [`dispatch`](Self::dispatch)
/// takes `&mut self`; an action therefore cannot dispatch on the engine
/// that is running it. Nested dispatch on one instance is not supported:
///
/// ```compile_fail
/// use statewise::core::Rule;
/// use statewise::engine::TransitionEngine;
///
/// let mut engine: TransitionEngine<String, String> = TransitionEngine::new("a");
/// engine.register_transition(
///     "go",
///     "a",
///     Rule::to("b").action(|machine, _payload| {
///         machine.dispatch("go")?;
///         Ok(())
///     }),
/// );
/// ```
///
/// # Example
///
/// ```rust
/// use statewise::core::Rule;
/// use statewise::engine::TransitionEngine;
///
/// let mut engine: TransitionEngine<String, String> = TransitionEngine::new("draft");
/// engine.register_transition("submit", "draft", Rule::to("review"));
/// engine.set_default_transition(Rule::to("draft"));
///
/// engine.dispatch("submit").unwrap();
/// assert_eq!(engine.current_state(), "review");
///
/// engine.dispatch("approve").unwrap();
/// assert_eq!(engine.current_state(), "draft");
/// ```
pub struct TransitionEngine<S, E, P = ()> {
    current: S,
    transitions: HashMap<(E, S), Rule<S, E, P>>,
    any_state: HashMap<E, Rule<S, E, P>>,
    default: Option<Rule<S, E, P>>,
    data: MachineData,
    debug: bool,
    sink: Option<Arc<dyn DiagnosticSink>>,
    last_action: Option<Action<S, E, P>>,
}

impl<S: Identifier, E: Identifier, P> TransitionEngine<S, E, P> {
    /// Create an engine in `initial` with empty tables and no data.
    pub fn new(initial: impl Into<S>) -> Self {
        Self::with_data(initial, MachineData::default())
    }

    /// Create an engine in `initial` carrying `data`.
    pub fn with_data(initial: impl Into<S>, data: MachineData) -> Self {
        Self::from_parts(
            initial.into(),
            data,
            false,
            Some(Arc::new(TracingSink) as Arc<dyn DiagnosticSink>),
        )
    }

    /// Start a builder for an engine.
    pub fn builder() -> EngineBuilder<S, E, P> {
        EngineBuilder::new()
    }

    pub(crate) fn from_parts(
        initial: S,
        data: MachineData,
        debug: bool,
        sink: Option<Arc<dyn DiagnosticSink>>,
    ) -> Self {
        Self {
            current: initial,
            transitions: HashMap::new(),
            any_state: HashMap::new(),
            default: None,
            data,
            debug,
            sink,
            last_action: None,
        }
    }

    /// Install `rule` for every `(event, state)` pair in the cross product.
    ///
    /// Existing rules for the same pair are replaced. A rule without a next
    /// state keeps each pair in its own state.
    pub fn register_transition(
        &mut self,
        events: impl IntoIdentifiers<E>,
        states: impl IntoIdentifiers<S>,
        rule: Rule<S, E, P>,
    ) {
        let events = events.into_identifiers();
        let states = states.into_identifiers();

        for event in &events {
            for state in &states {
                trace!(event = %event, state = %state, "registering transition");
                self.transitions
                    .insert((event.clone(), state.clone()), rule.clone());
            }
        }
    }

    /// Install `rule` for each event regardless of the current state.
    pub fn register_wildcard_transition(
        &mut self,
        events: impl IntoIdentifiers<E>,
        rule: Rule<S, E, P>,
    ) {
        for event in events.into_identifiers() {
            trace!(event = %event, "registering wildcard transition");
            self.any_state.insert(event, rule.clone());
        }
    }

    /// Install the fallback rule, replacing any previous one.
    pub fn set_default_transition(&mut self, rule: Rule<S, E, P>) {
        trace!("setting default transition");
        self.default = Some(rule);
    }

    /// Find the rule for `event` in `state` (pure).
    ///
    /// Returns the rule's action and its next state, or `state` itself when
    /// the rule does not name one.
    pub fn resolve_transition(&self, event: &E, state: &S) -> Result<Resolution<S, E, P>, EngineError> {
        let key = (event.clone(), state.clone());

        self.transitions
            .get(&key)
            .or_else(|| self.any_state.get(event))
            .or(self.default.as_ref())
            .map(|rule| rule.resolve(state))
            .ok_or_else(|| EngineError::TransitionUndefined {
                event: event.to_string(),
                state: state.to_string(),
            })
    }

    /// Send an event without payload.
    pub fn dispatch(&mut self, event: impl Into<E>) -> Result<(), EngineError> {
        self.fire(event.into(), None)
    }

    /// Send an event with a payload borrowed for the duration of the call.
    pub fn dispatch_with(&mut self, event: impl Into<E>, payload: &P) -> Result<(), EngineError> {
        self.fire(event.into(), Some(payload))
    }

    fn fire(&mut self, event: E, payload: Option<&P>) -> Result<(), EngineError> {
        let Resolution { action, next } = self.resolve_transition(&event, &self.current)?;

        // Emitted before the state changes so `from` is the previous state.
        if self.debug {
            if let Some(sink) = &self.sink {
                sink.emit(&DispatchRecord {
                    machine: self.data.display_name().to_string(),
                    event: event.to_string(),
                    from: self.current.to_string(),
                    to: next.to_string(),
                    with_data: payload.is_some(),
                    with_action: action.is_some(),
                    at: Utc::now(),
                });
            }
        }

        self.last_action = action.clone();
        let previous = std::mem::replace(&mut self.current, next);
        trace!(event = %event, from = %previous, to = %self.current, "state changed");

        match action {
            Some(action) => action
                .invoke(self, payload)
                .map_err(|source| EngineError::ActionFailed {
                    event: event.to_string(),
                    state: self.current.to_string(),
                    source,
                }),
            None => Ok(()),
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Action of the most recent successful dispatch, `None` if that rule
    /// had no action or nothing was dispatched yet.
    pub fn last_action(&self) -> Option<&Action<S, E, P>> {
        self.last_action.as_ref()
    }

    pub fn data(&self) -> &MachineData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut MachineData {
        &mut self.data
    }

    /// Display name used in diagnostics.
    pub fn machine_name(&self) -> &str {
        self.data.display_name()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Turn diagnostic emission on or off.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Replace the diagnostic sink.
    pub fn set_sink(&mut self, sink: impl DiagnosticSink + 'static) {
        self.sink = Some(Arc::new(sink));
    }

    /// Remove the diagnostic sink; debug output is then skipped.
    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Number of `(event, state)` rules.
    pub fn specific_rule_count(&self) -> usize {
        self.transitions.len()
    }

    /// Number of any-state rules.
    pub fn wildcard_rule_count(&self) -> usize {
        self.any_state.len()
    }

    pub fn has_default_transition(&self) -> bool {
        self.default.is_some()
    }
}

impl<S: fmt::Debug, E: fmt::Debug, P> fmt::Debug for TransitionEngine<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("current", &self.current)
            .field("specific_rules", &self.transitions.len())
            .field("wildcard_rules", &self.any_state.len())
            .field("has_default", &self.default.is_some())
            .field("data", &self.data)
            .field("debug", &self.debug)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use std::sync::Mutex;

    type Fsm = TransitionEngine<String, String>;

    fn id(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn new_engine_starts_empty() {
        let engine = Fsm::new("idle");

        assert_eq!(engine.current_state(), "idle");
        assert_eq!(engine.specific_rule_count(), 0);
        assert_eq!(engine.wildcard_rule_count(), 0);
        assert!(!engine.has_default_transition());
        assert!(engine.last_action().is_none());
        assert!(!engine.is_debug());
        assert!(engine.has_sink());
    }

    #[test]
    fn specific_rule_moves_to_next_state() {
        let mut engine = Fsm::new("idle");
        engine.register_transition("start", "idle", Rule::to("running"));

        engine.dispatch("start").unwrap();
        assert_eq!(engine.current_state(), "running");
    }

    #[test]
    fn cross_product_installs_every_pair() {
        let mut engine = Fsm::new("a");
        engine.register_transition(["x", "y"], ["a", "b", "c"], Rule::to("z"));

        assert_eq!(engine.specific_rule_count(), 6);
        for event in ["x", "y"] {
            for state in ["a", "b", "c"] {
                let resolved = engine.resolve_transition(&id(event), &id(state)).unwrap();
                assert_eq!(resolved.next, "z");
            }
        }
    }

    #[test]
    fn omitted_next_state_defaults_per_pair() {
        let mut engine = Fsm::new("a");
        engine.register_transition("go", ["a", "b"], Rule::stay());

        engine.dispatch("go").unwrap();
        assert_eq!(engine.current_state(), "a");

        let mut engine = Fsm::new("b");
        engine.register_transition("go", ["a", "b"], Rule::stay());

        engine.dispatch("go").unwrap();
        assert_eq!(engine.current_state(), "b");
    }

    #[test]
    fn specific_beats_wildcard() {
        let mut engine = Fsm::new("s");
        engine.register_wildcard_transition("e", Rule::to("wild"));
        engine.register_transition("e", "s", Rule::to("specific"));

        engine.dispatch("e").unwrap();
        assert_eq!(engine.current_state(), "specific");
    }

    #[test]
    fn wildcard_beats_default() {
        let mut engine = Fsm::new("s");
        engine.set_default_transition(Rule::to("fallback"));
        engine.register_wildcard_transition("e", Rule::to("wild"));

        engine.dispatch("e").unwrap();
        assert_eq!(engine.current_state(), "wild");
    }

    #[test]
    fn wildcard_without_target_stays() {
        let mut engine = Fsm::new("s");
        engine.register_wildcard_transition(["ping", "noop"], Rule::stay());

        engine.dispatch("ping").unwrap();
        engine.dispatch("noop").unwrap();
        assert_eq!(engine.current_state(), "s");
        assert_eq!(engine.wildcard_rule_count(), 2);
    }

    #[test]
    fn default_without_target_stays() {
        let mut engine = Fsm::new("s");
        engine.set_default_transition(Rule::stay());

        engine.dispatch("anything").unwrap();
        assert_eq!(engine.current_state(), "s");
    }

    #[test]
    fn later_default_replaces_earlier() {
        let mut engine = Fsm::new("s");
        engine.set_default_transition(Rule::to("first"));
        engine.set_default_transition(Rule::to("second"));

        engine.dispatch("x").unwrap();
        assert_eq!(engine.current_state(), "second");
    }

    #[test]
    fn undefined_transition_leaves_state_unchanged() {
        let mut engine = Fsm::new("idle");

        let err = engine.dispatch("x").unwrap_err();
        assert!(matches!(
            &err,
            EngineError::TransitionUndefined { event, state } if event == "x" && state == "idle"
        ));
        assert_eq!(engine.current_state(), "idle");
        assert!(engine.last_action().is_none());
    }

    #[test]
    fn resolve_does_not_mutate() {
        let mut engine = Fsm::new("idle");
        engine.register_transition("start", "idle", Rule::to("running"));

        let resolved = engine.resolve_transition(&id("start"), &id("idle")).unwrap();
        assert_eq!(resolved.next, "running");
        assert_eq!(engine.current_state(), "idle");
    }

    #[test]
    fn resolve_uses_given_state_for_stay() {
        let mut engine = Fsm::new("idle");
        engine.set_default_transition(Rule::stay());

        let resolved = engine.resolve_transition(&id("e"), &id("elsewhere")).unwrap();
        assert_eq!(resolved.next, "elsewhere");
    }

    #[test]
    fn action_sees_new_state_and_payload() {
        let seen: Arc<Mutex<Vec<(String, Option<u32>)>>> = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);

        let mut engine: TransitionEngine<String, String, u32> = TransitionEngine::new("idle");
        engine.register_transition(
            "start",
            "idle",
            Rule::to("running").action(move |m: &TransitionEngine<String, String, u32>, p: Option<&u32>| {
                log.lock().unwrap().push((m.current_state().clone(), p.copied()));
                Ok(())
            }),
        );
        engine.register_transition(
            "tick",
            "running",
            Rule::stay().action({
                let log = Arc::clone(&seen);
                move |m: &TransitionEngine<String, String, u32>, p: Option<&u32>| {
                    log.lock().unwrap().push((m.current_state().clone(), p.copied()));
                    Ok(())
                }
            }),
        );

        engine.dispatch("start").unwrap();
        engine.dispatch_with("tick", &7).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(id("running"), None), (id("running"), Some(7))]
        );
    }

    #[test]
    fn last_action_tracks_most_recent_rule() {
        let action: Action<String, String> = Action::new(|_m, _p| Ok(()));

        let mut engine = Fsm::new("a");
        engine.register_transition("with", "a", Rule::to("b").with_action(action.clone()));
        engine.register_transition("without", "b", Rule::to("a"));

        engine.dispatch("with").unwrap();
        assert!(engine.last_action().unwrap().ptr_eq(&action));

        engine.dispatch("without").unwrap();
        assert!(engine.last_action().is_none());
    }

    #[test]
    fn failing_action_propagates_after_state_change() {
        let mut engine = Fsm::new("draft");
        engine.register_transition(
            "save",
            "draft",
            Rule::to("saved").action(|_m, _p| Err("disk full".into())),
        );

        let err = engine.dispatch("save").unwrap_err();
        match err {
            EngineError::ActionFailed { event, state, source } => {
                assert_eq!(event, "save");
                assert_eq!(state, "saved");
                assert_eq!(source.to_string(), "disk full");
            }
            other => panic!("Expected ActionFailed, got {other:?}"),
        }
        assert_eq!(engine.current_state(), "saved");
        assert!(engine.last_action().is_some());
    }

    #[test]
    fn debug_line_reports_previous_state() {
        let sink = MemorySink::new();
        let mut engine = Fsm::with_data("closed", MachineData::named("door"));
        engine.set_sink(sink.clone());
        engine.set_debug(true);
        engine.register_transition("open", "closed", Rule::to("opened").action(|_m, _p| Ok(())));

        engine.dispatch_with("open", &()).unwrap();

        assert_eq!(
            sink.lines(),
            vec!["door: open: closed -> opened; with event data; with callback"]
        );
    }

    #[test]
    fn debug_disabled_emits_nothing() {
        let sink = MemorySink::new();
        let mut engine = Fsm::new("a");
        engine.set_sink(sink.clone());
        engine.register_transition("go", "a", Rule::to("b"));

        engine.dispatch("go").unwrap();
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn missing_sink_is_skipped() {
        let mut engine = Fsm::new("a");
        engine.clear_sink();
        engine.set_debug(true);
        engine.register_transition("go", "a", Rule::to("b"));

        engine.dispatch("go").unwrap();
        assert_eq!(engine.current_state(), "b");
        assert!(!engine.has_sink());
    }

    #[test]
    fn failed_lookup_emits_nothing() {
        let sink = MemorySink::new();
        let mut engine = Fsm::new("a");
        engine.set_sink(sink.clone());
        engine.set_debug(true);

        assert!(engine.dispatch("nope").is_err());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn rules_can_be_added_after_dispatch() {
        let mut engine = Fsm::new("a");
        engine.register_transition("go", "a", Rule::to("b"));
        engine.dispatch("go").unwrap();

        engine.register_transition("back", "b", Rule::to("a"));
        engine.dispatch("back").unwrap();
        assert_eq!(engine.current_state(), "a");
    }

    #[test]
    fn data_is_visible_to_actions() {
        let names = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&names);

        let mut engine = Fsm::with_data("a", MachineData::named("cart"));
        engine.register_wildcard_transition(
            "touch",
            Rule::stay().action(move |m: &Fsm, _p: Option<&()>| {
                log.lock().unwrap().push(m.data().display_name().to_string());
                Ok(())
            }),
        );

        engine.dispatch("touch").unwrap();
        assert_eq!(*names.lock().unwrap(), vec!["cart".to_string()]);
        assert_eq!(engine.machine_name(), "cart");
    }
}
