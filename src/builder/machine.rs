//! Builder for constructing transition engines.

use crate::builder::error::BuildError;
use crate::core::{Identifier, IntoIdentifiers, MachineData, Rule};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::engine::TransitionEngine;
use std::sync::Arc;

/// Registration queued until `build()`, applied in the order given.
enum Registration<S, E, P> {
    Specific {
        events: Vec<E>,
        states: Vec<S>,
        rule: Rule<S, E, P>,
    },
    Wildcard {
        events: Vec<E>,
        rule: Rule<S, E, P>,
    },
    Default(Rule<S, E, P>),
}

/// Builder for constructing engines with a fluent API.
///
/// # Example
///
/// ```rust
/// use statewise::builder::EngineBuilder;
/// use statewise::core::Rule;
/// use statewise::diagnostics::MemorySink;
///
/// let sink = MemorySink::new();
/// let mut engine = EngineBuilder::<String, String>::new()
///     .initial("draft")
///     .name("document")
///     .debug(true)
///     .sink(sink.clone())
///     .transition("submit", "draft", Rule::to("review"))
///     .default_transition(Rule::to("draft"))
///     .build()
///     .unwrap();
///
/// engine.dispatch("submit").unwrap();
/// assert_eq!(sink.lines(), vec!["document: submit: draft -> review".to_string()]);
/// ```
pub struct EngineBuilder<S, E, P = ()> {
    initial: Option<S>,
    data: MachineData,
    debug: bool,
    sink: Option<Arc<dyn DiagnosticSink>>,
    registrations: Vec<Registration<S, E, P>>,
}

impl<S: Identifier, E: Identifier, P> EngineBuilder<S, E, P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            data: MachineData::default(),
            debug: false,
            sink: Some(Arc::new(TracingSink)),
            registrations: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<S>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Replace the machine data.
    pub fn data(mut self, data: MachineData) -> Self {
        self.data = data;
        self
    }

    /// Set the display name, keeping any other data fields.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.data.name = Some(name.into());
        self
    }

    /// Enable or disable diagnostic output.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Use `sink` for diagnostics instead of `tracing`.
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Share one sink between several engines.
    pub fn shared_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build without any sink; diagnostics are skipped even in debug mode.
    pub fn without_sink(mut self) -> Self {
        self.sink = None;
        self
    }

    /// Queue a specific transition for every `(event, state)` pair.
    pub fn transition(
        mut self,
        events: impl IntoIdentifiers<E>,
        states: impl IntoIdentifiers<S>,
        rule: Rule<S, E, P>,
    ) -> Self {
        self.registrations.push(Registration::Specific {
            events: events.into_identifiers(),
            states: states.into_identifiers(),
            rule,
        });
        self
    }

    /// Queue an any-state transition.
    pub fn wildcard_transition(mut self, events: impl IntoIdentifiers<E>, rule: Rule<S, E, P>) -> Self {
        self.registrations.push(Registration::Wildcard {
            events: events.into_identifiers(),
            rule,
        });
        self
    }

    /// Queue the default transition.
    pub fn default_transition(mut self, rule: Rule<S, E, P>) -> Self {
        self.registrations.push(Registration::Default(rule));
        self
    }

    /// Build the engine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<TransitionEngine<S, E, P>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut engine = TransitionEngine::from_parts(initial, self.data, self.debug, self.sink);
        for registration in self.registrations {
            match registration {
                Registration::Specific {
                    events,
                    states,
                    rule,
                } => engine.register_transition(events, states, rule),
                Registration::Wildcard { events, rule } => {
                    engine.register_wildcard_transition(events, rule)
                }
                Registration::Default(rule) => engine.set_default_transition(rule),
            }
        }

        Ok(engine)
    }
}

impl<S: Identifier, E: Identifier, P> Default for EngineBuilder<S, E, P> {
    fn default() -> Self {
        Self::new()
    }
}
