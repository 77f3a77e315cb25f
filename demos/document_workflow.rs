//! Document Approval Workflow
//!
//! This example drives a document through a review process with a
//! transition table.
//!
//! Key concepts:
//! - Specific transitions for the happy path (Draft -> Review -> Approved -> Published)
//! - A wildcard transition that withdraws the document from any state
//! - A default transition that sends unexpected events back to Draft
//! - Actions with event payloads (audit logging)
//! - Diagnostic lines captured by a sink
//!
//! Run with: cargo run --example document_workflow

use statewise::builder::EngineBuilder;
use statewise::core::Rule;
use statewise::diagnostics::MemorySink;
use statewise::engine::TransitionEngine;
use statewise::identifier_enum;

identifier_enum! {
    enum DocState {
        Draft,
        Review,
        Approved,
        Published,
        Withdrawn,
    }
}

identifier_enum! {
    enum DocEvent {
        Submit,
        Approve,
        Reject,
        Publish,
        Withdraw,
        Edit,
    }
}

// Event payload: who triggered the event
struct Reviewer {
    name: &'static str,
}

type Workflow = TransitionEngine<DocState, DocEvent, Reviewer>;

fn audit(machine: &Workflow, reviewer: Option<&Reviewer>) -> statewise::ActionResult {
    let who = reviewer.map_or("system", |r| r.name);
    println!(
        "  [Audit] {} is now {} (by {})",
        machine.machine_name(),
        machine.current_state(),
        who
    );
    Ok(())
}

fn main() {
    println!("=== Document Approval Workflow ===\n");

    let sink = MemorySink::new();
    let mut machine = EngineBuilder::<DocState, DocEvent, Reviewer>::new()
        .initial(DocState::Draft)
        .name("doc-123")
        .debug(true)
        .sink(sink.clone())
        .transition(DocEvent::Submit, DocState::Draft, Rule::to(DocState::Review).action(audit))
        .transition(DocEvent::Approve, DocState::Review, Rule::to(DocState::Approved).action(audit))
        .transition(DocEvent::Reject, DocState::Review, Rule::to(DocState::Draft).action(audit))
        .transition(DocEvent::Publish, DocState::Approved, Rule::to(DocState::Published).action(audit))
        .transition(DocEvent::Edit, [DocState::Draft, DocState::Review], Rule::stay())
        .wildcard_transition(DocEvent::Withdraw, Rule::to(DocState::Withdrawn).action(audit))
        .default_transition(Rule::to(DocState::Draft))
        .build()
        .expect("workflow has an initial state");

    println!("Created document workflow state machine");
    println!("States: Draft -> Review -> Approved -> Published\n");

    let alice = Reviewer { name: "alice" };
    let steps = [
        (DocEvent::Edit, None),
        (DocEvent::Submit, Some(&alice)),
        (DocEvent::Reject, Some(&alice)),
        (DocEvent::Submit, None),
        (DocEvent::Approve, Some(&alice)),
        (DocEvent::Edit, None),
        (DocEvent::Submit, None),
        (DocEvent::Approve, Some(&alice)),
        (DocEvent::Publish, None),
    ];

    for (event, reviewer) in steps {
        println!("Event: {event}");
        let result = match reviewer {
            Some(reviewer) => machine.dispatch_with(event, reviewer),
            None => machine.dispatch(event),
        };
        if let Err(err) = result {
            println!("  ✗ {err}");
        }
    }

    println!("\nFinal state: {}\n", machine.current_state());

    println!("Dispatch log:");
    for line in sink.lines() {
        println!("  {line}");
    }

    println!("\nKey Takeaways:");
    println!("- Specific rules encode the happy path");
    println!("- Edit in Approved has no specific rule, so the default sends it back to Draft");
    println!("- Withdraw would apply from any state through the wildcard rule");
    println!("- Actions run after the state has changed");

    println!("\n=== Example Complete ===");
}
