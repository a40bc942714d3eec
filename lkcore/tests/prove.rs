//! End-to-end proof search over parsed formulas.

use std::time::Duration;

use lkcore::prelude::*;
use lkformal::prelude::*;

fn f(src: &str) -> Expr {
    parse(src).unwrap_or_else(|e| panic!("bad fixture {src:?}: {e}"))
}

/// The three Łukasiewicz axiom schemas.
fn lukasiewicz() -> Vec<Expr> {
    vec![
        f("A > (B > A)"),
        f("(A > (B > C)) > ((A > B) > (A > C))"),
        f("(!B > !A) > ((!B > A) > B)"),
    ]
}

#[test]
fn identity_is_provable() {
    assert!(prove(&lukasiewicz(), &f("A > A")));
}

#[test]
fn identity_is_provable_even_without_axioms() {
    // ⊢ A > A closes by deduction alone.
    assert!(prove(&[], &f("A > A")));
}

#[test]
fn first_axiom_is_provable_as_a_target() {
    // The schema unifies with itself, so specialization puts the goal
    // straight into the premises.
    assert!(prove(&lukasiewicz(), &f("A > (B > A)")));
}

#[test]
fn bare_variable_is_not_provable() {
    assert!(!prove(&lukasiewicz(), &f("A")));
}

#[test]
fn negated_variable_is_not_provable() {
    assert!(!prove(&lukasiewicz(), &f("!A")));
}

#[test]
fn plain_implication_is_not_provable() {
    // P > Q has the countermodel P = true, Q = false; the search must hit
    // a stuck sequent rather than loop.
    assert!(!prove(&lukasiewicz(), &f("P > Q")));
}

#[test]
fn derived_connectives_are_normalized_before_search() {
    // (A * B) > B is a tautology once conjunction is rewritten into the
    // implication/negation basis.
    assert!(prove(&[], &f("A * B > B")));
    // A = A likewise.
    assert!(prove(&[], &f("A = A")));
}

#[test]
fn double_negation_elimination_is_provable() {
    assert!(prove(&[], &f("!!A > A")));
}

#[test]
fn iteration_budget_interrupts_and_resumes() {
    let mut prover = Prover::new(&lukasiewicz(), &f("A > A"));
    let result = prover.run(RunArguments {
        iteration_budget: Some(1),
        ..Default::default()
    });
    assert!(result.status.is_continue());
    assert_eq!(result.run_info.iterations, 1);

    let result = prover.run(RunArguments::default());
    assert!(result.status.is_proved());
}

#[test]
fn generous_time_budget_does_not_interrupt() {
    let mut prover = Prover::new(&[], &f("A > A"));
    let result = prover.run(RunArguments {
        time_budget: Some(Duration::from_secs(60)),
        ..Default::default()
    });
    assert!(result.status.is_proved());
    assert!(result.run_info.elapsed <= Duration::from_secs(60));
}

#[test]
fn trace_ends_with_the_verdict_event() {
    let mut prover = Prover::new(&[], &f("A > A"));
    let result = prover.run(RunArguments {
        record_trace: true,
        ..Default::default()
    });
    assert!(result.status.is_proved());
    let trace = prover.trace();
    assert!(matches!(trace.last().unwrap().event, StepEvent::Closed));

    let mut prover = Prover::new(&[], &f("A"));
    let result = prover.run(RunArguments {
        record_trace: true,
        ..Default::default()
    });
    assert!(result.status.is_refuted());
    let trace = prover.trace();
    assert!(matches!(trace.last().unwrap().event, StepEvent::Stuck));
}

#[test]
fn modus_ponens_discharges_a_known_implication() {
    // {P, P > Q} ⊢ {Q}: both modus ponens children close.
    let sequent = Sequent::new(
        [(f("P"), 0), (f("P > Q"), 0)],
        [(f("Q"), 0)],
    );
    let (side, formula, _) = sequent.pick().unwrap();
    assert!(side.is_left());
    let formula = formula.clone();
    let children = sequent.modus_ponens(&formula);
    assert!(children.iter().all(Sequent::is_closed));
}

#[test]
fn atomic_goal_with_no_premises_is_stuck() {
    let sequent = Sequent::new([], [(f("P"), 0)]);
    assert!(!sequent.is_closed());
    assert!(sequent.pick().is_none());
}
