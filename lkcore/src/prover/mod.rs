//! Breadth-first proof search over sequents.
//!
//! The search keeps a FIFO frontier of sequents and a closed set of the
//! sequents already discharged. Every rewrite rule strictly shrinks the
//! total connective count of a sequent, so the reachable state space is
//! finite and an unbudgeted run always terminates.
//!
//! Verdicts:
//! - the frontier empties out → every branch closed → `Proved`;
//! - some sequent is stuck (no compound formula left, not closed) → a
//!   countermodel exists → `Refuted`.

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use smallvec::SmallVec;
use strum::EnumIs;

use lkformal::expr::Expr;

use crate::sequent::{Sequent, Side};
use crate::unify::{apply_bindings, unify, Bindings};

/// Outcome of a single step or of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIs)]
pub enum SearchStatus {
    /// More sequents remain to be visited (or a budget expired mid-run).
    Continue,
    /// Every branch closed; the target follows from the axioms.
    Proved,
    /// A stuck sequent was found; the target does not follow.
    Refuted,
}

/// The rewrite rule applied at one step, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    LeftNegation,
    RightNegation,
    ModusPonens,
    Deduction,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleKind::LeftNegation => "left-negation",
            RuleKind::RightNegation => "right-negation",
            RuleKind::ModusPonens => "modus-ponens",
            RuleKind::Deduction => "deduction",
        };
        write!(f, "{name}")
    }
}

/// What happened to the sequent visited at one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    /// The sequent closed under the identity rule.
    Closed,
    /// A rewrite rule consumed `formula`.
    Applied { rule: RuleKind, formula: Expr },
    /// No rule was applicable; the search stops with a refutation.
    Stuck,
}

/// One visited sequent together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub sequent: Sequent,
    pub event: StepEvent,
}

impl std::fmt::Display for TraceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.event {
            StepEvent::Closed => write!(f, "{}   [closed]", self.sequent),
            StepEvent::Applied { rule, formula } => {
                write!(f, "{}   [{rule} on {formula}]", self.sequent)
            }
            StepEvent::Stuck => write!(f, "{}   [stuck]", self.sequent),
        }
    }
}

/// Budgets and knobs for [`Prover::run`].
#[derive(Debug, Clone, Default)]
pub struct RunArguments {
    /// Stop after this many visited sequents.
    pub iteration_budget: Option<usize>,
    /// Stop once this much wall time has elapsed.
    pub time_budget: Option<Duration>,
    /// Record a [`TraceStep`] per visited sequent.
    pub record_trace: bool,
}

/// Accounting for a finished (or interrupted) run.
#[derive(Debug, Clone, Copy)]
pub struct RunInfo {
    pub iterations: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct RunResult {
    pub status: SearchStatus,
    pub run_info: RunInfo,
}

/// Breadth-first searcher for a single target formula under a set of
/// axiom schemas.
#[derive(Debug, Clone)]
pub struct Prover {
    frontier: VecDeque<Sequent>,
    closed: HashSet<Sequent>,
    record_trace: bool,
    trace: Vec<TraceStep>,
}

impl Prover {
    /// Set up the search for `target` under the axiom schemas `axioms`.
    ///
    /// Both the target and the axioms are normalized into the
    /// implication/negation basis. Each axiom schema is then specialized
    /// toward the goal once: if the axiom unifies with the goal, the
    /// resulting substitution is applied to it before it joins the
    /// premises. Specialization is never retried against subgoals produced
    /// during the search. Axioms that do not unify enter unchanged.
    pub fn new(axioms: &[Expr], target: &Expr) -> Self {
        let goal = target.normalize().simplify();

        let mut premises = Vec::with_capacity(axioms.len());
        for axiom in axioms {
            let axiom = axiom.normalize().simplify();
            let specialized = unify(&axiom, &goal, Bindings::new()).map(|bindings| {
                log::debug!("specializing {axiom} with {bindings}");
                apply_bindings(&axiom, &bindings)
            });
            premises.push(specialized.unwrap_or(axiom));
        }

        let root = Sequent::new(
            premises.into_iter().map(|p| (p, 0)),
            [(goal, 0)],
        );

        let mut frontier = VecDeque::new();
        frontier.push_back(root);
        Prover {
            frontier,
            closed: HashSet::new(),
            record_trace: false,
            trace: Vec::new(),
        }
    }

    /// Visited sequents with their outcomes, in visit order. Empty unless
    /// the run was started with `record_trace`.
    pub fn trace(&self) -> &[TraceStep] {
        &self.trace
    }

    fn record(&mut self, sequent: &Sequent, event: StepEvent) {
        if self.record_trace {
            self.trace.push(TraceStep {
                sequent: sequent.clone(),
                event,
            });
        }
    }

    /// Visit the next sequent of the frontier.
    ///
    /// Already-closed sequents are skipped without counting as a visit.
    pub fn step(&mut self) -> SearchStatus {
        let sequent = loop {
            match self.frontier.pop_front() {
                None => return SearchStatus::Proved,
                Some(s) if self.closed.contains(&s) => continue,
                Some(s) => break s,
            }
        };
        log::debug!("visiting {sequent}");

        if sequent.is_closed() {
            log::debug!("closed {sequent}");
            self.record(&sequent, StepEvent::Closed);
            self.closed.insert(sequent);
            return SearchStatus::Continue;
        }

        let Some((side, formula, _)) = sequent.pick() else {
            log::debug!("stuck at {sequent}");
            self.record(&sequent, StepEvent::Stuck);
            return SearchStatus::Refuted;
        };
        let formula = formula.clone();

        let mut children: SmallVec<Sequent, 2> = SmallVec::new();
        let rule = match (side, &formula) {
            (Side::Left, Expr::Negation(_)) => {
                children.push(sequent.left_negation(&formula));
                RuleKind::LeftNegation
            }
            (Side::Right, Expr::Negation(_)) => {
                children.push(sequent.right_negation(&formula));
                RuleKind::RightNegation
            }
            (Side::Left, Expr::Implication(..)) => {
                children = sequent.modus_ponens(&formula);
                RuleKind::ModusPonens
            }
            (Side::Right, Expr::Implication(..)) => {
                children.push(sequent.deduction(&formula));
                RuleKind::Deduction
            }
            _ => unreachable!("pick returned a non-compound formula: {formula}"),
        };

        log::debug!("applying {rule} on {formula}");
        self.record(&sequent, StepEvent::Applied { rule, formula });
        self.closed.insert(sequent);
        self.frontier.extend(children);
        SearchStatus::Continue
    }

    /// Drive [`Self::step`] until a verdict is reached or a budget expires.
    ///
    /// On budget expiry the returned status is [`SearchStatus::Continue`];
    /// calling `run` again resumes where the search left off.
    pub fn run(&mut self, args: RunArguments) -> RunResult {
        self.record_trace = args.record_trace;
        let start = Instant::now();
        let mut iterations = 0;

        loop {
            let run_info = RunInfo {
                iterations,
                elapsed: start.elapsed(),
            };
            if let Some(budget) = args.time_budget {
                if run_info.elapsed >= budget {
                    return RunResult {
                        status: SearchStatus::Continue,
                        run_info,
                    };
                }
            }
            if let Some(budget) = args.iteration_budget {
                if iterations >= budget {
                    return RunResult {
                        status: SearchStatus::Continue,
                        run_info,
                    };
                }
            }

            let status = self.step();
            iterations += 1;
            if !status.is_continue() {
                return RunResult {
                    status,
                    run_info: RunInfo {
                        iterations,
                        elapsed: start.elapsed(),
                    },
                };
            }
        }
    }
}

/// Decide `target` under `axioms` with no budget. Terminates for every
/// input because each rewrite strictly shrinks its sequent.
pub fn prove(axioms: &[Expr], target: &Expr) -> bool {
    Prover::new(axioms, target)
        .run(RunArguments::default())
        .status
        .is_proved()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(c: char) -> Expr {
        Expr::var(c)
    }

    #[test]
    fn identity_proves_without_axioms() {
        let target = v('A').implies(v('A'));
        assert!(prove(&[], &target));
    }

    #[test]
    fn bare_variable_is_refuted() {
        assert!(!prove(&[], &v('A')));
    }

    #[test]
    fn negated_variable_is_refuted() {
        assert!(!prove(&[], &v('A').negate()));
    }

    #[test]
    fn axiom_specialization_closes_the_root() {
        // ax1 = A > (B > A) unifies its antecedent with the goal itself,
        // so the root sequent closes immediately.
        let ax1 = v('A').implies(v('B').implies(v('A')));
        let mut prover = Prover::new(&[ax1.clone()], &ax1);
        assert!(prover.step().is_continue());
        assert!(prover.step().is_proved());
    }

    #[test]
    fn budget_expiry_reports_continue() {
        let ax1 = v('A').implies(v('B').implies(v('A')));
        let target = v('C').implies(v('C'));
        let mut prover = Prover::new(&[ax1], &target);
        let result = prover.run(RunArguments {
            iteration_budget: Some(0),
            ..Default::default()
        });
        assert!(result.status.is_continue());
        assert_eq!(result.run_info.iterations, 0);

        // Resuming with no budget finishes the search.
        let result = prover.run(RunArguments::default());
        assert!(result.status.is_proved());
    }

    #[test]
    fn trace_records_visits_in_order() {
        let target = v('A').implies(v('A'));
        let mut prover = Prover::new(&[], &target);
        let result = prover.run(RunArguments {
            record_trace: true,
            ..Default::default()
        });
        assert!(result.status.is_proved());

        let trace = prover.trace();
        assert!(!trace.is_empty());
        assert!(matches!(
            trace[0].event,
            StepEvent::Applied {
                rule: RuleKind::Deduction,
                ..
            }
        ));
        assert!(matches!(trace.last().unwrap().event, StepEvent::Closed));
    }
}
