//! Proof engine for classical propositional logic.
//!
//! Builds on the formula layer of `lkformal`: formulas are normalized into
//! the implication/negation basis, axiom schemas are specialized toward the
//! target by unification, and a breadth-first search over sequents decides
//! whether the target follows.
//!
//! ```
//! use lkcore::prelude::*;
//! use lkformal::prelude::*;
//!
//! let target = parse("A > A").unwrap();
//! assert!(prove(&[], &target));
//! ```

pub mod prover;
pub mod sequent;
pub mod unify;

pub mod prelude {
    pub use crate::prover::{
        prove, Prover, RuleKind, RunArguments, RunInfo, RunResult, SearchStatus, StepEvent,
        TraceStep,
    };
    pub use crate::sequent::{Sequent, Side};
    pub use crate::unify::{apply_bindings, unify, Bindings};
}
