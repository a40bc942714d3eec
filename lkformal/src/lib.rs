//! Lkformal: the formula language of the lukas theorem prover.
//!
//! This crate defines the propositional formula tree over the seven classical
//! connectives, the rewrite that reduces every formula to the
//! implication/negation basis the proof engine works on, the infix parser,
//! and a width-aware colored pretty-printer.
//!
//! Shape
//!  - Formulas are immutable trees with `Rc`-shared subtrees; equality,
//!    ordering, and hashing are structural, so independently built formulas
//!    compare equal whenever their trees match.
//!  - The parser and the pretty-printer agree on one precedence table
//!    (tightest to loosest: `!`, `*`, `|`, `+`, `>`, `=`, all binary
//!    operators left-associative), so printed formulas round-trip.
//!
//! Example
//! ```
//! use lkformal::prelude::*;
//!
//! let e = parse("A * B > C").unwrap();
//! let n = e.normalize();
//! assert!(n.is_connective_basis());
//! assert_eq!(n.to_string(), "(!(A > !B) > C)");
//! ```

/// Formula trees: constructors, normalization, evaluation, pretty-printing.
pub mod expr;
/// Parser for the infix formula syntax.
pub mod parser;
/// Proposition identifiers.
pub mod variable;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::expr::{Assignment, Expr, ExprKind, pretty::PrettyExpr};
    pub use crate::parser::{ParseError, parse};
    pub use crate::variable::VarName;
}
