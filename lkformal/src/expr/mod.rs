//! Formula trees: constructors, normalization, and evaluation.
//!
//! Role
//! - Provide the closed sum type covering all seven propositional connectives.
//! - Builder sugar (`implies`, `and`, ...) lets tests and callers assemble
//!   formulas without spelling out the `Rc` plumbing.
//! - [`Expr::normalize`] rewrites any formula to the implication/negation
//!   basis the proof engine operates on; [`Expr::simplify`] collapses a
//!   top-level double negation.
//!
//! Equality semantics
//! - `Expr` compares, orders, and hashes structurally; two formulas built
//!   independently are equal whenever their trees match. Subtrees are shared
//!   through `Rc`, so cloning a formula never deep-copies.
//!
//! Example
//! ```
//! use lkformal::expr::Expr;
//!
//! let a = Expr::var('A');
//! let law = a.clone().implies(Expr::var('B').implies(a));
//! assert_eq!(law.to_string(), "(A > (B > A))");
//! assert_eq!(law.normalize(), law);
//! ```
pub mod pretty;

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use smallvec::SmallVec;
use strum::{EnumDiscriminants, EnumIs, IntoDiscriminant};

use crate::variable::VarName;

/// Truth assignment for the free variables of a formula.
pub type Assignment = BTreeMap<VarName, bool>;

/// A propositional formula.
///
/// Immutable once constructed; every transformation produces a new tree and
/// shares untouched subtrees through `Rc`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumDiscriminants)]
#[strum_discriminants(derive(PartialOrd, Ord, Hash))]
#[strum_discriminants(name(ExprKind))]
#[strum_discriminants(vis(pub))]
pub enum Expr {
    /// Atomic proposition.
    Variable(VarName),
    /// `!p`
    Negation(Rc<Expr>),
    /// `p > q`
    Implication(Rc<Expr>, Rc<Expr>),
    /// `p * q`
    Conjunction(Rc<Expr>, Rc<Expr>),
    /// `p | q`
    Disjunction(Rc<Expr>, Rc<Expr>),
    /// `p + q`
    ExclusiveOr(Rc<Expr>, Rc<Expr>),
    /// `p = q`
    Equivalence(Rc<Expr>, Rc<Expr>),
}

#[inline]
fn neg(inner: Expr) -> Expr {
    Expr::Negation(Rc::new(inner))
}

#[inline]
fn imp(left: Expr, right: Expr) -> Expr {
    Expr::Implication(Rc::new(left), Rc::new(right))
}

impl Expr {
    /// Atomic proposition with the given letter.
    #[inline]
    pub fn var(name: impl Into<VarName>) -> Expr {
        Expr::Variable(name.into())
    }

    /// Negate this formula: `!self`.
    #[inline]
    pub fn negate(self) -> Expr {
        neg(self)
    }

    /// Implication `self > other`.
    #[inline]
    pub fn implies(self, other: Expr) -> Expr {
        imp(self, other)
    }

    /// Conjunction `self * other`.
    #[inline]
    pub fn and(self, other: Expr) -> Expr {
        Expr::Conjunction(Rc::new(self), Rc::new(other))
    }

    /// Disjunction `self | other`.
    #[inline]
    pub fn or(self, other: Expr) -> Expr {
        Expr::Disjunction(Rc::new(self), Rc::new(other))
    }

    /// Exclusive or `self + other`.
    #[inline]
    pub fn xor(self, other: Expr) -> Expr {
        Expr::ExclusiveOr(Rc::new(self), Rc::new(other))
    }

    /// Equivalence `self = other`.
    #[inline]
    pub fn iff(self, other: Expr) -> Expr {
        Expr::Equivalence(Rc::new(self), Rc::new(other))
    }

    /// The discriminant identifying the outer connective.
    #[inline]
    pub fn kind(&self) -> ExprKind {
        self.discriminant()
    }

    /// Rewrite to the implication/negation basis.
    ///
    /// Total, never fails. Applied bottom-up:
    /// - `p * q`  becomes `!(p > !q)`
    /// - `p | q`  becomes `!p > q`
    /// - `p + q`  becomes `(!p > !q) > !(p > q)`
    /// - `p = q`  becomes the conjunction rewrite of `(p > q) * (q > p)`
    ///
    /// Variables, negations, and implications recurse structurally, so the
    /// operation is idempotent.
    pub fn normalize(&self) -> Expr {
        match self {
            Expr::Variable(_) => self.clone(),
            Expr::Negation(inner) => neg(inner.normalize()),
            Expr::Implication(l, r) => imp(l.normalize(), r.normalize()),
            Expr::Conjunction(l, r) => neg(imp(l.normalize(), neg(r.normalize()))),
            Expr::Disjunction(l, r) => imp(neg(l.normalize()), r.normalize()),
            Expr::ExclusiveOr(l, r) => {
                let (l, r) = (l.normalize(), r.normalize());
                imp(
                    imp(neg(l.clone()), neg(r.clone())),
                    neg(imp(l, r)),
                )
            }
            Expr::Equivalence(l, r) => {
                let (l, r) = (l.normalize(), r.normalize());
                let forward = imp(l.clone(), r.clone());
                let backward = imp(r, l);
                neg(imp(forward, neg(backward)))
            }
        }
    }

    /// Collapse a double negation: `!!p` becomes `p`.
    ///
    /// Single pass: a negation over anything but another negation is
    /// returned unchanged, while binary connectives rebuild with simplified
    /// children. Truth-table semantics are preserved.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Variable(_) => self.clone(),
            Expr::Negation(inner) => match inner.as_ref() {
                Expr::Negation(x) => x.as_ref().clone(),
                _ => self.clone(),
            },
            Expr::Implication(l, r) => imp(l.simplify(), r.simplify()),
            Expr::Conjunction(l, r) => l.simplify().and(r.simplify()),
            Expr::Disjunction(l, r) => l.simplify().or(r.simplify()),
            Expr::ExclusiveOr(l, r) => l.simplify().xor(r.simplify()),
            Expr::Equivalence(l, r) => l.simplify().iff(r.simplify()),
        }
    }

    /// Evaluate under the classical truth-table semantics.
    ///
    /// Unassigned variables read as `false`; `p > q` is `!p | q`.
    pub fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Expr::Variable(v) => assignment.get(v).copied().unwrap_or(false),
            Expr::Negation(inner) => !inner.eval(assignment),
            Expr::Implication(l, r) => !l.eval(assignment) || r.eval(assignment),
            Expr::Conjunction(l, r) => l.eval(assignment) && r.eval(assignment),
            Expr::Disjunction(l, r) => l.eval(assignment) || r.eval(assignment),
            Expr::ExclusiveOr(l, r) => l.eval(assignment) ^ r.eval(assignment),
            Expr::Equivalence(l, r) => l.eval(assignment) == r.eval(assignment),
        }
    }

    /// Collect the free variables of this formula.
    pub fn variables(&self) -> BTreeSet<VarName> {
        let mut out = BTreeSet::new();
        let mut stack: SmallVec<&Expr, 8> = SmallVec::new();
        stack.push(self);
        while let Some(e) = stack.pop() {
            match e {
                Expr::Variable(v) => {
                    out.insert(*v);
                }
                Expr::Negation(inner) => stack.push(inner),
                Expr::Implication(l, r)
                | Expr::Conjunction(l, r)
                | Expr::Disjunction(l, r)
                | Expr::ExclusiveOr(l, r)
                | Expr::Equivalence(l, r) => {
                    stack.push(l);
                    stack.push(r);
                }
            }
        }
        out
    }

    /// True iff the tree uses only the variable/negation/implication alphabet.
    ///
    /// Holds for every output of [`Expr::normalize`]; the sequent layer
    /// asserts it on entry in debug builds.
    pub fn is_connective_basis(&self) -> bool {
        let mut stack: SmallVec<&Expr, 8> = SmallVec::new();
        stack.push(self);
        while let Some(e) = stack.pop() {
            match e {
                Expr::Variable(_) => {}
                Expr::Negation(inner) => stack.push(inner),
                Expr::Implication(l, r) => {
                    stack.push(l);
                    stack.push(r);
                }
                _ => return false,
            }
        }
        true
    }
}

impl ExprKind {
    /// Operator glyph of a binary connective, or `None` for variable/negation.
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            ExprKind::Implication => Some(">"),
            ExprKind::Conjunction => Some("*"),
            ExprKind::Disjunction => Some("|"),
            ExprKind::ExclusiveOr => Some("+"),
            ExprKind::Equivalence => Some("="),
            ExprKind::Variable | ExprKind::Negation => None,
        }
    }
}

/// Canonical infix rendering: every binary connective is parenthesized,
/// negation is a bare `!` prefix. Round-trips through the parser.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Variable(v) => write!(f, "{v}"),
            Expr::Negation(inner) => write!(f, "!{inner}"),
            Expr::Implication(l, r)
            | Expr::Conjunction(l, r)
            | Expr::Disjunction(l, r)
            | Expr::ExclusiveOr(l, r)
            | Expr::Equivalence(l, r) => {
                let op = self.kind().operator().unwrap();
                write!(f, "({l} {op} {r})")
            }
        }
    }
}
