//! Two-sided sequents and their rewrite rules.
//!
//! Role
//! - A sequent `premises ⊢ goals` stores each side as a formula → depth map;
//!   the depth drives the search ordering, nothing else.
//! - The four rewrite rules each consume one compound formula and produce
//!   child sequents at depth + 1, copying everything else untouched.
//!
//! Identity semantics
//! - Two sequents are equal iff the *sets* of formulas per side are
//!   identical; depths and insertion order are ignored. Sides are kept in
//!   `BTreeMap`s so key iteration is sorted, which makes the hash
//!   order-independent and therefore consistent with equality; the closed
//!   set in the search loop depends on this.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;
use strum::EnumIs;

use lkformal::expr::Expr;

/// Which side of the turnstile a rule fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIs)]
pub enum Side {
    Left,
    Right,
}

/// A two-sided judgment `premises ⊢ goals` with a search depth per formula.
///
/// Immutable once created; rewrite rules return fresh children.
#[derive(Debug, Clone, Eq)]
pub struct Sequent {
    left: BTreeMap<Expr, u32>,
    right: BTreeMap<Expr, u32>,
}

impl Sequent {
    /// Build a sequent from formula/depth pairs.
    ///
    /// Inserting a formula already present on a side overwrites its depth.
    /// All formulas must already be in the implication/negation basis; a
    /// non-normalized formula reaching this layer is a bug upstream.
    pub fn new(
        left: impl IntoIterator<Item = (Expr, u32)>,
        right: impl IntoIterator<Item = (Expr, u32)>,
    ) -> Self {
        let sequent = Sequent {
            left: left.into_iter().collect(),
            right: right.into_iter().collect(),
        };
        debug_assert!(
            sequent
                .left
                .keys()
                .chain(sequent.right.keys())
                .all(Expr::is_connective_basis),
            "sequent received a formula outside the implication/negation basis"
        );
        sequent
    }

    /// Premises with their depths, in formula order.
    pub fn left(&self) -> impl Iterator<Item = (&Expr, u32)> {
        self.left.iter().map(|(e, d)| (e, *d))
    }

    /// Goals with their depths, in formula order.
    pub fn right(&self) -> impl Iterator<Item = (&Expr, u32)> {
        self.right.iter().map(|(e, d)| (e, *d))
    }

    /// Closed iff a formula appears on both sides (the identity rule).
    pub fn is_closed(&self) -> bool {
        // The sides are sorted, so a merge walk would also do; sizes are
        // small enough that the contains probe reads better.
        self.left.keys().any(|f| self.right.contains_key(f))
    }

    /// Minimum-depth compound formula of one side, ties broken by the map's
    /// formula order.
    fn min_candidate(side: &BTreeMap<Expr, u32>) -> Option<(&Expr, u32)> {
        let mut best: Option<(&Expr, u32)> = None;
        for (formula, depth) in side {
            if formula.is_variable() {
                continue;
            }
            match best {
                Some((_, best_depth)) if *depth >= best_depth => {}
                _ => best = Some((formula, *depth)),
            }
        }
        best
    }

    /// Select the side and formula the next rewrite should consume.
    ///
    /// The left side wins only when its shallowest compound is strictly
    /// shallower than the right's; ties favor the right (deduction), so
    /// shallow decompositions are preferred over digging into deeply nested
    /// subformulas. `None` means the sequent is stuck.
    pub fn pick(&self) -> Option<(Side, &Expr, u32)> {
        let left = Self::min_candidate(&self.left);
        let right = Self::min_candidate(&self.right);
        match (left, right) {
            (None, None) => None,
            (Some((f, d)), None) => Some((Side::Left, f, d)),
            (None, Some((f, d))) => Some((Side::Right, f, d)),
            (Some((lf, ld)), Some((_, rd))) if ld < rd => Some((Side::Left, lf, ld)),
            (_, Some((rf, rd))) => Some((Side::Right, rf, rd)),
        }
    }

    /// Left-negation elimination: drop `!x` from the premises and require
    /// `x` as a goal at depth + 1.
    pub fn left_negation(&self, formula: &Expr) -> Sequent {
        let depth = self.left[formula];
        let Expr::Negation(inner) = formula else {
            unreachable!("left_negation applied to {formula}")
        };
        let mut child = self.clone();
        child.left.remove(formula);
        child.right.insert(inner.as_ref().clone(), depth + 1);
        child
    }

    /// Right-negation elimination: drop `!x` from the goals and assume `x`
    /// as a premise at depth + 1.
    pub fn right_negation(&self, formula: &Expr) -> Sequent {
        let depth = self.right[formula];
        let Expr::Negation(inner) = formula else {
            unreachable!("right_negation applied to {formula}")
        };
        let mut child = self.clone();
        child.right.remove(formula);
        child.left.insert(inner.as_ref().clone(), depth + 1);
        child
    }

    /// Modus ponens on a premise `p > q`: one child must prove the
    /// antecedent (`p` joins the goals), the other may assume the
    /// consequent (`q` joins the premises). Exactly two children.
    pub fn modus_ponens(&self, formula: &Expr) -> SmallVec<Sequent, 2> {
        let depth = self.left[formula];
        let Expr::Implication(p, q) = formula else {
            unreachable!("modus_ponens applied to {formula}")
        };
        let mut prove_antecedent = self.clone();
        prove_antecedent.left.remove(formula);
        let mut assume_consequent = prove_antecedent.clone();

        prove_antecedent.right.insert(p.as_ref().clone(), depth + 1);
        assume_consequent.left.insert(q.as_ref().clone(), depth + 1);

        let mut children = SmallVec::new();
        children.push(prove_antecedent);
        children.push(assume_consequent);
        children
    }

    /// Deduction on a goal `p > q`: assume the antecedent, prove the
    /// consequent. Single child.
    pub fn deduction(&self, formula: &Expr) -> Sequent {
        let depth = self.right[formula];
        let Expr::Implication(p, q) = formula else {
            unreachable!("deduction applied to {formula}")
        };
        let mut child = self.clone();
        child.right.remove(formula);
        child.left.insert(p.as_ref().clone(), depth + 1);
        child.right.insert(q.as_ref().clone(), depth + 1);
        child
    }
}

impl PartialEq for Sequent {
    /// Formula-set comparison per side; depths are not part of identity.
    fn eq(&self, other: &Self) -> bool {
        self.left.len() == other.left.len()
            && self.right.len() == other.right.len()
            && self.left.keys().eq(other.left.keys())
            && self.right.keys().eq(other.right.keys())
    }
}

impl Hash for Sequent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Keys come out sorted, so equal sequents hash identically no matter
        // how they were assembled.
        for formula in self.left.keys() {
            formula.hash(state);
        }
        state.write_u8(0xf0); // side separator
        for formula in self.right.keys() {
            formula.hash(state);
        }
    }
}

impl std::fmt::Display for Sequent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for formula in self.left.keys() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{formula}")?;
        }
        if !first {
            write!(f, " ")?;
        }
        write!(f, "⊢")?;
        let mut first = true;
        for formula in self.right.keys() {
            if first {
                write!(f, " ")?;
            } else {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{formula}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn v(c: char) -> Expr {
        Expr::var(c)
    }

    #[test]
    fn equality_ignores_depths_and_order() {
        let a = Sequent::new([(v('P'), 0), (v('Q'), 3)], [(v('R'), 1)]);
        let b = Sequent::new([(v('Q'), 7), (v('P'), 5)], [(v('R'), 0)]);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b), "hash must follow the equality contract");
    }

    #[test]
    fn sides_are_distinguished() {
        let a = Sequent::new([(v('P'), 0)], [(v('Q'), 0)]);
        let b = Sequent::new([(v('Q'), 0)], [(v('P'), 0)]);
        assert_ne!(a, b);
    }

    #[test]
    fn duplicate_insertion_overwrites_depth() {
        let s = Sequent::new([(v('P'), 0), (v('P'), 4)], []);
        assert_eq!(s.left().collect::<Vec<_>>(), vec![(&v('P'), 4)]);
    }

    #[test]
    fn closure_requires_a_shared_formula() {
        let closed = Sequent::new([(v('P'), 0), (v('Q'), 0)], [(v('P'), 2)]);
        assert!(closed.is_closed());

        let open = Sequent::new([(v('P'), 0)], [(v('Q'), 0)]);
        assert!(!open.is_closed());
    }

    #[test]
    fn pick_prefers_shallow_formulas_and_right_on_ties() {
        let imp = v('P').implies(v('Q'));
        let neg = v('R').negate();

        // Only the left has a compound.
        let s = Sequent::new([(imp.clone(), 2)], [(v('Q'), 0)]);
        let (side, formula, depth) = s.pick().unwrap();
        assert!(side.is_left());
        assert_eq!((formula, depth), (&imp, 2));

        // Equal depths favor the right.
        let s = Sequent::new([(imp.clone(), 1)], [(neg.clone(), 1)]);
        assert!(s.pick().unwrap().0.is_right());

        // A strictly shallower left formula wins.
        let s = Sequent::new([(imp.clone(), 0)], [(neg.clone(), 1)]);
        assert!(s.pick().unwrap().0.is_left());

        // Variables are never candidates.
        let s = Sequent::new([(v('P'), 0)], []);
        assert!(s.pick().is_none());
    }

    #[test]
    fn stuck_sequent_has_no_candidates() {
        let s = Sequent::new([], [(v('P'), 0)]);
        assert!(!s.is_closed());
        assert!(s.pick().is_none());
    }

    #[test]
    fn modus_ponens_produces_two_closing_children() {
        // {P, P > Q} ⊢ {Q}: both children close by the identity rule.
        let imp = v('P').implies(v('Q'));
        let s = Sequent::new([(v('P'), 0), (imp.clone(), 0)], [(v('Q'), 0)]);

        let children = s.modus_ponens(&imp);
        assert_eq!(children.len(), 2);

        let prove_antecedent = &children[0];
        assert_eq!(
            prove_antecedent.right().map(|(e, _)| e.clone()).collect::<Vec<_>>(),
            vec![v('P'), v('Q')]
        );
        assert!(prove_antecedent.is_closed());

        let assume_consequent = &children[1];
        assert_eq!(
            assume_consequent.left().map(|(e, _)| e.clone()).collect::<Vec<_>>(),
            vec![v('P'), v('Q')]
        );
        assert!(assume_consequent.is_closed());
    }

    #[test]
    fn modus_ponens_children_carry_incremented_depth() {
        let imp = v('P').implies(v('Q'));
        let s = Sequent::new([(imp.clone(), 3)], [(v('R'), 0)]);
        let children = s.modus_ponens(&imp);
        assert_eq!(children[0].right().find(|(e, _)| **e == v('P')).unwrap().1, 4);
        assert_eq!(children[1].left().find(|(e, _)| **e == v('Q')).unwrap().1, 4);
    }

    #[test]
    fn deduction_moves_antecedent_left() {
        let imp = v('P').implies(v('Q'));
        let s = Sequent::new([], [(imp.clone(), 1)]);
        let child = s.deduction(&imp);
        assert_eq!(child.left().collect::<Vec<_>>(), vec![(&v('P'), 2)]);
        assert_eq!(child.right().collect::<Vec<_>>(), vec![(&v('Q'), 2)]);
    }

    #[test]
    fn negation_rules_swap_sides() {
        let neg = v('P').negate();

        let s = Sequent::new([(neg.clone(), 0)], [(v('Q'), 0)]);
        let child = s.left_negation(&neg);
        assert!(child.left().next().is_none());
        assert_eq!(
            child.right().collect::<Vec<_>>(),
            vec![(&v('P'), 1), (&v('Q'), 0)]
        );

        let s = Sequent::new([(v('Q'), 0)], [(neg.clone(), 2)]);
        let child = s.right_negation(&neg);
        assert_eq!(
            child.left().collect::<Vec<_>>(),
            vec![(&v('P'), 3), (&v('Q'), 0)]
        );
        assert!(child.right().next().is_none());
    }

    #[test]
    fn deduction_round_trips_through_negation_shape() {
        // Applying deduction to ⊢ p > q and then reading the child back
        // gives a sequent equal (under the identity contract) regardless of
        // the depths involved.
        let imp = v('P').implies(v('Q'));
        let shallow = Sequent::new([], [(imp.clone(), 0)]).deduction(&imp);
        let deep = Sequent::new([], [(imp.clone(), 9)]).deduction(&imp);
        assert_eq!(shallow, deep);
    }

    #[test]
    fn display_matches_turnstile_layout() {
        let s = Sequent::new([(v('P'), 0), (v('P').implies(v('Q')), 0)], [(v('Q'), 0)]);
        assert_eq!(s.to_string(), "P, (P > Q) ⊢ Q");

        let empty_left = Sequent::new([], [(v('Q'), 0)]);
        assert_eq!(empty_left.to_string(), "⊢ Q");

        let empty_right = Sequent::new([(v('P'), 0)], []);
        assert_eq!(empty_right.to_string(), "P ⊢");
    }
}
