//! Structural unification over the implication/negation basis.
//!
//! Role
//! - Compute a variable binding that makes two normalized formulas
//!   structurally identical, used once per axiom to specialize axiom schemas
//!   against the proof target.
//! - Failure is a normal negative result (`None`), never an error: an axiom
//!   that does not unify simply stays unspecialized.
//!
//! No occurs-check is performed. The preprocessing flow legitimately binds a
//! variable to a compound containing that same variable (unifying
//! `(A > (B > C)) > ((A > B) > (A > C))` against `A > A` starts by binding
//! `A` to `A > (B > C)`), and the binding is applied exactly once by
//! [`apply_bindings`], so no cycle is ever chased.

use std::collections::BTreeMap;

use lkformal::expr::Expr;
use lkformal::variable::VarName;

/// A substitution map from variables to formulas.
///
/// Keys are unique; iteration and display follow the variable order, so the
/// debug log of a specialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(BTreeMap<VarName, Expr>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The formula bound to `var`, if any.
    pub fn get(&self, var: VarName) -> Option<&Expr> {
        self.0.get(&var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarName, &Expr)> {
        self.0.iter().map(|(v, e)| (*v, e))
    }
}

impl std::fmt::Display for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (var, expr) in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{var} := {expr}")?;
        }
        Ok(())
    }
}

/// Unify two formulas, threading the bindings accumulated so far.
///
/// Cases, in order: a variable on either side delegates to variable binding;
/// two implications unify left children then right children; two negations
/// unify their inner formulas; anything else succeeds with unchanged
/// bindings iff the formulas are structurally equal.
pub fn unify(a: &Expr, b: &Expr, bindings: Bindings) -> Option<Bindings> {
    match (a, b) {
        (Expr::Variable(v), _) => bind_variable(*v, b, bindings),
        (_, Expr::Variable(v)) => bind_variable(*v, a, bindings),
        (Expr::Implication(al, ar), Expr::Implication(bl, br)) => {
            let bindings = unify(al, bl, bindings)?;
            unify(ar, br, bindings)
        }
        (Expr::Negation(ai), Expr::Negation(bi)) => unify(ai, bi, bindings),
        _ => (a == b).then_some(bindings),
    }
}

/// Bind `var` to `expr`.
///
/// An existing binding must agree structurally. Binding a variable to
/// another variable first repoints every binding whose value is `var`,
/// merging the two equivalence classes; binding to a compound records it
/// directly.
fn bind_variable(var: VarName, expr: &Expr, mut bindings: Bindings) -> Option<Bindings> {
    if let Some(existing) = bindings.0.get(&var) {
        return (existing == expr).then_some(bindings);
    }

    if expr.is_variable() {
        let var_expr = Expr::Variable(var);
        for value in bindings.0.values_mut() {
            if *value == var_expr {
                *value = expr.clone();
            }
        }
    }

    bindings.0.insert(var, expr.clone());
    Some(bindings)
}

/// Rewrite every bound variable in `e` to its binding.
///
/// Recurses through implications and negations; any other shape (which
/// cannot occur post-normalization) is returned unchanged. Total.
pub fn apply_bindings(e: &Expr, bindings: &Bindings) -> Expr {
    match e {
        Expr::Variable(v) => bindings
            .get(*v)
            .cloned()
            .unwrap_or_else(|| e.clone()),
        Expr::Implication(l, r) => {
            apply_bindings(l, bindings).implies(apply_bindings(r, bindings))
        }
        Expr::Negation(inner) => apply_bindings(inner, bindings).negate(),
        _ => e.clone(),
    }
}
