use lkformal::expr::{Assignment, Expr};
use lkformal::parser::parse;

fn fixtures() -> Vec<Expr> {
    [
        "A",
        "!A",
        "!!A",
        "A > B",
        "A * B",
        "A | B",
        "A + B",
        "A = B",
        "A > (B > A)",
        "(A > (B > C)) > ((A > B) > (A > C))",
        "(!B > !A) > ((!B > A) > B)",
        "A * B | !C + (D = A)",
        "!(A = B) > (A + B)",
        "((A | B) * !C) = (!A > B * !C)",
    ]
    .iter()
    .map(|s| parse(s).unwrap())
    .collect()
}

/// Every assignment of the formula's variables, exhaustively.
fn assignments(e: &Expr) -> Vec<Assignment> {
    let vars: Vec<_> = e.variables().into_iter().collect();
    (0..1u32 << vars.len())
        .map(|mask| {
            vars.iter()
                .enumerate()
                .map(|(i, v)| (*v, mask & (1 << i) != 0))
                .collect()
        })
        .collect()
}

#[test]
fn normalize_reaches_the_connective_basis() {
    for e in fixtures() {
        assert!(
            e.normalize().is_connective_basis(),
            "normalize({e}) left a non-basis connective"
        );
    }
}

#[test]
fn normalize_is_idempotent() {
    for e in fixtures() {
        let once = e.normalize();
        assert_eq!(once.normalize(), once, "normalize(normalize({e})) drifted");
    }
}

#[test]
fn normalize_preserves_truth_tables() {
    for e in fixtures() {
        let n = e.normalize();
        for asg in assignments(&e) {
            assert_eq!(
                e.eval(&asg),
                n.eval(&asg),
                "{e} and {n} disagree under {asg:?}"
            );
        }
    }
}

#[test]
fn simplify_collapses_double_negation() {
    for e in fixtures() {
        let doubled = e.clone().negate().negate();
        assert_eq!(doubled.simplify(), e);
    }
}

#[test]
fn simplify_preserves_truth_tables() {
    for e in fixtures() {
        let s = e.simplify();
        for asg in assignments(&e) {
            assert_eq!(e.eval(&asg), s.eval(&asg));
        }
    }
}

#[test]
fn simplify_is_a_single_top_level_pass() {
    // A negation over anything but another negation is left alone, even if a
    // double negation hides below it.
    let inner = Expr::var('A').negate().negate(); // !!A
    let wrapped = inner.clone().implies(Expr::var('B')).negate(); // !(!!A > B)
    assert_eq!(wrapped.simplify(), wrapped);
    // But binary connectives do rebuild with simplified children.
    let under_implication = inner.implies(Expr::var('B'));
    assert_eq!(
        under_implication.simplify(),
        Expr::var('A').implies(Expr::var('B'))
    );
}

#[test]
fn normalization_rules_have_the_documented_shapes() {
    let (a, b) = (Expr::var('A'), Expr::var('B'));

    let conj = a.clone().and(b.clone()).normalize();
    assert_eq!(conj, a.clone().implies(b.clone().negate()).negate());

    let disj = a.clone().or(b.clone()).normalize();
    assert_eq!(disj, a.clone().negate().implies(b.clone()));

    let xor = a.clone().xor(b.clone()).normalize();
    assert_eq!(
        xor,
        a.clone()
            .negate()
            .implies(b.clone().negate())
            .implies(a.clone().implies(b.clone()).negate())
    );

    let iff = a.clone().iff(b.clone()).normalize();
    let forward = a.clone().implies(b.clone());
    let backward = b.implies(a);
    assert_eq!(iff, forward.implies(backward.negate()).negate());
}
