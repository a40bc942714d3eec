//! Parser for the infix formula syntax using chumsky.
//!
//! Role
//! - Turn a formula string into an [`Expr`](crate::expr::Expr) tree.
//! - Mirrors the precedence and associativity used by the pretty-printer so
//!   printed formulas round-trip.
//!
//! Two stages:
//! 1) Tokenisation from the input string to a `Token` stream.
//! 2) Parsing tokens into the formula tree with a ladder of `foldl` levels.
//!
//! Accepted syntax:
//! - Variables: a single ASCII letter (`A`, `q`). Longer identifiers are
//!   rejected at the lexer level.
//! - Operators, tightest to loosest: `!` (prefix, stacking), `*`, `|`, `+`,
//!   `>`, `=`. All binary operators are left-associative.
//! - Parentheses wrap any full formula.
//!
//! No normalization happens here; the parser hands back the raw connective
//! tree exactly as written.
use chumsky::{input::ValueInput, prelude::*};
use thiserror::Error;

use crate::expr::Expr;
use crate::variable::VarName;

type Span = SimpleSpan;
type Spanned<T> = (T, Span);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Token {
    LParen,
    RParen,

    Not,     // !
    And,     // *
    Or,      // |
    Xor,     // +
    Implies, // >
    Iff,     // =

    Var(VarName),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Not => write!(f, "!"),
            Token::And => write!(f, "*"),
            Token::Or => write!(f, "|"),
            Token::Xor => write!(f, "+"),
            Token::Implies => write!(f, ">"),
            Token::Iff => write!(f, "="),
            Token::Var(v) => write!(f, "{v}"),
        }
    }
}

// ---------------- Lexer ----------------

fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<Spanned<Token>>, extra::Err<Rich<'a, char>>> {
    // A run of letters; only single letters are valid proposition names.
    let word = any()
        .filter(|c: &char| c.is_ascii_alphanumeric())
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|s: &str, span| -> Result<Token, Rich<char>> {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Ok(Token::Var(VarName::new(c))),
                _ => Err(Rich::custom(
                    span,
                    format!("invalid proposition name '{s}': expected a single letter like A or q"),
                )),
            }
        });

    let punct = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('!').to(Token::Not),
        just('*').to(Token::And),
        just('|').to(Token::Or),
        just('+').to(Token::Xor),
        just('>').to(Token::Implies),
        just('=').to(Token::Iff),
    ));

    let token = punct.or(word);

    token
        .map_with(|tok, e| (tok, e.span()))
        .padded()
        .repeated()
        .collect()
        .then_ignore(end())
}

// ---------------- chumsky parser over tokens ----------------

fn expr_parser<'tokens, I>()
-> impl Parser<'tokens, I, Expr, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|expr| {
        let ident = select! { Token::Var(v) => v };

        let paren_expr = expr
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .labelled("parentheses");

        let atom = ident
            .map(Expr::Variable)
            .or(paren_expr)
            .labelled("atom");

        // Prefix negation stacks: !!A
        let prefix = just(Token::Not)
            .repeated()
            .foldr(atom, |_, rhs: Expr| rhs.negate());

        // Binary levels, tightest first; every level is left-associative.
        let conj = prefix
            .clone()
            .foldl(just(Token::And).ignore_then(prefix).repeated(), |a, b| {
                a.and(b)
            })
            .labelled("conjunction");

        let disj = conj
            .clone()
            .foldl(just(Token::Or).ignore_then(conj).repeated(), |a, b| a.or(b))
            .labelled("disjunction");

        let xor = disj
            .clone()
            .foldl(just(Token::Xor).ignore_then(disj).repeated(), |a, b| {
                a.xor(b)
            })
            .labelled("exclusive-or");

        let implication = xor
            .clone()
            .foldl(just(Token::Implies).ignore_then(xor).repeated(), |a, b| {
                a.implies(b)
            })
            .labelled("implication");

        implication
            .clone()
            .foldl(
                just(Token::Iff).ignore_then(implication).repeated(),
                |a, b| a.iff(b),
            )
            .labelled("equivalence")
    })
}

// ---------------- Public API ----------------

/// Failure to turn an input string into a formula.
///
/// Carries every diagnostic chumsky produced, in input order; the command
/// loop prints them one per line.
#[derive(Debug, Error)]
#[error("could not parse formula: {}", diagnostics.join("; "))]
pub struct ParseError {
    pub diagnostics: Vec<String>,
}

/// Parse an infix formula into an [`Expr`](crate::expr::Expr).
///
/// Complexity is linear in the input size.
///
/// Example
/// ```
/// use lkformal::parser::parse;
/// use lkformal::expr::Expr;
///
/// let e = parse("!A | B").unwrap();
/// assert_eq!(e, Expr::var('A').negate().or(Expr::var('B')));
/// ```
pub fn parse(src: &str) -> Result<Expr, ParseError> {
    let (tokens, lex_errs) = lexer().parse(src).into_output_errors();
    let mut diagnostics: Vec<String> = lex_errs
        .into_iter()
        .map(|e| format!("lexing error: {e}"))
        .collect();

    let tokens = match tokens {
        Some(toks) => toks,
        None => return Err(ParseError { diagnostics }),
    };

    let plain: Vec<Token> = tokens.into_iter().map(|(t, _s)| t).collect();
    let (expr, parse_errs) = expr_parser()
        .then_ignore(end())
        .parse(plain.as_slice())
        .into_output_errors();
    diagnostics.extend(parse_errs.into_iter().map(|e| format!("parse error: {e}")));
    if !diagnostics.is_empty() {
        return Err(ParseError { diagnostics });
    }

    match expr {
        Some(e) => Ok(e),
        None => Err(ParseError { diagnostics }),
    }
}
