//! RcDoc-based pretty-printer with termcolor annotations for [`Expr`].
//!
//! Role
//! - Convert a formula into an annotated document suitable for width-aware
//!   rendering, eliding parentheses the precedence rules make redundant.
//! - Provide colored output for terminals (TTY-aware) and plain strings for
//!   logs and tests.
//!
//! The output re-parses to an equal formula: the precedence table below is
//! the parser's table, and every binary operator is left-associative, so a
//! right child at the same level keeps its parentheses.

use std::io::{self, Write};

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::expr::{Expr, ExprKind};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Operator, // !, *, |, +, >, =
    Ident,    // proposition letters
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
        }
        s
    }
}

fn op(s: &'static str) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(Style::Operator)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

/// Binding strength, loosest to tightest: `=`, `>`, `+`, `|`, `*`, `!`.
fn precedence(kind: ExprKind) -> u8 {
    match kind {
        ExprKind::Equivalence => 1,
        ExprKind::Implication => 2,
        ExprKind::ExclusiveOr => 3,
        ExprKind::Disjunction => 4,
        ExprKind::Conjunction => 5,
        ExprKind::Negation => 6,
        ExprKind::Variable => 255,
    }
}

/// Whether a child printed under `parent` needs wrapping.
///
/// `right_operand` distinguishes the two sides of a left-associative binary
/// connective: `(A > B) > C` elides, `A > (B > C)` must not.
#[inline]
fn requires_parens(child: ExprKind, parent: ExprKind, right_operand: bool) -> bool {
    let child_prec = precedence(child);
    let parent_prec = precedence(parent);
    if right_operand {
        child_prec <= parent_prec
    } else {
        child_prec < parent_prec
    }
}

fn child_doc(e: &Expr, parent: ExprKind, right_operand: bool, depth: u8) -> RcDoc<'static, Style> {
    if requires_parens(e.kind(), parent, right_operand) {
        lparen(depth)
            .append(to_doc_with_depth(e, depth + 1))
            .append(rparen(depth))
            .group()
    } else {
        to_doc_with_depth(e, depth)
    }
}

/// Depth-aware variant that colors parentheses by nesting level.
fn to_doc_with_depth(e: &Expr, depth: u8) -> RcDoc<'static, Style> {
    let kind = e.kind();
    match e {
        Expr::Variable(v) => RcDoc::as_string(v).annotate(Style::Ident),
        Expr::Negation(inner) => op("!")
            // `!` binds tighter than every binary connective but stacks on
            // itself, so a nested negation never needs parens.
            .append(child_doc(inner, kind, false, depth))
            .group(),
        Expr::Implication(l, r)
        | Expr::Conjunction(l, r)
        | Expr::Disjunction(l, r)
        | Expr::ExclusiveOr(l, r)
        | Expr::Equivalence(l, r) => child_doc(l, kind, false, depth)
            .append(RcDoc::space())
            .append(op(kind.operator().unwrap()))
            .append(RcDoc::space())
            .append(child_doc(r, kind, true, depth))
            .group(),
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for formulas.
pub trait PrettyExpr {
    /// Build an RcDoc representation with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print to stdout with colors (TTY-aware), at auto-detected width.
    fn pretty_print(&self) -> io::Result<()>;

    /// Format into a plain string with redundant parentheses elided.
    fn pretty_string(&self) -> String;
}

impl PrettyExpr for Expr {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0)
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        let doc = self.pretty_doc();
        render_to(&doc, width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        let doc = self.pretty_doc();
        render_to(&doc, terminal_width(), &mut stdout)
    }

    fn pretty_string(&self) -> String {
        let mut buf = String::new();
        let mut w = FmtWrite::new(&mut buf);
        let _ = self.pretty_doc().render_raw(80, &mut w);
        buf
    }
}
