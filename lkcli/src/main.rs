use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use clap::Parser as ClapParser;
use lkcore::prelude::*;
use lkformal::prelude::*;
use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Decide provability of propositional formulas under a set of axiom
/// schemas, either for a single formula or interactively.
#[derive(ClapParser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Formula to decide; omit to start the interactive loop
    pub formula: Option<String>,

    /// Axiom schema, repeatable (defaults to the three Lukasiewicz axioms)
    #[arg(short, long = "axiom")]
    pub axioms: Vec<String>,

    /// Maximum number of sequents to visit before giving up
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// Maximum wall time in milliseconds before giving up
    #[arg(short, long)]
    pub time_limit: Option<u64>,

    /// Print every visited sequent and the rule applied to it
    #[arg(long, default_value_t = false)]
    pub trace: bool,
}

const LUKASIEWICZ: [&str; 3] = [
    "A > (B > A)",
    "(A > (B > C)) > ((A > B) > (A > C))",
    "(!B > !A) > ((!B > A) > B)",
];

fn parse_axioms(args: &Args) -> Result<Vec<Expr>, ParseError> {
    let sources: Vec<&str> = if args.axioms.is_empty() {
        LUKASIEWICZ.to_vec()
    } else {
        args.axioms.iter().map(String::as_str).collect()
    };
    sources.into_iter().map(parse).collect()
}

fn run_arguments(args: &Args) -> RunArguments {
    RunArguments {
        iteration_budget: args.steps,
        time_budget: args.time_limit.map(Duration::from_millis),
        record_trace: args.trace,
    }
}

fn report(
    stdout: &mut impl WriteColor,
    target: &Expr,
    prover: &Prover,
    result: &RunResult,
    elapsed: Duration,
) -> std::io::Result<()> {
    for step in prover.trace() {
        writeln!(stdout, "  {step}")?;
    }

    let mut provable_color = ColorSpec::new();
    provable_color.set_fg(Some(termcolor::Color::Green));
    provable_color.set_intense(true);

    let mut not_provable_color = ColorSpec::new();
    not_provable_color.set_fg(Some(termcolor::Color::Red));
    not_provable_color.set_intense(true);

    write!(stdout, "{}: ", target.pretty_string())?;
    match result.status {
        SearchStatus::Proved => {
            stdout.set_color(&provable_color)?;
            write!(stdout, "provable")?;
        }
        SearchStatus::Refuted => {
            stdout.set_color(&not_provable_color)?;
            write!(stdout, "not provable")?;
        }
        SearchStatus::Continue => {
            write!(stdout, "undecided (budget exhausted)")?;
        }
    }
    stdout.reset()?;
    writeln!(
        stdout,
        "  ({} sequents, {:.3?})",
        result.run_info.iterations, elapsed
    )?;
    stdout.flush()
}

fn decide(
    stdout: &mut impl WriteColor,
    axioms: &[Expr],
    target: &Expr,
    args: &Args,
) -> std::io::Result<()> {
    let mut prover = Prover::new(axioms, target);
    let start = Instant::now();
    let result = prover.run(run_arguments(args));
    let elapsed = start.elapsed();
    report(stdout, target, &prover, &result, elapsed)
}

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let mut error_color = ColorSpec::new();
    error_color.set_fg(Some(termcolor::Color::Red));
    error_color.set_intense(true);

    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut stdout = stdout.lock();

    let axioms = match parse_axioms(&args) {
        Ok(axioms) => {
            for axiom in &axioms {
                log::debug!("axiom schema: {axiom}");
            }
            axioms
        }
        Err(e) => {
            stdout.set_color(&error_color)?;
            writeln!(stdout, "invalid axiom:")?;
            for diagnostic in &e.diagnostics {
                writeln!(stdout, "  - {diagnostic}")?;
            }
            stdout.reset()?;
            std::process::exit(1);
        }
    };

    if let Some(src) = &args.formula {
        match parse(src) {
            Ok(target) => return decide(&mut stdout, &axioms, &target, &args),
            Err(e) => {
                stdout.set_color(&error_color)?;
                writeln!(stdout, "invalid formula:")?;
                for diagnostic in &e.diagnostics {
                    writeln!(stdout, "  - {diagnostic}")?;
                }
                stdout.reset()?;
                std::process::exit(1);
            }
        }
    }

    writeln!(stdout, "enter a formula per line (quit/exit to leave)")?;
    let stdin = std::io::stdin();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match parse(line) {
            Ok(target) => decide(&mut stdout, &axioms, &target, &args)?,
            Err(e) => {
                stdout.set_color(&error_color)?;
                writeln!(stdout, "could not parse input:")?;
                for diagnostic in &e.diagnostics {
                    writeln!(stdout, "  - {diagnostic}")?;
                }
                stdout.reset()?;
            }
        }
    }
    Ok(())
}
