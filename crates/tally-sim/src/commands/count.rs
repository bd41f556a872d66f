use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use tally_core::errors::{ErrorInfo, TallyError};
use tally_core::params::ParamTuple;
use tally_core::{Count, EvalMode};
use tally_formula::FormulaRegistry;

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Registry identifier of the formula to evaluate.
    #[arg(long)]
    pub problem: String,
    /// Print residues modulo 1e9+7 instead of exact values.
    #[arg(long)]
    pub modular: bool,
    /// Case file: the first line holds the number of cases, then one case per line.
    #[arg(long)]
    pub input: PathBuf,
}

fn parse_error(code: &str, message: impl Into<String>, line: usize) -> TallyError {
    TallyError::Parse(ErrorInfo::new(code, message).with_context("line", line.to_string()))
}

fn parse_line(line: &str, number: usize) -> Result<Vec<i64>, TallyError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                parse_error("bad-integer", format!("`{token}` is not an integer"), number)
            })
        })
        .collect()
}

/// Parses a case file. Blank lines are ignored.
pub fn parse_cases(text: &str) -> Result<Vec<ParamTuple>, TallyError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());
    let (header_line, header) = lines
        .next()
        .ok_or_else(|| parse_error("missing-count", "input is empty", 1))?;
    let expected = match parse_line(header, header_line)?.as_slice() {
        [count] if *count >= 0 => *count as usize,
        _ => {
            return Err(parse_error(
                "missing-count",
                "first line must hold a single non-negative case count",
                header_line,
            ))
        }
    };
    let cases = lines
        .map(|(number, line)| {
            ParamTuple::new(&parse_line(line, number)?)
                .map_err(|err| err.with_context("line", number.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if cases.len() != expected {
        return Err(TallyError::Parse(
            ErrorInfo::new("case-count-mismatch", "number of cases differs from the header")
                .with_context("expected", expected.to_string())
                .with_context("found", cases.len().to_string()),
        ));
    }
    Ok(cases)
}

pub fn run(args: &CountArgs) -> Result<(), Box<dyn Error>> {
    let registry = FormulaRegistry::standard();
    let text = fs::read_to_string(&args.input)?;
    let mode = if args.modular {
        EvalMode::Modular
    } else {
        EvalMode::Exact
    };
    for params in parse_cases(&text)? {
        match registry.evaluate(&args.problem, &params, mode)? {
            Count::Exact(value) => println!("{value}"),
            Count::Modular(value) => println!("{value}"),
        }
    }
    Ok(())
}
