use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tally_core::errors::{ErrorInfo, TallyError};
use tally_core::params::ParamTuple;
use tally_core::EvalMode;
use tally_formula::{Formula, FormulaRegistry};
use tally_mesh::{cartesian, InclusiveRange};

/// Tally of a finished verification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOutcome {
    /// Tuples compared and found equal.
    pub checked: u64,
    /// Tuples outside the formula's domain.
    pub skipped: u64,
}

/// Looks up `id` and checks that one range per parameter was supplied.
fn formula_for_ranges<'a>(
    registry: &'a FormulaRegistry,
    id: &str,
    ranges: &[InclusiveRange],
) -> Result<&'a dyn Formula, TallyError> {
    let formula = registry.get(id)?;
    formula
        .arity()
        .check_len(ranges.len())
        .map_err(|err| err.with_context("problem", id))?;
    Ok(formula)
}

fn checked_formula<'a>(
    registry: &'a FormulaRegistry,
    problem: &str,
    ranges: &[InclusiveRange],
) -> Result<&'a dyn Formula, TallyError> {
    let formula = formula_for_ranges(registry, problem, ranges)?;
    if formula.enumerator().is_none() {
        return Err(TallyError::Domain(
            ErrorInfo::new("no-enumerator", "formula has no brute-force counterpart")
                .with_context("problem", problem),
        ));
    }
    Ok(formula)
}

fn check_tuple(
    registry: &FormulaRegistry,
    problem: &str,
    params: &ParamTuple,
    mode: EvalMode,
) -> Result<(), TallyError> {
    let brute_force = registry.brute_force(problem, params, mode)?;
    let analytical = registry.evaluate(problem, params, mode)?;
    if brute_force != analytical {
        warn!("{problem}{params}: brute force {brute_force} != analytical {analytical}");
        return Err(
            TallyError::consistency(problem, params, &brute_force, &analytical)
                .with_context("mode", mode.to_string()),
        );
    }
    debug!("{problem}{params}: {analytical}");
    Ok(())
}

/// Compares brute force against the closed form of `problem` for every tuple of
/// the cartesian product of `ranges`, in lexicographic order.
///
/// A range list of the wrong arity is a domain error. Tuples outside the
/// formula's domain are skipped and counted. The first disagreement, or any
/// other evaluation error, stops the run.
pub fn verify(
    registry: &FormulaRegistry,
    problem: &str,
    ranges: &[InclusiveRange],
    mode: EvalMode,
) -> Result<VerifyOutcome, TallyError> {
    let formula = checked_formula(registry, problem, ranges)?;
    let mut outcome = VerifyOutcome::default();
    for params in cartesian(ranges) {
        if formula.check_domain(&params).is_err() {
            outcome.skipped += 1;
            continue;
        }
        check_tuple(registry, problem, &params, mode)?;
        outcome.checked += 1;
    }
    info!(
        "{problem}: {} tuples agree ({mode}), {} skipped",
        outcome.checked, outcome.skipped
    );
    Ok(outcome)
}

/// [`verify`] with tuples evaluated on the rayon pool. The reported failure is the
/// one with the smallest lexicographic index, so the outcome matches the
/// sequential run.
pub fn verify_parallel(
    registry: &FormulaRegistry,
    problem: &str,
    ranges: &[InclusiveRange],
    mode: EvalMode,
) -> Result<VerifyOutcome, TallyError> {
    let formula = checked_formula(registry, problem, ranges)?;
    let (admitted, skipped): (Vec<ParamTuple>, Vec<ParamTuple>) =
        cartesian(ranges).partition(|params| formula.check_domain(params).is_ok());
    if let Some(err) = admitted
        .par_iter()
        .find_map_first(|params| check_tuple(registry, problem, params, mode).err())
    {
        return Err(err);
    }
    let outcome = VerifyOutcome {
        checked: admitted.len() as u64,
        skipped: skipped.len() as u64,
    };
    info!(
        "{problem}: {} tuples agree ({mode}, parallel), {} skipped",
        outcome.checked, outcome.skipped
    );
    Ok(outcome)
}

/// Cross-checks two closed forms of the same quantity modulo the prime. Both
/// formulas must accept `ranges.len()` parameters; tuples outside either
/// domain are skipped.
pub fn verify_formulas(
    registry: &FormulaRegistry,
    lhs: &str,
    rhs: &str,
    ranges: &[InclusiveRange],
) -> Result<VerifyOutcome, TallyError> {
    let left = formula_for_ranges(registry, lhs, ranges)?;
    let right = formula_for_ranges(registry, rhs, ranges)?;
    let mut outcome = VerifyOutcome::default();
    for params in cartesian(ranges) {
        if left.check_domain(&params).is_err() || right.check_domain(&params).is_err() {
            outcome.skipped += 1;
            continue;
        }
        let a = registry.evaluate(lhs, &params, EvalMode::Modular)?;
        let b = registry.evaluate(rhs, &params, EvalMode::Modular)?;
        if a != b {
            warn!("{lhs} vs {rhs} at {params}: {a} != {b}");
            return Err(TallyError::Consistency(
                ErrorInfo::new("formula-mismatch", "closed forms disagree")
                    .with_context("problem", format!("{lhs} vs {rhs}"))
                    .with_context("params", params.to_string())
                    .with_context("lhs", a.to_string())
                    .with_context("rhs", b.to_string())
                    .with_context("mode", EvalMode::Modular.to_string()),
            ));
        }
        outcome.checked += 1;
    }
    info!("{lhs} and {rhs} agree on {} tuples", outcome.checked);
    Ok(outcome)
}
