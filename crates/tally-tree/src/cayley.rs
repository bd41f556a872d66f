use num_bigint::BigUint;
use num_traits::{One, Zero};
use tally_arith::{binomial, factorial_u64, FactorialTable, ModValue};
use tally_core::errors::{ErrorInfo, TallyError};

use crate::degree::DegreeSequence;

fn denominator(ds: &DegreeSequence) -> BigUint {
    ds.degrees()
        .iter()
        .fold(BigUint::one(), |acc, d| acc * factorial_u64(d - 1))
}

fn modular_denominator(ds: &DegreeSequence, table: &FactorialTable) -> Result<ModValue, TallyError> {
    ds.degrees()
        .iter()
        .map(|d| table.inverse_factorial((d - 1) as usize))
        .product()
}

/// Number of labeled trees on `ds.len()` nodes whose node `k` has degree `ds[k]`:
/// `(n-2)! / prod (d_k - 1)!`, or zero when the sequence is not realizable.
pub fn count_trees(ds: &DegreeSequence) -> BigUint {
    if !ds.is_realizable() {
        return BigUint::zero();
    }
    if ds.len() == 1 {
        return BigUint::one();
    }
    factorial_u64(ds.len() as u64 - 2) / denominator(ds)
}

/// [`count_trees`] reduced modulo the prime, computed with inverse factorials.
pub fn count_trees_mod(ds: &DegreeSequence) -> Result<ModValue, TallyError> {
    if !ds.is_realizable() {
        return Ok(ModValue::ZERO);
    }
    count_trees_mod_in(ds, &FactorialTable::new(ds.len())?)
}

/// [`count_trees_mod`] against a table covering at least `ds.len()`.
fn count_trees_mod_in(ds: &DegreeSequence, table: &FactorialTable) -> Result<ModValue, TallyError> {
    if !ds.is_realizable() {
        return Ok(ModValue::ZERO);
    }
    if ds.len() == 1 {
        return Ok(ModValue::ONE);
    }
    Ok(table.factorial(ds.len() - 2)? * modular_denominator(ds, table)?)
}

fn rewiring_mismatch(ds: &DegreeSequence, i: usize, j: usize, lhs: String, rhs: String) -> TallyError {
    TallyError::Consistency(
        ErrorInfo::new(
            "rewiring-mismatch",
            "split counts of the merged node disagree",
        )
        .with_context("degrees", ds.to_string())
        .with_context("edge", format!("{i}-{j}"))
        .with_context("via_i", lhs)
        .with_context("via_j", rhs),
    )
}

fn closed_form_mismatch(
    ds: &DegreeSequence,
    i: usize,
    j: usize,
    by_merge: String,
    closed_form: String,
) -> TallyError {
    TallyError::Consistency(
        ErrorInfo::new(
            "edge-count-mismatch",
            "edge-merge count and simplified closed form disagree",
        )
        .with_context("degrees", ds.to_string())
        .with_context("edge", format!("{i}-{j}"))
        .with_context("brute_force", by_merge)
        .with_context("analytical", closed_form),
    )
}

/// Number of trees realizing `ds` that contain the edge `{i, j}`.
///
/// Contracts the edge, counts trees on the reduced sequence and multiplies by
/// `C(d_i + d_j - 2, d_i - 1)`. The mirrored binomial `C(d_i + d_j - 2, d_j - 1)`
/// and the closed form `(n-3)! (d_i + d_j - 2) / prod (d_k - 1)!` are evaluated
/// as well; any disagreement is a `Consistency` error.
pub fn count_trees_with_edge(ds: &DegreeSequence, i: usize, j: usize) -> Result<BigUint, TallyError> {
    let (di, dj) = ds.pair(i, j)?;
    if !ds.is_realizable() {
        return Ok(BigUint::zero());
    }
    let merged_degree = (di + dj - 2) as i64;
    let via_i = binomial(merged_degree, di as i64 - 1);
    let via_j = binomial(merged_degree, dj as i64 - 1);
    if via_i != via_j {
        return Err(rewiring_mismatch(ds, i, j, via_i.to_string(), via_j.to_string()));
    }
    let by_merge = via_i * count_trees(&ds.merge(i, j)?);

    if ds.len() >= 3 {
        let closed_form =
            factorial_u64(ds.len() as u64 - 3) * merged_degree as u64 / denominator(ds);
        if closed_form != by_merge {
            return Err(closed_form_mismatch(
                ds,
                i,
                j,
                by_merge.to_string(),
                closed_form.to_string(),
            ));
        }
    }
    Ok(by_merge)
}

/// [`count_trees_with_edge`] modulo the prime, with the same redundancy checks.
pub fn count_trees_with_edge_mod(
    ds: &DegreeSequence,
    i: usize,
    j: usize,
) -> Result<ModValue, TallyError> {
    let (di, dj) = ds.pair(i, j)?;
    if !ds.is_realizable() {
        return Ok(ModValue::ZERO);
    }
    let table = FactorialTable::new(ds.len())?;
    let merged_degree = (di + dj - 2) as i64;
    let via_i = table.binomial(merged_degree, di as i64 - 1)?;
    let via_j = table.binomial(merged_degree, dj as i64 - 1)?;
    if via_i != via_j {
        return Err(rewiring_mismatch(ds, i, j, via_i.to_string(), via_j.to_string()));
    }
    // the merged sequence is one node shorter, so the same table covers it
    let by_merge = via_i * count_trees_mod_in(&ds.merge(i, j)?, &table)?;

    if ds.len() >= 3 {
        let closed_form = table.factorial(ds.len() - 3)?
            * ModValue::new(merged_degree as u64)
            * modular_denominator(ds, &table)?;
        if closed_form != by_merge {
            return Err(closed_form_mismatch(
                ds,
                i,
                j,
                by_merge.to_string(),
                closed_form.to_string(),
            ));
        }
    }
    Ok(by_merge)
}

/// Divides an accumulated per-tree total by the number of trees modulo the prime,
/// turning a sum over all trees into an average. A tree count of zero surfaces as
/// `NotInvertible`.
pub fn normalize(total: ModValue, ds: &DegreeSequence) -> Result<ModValue, TallyError> {
    let trees = count_trees_mod(ds)?;
    trees.inverse().map(|inverse| total * inverse).map_err(|err| {
        let info = err.info().clone().with_context("degrees", ds.to_string());
        TallyError::NotInvertible(info)
    })
}
