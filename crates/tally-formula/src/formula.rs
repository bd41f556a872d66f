use std::fmt::{self, Display};

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tally_arith::ModValue;
use tally_core::errors::{ErrorInfo, TallyError};
use tally_core::params::ParamTuple;

/// Number of parameters a formula accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arity {
    /// Exactly this many parameters.
    Exactly(usize),
    /// Any tuple with at least this many parameters (degree sequences, pyramid rows).
    AtLeast(usize),
}

impl Arity {
    /// Fails with a domain error when `params` has the wrong length.
    pub fn check(&self, params: &ParamTuple) -> Result<(), TallyError> {
        self.check_len(params.arity())
    }

    /// Same as [`Arity::check`] for a tuple of `len` entries.
    pub fn check_len(&self, len: usize) -> Result<(), TallyError> {
        let ok = match self {
            Arity::Exactly(n) => len == *n,
            Arity::AtLeast(n) => len >= *n,
        };
        if ok {
            return Ok(());
        }
        Err(TallyError::Domain(
            ErrorInfo::new("arity-mismatch", "unexpected number of parameters")
                .with_context("expected", self.to_string())
                .with_context("found", len.to_string()),
        ))
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, ">= {n}"),
        }
    }
}

/// A closed-form counting expression.
///
/// Implementations are pure: the same tuple always produces the same value, and
/// `modular(p)` equals `exact(p) mod MODULUS` for every admitted tuple.
pub trait Formula: Send + Sync {
    /// Stable registry identifier.
    fn id(&self) -> &'static str;

    /// Parameter count accepted by the formula.
    fn arity(&self) -> Arity;

    /// Validates formula-specific constraints such as `m <= n`. Violations are
    /// reported as `ParameterDomain`.
    fn check_domain(&self, params: &ParamTuple) -> Result<(), TallyError>;

    /// Unbounded-precision value.
    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError>;

    /// Residue modulo the prime. Defaults to reducing [`Formula::exact`].
    fn modular(&self, params: &ParamTuple) -> Result<ModValue, TallyError> {
        Ok(ModValue::from_biguint(&self.exact(params)?))
    }

    /// Exhaustive counterpart, when the formula has one.
    fn enumerator(&self) -> Option<&dyn Enumerator> {
        None
    }
}

/// Brute-force count over a bounded configuration space.
///
/// Results are always exact; callers reduce once at the end when comparing
/// against a modular formula.
pub trait Enumerator: Send + Sync {
    /// Counts structures for `params` by exhaustive enumeration.
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError>;
}

pub(crate) fn outside_domain(id: &str, params: &ParamTuple, reason: &str) -> TallyError {
    TallyError::ParameterDomain(
        ErrorInfo::new("outside-domain", format!("`{id}` requires {reason}"))
            .with_context("formula", id)
            .with_context("params", params.to_string()),
    )
}

/// Shared `m <= n` check for `(n, m, ..)` tuples.
pub(crate) fn require_selected_le_total(id: &str, params: &ParamTuple) -> Result<(), TallyError> {
    if params.get(1)? > params.get(0)? {
        return Err(outside_domain(id, params, "m <= n"));
    }
    Ok(())
}
