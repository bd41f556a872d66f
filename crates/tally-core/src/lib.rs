#![deny(missing_docs)]
#![doc = "Shared types for the tally structure-counting and cross-validation engine."]

use std::fmt::{self, Display};

use num_bigint::BigUint;
use ::serde::{Deserialize, Serialize};

pub mod errors;
pub mod params;
pub mod rng;
pub mod serde;

pub use errors::{ErrorInfo, TallyError};
pub use params::ParamTuple;
pub use rng::{derive_substream_seed, RngHandle};

/// Prime modulus used for every modular computation (`10^9 + 7`).
pub const MODULUS: u64 = 1_000_000_007;

/// Selects how a count is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EvalMode {
    /// Unbounded precision, for small parameters.
    #[default]
    Exact,
    /// Residue modulo [`MODULUS`], for parameters whose exact value is astronomically large.
    Modular,
}

impl Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalMode::Exact => write!(f, "exact"),
            EvalMode::Modular => write!(f, "modular"),
        }
    }
}

/// Result of counting structures in either evaluation mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "kebab-case")]
pub enum Count {
    /// Exact integer.
    Exact(BigUint),
    /// Residue in `[0, MODULUS)`.
    Modular(u64),
}

impl Count {
    /// Returns the residue modulo [`MODULUS`]. Exact values are reduced once.
    pub fn residue(&self) -> u64 {
        match self {
            Count::Exact(value) => {
                let reduced = value % BigUint::from(MODULUS);
                // a residue of a u64 modulus always fits.
                reduced.to_u64_digits().first().copied().unwrap_or(0)
            }
            Count::Modular(value) => *value,
        }
    }

    /// Projects the count into `mode`. Exact counts are reduced on demand;
    /// a modular count cannot be lifted back, so it is returned as-is.
    pub fn into_mode(self, mode: EvalMode) -> Self {
        match (mode, &self) {
            (EvalMode::Modular, Count::Exact(_)) => Count::Modular(self.residue()),
            _ => self,
        }
    }
}

impl Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Exact(value) => write!(f, "{value}"),
            Count::Modular(value) => write!(f, "{value} (mod {MODULUS})"),
        }
    }
}
