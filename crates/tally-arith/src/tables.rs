use tally_core::errors::{ErrorInfo, TallyError};

use crate::modular::ModValue;

/// Factorials and inverse factorials modulo the prime, precomputed up to `n_max`.
///
/// Modular binomials are then two multiplications each.
#[derive(Debug, Clone)]
pub struct FactorialTable {
    factorials: Vec<ModValue>,
    inverses: Vec<ModValue>,
}

impl FactorialTable {
    /// Builds the table for `0..=n_max`. Fails with `NotInvertible` when `n_max`
    /// reaches the modulus, since `n_max!` then vanishes.
    pub fn new(n_max: usize) -> Result<Self, TallyError> {
        let mut factorials = Vec::with_capacity(n_max + 1);
        let mut value = ModValue::ONE;
        factorials.push(value);
        for i in 1..=n_max {
            value *= ModValue::new(i as u64);
            factorials.push(value);
        }
        let mut inverses = vec![ModValue::ZERO; n_max + 1];
        inverses[n_max] = factorials[n_max].inverse()?;
        for i in (1..=n_max).rev() {
            inverses[i - 1] = inverses[i] * ModValue::new(i as u64);
        }
        Ok(Self {
            factorials,
            inverses,
        })
    }

    /// Largest argument covered by the table.
    pub fn n_max(&self) -> usize {
        self.factorials.len() - 1
    }

    fn lookup(&self, n: usize) -> Result<usize, TallyError> {
        if n > self.n_max() {
            return Err(TallyError::ParameterDomain(
                ErrorInfo::new("table-exceeded", "argument exceeds factorial table")
                    .with_context("n", n.to_string())
                    .with_context("n_max", self.n_max().to_string()),
            ));
        }
        Ok(n)
    }

    /// `n! mod p`.
    pub fn factorial(&self, n: usize) -> Result<ModValue, TallyError> {
        Ok(self.factorials[self.lookup(n)?])
    }

    /// `(n!)^-1 mod p`.
    pub fn inverse_factorial(&self, n: usize) -> Result<ModValue, TallyError> {
        Ok(self.inverses[self.lookup(n)?])
    }

    /// `C(n, k) mod p`, zero whenever `k < 0`, `n < 0` or `k > n`.
    pub fn binomial(&self, n: i64, k: i64) -> Result<ModValue, TallyError> {
        if k < 0 || n < 0 || k > n {
            return Ok(ModValue::ZERO);
        }
        let (n, k) = (n as usize, k as usize);
        Ok(self.factorial(n)? * self.inverse_factorial(k)? * self.inverse_factorial(n - k)?)
    }
}
