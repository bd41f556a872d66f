//! Products over all subsets of a partially selected row.
//!
//! A row holds `m` selected and `n - m` unselected positions. Every subset of
//! the row contributes the factor `2 + (selected positions it contains)`.

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use tally_arith::{
    checked_power, mod_mul, mod_pow, mod_reduce, require_bit_budget, to_u64_exponent, ModValue,
};
use tally_core::errors::TallyError;
use tally_core::params::ParamTuple;
use tally_core::MODULUS;
use tally_mesh::mesh;

use crate::formula::{outside_domain, require_selected_le_total, Arity, Enumerator, Formula};
use crate::ids;

/// Multiplicative order bound used for Fermat exponent reduction.
const ORDER: u64 = MODULUS - 1;

/// `C(m, 0) ..= C(m, m)`, each entry derived from its predecessor.
fn binomial_row(m: u64) -> Vec<BigUint> {
    let mut row = Vec::with_capacity(m as usize + 1);
    let mut entry = BigUint::one();
    for k in 0..=m {
        row.push(entry.clone());
        entry = entry * (m - k) / (k + 1);
    }
    row
}

fn split(id: &str, params: &ParamTuple) -> Result<(u64, u64), TallyError> {
    require_selected_le_total(id, params)?;
    Ok((params.get(0)?, params.get(1)?))
}

fn reduced_exponents(m: u64) -> Result<Vec<u64>, TallyError> {
    binomial_row(m)
        .into_iter()
        .map(|entry| mod_reduce(&BigInt::from(entry), ORDER))
        .collect()
}

/// Bases `2..=m+2` must stay below the modulus for Fermat reduction to hold.
fn require_coprime_bases(id: &str, params: &ParamTuple, m: u64) -> Result<(), TallyError> {
    if m + 2 >= MODULUS {
        return Err(outside_domain(id, params, "m + 2 below the modulus"));
    }
    Ok(())
}

/// Each of the `2^n` subsets contributes a factor of at least 2, so the exact
/// product has more than `2^n` bits.
fn require_row_budget(n: u64) -> Result<(), TallyError> {
    let bits = if n >= 127 { u128::MAX } else { (1u128 << n) + 1 };
    require_bit_budget(bits)
}

/// `prod_{k=0..m} (2+k)^(C(m,k) 2^(n-m))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionProduct;

impl Formula for SelectionProduct {
    fn id(&self) -> &'static str {
        ids::SELECTION_PRODUCT
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(2)
    }

    fn check_domain(&self, params: &ParamTuple) -> Result<(), TallyError> {
        require_selected_le_total(self.id(), params)
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let (n, m) = split(self.id(), params)?;
        require_row_budget(n)?;
        let spread = checked_power(&BigUint::from(2u32), n - m)?;
        let mut total = BigUint::one();
        for (k, entry) in binomial_row(m).into_iter().enumerate() {
            let exponent = to_u64_exponent(&(entry * &spread))?;
            let factor = checked_power(&BigUint::from(k as u64 + 2), exponent)?;
            require_bit_budget(total.bits() as u128 + factor.bits() as u128)?;
            total *= factor;
        }
        Ok(total)
    }

    fn modular(&self, params: &ParamTuple) -> Result<ModValue, TallyError> {
        let (n, m) = split(self.id(), params)?;
        require_coprime_bases(self.id(), params, m)?;
        let spread = mod_pow(2, n - m, ORDER);
        Ok(reduced_exponents(m)?
            .into_iter()
            .enumerate()
            .map(|(k, exponent)| ModValue::new(k as u64 + 2).pow(mod_mul(exponent, spread, ORDER)))
            .product())
    }

    fn enumerator(&self) -> Option<&dyn Enumerator> {
        Some(self)
    }
}

impl Enumerator for SelectionProduct {
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let (n, m) = split(self.id(), params)?;
        // selected positions come first in the row
        let m = m as usize;
        Ok(mesh(&vec![1; n as usize])
            .map(|subset| 2 + subset[..m].iter().sum::<u64>())
            .fold(BigUint::one(), |acc, factor| acc * factor))
    }
}

/// Same product built as `A_m = prod_{k=0..m} (k+2)^C(m,k)` and then squared
/// `n - m` times. Defined for `n >= 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionLadder;

impl Formula for SelectionLadder {
    fn id(&self) -> &'static str {
        ids::SELECTION_PRODUCT_LADDER
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(2)
    }

    fn check_domain(&self, params: &ParamTuple) -> Result<(), TallyError> {
        if params.get(0)? == 0 {
            return Err(outside_domain(self.id(), params, "n >= 1"));
        }
        require_selected_le_total(self.id(), params)
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let (n, m) = split(self.id(), params)?;
        require_row_budget(n)?;
        let mut value = BigUint::one();
        for (k, entry) in binomial_row(m).into_iter().enumerate() {
            value *= checked_power(&BigUint::from(k as u64 + 2), to_u64_exponent(&entry)?)?;
        }
        for _ in m..n {
            require_bit_budget(2 * value.bits() as u128)?;
            value = &value * &value;
        }
        Ok(value)
    }

    fn modular(&self, params: &ParamTuple) -> Result<ModValue, TallyError> {
        let (n, m) = split(self.id(), params)?;
        require_coprime_bases(self.id(), params, m)?;
        let mut value: ModValue = reduced_exponents(m)?
            .into_iter()
            .enumerate()
            .map(|(k, exponent)| ModValue::new(k as u64 + 2).pow(exponent))
            .product();
        for _ in m..n {
            value = value * value;
        }
        Ok(value)
    }
}
