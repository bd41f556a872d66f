use num_bigint::BigUint;
use num_traits::{One, Zero};
use tally_arith::{binomial, FactorialTable, ModValue};
use tally_core::errors::TallyError;
use tally_core::params::ParamTuple;
use tally_mesh::masks;

use crate::formula::{require_selected_le_total, Arity, Enumerator, Formula};
use crate::ids;

/// Maximal runs of ones in a 0/1 row.
pub fn count_runs(row: &[u64]) -> u64 {
    row.iter()
        .enumerate()
        .filter(|(idx, bit)| **bit == 1 && (*idx == 0 || row[idx - 1] == 0))
        .count() as u64
}

/// Compositions of `total` into `parts` positive parts.
fn compositions(total: u64, parts: i64) -> BigUint {
    match (total, parts) {
        (0, 0) => BigUint::one(),
        (total, parts) if total >= 1 && parts >= 1 => binomial(total as i64 - 1, parts - 1),
        _ => BigUint::zero(),
    }
}

fn compositions_mod(table: &FactorialTable, total: u64, parts: i64) -> Result<ModValue, TallyError> {
    match (total, parts) {
        (0, 0) => Ok(ModValue::ONE),
        (total, parts) if total >= 1 && parts >= 1 => table.binomial(total as i64 - 1, parts - 1),
        _ => Ok(ModValue::ZERO),
    }
}

/// Rows of length `n` with `n - m` ones forming exactly `c` maximal runs.
///
/// The ones split into `c` runs in `comp(n-m, c)` ways. The `m` zeros fill the
/// `c - 1` inner gaps and optionally either end, giving
/// `comp(m, c-1) + 2 comp(m, c) + comp(m, c+1)`. A row without ones has zero runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectedComponents;

impl ConnectedComponents {
    fn split(params: &ParamTuple) -> Result<(u64, u64, u64), TallyError> {
        require_selected_le_total(ids::CONNECTED_COMPONENTS, params)?;
        Ok((params.get(0)?, params.get(1)?, params.get(2)?))
    }
}

impl Formula for ConnectedComponents {
    fn id(&self) -> &'static str {
        ids::CONNECTED_COMPONENTS
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(3)
    }

    fn check_domain(&self, params: &ParamTuple) -> Result<(), TallyError> {
        require_selected_le_total(self.id(), params)
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let (n, m, c) = Self::split(params)?;
        let ones = n - m;
        if ones == 0 {
            return Ok(BigUint::from(u32::from(c == 0)));
        }
        let c = c as i64;
        let zeros = compositions(m, c - 1) + compositions(m, c) * 2u32 + compositions(m, c + 1);
        Ok(compositions(ones, c) * zeros)
    }

    fn modular(&self, params: &ParamTuple) -> Result<ModValue, TallyError> {
        let (n, m, c) = Self::split(params)?;
        let ones = n - m;
        if ones == 0 {
            return Ok(if c == 0 { ModValue::ONE } else { ModValue::ZERO });
        }
        let table = FactorialTable::new(n as usize)?;
        let c = c as i64;
        let zeros = compositions_mod(&table, m, c - 1)?
            + compositions_mod(&table, m, c)? * ModValue::new(2)
            + compositions_mod(&table, m, c + 1)?;
        Ok(compositions_mod(&table, ones, c)? * zeros)
    }

    fn enumerator(&self) -> Option<&dyn Enumerator> {
        Some(self)
    }
}

impl Enumerator for ConnectedComponents {
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let (n, m, c) = Self::split(params)?;
        let hits = masks(n as usize, n - m)
            .filter(|row| count_runs(row) == c)
            .count();
        Ok(BigUint::from(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs() {
        assert_eq!(count_runs(&[]), 0);
        assert_eq!(count_runs(&[0, 0]), 0);
        assert_eq!(count_runs(&[1, 1, 0, 1]), 2);
        assert_eq!(count_runs(&[0, 1, 0, 1, 0, 1]), 3);
    }

    #[test]
    fn empty_ones_have_no_runs() {
        let zero = ParamTuple::from_unsigned(vec![0, 0, 0]);
        assert_eq!(ConnectedComponents.exact(&zero).unwrap(), BigUint::one());
        let none = ParamTuple::from_unsigned(vec![4, 4, 1]);
        assert_eq!(ConnectedComponents.exact(&none).unwrap(), BigUint::zero());
        assert_eq!(ConnectedComponents.modular(&none).unwrap(), ModValue::ZERO);
    }

    #[test]
    fn ten_cells_six_ones_three_runs() {
        let params = ParamTuple::from_unsigned(vec![10, 4, 3]);
        assert_eq!(ConnectedComponents.exact(&params).unwrap(), BigUint::from(100u32));
        assert_eq!(ConnectedComponents.brute_force(&params).unwrap(), BigUint::from(100u32));
        assert_eq!(ConnectedComponents.modular(&params).unwrap(), ModValue::new(100));
    }
}
