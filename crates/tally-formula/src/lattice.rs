use num_bigint::BigUint;
use tally_arith::ModValue;
use tally_core::errors::TallyError;
use tally_core::params::ParamTuple;
use tally_mesh::mesh;

use crate::formula::{Arity, Enumerator, Formula};
use crate::ids;

fn ordered(params: &ParamTuple) -> Result<(u64, u64), TallyError> {
    let (x, y) = (params.get(0)?, params.get(1)?);
    Ok((x.min(y), x.max(y)))
}

fn min_sum_exact(a: u64, b: u64) -> BigUint {
    BigUint::from(a) * (a + 1) * (BigUint::from(b) * 3u32 - a + 1u32) / 6u32
}

fn min_sum_mod_values(a: ModValue, b: ModValue) -> Result<ModValue, TallyError> {
    let spread = ModValue::new(3) * b - a + ModValue::ONE;
    Ok(a * (a + ModValue::ONE) * spread * ModValue::new(6).inverse()?)
}

/// `sum_{i<=m} sum_{j<=n} min(i, j)`, closed form `a(a+1)(3b-a+1)/6` with
/// `a = min(m, n)` and `b = max(m, n)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinSum;

impl Formula for MinSum {
    fn id(&self) -> &'static str {
        ids::MIN_SUM
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(2)
    }

    fn check_domain(&self, _params: &ParamTuple) -> Result<(), TallyError> {
        Ok(())
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let (a, b) = ordered(params)?;
        Ok(min_sum_exact(a, b))
    }

    fn modular(&self, params: &ParamTuple) -> Result<ModValue, TallyError> {
        let (a, b) = ordered(params)?;
        min_sum_mod_values(ModValue::new(a), ModValue::new(b))
    }

    fn enumerator(&self) -> Option<&dyn Enumerator> {
        Some(self)
    }
}

impl Enumerator for MinSum {
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let total: u128 = mesh(&[params.get(0)?, params.get(1)?])
            .map(|point| point[0].min(point[1]) as u128)
            .sum();
        Ok(BigUint::from(total))
    }
}

/// Integer triples `(x, y, z)` with `x <= a`, `y <= b` and `z <= min(x, y)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedTriples;

impl Formula for BoundedTriples {
    fn id(&self) -> &'static str {
        ids::BOUNDED_TRIPLES
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(2)
    }

    fn check_domain(&self, _params: &ParamTuple) -> Result<(), TallyError> {
        Ok(())
    }

    fn exact(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let (a, b) = ordered(params)?;
        Ok(min_sum_exact(a, b) + BigUint::from(a + 1) * (b + 1))
    }

    fn modular(&self, params: &ParamTuple) -> Result<ModValue, TallyError> {
        let (a, b) = ordered(params)?;
        let (a, b) = (ModValue::new(a), ModValue::new(b));
        Ok(min_sum_mod_values(a, b)? + (a + ModValue::ONE) * (b + ModValue::ONE))
    }

    fn enumerator(&self) -> Option<&dyn Enumerator> {
        Some(self)
    }
}

impl Enumerator for BoundedTriples {
    fn brute_force(&self, params: &ParamTuple) -> Result<BigUint, TallyError> {
        let (a, b) = (params.get(0)?, params.get(1)?);
        let hits = mesh(&[a, b, a.min(b)])
            .filter(|point| point[2] <= point[0].min(point[1]))
            .count();
        Ok(BigUint::from(hits))
    }
}
