use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::ToPrimitive;
use tally_core::errors::{ErrorInfo, TallyError};

/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`.
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1i128, 0i128);
    let (mut old_t, mut t) = (0i128, 1i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }
    if old_r < 0 {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

fn zero_modulus() -> TallyError {
    TallyError::domain("zero-modulus", "modulus must be positive")
}

/// Mathematical modulo of an arbitrary signed integer: the result lies in `[0, m)`
/// also for negative `x`.
pub fn mod_reduce(x: &BigInt, m: u64) -> Result<u64, TallyError> {
    if m == 0 {
        return Err(zero_modulus());
    }
    let reduced = x.mod_floor(&BigInt::from(m));
    // mod_floor with a positive divisor is non-negative and below m.
    Ok(reduced.to_u64().unwrap_or(0))
}

/// [`mod_reduce`] for machine integers.
pub fn mod_reduce_i128(x: i128, m: u64) -> Result<u64, TallyError> {
    if m == 0 {
        return Err(zero_modulus());
    }
    Ok(x.rem_euclid(m as i128) as u64)
}

/// Unique `x` in `[0, m)` with `a*x ≡ 1 (mod m)`, via the extended Euclidean
/// algorithm.
pub fn mod_inverse(a: u64, m: u64) -> Result<u64, TallyError> {
    if m == 0 {
        return Err(zero_modulus());
    }
    let (g, x, _) = extended_gcd((a % m) as i128, m as i128);
    if g != 1 {
        return Err(TallyError::NotInvertible(
            ErrorInfo::new("not-coprime", "value shares a factor with the modulus")
                .with_context("value", a.to_string())
                .with_context("modulus", m.to_string())
                .with_context("gcd", g.to_string()),
        ));
    }
    mod_reduce_i128(x, m)
}

/// Convenience wrapper reducing an exact count before inverting it.
pub(crate) fn reduce_unsigned(x: &BigUint, m: u64) -> u64 {
    (x % BigUint::from(m)).to_u64().unwrap_or(0)
}
