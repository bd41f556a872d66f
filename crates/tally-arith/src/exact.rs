use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use tally_core::errors::{ErrorInfo, TallyError};

/// `base^exponent` by square-and-multiply.
pub fn power(base: &BigUint, exponent: u64) -> BigUint {
    let mut result = BigUint::one();
    let mut square = base.clone();
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result *= &square;
        }
        exponent >>= 1;
        if exponent > 0 {
            square = &square * &square;
        }
    }
    result
}

/// `n!` for `n >= 0`.
pub fn factorial(n: i64) -> Result<BigUint, TallyError> {
    if n < 0 {
        return Err(TallyError::Domain(
            ErrorInfo::new("negative-factorial", "factorial is undefined for negative input")
                .with_context("n", n.to_string()),
        ));
    }
    Ok(factorial_u64(n as u64))
}

/// `n!` for an argument that is non-negative by type.
pub fn factorial_u64(n: u64) -> BigUint {
    (2..=n).fold(BigUint::one(), |acc, k| acc * k)
}

/// `C(n, k)`, zero whenever `k < 0`, `n < 0` or `k > n`.
pub fn binomial(n: i64, k: i64) -> BigUint {
    if k < 0 || n < 0 || k > n {
        return BigUint::default();
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    // every prefix product of consecutive integers is divisible by the prefix factorial.
    (1..=k).fold(BigUint::one(), |acc, i| acc * (n - k + i) / i)
}

/// Largest exact result, in bits, that evaluation will materialise.
pub const EXACT_BIT_BUDGET: u64 = 1 << 24;

fn over_budget(bits: u128) -> TallyError {
    TallyError::ParameterDomain(
        ErrorInfo::new("exponent-too-large", "exact power exceeds representable size")
            .with_context("result_bits", bits.to_string())
            .with_context("budget_bits", EXACT_BIT_BUDGET.to_string())
            .with_hint("use modular evaluation for parameters of this size"),
    )
}

/// Fails with `ParameterDomain` when a result of `bits` bits exceeds
/// [`EXACT_BIT_BUDGET`].
pub fn require_bit_budget(bits: u128) -> Result<(), TallyError> {
    if bits > EXACT_BIT_BUDGET as u128 {
        return Err(over_budget(bits));
    }
    Ok(())
}

/// [`power`] refusing results larger than [`EXACT_BIT_BUDGET`] before any
/// squaring happens.
pub fn checked_power(base: &BigUint, exponent: u64) -> Result<BigUint, TallyError> {
    // base >= 2 has at least (bits - 1) * exponent + 1 bits in its power.
    if base.bits() > 1 {
        require_bit_budget((base.bits() - 1) as u128 * exponent as u128 + 1)?;
    }
    Ok(power(base, exponent))
}

/// Narrows an exact exponent to `u64`, refusing values whose power could not be
/// materialised anyway.
pub fn to_u64_exponent(exponent: &BigUint) -> Result<u64, TallyError> {
    exponent.to_u64().ok_or_else(|| {
        TallyError::ParameterDomain(
            ErrorInfo::new("exponent-too-large", "exact power exceeds representable size")
                .with_context("exponent_bits", exponent.bits().to_string())
                .with_hint("use modular evaluation for parameters of this size"),
        )
    })
}
