use std::fmt::{self, Display};
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

use num_bigint::BigUint;
use serde::Serialize;
use tally_core::errors::TallyError;
use tally_core::MODULUS;

use crate::euclid::{mod_inverse, reduce_unsigned};

/// `a * b mod m` without overflow.
pub fn mod_mul(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

/// `base^exponent mod m` by square-and-multiply.
pub fn mod_pow(base: u64, exponent: u64, m: u64) -> u64 {
    if m == 1 {
        return 0;
    }
    let mut result = 1u64;
    let mut base = base % m;
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mod_mul(result, base, m);
        }
        base = mod_mul(base, base, m);
        exponent >>= 1;
    }
    result
}

/// Residue modulo [`MODULUS`]. Every operator returns a value in `[0, MODULUS)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct ModValue(u64);

impl ModValue {
    /// Additive identity.
    pub const ZERO: ModValue = ModValue(0);
    /// Multiplicative identity.
    pub const ONE: ModValue = ModValue(1);

    /// Reduces a non-negative integer.
    pub fn new(value: u64) -> Self {
        Self(value % MODULUS)
    }

    /// Reduces a signed integer with mathematical (non-truncating) modulo.
    pub fn from_signed(value: i64) -> Self {
        Self(value.rem_euclid(MODULUS as i64) as u64)
    }

    /// Reduces an exact count once.
    pub fn from_biguint(value: &BigUint) -> Self {
        Self(reduce_unsigned(value, MODULUS))
    }

    /// Canonical representative in `[0, MODULUS)`.
    pub fn value(self) -> u64 {
        self.0
    }

    /// `self^exponent`, logarithmic in the exponent.
    pub fn pow(self, exponent: u64) -> Self {
        Self(mod_pow(self.0, exponent, MODULUS))
    }

    /// Multiplicative inverse; fails with `NotInvertible` for zero.
    pub fn inverse(self) -> Result<Self, TallyError> {
        mod_inverse(self.0, MODULUS).map(Self)
    }

    /// `self / rhs`, i.e. `self * rhs^-1`.
    pub fn checked_div(self, rhs: Self) -> Result<Self, TallyError> {
        Ok(self * rhs.inverse()?)
    }
}

impl From<u64> for ModValue {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl Add for ModValue {
    type Output = ModValue;

    fn add(self, rhs: Self) -> Self::Output {
        // both operands are below 2^30, so the sum cannot overflow.
        Self((self.0 + rhs.0) % MODULUS)
    }
}

impl AddAssign for ModValue {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ModValue {
    type Output = ModValue;

    fn sub(self, rhs: Self) -> Self::Output {
        Self((self.0 + MODULUS - rhs.0) % MODULUS)
    }
}

impl Mul for ModValue {
    type Output = ModValue;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(mod_mul(self.0, rhs.0, MODULUS))
    }
}

impl MulAssign for ModValue {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for ModValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Product for ModValue {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Mul::mul)
    }
}

impl Display for ModValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
