#![deny(missing_docs)]

//! Exact and modular integer arithmetic.
//!
//! Exact routines work on [`num_bigint::BigUint`] and never overflow. Modular
//! routines reduce after every operation so chained products stay bounded;
//! exponentiation is square-and-multiply throughout.

mod euclid;
mod exact;
mod modular;
mod number;
mod tables;

pub use euclid::{extended_gcd, mod_inverse, mod_reduce, mod_reduce_i128};
pub use exact::{
    binomial, checked_power, factorial, factorial_u64, power, require_bit_budget,
    to_u64_exponent, EXACT_BIT_BUDGET,
};
pub use modular::{mod_mul, mod_pow, ModValue};
pub use number::{binomial_is_odd, is_prime};
pub use tables::FactorialTable;
