use num_bigint::BigInt;
use proptest::prelude::*;
use tally_arith::{mod_inverse, mod_reduce, mod_reduce_i128, ModValue};
use tally_core::errors::TallyError;
use tally_core::MODULUS;

proptest! {
    #[test]
    fn inverse_satisfies_identity(a in 1u64..MODULUS) {
        let inv = mod_inverse(a, MODULUS).unwrap();
        prop_assert!(inv < MODULUS);
        prop_assert_eq!((a as u128 * inv as u128) % MODULUS as u128, 1);
        prop_assert_eq!(ModValue::new(a).inverse().unwrap().value(), inv);
    }

    #[test]
    fn multiples_of_the_prime_are_not_invertible(k in 0u64..1000) {
        let err = mod_inverse(k * MODULUS, MODULUS).unwrap_err();
        prop_assert!(matches!(err, TallyError::NotInvertible(_)));
    }

    #[test]
    fn composite_modulus_needs_coprimality(a in 1u64..10_000, m in 2u64..10_000) {
        let g = num_integer::gcd(a, m);
        match mod_inverse(a, m) {
            Ok(inv) => {
                prop_assert_eq!(g, 1);
                prop_assert_eq!((a * inv) % m, 1 % m);
            }
            Err(err) => {
                prop_assert!(g != 1);
                prop_assert!(matches!(err, TallyError::NotInvertible(_)));
            }
        }
    }

    #[test]
    fn reduction_is_mathematical_modulo(x in any::<i64>(), m in 1u64..1_000_000) {
        let expected = (x as i128).rem_euclid(m as i128) as u64;
        prop_assert_eq!(mod_reduce(&BigInt::from(x), m).unwrap(), expected);
        prop_assert_eq!(mod_reduce_i128(x as i128, m).unwrap(), expected);
    }
}

#[test]
fn zero_modulus_is_a_domain_error() {
    assert!(matches!(
        mod_reduce(&BigInt::from(5), 0),
        Err(TallyError::Domain(_))
    ));
    assert!(matches!(mod_inverse(5, 0), Err(TallyError::Domain(_))));
}
