use num_bigint::BigUint;
use proptest::prelude::*;
use tally_core::serde::{from_json_slice, stable_hash_string, to_canonical_json_bytes};
use tally_core::{Count, EvalMode, ParamTuple, MODULUS};

#[test]
fn exact_count_reduces_once() {
    let exact = Count::Exact(BigUint::from(89_161_004_482_560_000u64));
    assert_eq!(exact.residue(), 858_432_979);
    assert_eq!(exact.into_mode(EvalMode::Modular), Count::Modular(858_432_979));
}

#[test]
fn param_tuple_json_round_trip_rejects_negatives() {
    let tuple = ParamTuple::new(&[5, 3, 1]).unwrap();
    let bytes = to_canonical_json_bytes(&tuple).unwrap();
    assert_eq!(bytes, b"[5,3,1]");
    let decoded: ParamTuple = from_json_slice(&bytes).unwrap();
    assert_eq!(decoded, tuple);
    assert!(from_json_slice::<ParamTuple>(b"[5,-3]").is_err());
}

#[test]
fn stable_hash_ignores_key_order() {
    let a = serde_json::json!({"b": 1, "a": [2, 3]});
    let b = serde_json::json!({"a": [2, 3], "b": 1});
    assert_eq!(stable_hash_string(&a).unwrap(), stable_hash_string(&b).unwrap());
}

proptest! {
    #[test]
    fn residue_matches_u128_reduction(value in any::<u128>()) {
        let count = Count::Exact(BigUint::from(value));
        prop_assert_eq!(count.residue() as u128, value % MODULUS as u128);
    }
}
