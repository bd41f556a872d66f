use num_bigint::BigUint;
use tally_arith::ModValue;
use tally_tree::{
    expected_stickmen, expected_stickmen_closed_form, stickmen_brute_force, stickmen_by_edges,
    stickmen_by_masks, DegreeSequence,
};

fn seq(values: &[u64]) -> DegreeSequence {
    DegreeSequence::new(values.to_vec()).unwrap()
}

#[test]
fn fourteen_node_expectation() {
    let ds = seq(&[5, 4, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 4, 1]);
    assert_eq!(stickmen_by_edges(&ds).unwrap(), BigUint::from(7_438_200u32));
    assert_eq!(expected_stickmen(&ds).unwrap(), ModValue::new(833_333_366));
    assert_eq!(
        expected_stickmen_closed_form(&ds).unwrap(),
        ModValue::new(833_333_366)
    );
}

#[test]
fn mask_predicate_regression_value() {
    let ds = seq(&[5, 4, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 4, 1]);
    assert_eq!(stickmen_by_masks(&ds), 66_240);
}

#[test]
fn brute_force_matches_edge_sum() {
    // one tree in six lacks the 0-1 edge
    let ds = seq(&[4, 3, 1, 1, 1, 1, 1, 2]);
    assert_eq!(stickmen_brute_force(&ds).unwrap(), BigUint::from(50u32));
    assert_eq!(stickmen_by_edges(&ds).unwrap(), BigUint::from(50u32));
    assert_eq!(expected_stickmen(&ds).unwrap(), ModValue::new(833_333_340));
    assert_eq!(
        expected_stickmen_closed_form(&ds).unwrap(),
        ModValue::new(833_333_340)
    );
}

#[test]
fn two_hubs_always_adjacent() {
    let ds = seq(&[4, 4, 1, 1, 1, 1, 1, 1]);
    assert_eq!(stickmen_brute_force(&ds).unwrap(), BigUint::from(120u32));
    assert_eq!(stickmen_by_edges(&ds).unwrap(), BigUint::from(120u32));
    assert_eq!(expected_stickmen(&ds).unwrap(), ModValue::new(6));
    assert_eq!(expected_stickmen_closed_form(&ds).unwrap(), ModValue::new(6));
}

#[test]
fn unrealizable_sequences_are_rejected() {
    let ds = seq(&[4, 4, 4, 1, 1, 1, 1]);
    assert!(expected_stickmen_closed_form(&ds).is_err());
    assert!(expected_stickmen(&ds).is_err());
}
