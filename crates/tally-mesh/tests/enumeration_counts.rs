use proptest::prelude::*;
use tally_mesh::{cartesian, fixed_sum_mesh, masks, mesh, mesh_size, InclusiveRange};

fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    (1..=k).fold(1, |acc, i| acc * (n - k + i) / i)
}

#[test]
fn mask_counts_are_binomial() {
    for n in 0..=10usize {
        for w in 0..=n as u64 + 1 {
            assert_eq!(masks(n, w).count() as u64, binomial(n as u64, w), "n={n} w={w}");
        }
    }
}

#[test]
fn fixed_sum_counts_weak_compositions() {
    // weak compositions of 4 into 3 parts each at most 4: C(6, 2)
    assert_eq!(fixed_sum_mesh(&[4, 4, 4], 4).count(), 15);
    // caps cut the count: x0 <= 1, x1 <= 1, x0 + x1 = 1
    assert_eq!(fixed_sum_mesh(&[1, 1], 1).count(), 2);
    for point in fixed_sum_mesh(&[3, 2, 5], 6) {
        assert_eq!(point.iter().sum::<u64>(), 6);
    }
}

#[test]
fn meshes_are_restartable() {
    let first: Vec<_> = mesh(&[2, 1, 3]).collect();
    let second: Vec<_> = mesh(&[2, 1, 3]).collect();
    assert_eq!(first, second);
    let walker = mesh(&[2, 2]);
    let cloned: Vec<_> = walker.clone().collect();
    assert_eq!(cloned, walker.collect::<Vec<_>>());
}

#[test]
fn cartesian_offsets_ranges() {
    let ranges = [
        InclusiveRange::new(2, 3).unwrap(),
        InclusiveRange::new(5, 5).unwrap(),
    ];
    let tuples: Vec<String> = cartesian(&ranges).map(|t| t.to_string()).collect();
    assert_eq!(tuples, vec!["(2, 5)", "(3, 5)"]);
}

#[test]
fn ranges_parse_from_pairs() {
    let range: InclusiveRange = serde_json::from_str("[1, 4]").unwrap();
    assert_eq!((range.start(), range.end()), (1, 4));
    assert!(serde_json::from_str::<InclusiveRange>("[4, 1]").is_err());
    assert!(InclusiveRange::new(4, 1).is_err());
}

proptest! {
    #[test]
    fn mesh_visits_every_point_once_in_order(bounds in proptest::collection::vec(0u64..4, 0..5)) {
        let points: Vec<_> = mesh(&bounds).collect();
        prop_assert_eq!(points.len() as u128, mesh_size(&bounds));
        for pair in points.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for point in &points {
            for (x, b) in point.iter().zip(&bounds) {
                prop_assert!(x <= b);
            }
        }
    }
}
