use rand::RngCore;
use tally_core::rng::{derive_substream_seed, RngHandle};

#[test]
fn rng_emits_reproducible_sequence() {
    let mut rng_a = RngHandle::from_seed(1234);
    let mut rng_b = RngHandle::from_seed(1234);

    let seq_a: Vec<u64> = (0..100).map(|_| rng_a.next_u64()).collect();
    let seq_b: Vec<u64> = (0..100).map(|_| rng_b.next_u64()).collect();

    assert_eq!(seq_a, seq_b);
}

#[test]
fn substreams_diverge() {
    assert_ne!(derive_substream_seed(7, 0), derive_substream_seed(7, 1));
    let mut a = RngHandle::substream(7, 3);
    let mut b = RngHandle::from_seed(derive_substream_seed(7, 3));
    assert_eq!(a.next_u64(), b.next_u64());
}

#[test]
fn below_stays_in_range() {
    let mut rng = RngHandle::from_seed(99);
    for _ in 0..1000 {
        assert!(rng.below(7) < 7);
    }
}
