//! Property-based tests for key generation.
//!
//! These tests use proptest to verify ordering invariants hold across
//! randomly generated insertion sequences.

use proptest::prelude::*;

use fracindex::{Key, KeyError, KeyGenerator, MemoryIndexer};

/// Deterministic pool of `n` sequential keys.
fn sequential_keys(n: usize) -> Vec<Key> {
    let mut idx = MemoryIndexer::new();
    for _ in 0..n {
        idx.insert_at_end().unwrap();
    }
    idx.keys()
}

proptest! {
    /// Random insertion positions never break the sorted order, and every
    /// remaining gap bisects deterministically and strictly.
    #[test]
    fn random_inserts_stay_ordered(ranks in prop::collection::vec(any::<u16>(), 2..100)) {
        let mut idx = MemoryIndexer::new();
        for rank in ranks {
            let keys = idx.keys();
            if keys.is_empty() {
                idx.insert(None, None).unwrap();
                continue;
            }
            // Pick a gap: before the first key, between two, or after the last.
            let gap = (rank as usize) % (keys.len() + 1);
            let after = if gap == 0 { None } else { Some(keys[gap - 1].clone()) };
            let before = keys.get(gap).cloned();
            idx.insert(after.as_ref(), before.as_ref()).unwrap();

            let now = idx.keys();
            prop_assert!(now.windows(2).all(|w| w[0] < w[1]));
        }

        let gen = KeyGenerator::default();
        for w in idx.keys().windows(2) {
            let m1 = gen.between(Some(&w[0]), Some(&w[1])).unwrap();
            let m2 = gen.between(Some(&w[0]), Some(&w[1])).unwrap();
            prop_assert_eq!(&m1, &m2);
            prop_assert!(w[0] < m1 && m1 < w[1]);
        }
    }

    /// Any pair of generated keys in the wrong order is rejected.
    #[test]
    fn reversed_bounds_always_fail((i, j) in (0usize..40, 0usize..40)) {
        prop_assume!(i != j);
        let (lo, hi) = (i.min(j), i.max(j));
        let keys = sequential_keys(40);
        let gen = KeyGenerator::default();
        let err = gen.between(Some(&keys[hi]), Some(&keys[lo])).unwrap_err();
        prop_assert!(
            matches!(err, KeyError::InvalidOrder { .. }),
            "expected KeyError::InvalidOrder, got {:?}",
            err
        );
    }

    /// Every generated key round-trips through serde unchanged.
    #[test]
    fn generated_keys_serde_roundtrip(n in 1usize..60) {
        for key in sequential_keys(n) {
            let json = serde_json::to_string(&key).unwrap();
            let back: Key = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, key);
        }
    }

    /// Open-ended generation above any key is strictly greater.
    #[test]
    fn open_upper_bound_is_strictly_above(rank in 0usize..40) {
        let keys = sequential_keys(40);
        let gen = KeyGenerator::default();
        let k = gen.between(Some(&keys[rank]), None).unwrap();
        prop_assert!(k > keys[rank]);
    }
}
