// BucketTable property tests over the public API.
//
// Property 1: insert-then-get and first-writer-wins on arbitrary keys.
// Property 2: iteration yields exactly the pairs contains_key reports,
//             each once, after any sequence of inserts and erases.
// Property 3: erase is idempotent.
// Property 4: ≥100 keys on 30 buckets lose nothing.
use bucket_table::BucketTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

proptest! {
    #[test]
    fn prop_insert_then_get(k in any::<i64>(), v in any::<i32>(), other in any::<i32>()) {
        let mut t = BucketTable::new();
        prop_assert!(t.get(&k).is_none());
        prop_assert!(!t.contains_key(&k));

        prop_assert!(t.insert(k, v));
        prop_assert_eq!(t.get(&k), Some(&v));

        prop_assert!(!t.insert(k, other));
        prop_assert_eq!(t.get(&k), Some(&v));
    }
}

proptest! {
    #[test]
    fn prop_iteration_matches_contains(
        ops in proptest::collection::vec((any::<bool>(), 0u16..200, any::<u8>()), 1..200)
    ) {
        let mut t: BucketTable<u16, u8> = BucketTable::new();
        let mut model: BTreeMap<u16, u8> = BTreeMap::new();
        for (is_insert, k, v) in ops {
            if is_insert {
                t.insert(k, v);
                model.entry(k).or_insert(v);
            } else {
                t.erase(&k);
                model.remove(&k);
            }
        }

        let walked: Vec<(u16, u8)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let keys: BTreeSet<u16> = walked.iter().map(|(k, _)| *k).collect();
        prop_assert_eq!(keys.len(), walked.len(), "no key yielded twice");

        let present: BTreeSet<u16> = (0u16..200).filter(|k| t.contains_key(k)).collect();
        prop_assert_eq!(&keys, &present);

        let walked: BTreeMap<u16, u8> = walked.into_iter().collect();
        prop_assert_eq!(walked, model);
    }
}

proptest! {
    #[test]
    fn prop_erase_idempotent(
        keys in proptest::collection::vec(0u32..500, 0..120),
        target in 0u32..500,
    ) {
        let mut once: BucketTable<u32, u32> = keys.iter().map(|&k| (k, k)).collect();
        let mut twice = once.clone();

        once.erase(&target);
        twice.erase(&target);
        twice.erase(&target);

        let a: Vec<_> = once.iter().collect();
        let b: Vec<_> = twice.iter().collect();
        prop_assert_eq!(a, b);
        prop_assert!(!twice.contains_key(&target));
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_many_keys_few_buckets(keys in proptest::collection::btree_set(any::<u32>(), 100..300)) {
        let mut t: BucketTable<u32, u64> = BucketTable::new();
        prop_assert_eq!(t.bucket_count(), 30);
        for &k in &keys {
            prop_assert!(t.insert(k, u64::from(k) * 3));
        }
        prop_assert_eq!(t.len(), keys.len());
        for &k in &keys {
            prop_assert_eq!(t.get(&k), Some(&(u64::from(k) * 3)));
        }

        // Erase every other key; the rest must be untouched.
        for (i, &k) in keys.iter().enumerate() {
            if i % 2 == 0 {
                t.erase(&k);
            }
        }
        for (i, &k) in keys.iter().enumerate() {
            prop_assert_eq!(t.contains_key(&k), i % 2 == 1);
        }
        prop_assert_eq!(t.iter().count(), keys.len() / 2);
    }
}
