#![cfg(test)]

// Property tests for BucketTable kept inside the crate so they can inspect
// the private bucket array after every operation.

use crate::bucket::Bucket;
use crate::table::BucketTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    TryInsert(usize, i32),
    Get(usize),
    Contains(String),
    Erase(usize),
    Remove(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::TryInsert(i, v)),
            idx.clone().prop_map(Op::Get),
            "[a-z]{0,5}".prop_map(Op::Contains),
            idx.clone().prop_map(Op::Erase),
            idx.clone().prop_map(Op::Remove),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Structural invariants over the bucket array:
// - no Collision bucket with fewer than two entries;
// - no key twice in one bucket;
// - every key sits in the bucket its hash selects;
// - the sum of bucket sizes equals len().
fn check_buckets<K, V>(t: &BucketTable<K, V>) -> Result<(), TestCaseError>
where
    K: Eq + std::hash::Hash + std::fmt::Debug,
{
    let mut total = 0;
    for (i, b) in t.buckets().iter().enumerate() {
        if let Bucket::Collision(entries) = b {
            prop_assert!(entries.len() >= 2, "bucket {} collision with {} entries", i, entries.len());
        }
        let entries = b.entries();
        for (n, e) in entries.iter().enumerate() {
            prop_assert_eq!(t.bucket_index(&e.key), i, "key {:?} in wrong bucket", e.key);
            prop_assert!(
                entries[n + 1..].iter().all(|o| o.key != e.key),
                "duplicate key {:?} in bucket {}",
                e.key,
                i
            );
        }
        total += entries.len();
    }
    prop_assert_eq!(total, t.len());
    Ok(())
}

fn run_scenario(
    mut sut: BucketTable<String, i32>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let fresh = !model.contains_key(&k);
                prop_assert_eq!(sut.insert(k.clone(), v), fresh);
                // First writer wins.
                model.entry(k).or_insert(v);
            }
            Op::TryInsert(i, v) => {
                let k = pool[i].clone();
                let fresh = !model.contains_key(&k);
                prop_assert_eq!(sut.try_insert(k.clone(), v), Ok(fresh));
                model.entry(k).or_insert(v);
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k.as_str()), model.get(k));
                prop_assert_eq!(sut.get_cloned(k.as_str()), model.get(k).copied());
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            Op::Erase(i) => {
                let k = &pool[i];
                sut.erase(k.as_str());
                model.remove(k);
                prop_assert!(!sut.contains_key(k.as_str()));
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k.as_str()), model.remove(k));
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k.as_str()), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", s, m),
                }
            }
            Op::Iterate => {
                let walked: Vec<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(walked.len(), sut.len());
                let as_map: BTreeMap<_, _> = walked.into_iter().collect();
                prop_assert_eq!(as_map.len(), sut.len(), "iteration yielded a key twice");
                let expected: BTreeMap<_, _> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(as_map, expected);
            }
        }

        check_buckets(&sut)?;
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: state-machine equivalence against a first-writer-wins
// HashMap model, with bucket invariants checked after every step.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(BucketTable::new(), pool, ops)?;
    }
}

// Property: same invariants with a single bucket, so every key collides and
// every operation goes through the Collision paths.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_single_bucket((pool, ops) in arb_scenario()) {
        let sut = BucketTable::with_buckets(1).unwrap();
        run_scenario(sut, pool, ops)?;
    }
}

// Property: integer keys that are multiples of the bucket count all share
// bucket 0; each stays retrievable and erasable on its own.
proptest! {
    #[test]
    fn prop_aligned_integer_keys_share_a_bucket(
        buckets in 1usize..=40,
        n in 2usize..=60,
        erase in proptest::collection::vec(any::<bool>(), 60),
    ) {
        let mut t: BucketTable<u64, u64> = BucketTable::with_buckets(buckets).unwrap();
        let keys: Vec<u64> = (0..n as u64).map(|i| i * buckets as u64).collect();
        for &k in &keys {
            prop_assert!(t.insert(k, k + 1));
            prop_assert_eq!(t.bucket_index(&k), 0);
        }
        for (&k, &drop_it) in keys.iter().zip(&erase) {
            if drop_it {
                t.erase(&k);
            }
        }
        for (&k, &dropped) in keys.iter().zip(&erase) {
            prop_assert_eq!(t.get(&k).copied(), (!dropped).then_some(k + 1));
        }
        check_buckets(&t)?;
    }
}
