use bucket_table::BucketTable;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::collections::HashMap;
use std::time::Duration;

const NUM_KEYS: usize = 10_000;
const ALPHANUM: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// Random 10-character alphanumeric keys.
fn keys(seed: u64) -> Vec<String> {
    let mut rng = lcg(seed);
    (0..NUM_KEYS)
        .map(|_| {
            (0..10)
                .map(|_| {
                    let r = rng.next().unwrap_or_default() >> 33;
                    ALPHANUM[(r % ALPHANUM.len() as u64) as usize] as char
                })
                .collect()
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let keys = keys(42);
    let mut g = c.benchmark_group("insert_10k");
    g.bench_function("bucket_table", |b| {
        b.iter_batched(
            BucketTable::<String, usize>::new,
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.insert(k.clone(), i);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    g.bench_function("std_hashmap", |b| {
        b.iter_batched(
            HashMap::<String, usize>::new,
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.entry(k.clone()).or_insert(i);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let keys = keys(42);
    let table: BucketTable<String, usize> =
        keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();
    let map: HashMap<String, usize> =
        keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();

    let mut g = c.benchmark_group("lookup_10k");
    g.bench_function("bucket_table", |b| {
        b.iter(|| {
            let sum: usize = keys.iter().filter_map(|k| table.get(k.as_str())).sum();
            black_box(sum)
        })
    });
    g.bench_function("std_hashmap", |b| {
        b.iter(|| {
            let sum: usize = keys.iter().filter_map(|k| map.get(k.as_str())).sum();
            black_box(sum)
        })
    });
    g.finish();
}

// Insert every key, looking up an earlier key on every other step.
fn bench_mixed(c: &mut Criterion) {
    let keys = keys(42);
    let mut g = c.benchmark_group("mixed_10k");
    g.bench_function("bucket_table", |b| {
        b.iter_batched(
            BucketTable::<String, usize>::new,
            |mut t| {
                let mut sum = 0usize;
                for (i, k) in keys.iter().enumerate() {
                    t.insert(k.clone(), i);
                    if i % 2 == 0 {
                        sum += t.get(keys[i / 2].as_str()).copied().unwrap_or(0);
                    }
                }
                black_box(sum)
            },
            BatchSize::SmallInput,
        )
    });
    g.bench_function("std_hashmap", |b| {
        b.iter_batched(
            HashMap::<String, usize>::new,
            |mut m| {
                let mut sum = 0usize;
                for (i, k) in keys.iter().enumerate() {
                    m.entry(k.clone()).or_insert(i);
                    if i % 2 == 0 {
                        sum += m.get(keys[i / 2].as_str()).copied().unwrap_or(0);
                    }
                }
                black_box(sum)
            },
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_lookup, bench_mixed
}
criterion_main!(benches);
