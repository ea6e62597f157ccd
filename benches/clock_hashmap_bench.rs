use clock_hashmap::ClockHashMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("clock_hashmap_insert_10k", |b| {
        b.iter_batched(
            || ClockHashMap::<String, u64>::new(),
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    let _ = m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("clock_hashmap_get_hit", |b| {
        let mut m = ClockHashMap::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().cloned().enumerate() {
            let _ = m.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.peek(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("clock_hashmap_get_miss", |b| {
        let mut m = ClockHashMap::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            let _ = m.insert(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.peek(&k));
        })
    });
}

// Steady-state bounded churn: every insert past the cap runs the
// second-chance sweep, so this measures eviction plus probing together.
fn bench_bounded_churn(c: &mut Criterion) {
    c.bench_function("clock_hashmap_bounded_churn", |b| {
        let mut m = ClockHashMap::bounded(1024, 1024).unwrap();
        let mut gen = lcg(23);
        for _ in 0..1024 {
            let x = gen.next().unwrap();
            let _ = m.insert(key(x), x);
        }
        b.iter(|| {
            let x = gen.next().unwrap();
            let _ = m.insert(key(x), x);
            black_box(m.len());
        })
    });
}

fn bench_remove_insert_cycle(c: &mut Criterion) {
    c.bench_function("clock_hashmap_remove_insert_cycle", |b| {
        let mut m = ClockHashMap::new();
        let keys: Vec<_> = lcg(31).take(4_096).map(key).collect();
        for (i, k) in keys.iter().cloned().enumerate() {
            let _ = m.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            // Tombstone then reclaim the same key; exercises the stale
            // table accounting without growing the map.
            let k = it.next().unwrap();
            let v = m.remove(k).unwrap_or(0);
            let _ = m.insert(k.clone(), v);
            black_box(m.len());
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_bounded_churn, bench_remove_insert_cycle
}
criterion_main!(benches);
