//! Benchmarks for the CLOCK-Pro eviction core.
//!
//! Run with: `cargo bench --bench clock_pro`

use std::hint::black_box;
use std::time::Instant;

use clockpro::builder::ClockProBuilder;
use clockpro::policy::clock_pro::{ClockProEviction, EntryId};
use clockpro::traits::Eviction;
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

/// Minimal key → handle table standing in for the cache that embeds the core.
struct KeyedCache {
    eviction: ClockProEviction,
    resident: FxHashMap<u64, EntryId>,
    keys: FxHashMap<EntryId, u64>,
}

impl KeyedCache {
    fn new(capacity: usize) -> Self {
        Self {
            eviction: ClockProBuilder::new(capacity).build(),
            resident: FxHashMap::default(),
            keys: FxHashMap::default(),
        }
    }

    /// Returns `true` on a hit.
    fn access(&mut self, key: u64) -> bool {
        if let Some(&id) = self.resident.get(&key) {
            self.eviction.record_hit(id);
            return true;
        }
        let id = self.eviction.insert_into_replacement_list(key as u32);
        self.resident.insert(key, id);
        self.keys.insert(id, key);
        for detached in self.eviction.evict_excess() {
            if let Some(old) = self.keys.remove(&detached.id) {
                self.resident.remove(&old);
            }
        }
        false
    }
}

#[derive(Debug, Clone, Copy)]
enum Workload {
    Uniform,
    Hotset { hot_fraction: f64, hot_prob: f64 },
    Scan,
    /// Hot set with periodic one-off scans mixed in.
    ScanResistance,
}

fn next_key(rng: &mut SmallRng, workload: Workload, universe: u64, step: u64) -> u64 {
    match workload {
        Workload::Uniform => rng.gen_range(0..universe),
        Workload::Hotset {
            hot_fraction,
            hot_prob,
        } => {
            let hot = ((universe as f64 * hot_fraction) as u64).max(1);
            if rng.gen_bool(hot_prob) {
                rng.gen_range(0..hot)
            } else {
                rng.gen_range(hot..universe.max(hot + 1))
            }
        },
        Workload::Scan => step % universe,
        Workload::ScanResistance => {
            if step % 4 == 0 {
                universe + step
            } else {
                rng.gen_range(0..universe / 8)
            }
        },
    }
}

// ============================================================================
// Admission + eviction churn
// ============================================================================

fn bench_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_pro");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = KeyedCache::new(1024);
                for key in 0..1024u64 {
                    cache.access(key);
                }
                cache
            },
            |mut cache| {
                for key in 0..4096u64 {
                    cache.access(black_box(10_000 + key));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Raw controller operations
// ============================================================================

fn bench_record_hit_ns(c: &mut Criterion) {
    c.bench_function("clock_pro_record_hit_ns", |b| {
        b.iter_custom(|iters| {
            let mut eviction = ClockProBuilder::new(16_384).build();
            let ids: Vec<_> = (0..16_384u32)
                .map(|fp| eviction.insert_into_replacement_list(fp))
                .collect();
            let start = Instant::now();
            for i in 0..iters {
                eviction.record_hit(black_box(ids[(i as usize) % ids.len()]));
            }
            start.elapsed()
        })
    });
}

fn bench_find_and_evict_ns(c: &mut Criterion) {
    c.bench_function("clock_pro_find_and_evict_ns", |b| {
        b.iter_custom(|iters| {
            let capacity = 4096u32;
            let mut eviction = ClockProBuilder::new(capacity as usize).build();
            let mut rng = SmallRng::seed_from_u64(7);
            for fp in 0..capacity {
                let id = eviction.insert_into_replacement_list(fp);
                if rng.gen_bool(0.3) {
                    eviction.record_hit(id);
                }
            }
            let start = Instant::now();
            for i in 0..iters {
                let victim = eviction.find_eviction_candidate();
                eviction.evict_entry(victim);
                eviction.insert_into_replacement_list(black_box(capacity + i as u32));
            }
            start.elapsed()
        })
    });
}

// ============================================================================
// Workload hit rate
// ============================================================================

fn bench_workload_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_pro_workload_hit_rate");
    let operations = 200_000u64;
    group.throughput(Throughput::Elements(operations));

    let workloads = [
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        ("scan", Workload::Scan),
        ("scan_resistance", Workload::ScanResistance),
    ];

    for (name, workload) in workloads {
        group.bench_function(name, |b| {
            b.iter_custom(|iters| {
                let mut total = std::time::Duration::default();
                for _ in 0..iters {
                    let mut cache = KeyedCache::new(4096);
                    let mut rng = SmallRng::seed_from_u64(42);
                    let mut hits = 0u64;
                    let start = Instant::now();
                    for step in 0..operations {
                        if cache.access(next_key(&mut rng, workload, 16_384, step)) {
                            hits += 1;
                        }
                    }
                    black_box(hits as f64 / operations as f64);
                    total += start.elapsed();
                }
                total
            })
        });
    }

    group.finish();
}

criterion_group!(end_to_end, bench_eviction_churn);
criterion_group!(micro_ops, bench_record_hit_ns, bench_find_and_evict_ns);
criterion_group!(hit_rate, bench_workload_hit_rate);
criterion_main!(end_to_end, micro_ops, hit_rate);
