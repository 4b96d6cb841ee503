//! Benchmarks for cache key derivation
//!
//! Run with: cargo bench -p buildkey-cache

#![allow(clippy::unwrap_used)]

use buildkey_cache::{CacheKeyConfig, TaskExecutionState, calculate_cache_key};
use buildkey_hashing::HashAlgorithm;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Generate a task state with `count` input and output properties
fn generate_state(count: usize) -> TaskExecutionState {
    TaskExecutionState {
        task_class_name: "org.example.Compile".to_string(),
        class_loader_hash: Some(HashAlgorithm::Sha256.digest(b"task-classloader")),
        actions_class_loader_hash: Some(HashAlgorithm::Sha256.digest(b"actions-classloader")),
        input_hashes: (0..count)
            .map(|i| {
                (
                    format!("input_{i}"),
                    HashAlgorithm::Sha256.digest(i.to_string().as_bytes()),
                )
            })
            .collect(),
        output_property_names: (0..count).map(|i| format!("output_{i}")).collect(),
    }
}

fn benchmark_calculate_cache_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_cache_key");

    for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Sha512] {
        let config = CacheKeyConfig {
            algorithm,
            ..CacheKeyConfig::default()
        };
        for count in [10, 100, 1000] {
            let state = generate_state(count);
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), count),
                &state,
                |b, state| {
                    b.iter(|| black_box(calculate_cache_key(state, &config).unwrap()));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_calculate_cache_key);

criterion_main!(benches);
