//! # Genesis Pipeline Benchmarks
//!
//! | Stage | Measured |
//! |-------|----------|
//! | bb-02 | single key derivation, sequential vs parallel batch |
//! | bb-03 | full genesis build per validator count |
//! | bb-01 | state encoding and hash tree root |

use std::time::Duration;

use bb_02_key_derivation::{derive_key, KeyDeriver, Seed};
use bb_tests::fixtures::{build_genesis, SCENARIO_GENESIS_TIME, SCENARIO_SEED};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::PresetConfig;

fn bench_key_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("bb-02-key-derivation");
    let seed = Seed::parse(SCENARIO_SEED).unwrap();

    group.bench_function("derive_single", |b| {
        b.iter(|| derive_key(black_box(&seed), black_box(7)).unwrap())
    });

    for count in [64u64, 512] {
        group.throughput(Throughput::Elements(count));
        let deriver = KeyDeriver::new(seed.clone(), count);
        group.bench_with_input(BenchmarkId::new("sequential", count), &deriver, |b, d| {
            b.iter(|| d.derive_all(false).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", count), &deriver, |b, d| {
            b.iter(|| d.derive_all(true).unwrap())
        });
    }
    group.finish();
}

fn bench_genesis_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bb-03-genesis-state");
    group.measurement_time(Duration::from_secs(10));
    let preset = PresetConfig::minimal();

    for count in [16u64, 64] {
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("build_minimal", count), &count, |b, &n| {
            b.iter(|| build_genesis(n, &preset, SCENARIO_GENESIS_TIME).unwrap())
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("bb-01-binary-codec");

    for preset in [PresetConfig::minimal(), PresetConfig::mainnet()] {
        let state = build_genesis(64, &preset, SCENARIO_GENESIS_TIME).unwrap();
        let bytes = state.encode(&preset).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        let name = preset.name.as_str();
        group.bench_function(BenchmarkId::new("encode", name), |b| {
            b.iter(|| state.encode(black_box(&preset)).unwrap())
        });
        group.bench_function(BenchmarkId::new("decode", name), |b| {
            b.iter(|| shared_types::BeaconState::decode(black_box(&bytes), &preset).unwrap())
        });
        group.bench_function(BenchmarkId::new("hash_tree_root", name), |b| {
            b.iter(|| state.hash_tree_root(black_box(&preset)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_key_derivation, bench_genesis_build, bench_codec);
criterion_main!(benches);
