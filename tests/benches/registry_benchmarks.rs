//! # CarLife Registry Benchmarks
//!
//! Throughput of the hot paths through the full service (authorization,
//! ledger, record table and bus publish).
//!
//! | Group | Operation | Expectation |
//! |-------|-----------|-------------|
//! | registry-mint | `mint` | O(1) per call |
//! | registry-read | `get_record_batch` | O(count) |
//! | registry-mutate | `update_info` / `add_maintenance` | O(1) per call |
//!
//! ```bash
//! cargo bench --package carlife-tests --bench registry_benchmarks
//! ```

use carlife_registry::prelude::*;
use carlife_tests::fixtures::{mint_many, numbered_vehicle, random_accounts, ADMIN, ALICE};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;
use tokio::runtime::Runtime;

const PREMINTED: u64 = 1_000;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("benchmark runtime")
}

fn preminted(rt: &Runtime) -> TestRegistry<AllowListAuthorization> {
    let t = create_test_service(ADMIN);
    rt.block_on(mint_many(&t.service, ADMIN, ALICE, PREMINTED))
        .expect("premint");
    t
}

// ============================================================================
// MINT
// ============================================================================

fn bench_mint(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("registry-mint");
    group.measurement_time(Duration::from_secs(10));

    let t = create_test_service(ADMIN);
    let recipients = random_accounts(&mut rand::thread_rng(), 64);
    let mut n = 0u64;

    group.throughput(Throughput::Elements(1));
    group.bench_function("mint_single", |b| {
        b.to_async(&rt).iter(|| {
            n += 1;
            let vehicle = numbered_vehicle(recipients[(n % 64) as usize], n);
            let service = &t.service;
            async move { black_box(service.mint(ADMIN, vehicle).await) }
        });
    });

    group.finish();
}

// ============================================================================
// READS
// ============================================================================

fn bench_batch_reads(c: &mut Criterion) {
    let rt = runtime();
    let t = preminted(&rt);
    let mut group = c.benchmark_group("registry-read");

    group.bench_function("get_record", |b| {
        let mut rng = rand::thread_rng();
        b.to_async(&rt).iter(|| {
            let id = TokenId(rng.gen_range(0..PREMINTED));
            let service = &t.service;
            async move { black_box(service.get_record(id).await) }
        });
    });

    for size in [10u64, DEFAULT_MAX_BATCH_SIZE] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("get_record_batch", size), &size, |b, &size| {
            let mut rng = rand::thread_rng();
            b.to_async(&rt).iter(|| {
                let start = TokenId(rng.gen_range(0..=PREMINTED - size));
                let service = &t.service;
                async move { black_box(service.get_record_batch(start, size).await) }
            });
        });
    }

    group.finish();
}

// ============================================================================
// MUTATIONS
// ============================================================================

fn bench_mutations(c: &mut Criterion) {
    let rt = runtime();
    let t = preminted(&rt);
    let mut group = c.benchmark_group("registry-mutate");

    group.bench_function("update_info", |b| {
        let mut rng = rand::thread_rng();
        b.to_async(&rt).iter(|| {
            let id = TokenId(rng.gen_range(0..PREMINTED));
            let mileage = rng.gen_range(0..500_000);
            let service = &t.service;
            async move {
                black_box(
                    service
                        .update_info(ADMIN, id, mileage, "good".to_string())
                        .await,
                )
            }
        });
    });

    group.bench_function("add_maintenance", |b| {
        let mut rng = rand::thread_rng();
        b.to_async(&rt).iter(|| {
            let id = TokenId(rng.gen_range(0..PREMINTED));
            let service = &t.service;
            async move {
                black_box(
                    service
                        .add_maintenance(ADMIN, id, 1_000, "Oil change".to_string())
                        .await,
                )
            }
        });
    });

    group.finish();
}

criterion_group!(
    name = registry_benches;
    config = Criterion::default().sample_size(50);
    targets = bench_mint, bench_batch_reads, bench_mutations,
);

criterion_main!(registry_benches);
