//! # Ledger Benchmarks
//!
//! Every operation runs the full transaction engine: state clone, effect
//! journal and bincode commit. The registry is filled to capacity first so
//! the clone and snapshot costs are at their worst.
//!
//! | Operation | Setup |
//! |-----------|-------|
//! | deposit | registry full |
//! | lock | registry one short of full |
//! | undelegate | shortfall drains N vaults |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use stake_ledger::{LinearLockPenalty, LiquidStakingApi, StakingConfig};
use staking_tests::integration::{config, ftm, Protocol, ALICE, BOB, TREASURY};
use std::sync::Arc;

fn protocol_with_vaults(vaults: u64, capacity: u64, pool_left: u128) -> Protocol {
    let config = StakingConfig {
        max_vault_count: capacity,
        ..config()
    };
    let mut p = Protocol::with_config(config, Arc::new(LinearLockPenalty::new(500)))
        .expect("protocol");
    p.ledger
        .deposit(ALICE, ftm(u128::from(vaults)) + ftm(pool_left))
        .expect("deposit");
    for validator_id in 0..vaults {
        p.lock(validator_id, ftm(1)).expect("lock");
    }
    p
}

fn bench_deposit(c: &mut Criterion) {
    let mut group = c.benchmark_group("deposit");
    let mut p = protocol_with_vaults(200, 200, 0);

    group.bench_function("registry_full", |b| {
        b.iter(|| black_box(p.ledger.deposit(BOB, ftm(1)).expect("deposit")))
    });
    group.finish();
}

fn bench_lock(c: &mut Criterion) {
    let mut group = c.benchmark_group("lock");

    group.bench_function("last_free_slot", |b| {
        b.iter_batched(
            || {
                let mut p = protocol_with_vaults(199, 200, 1);
                p.ledger
                    .set_next_validator_info(TREASURY, 999, 86_400)
                    .expect("assignment");
                p
            },
            |mut p| black_box(p.ledger.lock(TREASURY, ftm(1)).expect("lock")),
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_undelegate(c: &mut Criterion) {
    let mut group = c.benchmark_group("undelegate");

    for drained in [1u64, 10, 50, 200] {
        group.bench_with_input(
            BenchmarkId::new("shortfall_vaults", drained),
            &drained,
            |b, &drained| {
                b.iter_batched(
                    || protocol_with_vaults(200, 200, 0),
                    |mut p| {
                        black_box(
                            p.ledger
                                .undelegate(ALICE, 1, ftm(u128::from(drained)), 0)
                                .expect("undelegate"),
                        )
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_deposit, bench_lock, bench_undelegate);

criterion_main!(benches);
