//! Topology generation benchmarks.
//!
//! Measures edge generation alone for every topology kind, so the cost of
//! the quadratic kinds and of the retry loops in the connected kinds can be
//! compared at the same module counts.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use modforge_benches::{error::BenchSetupError, params::TopologyBenchParams, workload};
use modforge_core::TopologyKind;

/// Module counts to benchmark.
const MODULE_COUNTS: &[usize] = &[10, 100, 500];

fn topology_generate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("topology_generate");
    group.sample_size(30);

    for kind in TopologyKind::ALL {
        for &num_modules in MODULE_COUNTS {
            let params = TopologyBenchParams { kind, num_modules };
            let topology = workload::topology(&params)?;
            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &(topology, num_modules),
                |b, &(resolved, modules)| {
                    b.iter(|| resolved.generate(modules));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn topology_generate(c: &mut Criterion) {
    if let Err(err) = topology_generate_impl(c) {
        panic!("topology_generate benchmark setup failed: {err}");
    }
}

criterion_group!(benches, topology_generate);
criterion_main!(benches);
