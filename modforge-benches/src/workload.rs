//! Builders for benchmark workloads.

use modforge_core::{
    CodeMassTotals, ProjectConfig, Topology, TopologyKind, TopologyParameters, TopologySpec,
};

use crate::{
    error::BenchSetupError,
    params::{PartitionBenchParams, TopologyBenchParams},
};

/// Seed used by every randomised topology in the benchmarks.
pub const SEED: i64 = 42;

/// Row width used by the rectangle topologies in the benchmarks.
pub const WIDTH: usize = 8;

/// Parameters carrying [`SEED`] and [`WIDTH`].
#[must_use]
pub fn bench_parameters() -> TopologyParameters {
    TopologyParameters::new()
        .with("seed", SEED.to_string())
        .with("width", WIDTH.to_string())
}

/// Resolves the topology measured by `params`.
///
/// # Errors
/// Returns [`BenchSetupError::Config`] if the parameters are rejected.
pub fn topology(params: &TopologyBenchParams) -> Result<Topology, BenchSetupError> {
    Ok(Topology::from_parameters(params.kind, &bench_parameters())?)
}

/// A project with a randomly connected graph and the requested code mass.
///
/// The first quarter of the modules are Android modules.
#[must_use]
pub fn project_config(params: &PartitionBenchParams) -> ProjectConfig {
    let android = params
        .num_modules
        .checked_div(4)
        .and_then(|quarter| i64::try_from(quarter).ok())
        .unwrap_or_default();
    let packages = params.java_classes.checked_div(10).unwrap_or_default();
    ProjectConfig::builder(params.num_modules)
        .with_topology(TopologySpec::new(
            TopologyKind::RandomConnected,
            bench_parameters(),
        ))
        .with_code_mass(CodeMassTotals {
            java_package_count: packages,
            java_class_count: params.java_classes,
            java_method_count: params.java_classes.saturating_mul(10),
            kotlin_package_count: packages,
            kotlin_class_count: params.java_classes,
        })
        .with_android_modules(android, 4)
        .with_product_flavors(vec![2, 3])
        .with_build_types(2)
        .build()
}
