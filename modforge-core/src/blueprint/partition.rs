//! Splits project-wide code mass across modules.
//!
//! Every total is divided evenly; when it does not divide, the first
//! `total % num_modules` modules receive one extra unit. All inputs are
//! checked before the first module blueprint is built.

use std::num::NonZeroUsize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    Result,
    config::{CodeMassTotals, ProjectConfig},
    error::ConfigError,
    graph::{DependencyEdge, DependencyGraph},
};

use super::{CodeMass, ModuleBlueprint, ProjectBlueprint, VariantCounts};

/// Splits `total` into `parts` shares that differ by at most one.
///
/// Larger shares come first, so `10` over four parts is `[3, 3, 2, 2]`.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use modforge_core::split_total;
///
/// let parts = NonZeroUsize::new(4).expect("non-zero");
/// assert_eq!(split_total(10, parts), vec![3, 3, 2, 2]);
/// assert_eq!(split_total(2, parts), vec![1, 1, 0, 0]);
/// ```
#[must_use]
pub fn split_total(total: u64, parts: NonZeroUsize) -> Vec<u64> {
    let split = Split::new(total, parts);
    (0..parts.get()).map(|index| split.share(index)).collect()
}

/// Builds the blueprint of every module from `config` and a completed graph.
///
/// Code mass is split across all modules. Activities are not: each of the
/// first `androidModules` modules receives the full
/// `numActivitiesPerAndroidModule`, every other module receives none.
///
/// Each edge of `graph` is visited once to hand modules their incoming and
/// outgoing edges, so the cost is linear in the number of edges.
///
/// # Errors
/// Returns [`ConfigError::ZeroModules`] for an empty project,
/// [`ConfigError::GraphSizeMismatch`] when `graph` was built for another
/// module count, [`ConfigError::NegativeTotal`] for any negative count and
/// [`ConfigError::TooManyAndroidModules`] when more Android modules than
/// modules are requested. Nothing is built when an error is returned.
///
/// # Examples
/// ```
/// use modforge_core::{CodeMassTotals, DependencyGraph, ProjectConfig, partition};
///
/// let config = ProjectConfig::builder(4)
///     .with_code_mass(CodeMassTotals {
///         java_class_count: 10,
///         ..CodeMassTotals::default()
///     })
///     .build();
/// let graph = DependencyGraph::build(Vec::new(), Vec::new(), 4).expect("no edges");
/// let blueprint = partition(&config, graph).expect("configuration is valid");
/// let shares: Vec<u64> = blueprint
///     .modules()
///     .iter()
///     .map(|module| module.code_mass().java_classes)
///     .collect();
/// assert_eq!(shares, vec![3, 3, 2, 2]);
/// ```
#[instrument(
    name = "blueprint.partition",
    err,
    skip(config, graph),
    fields(num_modules = config.num_modules(), edges = graph.len()),
)]
pub fn partition(config: &ProjectConfig, graph: DependencyGraph) -> Result<ProjectBlueprint> {
    let quotas = Quotas::validate(config, &graph)?;
    let endpoints = EdgeBuckets::from_graph(&graph);

    #[cfg(feature = "parallel")]
    let modules = build_parallel(&quotas, endpoints);
    #[cfg(not(feature = "parallel"))]
    let modules = build_serial(&quotas, endpoints);

    debug!(modules = modules.len(), "module blueprints built");
    Ok(ProjectBlueprint::new(graph, modules))
}

/// Incoming and outgoing edges of every module, in graph insertion order.
#[derive(Debug)]
struct EdgeBuckets {
    incoming: Vec<Vec<DependencyEdge>>,
    outgoing: Vec<Vec<DependencyEdge>>,
}

impl EdgeBuckets {
    fn from_graph(graph: &DependencyGraph) -> Self {
        let mut incoming = vec![Vec::new(); graph.num_modules()];
        let mut outgoing = vec![Vec::new(); graph.num_modules()];
        for edge in graph.edges() {
            incoming[edge.target()].push(*edge);
            outgoing[edge.source()].push(*edge);
        }
        Self { incoming, outgoing }
    }
}

#[cfg(feature = "parallel")]
fn build_parallel(quotas: &Quotas, endpoints: EdgeBuckets) -> Vec<ModuleBlueprint> {
    endpoints
        .incoming
        .into_par_iter()
        .zip(endpoints.outgoing)
        .enumerate()
        .map(|(index, (dependencies, dependents))| quotas.module(index, dependencies, dependents))
        .collect()
}

#[cfg(any(test, not(feature = "parallel")))]
fn build_serial(quotas: &Quotas, endpoints: EdgeBuckets) -> Vec<ModuleBlueprint> {
    endpoints
        .incoming
        .into_iter()
        .zip(endpoints.outgoing)
        .enumerate()
        .map(|(index, (dependencies, dependents))| quotas.module(index, dependencies, dependents))
        .collect()
}

#[derive(Clone, Copy, Debug)]
struct Split {
    per_module: u64,
    remainder: u64,
}

impl Split {
    fn new(total: u64, parts: NonZeroUsize) -> Self {
        let parts = parts.get() as u64;
        Self {
            per_module: total / parts,
            remainder: total % parts,
        }
    }

    fn share(self, index: usize) -> u64 {
        self.per_module + u64::from((index as u64) < self.remainder)
    }
}

/// Validated per-project inputs of the partitioner.
#[derive(Debug)]
struct Quotas {
    num_modules: NonZeroUsize,
    java_packages: Split,
    java_classes: Split,
    java_methods: Split,
    kotlin_packages: Split,
    kotlin_classes: Split,
    android_modules: usize,
    activities_per_android_module: u64,
    variants: VariantCounts,
}

impl Quotas {
    fn validate(config: &ProjectConfig, graph: &DependencyGraph) -> Result<Self> {
        let num_modules = NonZeroUsize::new(config.num_modules()).ok_or(ConfigError::ZeroModules)?;
        if graph.num_modules() != num_modules.get() {
            return Err(ConfigError::GraphSizeMismatch {
                graph: graph.num_modules(),
                config: num_modules.get(),
            });
        }

        let totals = validate_totals(config.code_mass())?;

        let android = non_negative("androidModules", config.android_modules())?;
        let android_modules = usize::try_from(android)
            .ok()
            .filter(|&count| count <= num_modules.get())
            .ok_or(ConfigError::TooManyAndroidModules {
                android_modules: android,
                num_modules: num_modules.get(),
            })?;
        let activities_per_android_module = non_negative(
            "numActivitiesPerAndroidModule",
            config.activities_per_android_module(),
        )?;

        let product_flavors = config
            .product_flavors()
            .iter()
            .map(|&count| non_negative("productFlavors", count))
            .collect::<Result<Vec<_>>>()?;
        let build_types = non_negative("buildTypes", config.build_types())?;

        Ok(Self {
            num_modules,
            java_packages: Split::new(totals.java_packages, num_modules),
            java_classes: Split::new(totals.java_classes, num_modules),
            java_methods: Split::new(totals.java_methods, num_modules),
            kotlin_packages: Split::new(totals.kotlin_packages, num_modules),
            kotlin_classes: Split::new(totals.kotlin_classes, num_modules),
            android_modules,
            activities_per_android_module,
            variants: VariantCounts {
                product_flavors,
                build_types,
            },
        })
    }

    fn module(
        &self,
        index: usize,
        dependencies: Vec<DependencyEdge>,
        dependents: Vec<DependencyEdge>,
    ) -> ModuleBlueprint {
        let code_mass = CodeMass {
            java_packages: self.java_packages.share(index),
            java_classes: self.java_classes.share(index),
            java_methods: self.java_methods.share(index),
            kotlin_packages: self.kotlin_packages.share(index),
            kotlin_classes: self.kotlin_classes.share(index),
        };
        let android = index < self.android_modules;
        ModuleBlueprint {
            index,
            dependencies,
            dependents,
            code_mass,
            activities: if android {
                self.activities_per_android_module
            } else {
                0
            },
            variants: android.then(|| self.variants.clone()),
        }
    }
}

fn validate_totals(totals: &CodeMassTotals) -> Result<CodeMass> {
    Ok(CodeMass {
        java_packages: non_negative("javaPackageCount", totals.java_package_count)?,
        java_classes: non_negative("javaClassCount", totals.java_class_count)?,
        java_methods: non_negative("javaMethodCount", totals.java_method_count)?,
        kotlin_packages: non_negative("kotlinPackageCount", totals.kotlin_package_count)?,
        kotlin_classes: non_negative("kotlinClassCount", totals.kotlin_class_count)?,
    })
}

fn non_negative(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| ConfigError::NegativeTotal { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    fn parts(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).expect("test part counts are non-zero")
    }

    #[rstest]
    #[case(10, 4, vec![3, 3, 2, 2])]
    #[case(10, 5, vec![2, 2, 2, 2, 2])]
    #[case(0, 3, vec![0, 0, 0])]
    #[case(7, 1, vec![7])]
    #[case(1, 3, vec![1, 0, 0])]
    fn split_total_front_loads_the_remainder(
        #[case] total: u64,
        #[case] count: usize,
        #[case] expected: Vec<u64>,
    ) {
        assert_eq!(split_total(total, parts(count)), expected);
    }

    #[rstest]
    #[case("javaPackageCount", -1)]
    #[case("productFlavors", i64::MIN)]
    fn non_negative_names_the_field(#[case] field: &'static str, #[case] value: i64) {
        assert_eq!(
            non_negative(field, value),
            Err(ConfigError::NegativeTotal { field, value })
        );
    }

    fn full_graph(num_modules: usize) -> DependencyGraph {
        DependencyGraph::build(
            vec![DependencyEdge::new(num_modules - 1, 0), DependencyEdge::new(0, 1)],
            crate::topology::Topology::Full.generate(num_modules),
            num_modules,
        )
        .expect("edges are in range")
    }

    fn android_config(num_modules: usize) -> ProjectConfig {
        ProjectConfig::builder(num_modules)
            .with_code_mass(CodeMassTotals {
                java_method_count: 1_000,
                ..CodeMassTotals::default()
            })
            .with_android_modules(3, 4)
            .with_product_flavors(vec![2])
            .with_build_types(2)
            .build()
    }

    #[test]
    fn modules_on_a_full_graph_own_exactly_their_filtered_edges() {
        let graph = full_graph(30);
        let blueprint = partition(&android_config(30), graph.clone()).expect("valid input");
        for module in blueprint.modules() {
            let index = module.index();
            let dependencies: Vec<_> = graph.dependencies_of(index).copied().collect();
            let dependents: Vec<_> = graph.dependents_of(index).copied().collect();
            assert_eq!(module.dependencies(), dependencies.as_slice(), "module{index}");
            assert_eq!(module.dependents(), dependents.as_slice(), "module{index}");
        }
        let first = blueprint.module(0).expect("module 0 exists");
        assert_eq!(first.dependencies()[0], DependencyEdge::new(29, 0));
        assert_eq!(first.dependents()[0], DependencyEdge::new(0, 1));
        assert_eq!(first.dependents()[1], DependencyEdge::new(0, 1));
    }

    #[test]
    fn serial_and_default_builds_agree() {
        let config = android_config(17);
        let graph = full_graph(17);
        let quotas = Quotas::validate(&config, &graph).expect("valid input");
        let serial = build_serial(&quotas, EdgeBuckets::from_graph(&graph));
        let blueprint = partition(&config, graph).expect("valid input");
        assert_eq!(serial.as_slice(), blueprint.modules());
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    fn android_modules_each_get_every_activity(#[case] num_modules: usize) {
        let config = ProjectConfig::builder(num_modules)
            .with_android_modules(1, 7)
            .build();
        let graph = DependencyGraph::build(Vec::new(), Vec::new(), num_modules).expect("no edges");
        let blueprint = partition(&config, graph).expect("valid input");
        let activities: Vec<u64> = blueprint
            .modules()
            .iter()
            .map(ModuleBlueprint::activity_count)
            .collect();
        let mut expected = vec![0; num_modules];
        expected[0] = 7;
        assert_eq!(activities, expected);
    }

    proptest! {
        #[test]
        fn split_total_is_exact_and_even(total in 0_u64..1_000_000, count in 1_usize..256) {
            let shares = split_total(total, parts(count));
            prop_assert_eq!(shares.len(), count);
            prop_assert_eq!(shares.iter().sum::<u64>(), total);
            let max = shares.iter().copied().max().unwrap_or(0);
            let min = shares.iter().copied().min().unwrap_or(0);
            prop_assert!(max - min <= 1);
            prop_assert!(shares.windows(2).all(|pair| pair[0] >= pair[1]));
        }
    }
}
