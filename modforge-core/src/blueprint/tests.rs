//! Unit tests for blueprint construction and partitioning.

use rstest::{fixture, rstest};
use tracing::Level;

use modforge_test_support::{fixtures, tracing::capture};

use super::*;
use crate::{
    ConfigError,
    config::CodeMassTotals,
    topology::{TopologyKind, TopologyParameters},
};

#[fixture]
fn linear_five() -> ProjectConfig {
    ProjectConfig::builder(5)
        .with_topology(TopologySpec::bare(TopologyKind::Linear))
        .with_code_mass(CodeMassTotals {
            java_class_count: 10,
            ..CodeMassTotals::default()
        })
        .build()
}

fn edges(pairs: &[(usize, usize)]) -> Vec<DependencyEdge> {
    pairs.iter().copied().map(DependencyEdge::from).collect()
}

#[rstest]
fn linear_project_end_to_end(linear_five: ProjectConfig) {
    let blueprint = ProjectBlueprint::from_config(&linear_five).expect("configuration is valid");
    assert_eq!(blueprint.modules().len(), 5);
    assert_eq!(
        blueprint.graph().edges(),
        edges(&[(0, 1), (1, 2), (2, 3), (3, 4)]).as_slice()
    );
    let shares: Vec<u64> = blueprint
        .modules()
        .iter()
        .map(|module| module.code_mass().java_classes)
        .collect();
    assert_eq!(shares, vec![2, 2, 2, 2, 2]);
    assert!(!blueprint.has_circular_dependencies());
}

#[rstest]
fn modules_are_in_index_order_with_their_edge_slices(linear_five: ProjectConfig) {
    let blueprint = ProjectBlueprint::from_config(&linear_five).expect("configuration is valid");
    for (position, module) in blueprint.modules().iter().enumerate() {
        assert_eq!(module.index(), position);
        assert_eq!(module.name(), format!("module{position}"));
        assert!(module.dependencies().iter().all(|edge| edge.target() == position));
        assert!(module.dependents().iter().all(|edge| edge.source() == position));
    }
    let middle = blueprint.module(2).expect("module 2 exists");
    assert_eq!(middle.dependencies(), edges(&[(1, 2)]).as_slice());
    assert_eq!(middle.dependents(), edges(&[(2, 3)]).as_slice());
    assert!(blueprint.module(5).is_none());
}

#[test]
fn every_dimension_is_partitioned_exactly() {
    let totals = CodeMassTotals {
        java_package_count: 7,
        java_class_count: 10,
        java_method_count: 1001,
        kotlin_package_count: 3,
        kotlin_class_count: 0,
    };
    let config = ProjectConfig::builder(4).with_code_mass(totals).build();
    let blueprint = ProjectBlueprint::from_config(&config).expect("configuration is valid");
    assert_eq!(
        blueprint.total_code_mass(),
        CodeMass {
            java_packages: 7,
            java_classes: 10,
            java_methods: 1001,
            kotlin_packages: 3,
            kotlin_classes: 0,
        }
    );
    let first = blueprint.module(0).expect("module 0 exists").code_mass();
    let last = blueprint.module(3).expect("module 3 exists").code_mass();
    assert_eq!((first.java_classes, last.java_classes), (3, 2));
    assert_eq!((first.java_methods, last.java_methods), (251, 250));
    assert_eq!((first.kotlin_packages, last.kotlin_packages), (1, 0));
}

#[test]
fn android_modules_come_first_and_carry_variants() {
    let config = ProjectConfig::builder(5)
        .with_android_modules(2, 8)
        .with_product_flavors(vec![2, 3])
        .with_build_types(6)
        .build();
    let blueprint = ProjectBlueprint::from_config(&config).expect("configuration is valid");
    let android: Vec<bool> = blueprint.modules().iter().map(ModuleBlueprint::is_android).collect();
    assert_eq!(android, vec![true, true, false, false, false]);
    let first = blueprint.module(0).expect("module 0 exists");
    assert_eq!(first.activity_count(), 8);
    assert_eq!(
        first.variants(),
        Some(&VariantCounts {
            product_flavors: vec![2, 3],
            build_types: 6,
        })
    );
    let plain = blueprint.module(4).expect("module 4 exists");
    assert_eq!(plain.activity_count(), 0);
    assert_eq!(plain.variants(), None);
}

#[rstest]
#[case::java_classes(
    CodeMassTotals { java_class_count: -1, ..CodeMassTotals::default() },
    "javaClassCount",
    -1
)]
#[case::kotlin_packages(
    CodeMassTotals { kotlin_package_count: -20, ..CodeMassTotals::default() },
    "kotlinPackageCount",
    -20
)]
fn negative_totals_are_rejected(
    #[case] totals: CodeMassTotals,
    #[case] field: &'static str,
    #[case] value: i64,
) {
    let config = ProjectConfig::builder(3).with_code_mass(totals).build();
    let err = ProjectBlueprint::from_config(&config).expect_err("negative total must fail");
    assert_eq!(err, ConfigError::NegativeTotal { field, value });
}

#[rstest]
#[case::android_count(ProjectConfig::builder(3).with_android_modules(-1, 0).build(), "androidModules")]
#[case::activities(ProjectConfig::builder(3).with_android_modules(1, -4).build(), "numActivitiesPerAndroidModule")]
#[case::flavors(ProjectConfig::builder(3).with_product_flavors(vec![1, -2]).build(), "productFlavors")]
#[case::build_types(ProjectConfig::builder(3).with_build_types(-6).build(), "buildTypes")]
fn negative_counts_name_their_field(#[case] config: ProjectConfig, #[case] expected: &str) {
    match ProjectBlueprint::from_config(&config) {
        Err(ConfigError::NegativeTotal { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected a negative total error, got {other:?}"),
    }
}

#[test]
fn too_many_android_modules_is_rejected() {
    let config = ProjectConfig::builder(2).with_android_modules(3, 1).build();
    let err = ProjectBlueprint::from_config(&config).expect_err("android count is too large");
    assert_eq!(
        err,
        ConfigError::TooManyAndroidModules {
            android_modules: 3,
            num_modules: 2,
        }
    );
}

#[test]
fn zero_modules_is_rejected() {
    let config = ProjectConfig::builder(0).build();
    let err = ProjectBlueprint::from_config(&config).expect_err("empty project must fail");
    assert_eq!(err, ConfigError::ZeroModules);
}

#[test]
fn partition_rejects_a_graph_of_another_size() {
    let config = ProjectConfig::builder(4).build();
    let graph = DependencyGraph::build(Vec::new(), Vec::new(), 3).expect("no edges");
    let err = partition(&config, graph).expect_err("sizes disagree");
    assert_eq!(err, ConfigError::GraphSizeMismatch { graph: 3, config: 4 });
}

#[test]
fn explicit_out_of_range_dependency_is_rejected() {
    let config = ProjectConfig::builder(3).with_dependency(1, 3).build();
    let err = ProjectBlueprint::from_config(&config).expect_err("module 3 does not exist");
    assert_eq!(
        err,
        ConfigError::EdgeOutOfRange {
            from: 1,
            to: 3,
            num_modules: 3,
        }
    );
}

#[test]
fn topology_passes_are_appended_after_explicit_edges() {
    let config = ProjectConfig::builder(3)
        .with_dependency(2, 0)
        .with_topology(TopologySpec::bare(TopologyKind::Star))
        .with_topology(TopologySpec::bare(TopologyKind::Linear))
        .build();
    let blueprint = ProjectBlueprint::from_config(&config).expect("configuration is valid");
    assert_eq!(
        blueprint.graph().edges(),
        edges(&[(2, 0), (0, 1), (0, 2), (0, 1), (1, 2)]).as_slice()
    );
    assert!(blueprint.has_circular_dependencies());
}

#[test]
fn bad_topology_parameter_aborts_the_run() {
    let config = ProjectConfig::builder(4)
        .with_topology(TopologySpec::bare(TopologyKind::Linear))
        .with_topology(TopologySpec::new(
            TopologyKind::Rectangle,
            TopologyParameters::new().with("width", "0"),
        ))
        .build();
    let err = ProjectBlueprint::from_config(&config).expect_err("width 0 is invalid");
    assert_eq!(err.code(), crate::ConfigErrorCode::InvalidParameter);
}

#[test]
fn cyclic_graph_warns_but_still_builds() {
    let config = ProjectConfig::builder(3)
        .with_dependencies(edges(&fixtures::triangle()))
        .build();
    let (result, layer) = capture(|| ProjectBlueprint::from_config(&config));
    let blueprint = result.expect("cycles are not errors");
    assert!(blueprint.report().has_circular_dependencies());
    let warnings: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|event| event.level == Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].fields.get("message").map(String::as_str),
        Some("circular dependencies detected")
    );
}

#[test]
fn acyclic_graph_emits_no_warning() {
    let config = ProjectConfig::builder(4)
        .with_dependencies(edges(&fixtures::chain(4)))
        .build();
    let (result, layer) = capture(|| ProjectBlueprint::from_config(&config));
    result.expect("configuration is valid");
    assert!(layer.events().iter().all(|event| event.level != Level::WARN));
    assert!(layer.spans().iter().any(|span| span.name == "blueprint.from_config"));
}

#[test]
fn cached_report_matches_the_graph() {
    let config = ProjectConfig::builder(4)
        .with_dependency(3, 0)
        .with_topology(TopologySpec::bare(TopologyKind::Linear))
        .build();
    let blueprint = ProjectBlueprint::from_config(&config).expect("configuration is valid");
    let graph = blueprint.graph();
    assert_eq!(blueprint.report().dependency_lines(), graph.describe().as_slice());
    assert_eq!(blueprint.describe(), graph.describe());
    assert_eq!(
        blueprint.has_circular_dependencies(),
        graph.has_circular_dependencies()
    );
    assert!(blueprint.report().has_circular_dependencies());
}
