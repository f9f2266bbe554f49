//! Module and project blueprints.
//!
//! A [`ProjectBlueprint`] is the finished plan of a synthetic project: the
//! validated dependency graph plus one [`ModuleBlueprint`] per module index.
//! It is the only thing handed to the code that writes the project to disk.

mod partition;

use tracing::{instrument, warn};

use crate::{
    Result,
    config::{ProjectConfig, TopologySpec},
    graph::{DependencyEdge, DependencyGraph, ModuleIndex},
    report::GenerationReport,
};

pub use self::partition::{partition, split_total};

/// Code mass assigned to a single module.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CodeMass {
    /// Java packages to generate.
    pub java_packages: u64,
    /// Java classes to generate.
    pub java_classes: u64,
    /// Java methods to generate.
    pub java_methods: u64,
    /// Kotlin packages to generate.
    pub kotlin_packages: u64,
    /// Kotlin classes to generate.
    pub kotlin_classes: u64,
}

impl CodeMass {
    /// Component-wise sum, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            java_packages: self.java_packages.saturating_add(other.java_packages),
            java_classes: self.java_classes.saturating_add(other.java_classes),
            java_methods: self.java_methods.saturating_add(other.java_methods),
            kotlin_packages: self.kotlin_packages.saturating_add(other.kotlin_packages),
            kotlin_classes: self.kotlin_classes.saturating_add(other.kotlin_classes),
        }
    }
}

/// Build variant counts carried by Android modules for the variant expander.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VariantCounts {
    /// Flavor count of each flavor dimension.
    pub product_flavors: Vec<u64>,
    /// Number of build types.
    pub build_types: u64,
}

/// Everything needed to render one module.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ModuleBlueprint {
    index: ModuleIndex,
    dependencies: Vec<DependencyEdge>,
    dependents: Vec<DependencyEdge>,
    code_mass: CodeMass,
    activities: u64,
    variants: Option<VariantCounts>,
}

impl ModuleBlueprint {
    /// Index of the module.
    #[must_use]
    pub fn index(&self) -> ModuleIndex {
        self.index
    }

    /// Directory-style name of the module, `module{index}`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("module{}", self.index)
    }

    /// Edges where this module is the `to` endpoint: what it depends on.
    #[must_use]
    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    /// Edges where this module is the `from` endpoint: what depends on it.
    #[must_use]
    pub fn dependents(&self) -> &[DependencyEdge] {
        &self.dependents
    }

    /// Code mass assigned to the module.
    #[must_use]
    pub fn code_mass(&self) -> &CodeMass {
        &self.code_mass
    }

    /// Activities to generate; zero for non-Android modules.
    #[must_use]
    pub fn activity_count(&self) -> u64 {
        self.activities
    }

    /// Whether the module is an Android module.
    #[must_use]
    pub fn is_android(&self) -> bool {
        self.variants.is_some()
    }

    /// Flavor and build-type counts, present for Android modules only.
    #[must_use]
    pub fn variants(&self) -> Option<&VariantCounts> {
        self.variants.as_ref()
    }
}

/// The complete plan of a synthetic project.
///
/// # Examples
/// ```
/// use modforge_core::{
///     CodeMassTotals, DependencyEdge, ProjectBlueprint, ProjectConfig, TopologyKind,
///     TopologySpec,
/// };
///
/// let config = ProjectConfig::builder(5)
///     .with_topology(TopologySpec::bare(TopologyKind::Linear))
///     .with_code_mass(CodeMassTotals {
///         java_class_count: 10,
///         ..CodeMassTotals::default()
///     })
///     .build();
/// let blueprint = ProjectBlueprint::from_config(&config).expect("configuration is valid");
/// assert_eq!(blueprint.modules().len(), 5);
/// assert_eq!(blueprint.graph().edges()[0], DependencyEdge::new(0, 1));
/// assert!(blueprint.modules().iter().all(|m| m.code_mass().java_classes == 2));
/// assert!(!blueprint.has_circular_dependencies());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProjectBlueprint {
    graph: DependencyGraph,
    modules: Vec<ModuleBlueprint>,
    #[cfg_attr(feature = "serde", serde(skip))]
    report: GenerationReport,
}

impl ProjectBlueprint {
    fn new(graph: DependencyGraph, modules: Vec<ModuleBlueprint>) -> Self {
        let report = GenerationReport::new(&graph);
        Self {
            graph,
            modules,
            report,
        }
    }

    /// Runs the whole pipeline: resolve every topology pass, generate its
    /// edges, merge them after the explicit dependencies, then partition.
    ///
    /// A cyclic graph is reported with a warning and still produces a
    /// blueprint.
    ///
    /// # Errors
    /// Returns the first [`crate::ConfigError`] raised by topology resolution,
    /// [`DependencyGraph::build`] or [`partition`].
    #[instrument(
        name = "blueprint.from_config",
        err,
        skip(config),
        fields(
            num_modules = config.num_modules(),
            topologies = config.topologies().len(),
            explicit = config.dependencies().len(),
        ),
    )]
    pub fn from_config(config: &ProjectConfig) -> Result<Self> {
        let num_modules = config.num_modules();
        let topologies = config
            .topologies()
            .iter()
            .map(TopologySpec::resolve)
            .collect::<Result<Vec<_>>>()?;
        let generated = topologies
            .iter()
            .flat_map(|topology| topology.generate(num_modules))
            .collect();
        let graph = DependencyGraph::build(config.dependencies().to_vec(), generated, num_modules)?;
        let blueprint = partition(config, graph)?;
        if blueprint.has_circular_dependencies() {
            warn!(
                num_modules,
                edges = blueprint.graph.len(),
                "circular dependencies detected"
            );
        }
        Ok(blueprint)
    }

    /// The dependency graph the blueprints were sliced from.
    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Module blueprints in index order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleBlueprint] {
        &self.modules
    }

    /// Blueprint of `index`, if it exists.
    #[must_use]
    pub fn module(&self, index: ModuleIndex) -> Option<&ModuleBlueprint> {
        self.modules.get(index)
    }

    /// Sum of the code mass of every module.
    #[must_use]
    pub fn total_code_mass(&self) -> CodeMass {
        self.modules
            .iter()
            .fold(CodeMass::default(), |sum, module| sum.saturating_add(module.code_mass))
    }

    /// See [`DependencyGraph::has_circular_dependencies`].
    #[must_use]
    pub fn has_circular_dependencies(&self) -> bool {
        self.report.has_circular_dependencies()
    }

    /// See [`DependencyGraph::describe`].
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.report.dependency_lines().to_vec()
    }

    /// Human-readable diagnostics for the operator, computed once when the
    /// blueprint is built.
    #[must_use]
    pub fn report(&self) -> &GenerationReport {
        &self.report
    }
}

#[cfg(test)]
mod tests;
