//! Project configuration consumed by the blueprint pipeline.
//!
//! The configuration is a plain snapshot of what the operator asked for.
//! Nothing is validated here; [`crate::ProjectBlueprint::from_config`] checks
//! every field before it builds anything, so signed counts are kept as given
//! and rejected there when negative.

use crate::{
    Result,
    graph::DependencyEdge,
    topology::{Topology, TopologyKind, TopologyParameters},
};

/// One topology pass: an algorithm plus its raw parameters.
///
/// # Examples
/// ```
/// use modforge_core::{Topology, TopologyKind, TopologyParameters, TopologySpec};
///
/// let spec = TopologySpec::new(
///     TopologyKind::Random,
///     TopologyParameters::new().with("seed", "2"),
/// );
/// assert_eq!(spec.resolve().expect("seed parses"), Topology::Random { seed: 2 });
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TopologySpec {
    kind: TopologyKind,
    parameters: TopologyParameters,
}

impl TopologySpec {
    /// Creates a pass running `kind` with `parameters`.
    #[must_use]
    pub fn new(kind: TopologyKind, parameters: TopologyParameters) -> Self {
        Self { kind, parameters }
    }

    /// Creates a pass running `kind` without parameters.
    #[must_use]
    pub fn bare(kind: TopologyKind) -> Self {
        Self::new(kind, TopologyParameters::new())
    }

    /// Algorithm of this pass.
    #[must_use]
    pub fn kind(&self) -> TopologyKind {
        self.kind
    }

    /// Raw parameters of this pass.
    #[must_use]
    pub fn parameters(&self) -> &TopologyParameters {
        &self.parameters
    }

    /// Validates the parameters into a typed [`Topology`].
    ///
    /// # Errors
    /// See [`Topology::from_parameters`].
    pub fn resolve(&self) -> Result<Topology> {
        Topology::from_parameters(self.kind, &self.parameters)
    }
}

/// Project-wide code-mass totals, split across modules by the partitioner.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CodeMassTotals {
    /// Total Java packages.
    pub java_package_count: i64,
    /// Total Java classes.
    pub java_class_count: i64,
    /// Total Java methods.
    pub java_method_count: i64,
    /// Total Kotlin packages.
    pub kotlin_package_count: i64,
    /// Total Kotlin classes.
    pub kotlin_class_count: i64,
}

/// Immutable snapshot of a generation request.
///
/// Build one with [`ProjectConfig::builder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    num_modules: usize,
    topologies: Vec<TopologySpec>,
    dependencies: Vec<DependencyEdge>,
    code_mass: CodeMassTotals,
    android_modules: i64,
    activities_per_android_module: i64,
    product_flavors: Vec<i64>,
    build_types: i64,
}

impl ProjectConfig {
    /// Starts a configuration for `num_modules` modules with no topologies,
    /// no explicit dependencies and zero code mass.
    ///
    /// # Examples
    /// ```
    /// use modforge_core::{CodeMassTotals, ProjectConfig, TopologyKind, TopologySpec};
    ///
    /// let config = ProjectConfig::builder(5)
    ///     .with_topology(TopologySpec::bare(TopologyKind::Linear))
    ///     .with_dependency(0, 4)
    ///     .with_code_mass(CodeMassTotals {
    ///         java_class_count: 10,
    ///         ..CodeMassTotals::default()
    ///     })
    ///     .build();
    /// assert_eq!(config.num_modules(), 5);
    /// assert_eq!(config.topologies().len(), 1);
    /// assert_eq!(config.dependencies().len(), 1);
    /// ```
    #[must_use]
    pub fn builder(num_modules: usize) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(num_modules)
    }

    /// Number of modules to generate.
    #[must_use]
    pub fn num_modules(&self) -> usize {
        self.num_modules
    }

    /// Topology passes, in the order their edges are appended.
    #[must_use]
    pub fn topologies(&self) -> &[TopologySpec] {
        &self.topologies
    }

    /// Explicitly declared dependencies.
    #[must_use]
    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    /// Code-mass totals to partition.
    #[must_use]
    pub fn code_mass(&self) -> &CodeMassTotals {
        &self.code_mass
    }

    /// Number of modules, counted from index `0`, that are Android modules.
    #[must_use]
    pub fn android_modules(&self) -> i64 {
        self.android_modules
    }

    /// Activities generated in each Android module.
    #[must_use]
    pub fn activities_per_android_module(&self) -> i64 {
        self.activities_per_android_module
    }

    /// Flavor count of each flavor dimension.
    #[must_use]
    pub fn product_flavors(&self) -> &[i64] {
        &self.product_flavors
    }

    /// Number of build types.
    #[must_use]
    pub fn build_types(&self) -> i64 {
        self.build_types
    }
}

/// Assembles a [`ProjectConfig`].
#[derive(Clone, Debug)]
pub struct ProjectConfigBuilder {
    config: ProjectConfig,
}

impl ProjectConfigBuilder {
    /// Creates a builder for `num_modules` modules.
    #[must_use]
    pub fn new(num_modules: usize) -> Self {
        Self {
            config: ProjectConfig {
                num_modules,
                topologies: Vec::new(),
                dependencies: Vec::new(),
                code_mass: CodeMassTotals::default(),
                android_modules: 0,
                activities_per_android_module: 0,
                product_flavors: Vec::new(),
                build_types: 0,
            },
        }
    }

    /// Appends a topology pass.
    #[must_use]
    pub fn with_topology(mut self, spec: TopologySpec) -> Self {
        self.config.topologies.push(spec);
        self
    }

    /// Appends an explicit dependency `from -> to`.
    #[must_use]
    pub fn with_dependency(mut self, from: usize, to: usize) -> Self {
        self.config.dependencies.push(DependencyEdge::new(from, to));
        self
    }

    /// Appends several explicit dependencies.
    #[must_use]
    pub fn with_dependencies(mut self, edges: impl IntoIterator<Item = DependencyEdge>) -> Self {
        self.config.dependencies.extend(edges);
        self
    }

    /// Sets the code-mass totals.
    #[must_use]
    pub fn with_code_mass(mut self, totals: CodeMassTotals) -> Self {
        self.config.code_mass = totals;
        self
    }

    /// Marks the first `count` modules as Android modules with
    /// `activities_per_module` activities each.
    #[must_use]
    pub fn with_android_modules(mut self, count: i64, activities_per_module: i64) -> Self {
        self.config.android_modules = count;
        self.config.activities_per_android_module = activities_per_module;
        self
    }

    /// Sets the flavor count of each flavor dimension.
    #[must_use]
    pub fn with_product_flavors(mut self, flavors: Vec<i64>) -> Self {
        self.config.product_flavors = flavors;
        self
    }

    /// Sets the number of build types.
    #[must_use]
    pub fn with_build_types(mut self, build_types: i64) -> Self {
        self.config.build_types = build_types;
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub fn build(self) -> ProjectConfig {
        self.config
    }
}
