//! Dependency graph model.
//!
//! Holds every edge of the project, explicit and generated, after checking
//! that each endpoint names a real module. The graph is immutable once built
//! and may contain duplicates and cycles; [`DependencyGraph::has_circular_dependencies`]
//! only reports them.

mod cycle;

use std::fmt;

use tracing::{debug, instrument};

use crate::{Result, error::ConfigError};

/// Index of a module in `0..num_modules`.
pub type ModuleIndex = usize;

/// Directed edge meaning "module `to` depends on module `from`".
///
/// # Examples
/// ```
/// use modforge_core::DependencyEdge;
///
/// let edge = DependencyEdge::new(0, 3);
/// assert_eq!((edge.source(), edge.target()), (0, 3));
/// assert_eq!(edge.to_string(), "0 -> 3");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DependencyEdge {
    from: ModuleIndex,
    to: ModuleIndex,
}

impl DependencyEdge {
    /// Creates the edge `from -> to`.
    #[must_use]
    pub const fn new(from: ModuleIndex, to: ModuleIndex) -> Self {
        Self { from, to }
    }

    /// The module depended upon (`from`).
    #[must_use]
    pub const fn source(&self) -> ModuleIndex {
        self.from
    }

    /// The dependent module (`to`).
    #[must_use]
    pub const fn target(&self) -> ModuleIndex {
        self.to
    }

    const fn within(&self, num_modules: usize) -> bool {
        self.from < num_modules && self.to < num_modules
    }
}

impl From<(ModuleIndex, ModuleIndex)> for DependencyEdge {
    fn from((from, to): (ModuleIndex, ModuleIndex)) -> Self {
        Self::new(from, to)
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// All dependency edges of a project.
///
/// # Examples
/// ```
/// use modforge_core::{DependencyEdge, DependencyGraph};
///
/// let graph = DependencyGraph::build(
///     vec![DependencyEdge::new(2, 0)],
///     vec![DependencyEdge::new(0, 1), DependencyEdge::new(1, 2)],
///     3,
/// )
/// .expect("edges are in range");
/// assert_eq!(graph.len(), 3);
/// assert!(graph.has_circular_dependencies());
/// assert_eq!(graph.describe()[0], "module0 -> [module2]");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DependencyGraph {
    num_modules: usize,
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    /// Merges explicit and generated edges into a graph over `num_modules`
    /// modules.
    ///
    /// Explicit edges come first, then generated ones; duplicates are kept.
    ///
    /// # Errors
    /// Returns [`ConfigError::EdgeOutOfRange`] for the first edge with an
    /// endpoint outside `0..num_modules`.
    #[instrument(
        name = "graph.build",
        err,
        skip(explicit, generated),
        fields(explicit = explicit.len(), generated = generated.len()),
    )]
    pub fn build(
        explicit: Vec<DependencyEdge>,
        generated: Vec<DependencyEdge>,
        num_modules: usize,
    ) -> Result<Self> {
        let mut edges = explicit;
        edges.extend(generated);
        if let Some(edge) = edges.iter().find(|edge| !edge.within(num_modules)) {
            return Err(ConfigError::EdgeOutOfRange {
                from: edge.from,
                to: edge.to,
                num_modules,
            });
        }
        debug!(edges = edges.len(), "dependency graph built");
        Ok(Self { num_modules, edges })
    }

    /// Number of modules the graph was validated against.
    #[must_use]
    pub fn num_modules(&self) -> usize {
        self.num_modules
    }

    /// Every edge in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Number of edges, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges pointing into `module`: its direct dependencies.
    pub fn dependencies_of(&self, module: ModuleIndex) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter().filter(move |edge| edge.to == module)
    }

    /// Edges leaving `module`: the modules that depend on it.
    pub fn dependents_of(&self, module: ModuleIndex) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter().filter(move |edge| edge.from == module)
    }

    /// Whether following `from -> to` edges can return to a module already on
    /// the current path.
    ///
    /// A self-loop counts as a cycle. The result is advisory; a cyclic graph is
    /// still a valid blueprint input.
    #[must_use]
    pub fn has_circular_dependencies(&self) -> bool {
        cycle::has_cycle(&self.adjacency())
    }

    /// One line per module, in index order, listing its direct dependencies.
    ///
    /// Each line reads `module{i} -> [module{a}, module{b}]` with the
    /// dependencies sorted and de-duplicated.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        let mut incoming = vec![Vec::new(); self.num_modules];
        for edge in &self.edges {
            incoming[edge.to].push(edge.from);
        }
        incoming
            .into_iter()
            .enumerate()
            .map(|(module, mut froms)| {
                froms.sort_unstable();
                froms.dedup();
                let listed: Vec<String> = froms.iter().map(|from| format!("module{from}")).collect();
                format!("module{module} -> [{}]", listed.join(", "))
            })
            .collect()
    }

    fn adjacency(&self) -> Vec<Vec<ModuleIndex>> {
        let mut adjacency = vec![Vec::new(); self.num_modules];
        for edge in &self.edges {
            adjacency[edge.from].push(edge.to);
        }
        adjacency
    }
}
