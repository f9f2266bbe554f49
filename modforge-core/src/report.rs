//! Operator-facing diagnostics of a generation run.

use std::fmt;

use crate::graph::DependencyGraph;

/// Dependency listing and cycle verdict of a project.
///
/// The [`fmt::Display`] form is meant for a console: a `Dependency graph:`
/// header, one line per module, and a warning line when the graph is cyclic.
///
/// # Examples
/// ```
/// use modforge_core::{ProjectBlueprint, ProjectConfig};
///
/// let config = ProjectConfig::builder(2).with_dependency(0, 1).build();
/// let blueprint = ProjectBlueprint::from_config(&config).expect("configuration is valid");
/// let report = blueprint.report();
/// assert!(!report.has_circular_dependencies());
/// assert_eq!(
///     report.to_string(),
///     "Dependency graph:\nmodule0 -> []\nmodule1 -> [module0]\n"
/// );
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenerationReport {
    dependency_lines: Vec<String>,
    has_circular_dependencies: bool,
}

impl GenerationReport {
    pub(crate) fn new(graph: &DependencyGraph) -> Self {
        Self {
            dependency_lines: graph.describe(),
            has_circular_dependencies: graph.has_circular_dependencies(),
        }
    }

    /// Output of [`DependencyGraph::describe`].
    #[must_use]
    pub fn dependency_lines(&self) -> &[String] {
        &self.dependency_lines
    }

    /// Whether the graph contains a cycle.
    #[must_use]
    pub fn has_circular_dependencies(&self) -> bool {
        self.has_circular_dependencies
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dependency graph:")?;
        for line in &self.dependency_lines {
            writeln!(f, "{line}")?;
        }
        if self.has_circular_dependencies {
            writeln!(f, "WARNING: there are circular dependencies")?;
        }
        Ok(())
    }
}
