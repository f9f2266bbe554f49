//! Benchmark parameter types.
//!
//! Each struct doubles as the Criterion benchmark id through its
//! [`fmt::Display`] form.

use std::fmt;

use modforge_core::TopologyKind;

/// Parameters for a single topology generation run.
#[derive(Clone, Copy, Debug)]
pub struct TopologyBenchParams {
    /// Algorithm to run.
    pub kind: TopologyKind,
    /// Number of modules in the project.
    pub num_modules: usize,
}

impl fmt::Display for TopologyBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.kind, self.num_modules)
    }
}

/// Parameters for a full blueprint pipeline run.
#[derive(Clone, Copy, Debug)]
pub struct PartitionBenchParams {
    /// Number of modules in the project.
    pub num_modules: usize,
    /// Java classes spread across all modules.
    pub java_classes: i64,
}

impl fmt::Display for PartitionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},classes={}", self.num_modules, self.java_classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(TopologyKind::Full, 10, "full,n=10")]
    #[case(TopologyKind::RandomConnectedRectangle, 3, "random_connected_rectangle,n=3")]
    fn topology_params_render_as_benchmark_ids(
        #[case] kind: TopologyKind,
        #[case] num_modules: usize,
        #[case] expected: &str,
    ) {
        let params = TopologyBenchParams { kind, num_modules };
        assert_eq!(params.to_string(), expected);
    }

    #[test]
    fn partition_params_render_as_benchmark_ids() {
        let params = PartitionBenchParams {
            num_modules: 50,
            java_classes: 1_000,
        };
        assert_eq!(params.to_string(), "n=50,classes=1000");
    }
}
