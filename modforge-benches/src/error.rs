//! Errors raised while preparing benchmark inputs.

use modforge_core::ConfigError;
use thiserror::Error;

/// Failure to build a benchmark workload.
#[derive(Debug, Error)]
pub enum BenchSetupError {
    /// The core rejected the generated configuration.
    #[error("benchmark configuration rejected: {0}")]
    Config(#[from] ConfigError),
}
