//! Benchmark support crate for modforge.
//!
//! Provides parameter types and workload builders shared by the Criterion
//! benchmarks for topology generation and blueprint partitioning.

pub mod error;
pub mod params;
pub mod workload;
