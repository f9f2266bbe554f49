//! Shared test utilities used across modforge crates.
//!
//! This crate deliberately knows nothing about `modforge-core` types: graph
//! fixtures are plain `(from, to)` pairs that callers convert themselves.

pub mod fixtures;
pub mod tracing;
