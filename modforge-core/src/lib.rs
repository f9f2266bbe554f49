//! Modforge core library.
//!
//! Decides the shape of a synthetic multi-module project: which modules
//! depend on which (the topology engine and dependency graph) and how much
//! generated code each module receives (the blueprint partitioner). Nothing
//! here touches the filesystem; the resulting [`ProjectBlueprint`] is handed
//! to whatever renders the project on disk.
//!
//! # Determinism
//!
//! Randomised topologies draw from a [`rand::rngs::StdRng`] seeded from the
//! topology's `seed` parameter (default `0`), so the same configuration always
//! yields the same edge list. Partition remainders go to the lowest module
//! indices.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod blueprint;
mod config;
mod error;
mod graph;
mod report;
mod rng;
mod topology;

pub use crate::{
    blueprint::{CodeMass, ModuleBlueprint, ProjectBlueprint, VariantCounts, partition, split_total},
    config::{CodeMassTotals, ProjectConfig, ProjectConfigBuilder, TopologySpec},
    error::{ConfigError, ConfigErrorCode, Result},
    graph::{DependencyEdge, DependencyGraph, ModuleIndex},
    report::GenerationReport,
    rng::{DEFAULT_SEED, SEED_PARAMETER, TopologyRng, random_for, seed_from},
    topology::{Topology, TopologyKind, TopologyParameters, WIDTH_PARAMETER, generate},
};
