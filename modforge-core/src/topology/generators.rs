//! Edge generators for each topology kind.
//!
//! All generators emit `from < to`. The randomised ones take one fair coin
//! flip per candidate edge, in the order the candidates are listed, so the
//! output depends only on the seed.

use std::{num::NonZeroUsize, ops::Range};

use rand::Rng;
use tracing::trace;

use crate::{graph::DependencyEdge, rng::TopologyRng};

const COIN: f64 = 0.5;

pub(super) fn full(num_modules: usize) -> Vec<DependencyEdge> {
    (0..num_modules)
        .flat_map(|from| ((from + 1)..num_modules).map(move |to| DependencyEdge::new(from, to)))
        .collect()
}

pub(super) fn random(rng: &mut TopologyRng, num_modules: usize) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();
    for from in 0..num_modules {
        for to in (from + 1)..num_modules {
            if rng.gen_bool(COIN) {
                edges.push(DependencyEdge::new(from, to));
            }
        }
    }
    edges
}

pub(super) fn random_connected(rng: &mut TopologyRng, num_modules: usize) -> Vec<DependencyEdge> {
    connect_each_target(rng, 1..num_modules, |to| 0..to)
}

pub(super) fn linear(num_modules: usize) -> Vec<DependencyEdge> {
    (1..num_modules)
        .map(|to| DependencyEdge::new(to - 1, to))
        .collect()
}

pub(super) fn star(num_modules: usize) -> Vec<DependencyEdge> {
    (1..num_modules).map(|to| DependencyEdge::new(0, to)).collect()
}

pub(super) fn binary_tree(num_modules: usize) -> Vec<DependencyEdge> {
    (1..num_modules)
        .map(|to| DependencyEdge::new(binary_tree_parent(to), to))
        .collect()
}

/// Heap parent of `node`; only meaningful for `node >= 1`.
pub(super) const fn binary_tree_parent(node: usize) -> usize {
    (node + 1) / 2 - 1
}

pub(super) fn rectangle(width: NonZeroUsize, num_modules: usize) -> Vec<DependencyEdge> {
    (width.get()..num_modules)
        .flat_map(|to| previous_row(to, width).map(move |from| DependencyEdge::new(from, to)))
        .collect()
}

pub(super) fn random_rectangle(
    rng: &mut TopologyRng,
    width: NonZeroUsize,
    num_modules: usize,
) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();
    for to in width.get()..num_modules {
        for from in previous_row(to, width) {
            if rng.gen_bool(COIN) {
                edges.push(DependencyEdge::new(from, to));
            }
        }
    }
    edges
}

pub(super) fn random_connected_rectangle(
    rng: &mut TopologyRng,
    width: NonZeroUsize,
    num_modules: usize,
) -> Vec<DependencyEdge> {
    connect_each_target(rng, width.get()..num_modules, |to| previous_row(to, width))
}

/// Modules of the row above the one holding `to`. Requires `to >= width`.
fn previous_row(to: usize, width: NonZeroUsize) -> Range<usize> {
    let row = width.get();
    let base = (to / row - 1) * row;
    base..base + row
}

/// Flips a coin for every candidate of each target, repeating a target until
/// at least one of its candidates is kept.
///
/// The loop has no iteration cap. Every target must have at least one
/// candidate, which makes each round succeed with probability at least one
/// half.
fn connect_each_target<F>(
    rng: &mut TopologyRng,
    targets: Range<usize>,
    candidates: F,
) -> Vec<DependencyEdge>
where
    F: Fn(usize) -> Range<usize>,
{
    let mut edges = Vec::new();
    let mut retries = 0_u64;
    let mut to = targets.start;
    while to < targets.end {
        let before = edges.len();
        for from in candidates(to) {
            if rng.gen_bool(COIN) {
                edges.push(DependencyEdge::new(from, to));
            }
        }
        if edges.len() > before {
            to += 1;
        } else {
            retries += 1;
            trace!(to, "no dependency kept, retrying target");
        }
    }
    trace!(retries, "connected topology complete");
    edges
}
