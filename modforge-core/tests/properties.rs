//! Property tests over every topology kind.

use std::collections::HashSet;

use modforge_core::{
    DependencyEdge, DependencyGraph, Topology, TopologyKind, TopologyParameters,
};
use proptest::{prop_assert, prop_assert_eq, sample::select};
use test_strategy::{Arbitrary, proptest};

#[derive(Arbitrary, Debug)]
struct TopologyCase {
    #[strategy(select(TopologyKind::ALL.to_vec()))]
    kind: TopologyKind,
    #[strategy(0_usize..48)]
    num_modules: usize,
    #[strategy(1_usize..9)]
    width: usize,
    seed: i64,
}

impl TopologyCase {
    fn topology(&self) -> Topology {
        let params = TopologyParameters::new()
            .with("width", self.width.to_string())
            .with("seed", self.seed.to_string());
        Topology::from_parameters(self.kind, &params).expect("generated parameters are valid")
    }
}

fn targets(edges: &[DependencyEdge]) -> HashSet<usize> {
    edges.iter().map(DependencyEdge::target).collect()
}

#[proptest]
fn edges_point_forward_and_stay_in_range(case: TopologyCase) {
    let edges = case.topology().generate(case.num_modules);
    for edge in &edges {
        prop_assert!(edge.source() < edge.target());
        prop_assert!(edge.target() < case.num_modules);
    }
}

#[proptest]
fn topology_output_alone_is_acyclic(case: TopologyCase) {
    let edges = case.topology().generate(case.num_modules);
    let graph = DependencyGraph::build(Vec::new(), edges, case.num_modules)
        .expect("generated edges are in range");
    prop_assert!(!graph.has_circular_dependencies());
}

#[proptest]
fn generation_is_deterministic(case: TopologyCase) {
    let topology = case.topology();
    prop_assert_eq!(
        topology.generate(case.num_modules),
        topology.generate(case.num_modules)
    );
}

#[proptest]
fn connected_kinds_reach_their_targets(case: TopologyCase) {
    let edges = case.topology().generate(case.num_modules);
    let reached = targets(&edges);
    match case.kind {
        TopologyKind::RandomConnected => {
            let expected: HashSet<usize> = (1..case.num_modules).collect();
            prop_assert_eq!(reached, expected);
        }
        TopologyKind::RandomConnectedRectangle => {
            let expected: HashSet<usize> = (case.width..case.num_modules).collect();
            prop_assert_eq!(reached, expected);
        }
        _ => {}
    }
}

#[proptest]
fn random_variants_are_subsets_of_their_deterministic_shape(case: TopologyCase) {
    let base = match case.kind {
        TopologyKind::Random | TopologyKind::RandomConnected => Some(Topology::Full),
        TopologyKind::RandomRectangle | TopologyKind::RandomConnectedRectangle => {
            let params = TopologyParameters::new().with("width", case.width.to_string());
            Some(
                Topology::from_parameters(TopologyKind::Rectangle, &params)
                    .expect("width is positive"),
            )
        }
        _ => None,
    };
    if let Some(base) = base {
        let allowed: HashSet<DependencyEdge> =
            base.generate(case.num_modules).into_iter().collect();
        let edges = case.topology().generate(case.num_modules);
        let unique: HashSet<DependencyEdge> = edges.iter().copied().collect();
        prop_assert_eq!(unique.len(), edges.len());
        prop_assert!(unique.is_subset(&allowed));
    }
}
