use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::graphs::{linked_graph::LinkedGraph, Direction, Vertex, Weight};
use crate::search::{
    bidirectional_dijkstra, collections::dijkstra_data::DijkstraData, edge_expander::expand_edge,
    many_to_many, RoutePath, Seed,
};

pub mod contraction;
pub mod edge_difference;
pub mod graph_builder;
pub mod hierarchy_builder;
pub mod witness_calculator;

pub use contraction::IncidentEdge;

/// Traversal cost of an edge profile as resolved by the routing-profile
/// collaborator: a speed factor and a travel permission
/// (0 = both, 1 = forward, 2 = backward).
#[derive(Clone, Copy, Debug)]
pub struct Factor {
    pub value: f32,
    pub direction: u8,
}

impl Factor {
    pub const DIRECTION_BOTH: u8 = 0;
    pub const DIRECTION_FORWARD: u8 = 1;
    pub const DIRECTION_BACKWARD: u8 = 2;

    pub fn to_direction(self) -> Direction {
        match self.direction {
            Factor::DIRECTION_FORWARD => Direction::Forward,
            Factor::DIRECTION_BACKWARD => Direction::Backward,
            _ => Direction::Both,
        }
    }
}

/// Observer of contraction events for verification tooling. Hooks fire
/// synchronously around every contraction; the default bodies do nothing.
pub trait ContractionObserver {
    fn on_before_contraction(&mut self, _vertex: Vertex, _incident_edges: &[IncidentEdge]) {}
    fn on_after_contraction(&mut self, _vertex: Vertex, _incident_edges: &[IncidentEdge]) {}
}

/// A preprocessed hierarchy: the contracted search graph plus the order in
/// which its vertices were contracted.
#[derive(Serialize, Deserialize)]
pub struct ContractedGraph {
    graph: LinkedGraph,
    contraction_order: Vec<Vertex>,
}

impl ContractedGraph {
    pub fn new(graph: LinkedGraph, contraction_order: Vec<Vertex>) -> ContractedGraph {
        ContractedGraph {
            graph,
            contraction_order,
        }
    }

    pub fn graph(&self) -> &LinkedGraph {
        &self.graph
    }

    pub fn contraction_order(&self) -> &[Vertex] {
        &self.contraction_order
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), bincode::Error> {
        bincode::serialize_into(writer, self)
    }

    pub fn read_from<R: Read>(reader: R) -> Result<ContractedGraph, bincode::Error> {
        bincode::deserialize_from(reader)
    }

    /// Weight of the shortest path, `None` when `target` is unreachable.
    pub fn shortest_path_weight(&self, source: Vertex, target: Vertex) -> Option<Weight> {
        bidirectional_dijkstra::calculate(&self.graph, &[Seed::new(source)], &[Seed::new(target)])
            .map(|(_meeting, weight)| weight)
    }

    /// Shortest path with every shortcut expanded back to the original
    /// vertex sequence.
    pub fn shortest_path(&self, source: Vertex, target: Vertex) -> Option<RoutePath> {
        let ((meeting, weight), forward_data, backward_data) =
            bidirectional_dijkstra::calculate_with_spaces(
                &self.graph,
                &[Seed::new(source)],
                &[Seed::new(target)],
            )?;

        // stitch the two predecessor chains into travel order, still at
        // shortcut granularity
        let mut hops = forward_data
            .get_path(meeting)
            .expect("meeting vertex is settled by the forward search")
            .vertices;
        let mut backward_hops = backward_data
            .get_path(meeting)
            .expect("meeting vertex is settled by the backward search")
            .vertices;
        backward_hops.reverse();
        hops.pop();
        hops.extend(backward_hops);

        let mut vertices = vec![hops[0]];
        for hop in hops.windows(2) {
            expand_edge(&self.graph, hop[0], hop[1], &mut vertices, true, false);
            vertices.push(hop[1]);
        }

        Some(RoutePath { vertices, weight })
    }

    /// Dense weight matrix between source and target seed groups;
    /// unreachable cells hold `Weight::MAX`.
    pub fn weight_matrix(&self, sources: &[Vec<Seed>], targets: &[Vec<Seed>]) -> Vec<Vec<Weight>> {
        many_to_many::calculate(&self.graph, sources, targets)
    }
}
