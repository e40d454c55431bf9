use ahash::AHashMap;

use super::contraction::{candidate_shortcuts, incident_edges};
use super::witness_calculator::WitnessCalculator;
use crate::graphs::{linked_graph::LinkedGraph, Vertex};

/// Estimates how expensive contracting a vertex right now would be.
///
/// Priority is a weighted combination of the edge difference (shortcuts
/// inserted minus edges removed), the number of already contracted
/// neighbours and the search-space depth; all three terms ascend, lower
/// contracts first. The exact coefficients are a tunable, not a contract.
pub struct EdgeDifferencePriority {
    difference_factor: f32,
    contracted_factor: f32,
    depth_factor: f32,
    depth: AHashMap<Vertex, u32>,
    contracted_neighbours: AHashMap<Vertex, u32>,
}

impl Default for EdgeDifferencePriority {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeDifferencePriority {
    pub fn new() -> EdgeDifferencePriority {
        EdgeDifferencePriority::with_factors(1.0, 2.0, 1.0)
    }

    pub fn with_factors(
        difference_factor: f32,
        contracted_factor: f32,
        depth_factor: f32,
    ) -> EdgeDifferencePriority {
        EdgeDifferencePriority {
            difference_factor,
            contracted_factor,
            depth_factor,
            depth: AHashMap::new(),
            contracted_neighbours: AHashMap::new(),
        }
    }

    /// Read-only probe: simulates the contraction to count shortcuts, never
    /// mutates the graph.
    pub fn priority(
        &self,
        graph: &LinkedGraph,
        witness: &mut WitnessCalculator,
        vertex: Vertex,
    ) -> f32 {
        let removed = incident_edges(graph, vertex).len();
        let added = candidate_shortcuts(graph, witness, vertex).len();

        self.difference_factor * (added as f32 - removed as f32)
            + self.contracted_factor
                * self.contracted_neighbours.get(&vertex).copied().unwrap_or(0) as f32
            + self.depth_factor * self.depth.get(&vertex).copied().unwrap_or(0) as f32
    }

    /// Records that `vertex` was contracted, bumping its neighbours'
    /// contracted counts and search-space depth.
    pub fn notify_contracted(&mut self, vertex: Vertex, neighbours: &[Vertex]) {
        let next_depth = self.depth.get(&vertex).copied().unwrap_or(0) + 1;
        for &neighbour in neighbours {
            *self.contracted_neighbours.entry(neighbour).or_insert(0) += 1;
            let depth = self.depth.entry(neighbour).or_insert(0);
            if next_depth > *depth {
                *depth = next_depth;
            }
        }
    }
}
