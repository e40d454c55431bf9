use serde::{Deserialize, Serialize};

use crate::graphs::{Vertex, Weight};

pub mod bidirectional_dijkstra;
pub mod collections;
pub mod dijkstra;
pub mod edge_expander;
pub mod many_to_many;

/// A search origin: a vertex with an initial weight. Queries snapping to an
/// edge seed both endpoints, each carrying the partial-edge weight.
#[derive(Clone, Copy, Debug)]
pub struct Seed {
    pub vertex: Vertex,
    pub weight: Weight,
}

impl Seed {
    pub fn new(vertex: Vertex) -> Seed {
        Seed { vertex, weight: 0.0 }
    }

    pub fn with_weight(vertex: Vertex, weight: Weight) -> Seed {
        Seed { vertex, weight }
    }
}

/// A fully expanded route: the original (shortcut-free) vertex sequence and
/// its total weight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoutePath {
    pub vertices: Vec<Vertex>,
    pub weight: Weight,
}
