use ahash::AHashMap;

use crate::graphs::{Vertex, Weight, INFINITE_WEIGHT};
use crate::search::RoutePath;

/// Trait for handling data access in Dijkstra's algorithm.
pub trait DijkstraData {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Retrieves the predecessor of a given vertex, if any.
    fn get_predecessor(&self, vertex: Vertex) -> Option<Vertex>;

    /// Sets the predecessor for a given vertex.
    fn set_predecessor(&mut self, vertex: Vertex, predecessor: Vertex);

    /// Retrieves the tentative weight of a vertex, [`INFINITE_WEIGHT`] when
    /// unreached.
    fn get_weight(&self, vertex: Vertex) -> Weight;

    /// Sets the tentative weight of a vertex.
    fn set_weight(&mut self, vertex: Vertex, weight: Weight);

    /// Constructs the path to a target vertex by tracing the predecessor
    /// chain back to the search root. Returns `None` if the target is
    /// unreached.
    fn get_path(&self, target: Vertex) -> Option<RoutePath> {
        let weight = self.get_weight(target);
        if weight == INFINITE_WEIGHT {
            return None;
        }

        let mut vertices = vec![target];
        let mut predecessor = target;
        while let Some(new_predecessor) = self.get_predecessor(predecessor) {
            predecessor = new_predecessor;
            vertices.push(predecessor);
        }
        vertices.reverse();

        Some(RoutePath { vertices, weight })
    }
}

/// Stores weights and predecessors in plain vectors, for searches that
/// touch a large share of the graph.
pub struct DijkstraDataVec {
    predecessors: Vec<Vertex>,
    weights: Vec<Weight>,
}

impl DijkstraDataVec {
    pub fn new(number_of_vertices: usize) -> Self {
        DijkstraDataVec {
            predecessors: vec![Vertex::MAX; number_of_vertices],
            weights: vec![INFINITE_WEIGHT; number_of_vertices],
        }
    }
}

impl DijkstraData for DijkstraDataVec {
    fn clear(&mut self) {
        self.predecessors.fill(Vertex::MAX);
        self.weights.fill(INFINITE_WEIGHT);
    }

    fn get_predecessor(&self, vertex: Vertex) -> Option<Vertex> {
        let predecessor = self.predecessors[vertex as usize];
        if predecessor == Vertex::MAX {
            return None;
        }
        Some(predecessor)
    }

    fn set_predecessor(&mut self, vertex: Vertex, predecessor: Vertex) {
        self.predecessors[vertex as usize] = predecessor;
    }

    fn get_weight(&self, vertex: Vertex) -> Weight {
        self.weights[vertex as usize]
    }

    fn set_weight(&mut self, vertex: Vertex, weight: Weight) {
        self.weights[vertex as usize] = weight;
    }
}

/// Hash-map backed search state for queries that only touch a small
/// neighbourhood of a big graph.
pub struct DijkstraDataHashMap {
    predecessors: AHashMap<Vertex, Vertex>,
    weights: AHashMap<Vertex, Weight>,
}

impl Default for DijkstraDataHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl DijkstraDataHashMap {
    pub fn new() -> Self {
        DijkstraDataHashMap {
            predecessors: AHashMap::new(),
            weights: AHashMap::new(),
        }
    }
}

impl DijkstraData for DijkstraDataHashMap {
    fn clear(&mut self) {
        self.predecessors.clear();
        self.weights.clear();
    }

    fn get_predecessor(&self, vertex: Vertex) -> Option<Vertex> {
        self.predecessors.get(&vertex).cloned()
    }

    fn set_predecessor(&mut self, vertex: Vertex, predecessor: Vertex) {
        self.predecessors.insert(vertex, predecessor);
    }

    fn get_weight(&self, vertex: Vertex) -> Weight {
        *self.weights.get(&vertex).unwrap_or(&INFINITE_WEIGHT)
    }

    fn set_weight(&mut self, vertex: Vertex, weight: Weight) {
        self.weights.insert(vertex, weight);
    }
}
