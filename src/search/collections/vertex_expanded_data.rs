use ahash::AHashSet;
use fixedbitset::FixedBitSet;

use crate::graphs::Vertex;

/// Tracks which vertices a search has settled.
pub trait VertexExpandedData {
    /// Marks `vertex` as expanded. Returns true if it already was.
    fn expand(&mut self, vertex: Vertex) -> bool;

    fn clear(&mut self);
}

pub struct VertexExpandedDataHashSet {
    expanded: AHashSet<Vertex>,
}

impl Default for VertexExpandedDataHashSet {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexExpandedDataHashSet {
    pub fn new() -> Self {
        VertexExpandedDataHashSet {
            expanded: AHashSet::new(),
        }
    }
}

impl VertexExpandedData for VertexExpandedDataHashSet {
    fn expand(&mut self, vertex: Vertex) -> bool {
        !self.expanded.insert(vertex)
    }

    fn clear(&mut self) {
        self.expanded.clear();
    }
}

pub struct VertexExpandedDataBitSet {
    expanded: FixedBitSet,
}

impl VertexExpandedDataBitSet {
    pub fn new(number_of_vertices: usize) -> Self {
        VertexExpandedDataBitSet {
            expanded: FixedBitSet::with_capacity(number_of_vertices),
        }
    }
}

impl VertexExpandedData for VertexExpandedDataBitSet {
    fn expand(&mut self, vertex: Vertex) -> bool {
        self.expanded.put(vertex as usize)
    }

    fn clear(&mut self) {
        self.expanded.clear()
    }
}
