use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod edge_data;
pub mod linked_graph;

pub type Vertex = u32;
pub type EdgeId = u32;
pub type Weight = f32;

/// Sentinel for "no vertex referenced", e.g. the contracted-id slot of an
/// original (non-shortcut) edge.
pub const NO_VERTEX: Vertex = Vertex::MAX;

/// Sentinel terminating the intrusive edge lists.
pub const NO_EDGE: EdgeId = EdgeId::MAX;

/// Weight of an unreachable vertex or matrix cell.
pub const INFINITE_WEIGHT: Weight = Weight::MAX;

/// Travel permission of an edge, stated from the perspective of the vertex
/// the edge was added from. `Forward` allows tail -> head only, `Backward`
/// head -> tail only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Both,
    Forward,
    Backward,
}

impl Direction {
    pub fn allows_forward(self) -> bool {
        self != Direction::Backward
    }

    pub fn allows_backward(self) -> bool {
        self != Direction::Forward
    }

    pub fn reversed(self) -> Direction {
        match self {
            Direction::Both => Direction::Both,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Contract violations on the graph store. These indicate a programmatically
/// wrong caller and are raised immediately, never retried.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} is not registered in the graph")]
    VertexOutOfRange(Vertex),
    #[error("edge data has {got} words but this graph stores {expected} words per edge")]
    EdgeDataSizeMismatch { expected: usize, got: usize },
    #[error("self loop on vertex {0} is not allowed on a simple graph")]
    SelfLoop(Vertex),
    #[error("an edge between {0} and {1} already exists on this simple graph")]
    DuplicateEdge(Vertex, Vertex),
    #[error("no edge between {0} and {1}")]
    NoEdgeBetween(Vertex, Vertex),
    #[error("edge {0} does not exist")]
    EdgeOutOfRange(EdgeId),
}

/// Violations of the binary graph format. Fatal for the load, no partial
/// recovery.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported graph format version {0}")]
    UnsupportedVersion(u8),
    #[error("graph stream ended before the declared counts were read")]
    Truncated,
    #[error("edge record size {0} is too small to hold an edge")]
    InvalidRecordSize(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
