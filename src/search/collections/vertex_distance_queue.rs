use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graphs::{Vertex, Weight};

/// A priority queue of vertices keyed by tentative weight, for algorithms
/// that repeatedly need the vertex with the smallest weight.
///
/// Implementations need not support decrease-key; stale entries are skipped
/// by the caller's expanded-set check.
pub trait VertexDistanceQueue {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    fn insert(&mut self, vertex: Vertex, weight: Weight);

    /// Removes and returns the entry with the smallest weight, or `None` if
    /// the queue is empty.
    fn pop(&mut self) -> Option<(Vertex, Weight)>;

    /// The entry with the smallest weight without removing it.
    fn peek(&self) -> Option<(Vertex, Weight)>;

    fn is_empty(&self) -> bool;
}

#[derive(Copy, Clone, PartialEq)]
struct QueueElement {
    weight: Weight,
    vertex: Vertex,
}

impl Eq for QueueElement {}

// The binary heap depends on `Ord`. Flip the weight ordering so the heap
// becomes a min-heap; ties fall back to the vertex id to keep `PartialEq`
// and `Ord` consistent.
impl Ord for QueueElement {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A priority queue implementation using a binary heap.
pub struct VertexDistanceQueueBinaryHeap {
    heap: BinaryHeap<QueueElement>,
}

impl Default for VertexDistanceQueueBinaryHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDistanceQueueBinaryHeap {
    pub fn new() -> Self {
        VertexDistanceQueueBinaryHeap {
            heap: BinaryHeap::new(),
        }
    }
}

impl VertexDistanceQueue for VertexDistanceQueueBinaryHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: Vertex, weight: Weight) {
        self.heap.push(QueueElement { weight, vertex });
    }

    fn pop(&mut self) -> Option<(Vertex, Weight)> {
        let element = self.heap.pop()?;
        Some((element.vertex, element.weight))
    }

    fn peek(&self) -> Option<(Vertex, Weight)> {
        let element = self.heap.peek()?;
        Some((element.vertex, element.weight))
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
