use ahash::AHashMap;

use super::collections::{
    dijkstra_data::{DijkstraData, DijkstraDataHashMap},
    vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
    vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
};
use super::Seed;
use crate::graphs::{
    edge_data::ContractedEdgeData, linked_graph::LinkedGraph, Vertex, Weight, INFINITE_WEIGHT,
};

/// Fills a dense `sources x targets` weight matrix over a contracted graph.
///
/// One backward search per target column first; every vertex it settles
/// gets a `(column, weight)` bucket entry. One forward search per source
/// row then combines its settled weights with the buckets it touches,
/// keeping the minimum per cell. Unreachable cells hold
/// [`INFINITE_WEIGHT`] — a normal outcome, not a failure.
pub fn calculate(
    graph: &LinkedGraph,
    sources: &[Vec<Seed>],
    targets: &[Vec<Seed>],
) -> Vec<Vec<Weight>> {
    let mut buckets: AHashMap<Vertex, Vec<(usize, Weight)>> = AHashMap::new();

    for (column, seeds) in targets.iter().enumerate() {
        search(graph, seeds, true, |vertex, weight| {
            buckets.entry(vertex).or_default().push((column, weight));
        });
    }

    let mut weights = vec![vec![INFINITE_WEIGHT; targets.len()]; sources.len()];
    for (row, seeds) in sources.iter().enumerate() {
        let cells = &mut weights[row];
        search(graph, seeds, false, |vertex, forward_weight| {
            if let Some(entries) = buckets.get(&vertex) {
                for &(column, backward_weight) in entries {
                    let candidate = forward_weight + backward_weight;
                    if candidate < cells[column] {
                        cells[column] = candidate;
                    }
                }
            }
        });
    }

    weights
}

/// Runs one full direction-aware search over the contracted graph,
/// reporting every settled vertex.
fn search<F: FnMut(Vertex, Weight)>(
    graph: &LinkedGraph,
    seeds: &[Seed],
    backward: bool,
    mut on_settle: F,
) {
    let mut data = DijkstraDataHashMap::new();
    let mut expanded = VertexExpandedDataHashSet::new();
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    for seed in seeds {
        if seed.weight < data.get_weight(seed.vertex) {
            data.set_weight(seed.vertex, seed.weight);
            queue.insert(seed.vertex, seed.weight);
        }
    }

    let mut enumerator = graph.edge_enumerator();
    while let Some((tail, weight_tail)) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }
        on_settle(tail, weight_tail);

        enumerator.move_to(tail);
        while enumerator.move_next() {
            let edge = ContractedEdgeData::decode_from(enumerator.data(), enumerator.is_inverted());
            let traversable = if backward {
                edge.direction.allows_backward()
            } else {
                edge.direction.allows_forward()
            };
            if !traversable {
                continue;
            }
            let head = enumerator.neighbour();
            let alternative_weight_head = weight_tail + edge.weight;
            if alternative_weight_head < data.get_weight(head) {
                data.set_weight(head, alternative_weight_head);
                data.set_predecessor(head, tail);
                queue.insert(head, alternative_weight_head);
            }
        }
    }
}
