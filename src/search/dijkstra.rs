use super::collections::{
    dijkstra_data::{DijkstraData, DijkstraDataVec},
    vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
    vertex_expanded_data::{VertexExpandedData, VertexExpandedDataBitSet},
};
use crate::graphs::{
    edge_data::ContractedEdgeData, linked_graph::LinkedGraph, Vertex, Weight, INFINITE_WEIGHT,
};

/// Plain direction-aware Dijkstra from a single source. Settles the whole
/// reachable component.
pub fn dijkstra_single_source(
    graph: &LinkedGraph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
) {
    data.set_weight(source, 0.0);
    queue.insert(source, 0.0);

    let mut enumerator = graph.edge_enumerator();
    while let Some((tail, weight_tail)) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }

        enumerator.move_to(tail);
        while enumerator.move_next() {
            let edge = ContractedEdgeData::decode_from(enumerator.data(), enumerator.is_inverted());
            if !edge.direction.allows_forward() {
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

/// One-to-many variant stopping as soon as every target is settled.
pub fn dijkstra_one_to_many(
    graph: &LinkedGraph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
    targets: &[Vertex],
) {
    let mut remaining = targets.len();

    data.set_weight(source, 0.0);
    queue.insert(source, 0.0);

    let mut enumerator = graph.edge_enumerator();
    while let Some((tail, weight_tail)) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }
        if targets.contains(&tail) {
            remaining -= targets.iter().filter(|&&target| target == tail).count();
            if remaining == 0 {
                break;
            }
        }

        enumerator.move_to(tail);
        while enumerator.move_next() {
            let edge = ContractedEdgeData::decode_from(enumerator.data(), enumerator.is_inverted());
            if !edge.direction.allows_forward() {
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

/// Wrapper allocating vector-backed state, for ground-truth all-pairs
/// checks on uncontracted graphs.
pub fn dijkstra_single_source_wrapped(graph: &LinkedGraph, source: Vertex) -> DijkstraDataVec {
    let mut data = DijkstraDataVec::new(graph.vertex_count());
    let mut expanded = VertexExpandedDataBitSet::new(graph.vertex_count());
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    dijkstra_single_source(graph, &mut data, &mut expanded, &mut queue, source);

    data
}

/// Single-pair convenience wrapper. `None` when `target` is unreachable.
pub fn dijkstra_one_to_one_wrapped(
    graph: &LinkedGraph,
    source: Vertex,
    target: Vertex,
) -> Option<Weight> {
    let data = dijkstra_single_source_wrapped(graph, source);
    let weight = data.get_weight(target);
    if weight == INFINITE_WEIGHT {
        return None;
    }
    Some(weight)
}
