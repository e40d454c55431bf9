use super::collections::{
    dijkstra_data::{DijkstraData, DijkstraDataHashMap},
    vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
    vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
};
use super::Seed;
use crate::graphs::{
    edge_data::ContractedEdgeData,
    linked_graph::{EdgeEnumerator, LinkedGraph},
    Vertex, Weight, INFINITE_WEIGHT,
};

/// Point-to-point query on a contracted graph: a forward search from the
/// source seeds over forward-traversable edges and a backward search from
/// the target seeds over backward-traversable edges, meeting in the middle.
///
/// Returns the best meeting vertex and total weight, or `None` when no
/// vertex is reached from both sides (ran, found nothing).
pub fn calculate(
    graph: &LinkedGraph,
    sources: &[Seed],
    targets: &[Seed],
) -> Option<(Vertex, Weight)> {
    let (meeting, _forward_data, _backward_data) = calculate_with_spaces(graph, sources, targets)?;
    Some(meeting)
}

/// Same as [`calculate`] but hands back both search spaces so the caller
/// can reconstruct the predecessor chains.
#[allow(clippy::type_complexity)]
pub fn calculate_with_spaces(
    graph: &LinkedGraph,
    sources: &[Seed],
    targets: &[Seed],
) -> Option<((Vertex, Weight), DijkstraDataHashMap, DijkstraDataHashMap)> {
    let mut forward_data = DijkstraDataHashMap::new();
    let mut forward_expanded = VertexExpandedDataHashSet::new();
    let mut forward_queue = VertexDistanceQueueBinaryHeap::new();

    let mut backward_data = DijkstraDataHashMap::new();
    let mut backward_expanded = VertexExpandedDataHashSet::new();
    let mut backward_queue = VertexDistanceQueueBinaryHeap::new();

    for seed in sources {
        if seed.weight < forward_data.get_weight(seed.vertex) {
            forward_data.set_weight(seed.vertex, seed.weight);
            forward_queue.insert(seed.vertex, seed.weight);
        }
    }
    for seed in targets {
        if seed.weight < backward_data.get_weight(seed.vertex) {
            backward_data.set_weight(seed.vertex, seed.weight);
            backward_queue.insert(seed.vertex, seed.weight);
        }
    }

    let mut best: Option<(Vertex, Weight)> = None;
    let mut forward_enumerator = graph.edge_enumerator();
    let mut backward_enumerator = graph.edge_enumerator();

    loop {
        // a side is finished once its cheapest remaining entry can no
        // longer improve the best meeting weight
        let best_weight = best.map(|(_vertex, weight)| weight);
        let forward_head = forward_queue
            .peek()
            .filter(|(_, weight)| best_weight.map_or(true, |best| *weight < best));
        let backward_head = backward_queue
            .peek()
            .filter(|(_, weight)| best_weight.map_or(true, |best| *weight < best));

        // expand the globally smallest frontier
        let forward_turn = match (forward_head, backward_head) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some((_, forward_weight)), Some((_, backward_weight))) => {
                forward_weight <= backward_weight
            }
        };

        if forward_turn {
            search_step(
                &mut forward_enumerator,
                &mut forward_data,
                &mut forward_expanded,
                &mut forward_queue,
                &backward_data,
                &mut best,
                false,
            );
        } else {
            search_step(
                &mut backward_enumerator,
                &mut backward_data,
                &mut backward_expanded,
                &mut backward_queue,
                &forward_data,
                &mut best,
                true,
            );
        }
    }

    let meeting = best?;
    Some((meeting, forward_data, backward_data))
}

fn search_step(
    enumerator: &mut EdgeEnumerator<'_>,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    opposite_data: &dyn DijkstraData,
    best: &mut Option<(Vertex, Weight)>,
    backward: bool,
) {
    let Some((tail, weight_tail)) = queue.pop() else {
        return;
    };
    if expanded.expand(tail) {
        return;
    }

    let opposite_weight = opposite_data.get_weight(tail);
    if opposite_weight != INFINITE_WEIGHT {
        let meeting_weight = weight_tail + opposite_weight;
        if best.map_or(true, |(_vertex, weight)| meeting_weight < weight) {
            *best = Some((tail, meeting_weight));
        }
    }

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
