use crate::graphs::{
    edge_data::ContractedEdgeData, linked_graph::LinkedGraph, Vertex, NO_VERTEX,
};

/// Recursively replaces the shortcut edge between `from` and `to` by the
/// two edges it contracted, until only original edges remain, appending
/// every intermediate vertex to `out_vertices` in traversal order.
///
/// `forward` selects the append order: the same shortcut tree is walked
/// from either endpoint depending on which half of a bidirectional query
/// is being reconstructed, so a tree expanding to `[1, 2]` forward expands
/// to `[2, 1]` backward. `append_start` additionally pushes `from` first.
///
/// Panics if there is no edge between the pair at all: the hierarchy is
/// corrupt or the caller never ran a search producing this hop.
pub fn expand_edge(
    graph: &LinkedGraph,
    from: Vertex,
    to: Vertex,
    out_vertices: &mut Vec<Vertex>,
    forward: bool,
    append_start: bool,
) {
    if append_start {
        out_vertices.push(from);
    }
    expand(graph, from, to, out_vertices, forward);
}

fn expand(graph: &LinkedGraph, from: Vertex, to: Vertex, out: &mut Vec<Vertex>, forward: bool) {
    let via = best_travel_edge(graph, from, to, forward).contracted_id;
    if via == NO_VERTEX {
        return;
    }

    if forward {
        expand(graph, from, via, out, true);
        out.push(via);
        expand(graph, via, to, out, true);
    } else {
        expand(graph, via, to, out, false);
        out.push(via);
        expand(graph, from, via, out, false);
    }
}

/// Cheapest edge between `from` and `to` traversable in the requested
/// travel sense. Contraction detaches the lower endpoint's occurrence, so
/// both adjacency lists have to be consulted.
fn best_travel_edge(
    graph: &LinkedGraph,
    from: Vertex,
    to: Vertex,
    forward: bool,
) -> ContractedEdgeData {
    let mut best: Option<ContractedEdgeData> = None;
    let mut consider = |data: ContractedEdgeData| {
        // direction is in from-perspective; forward travel is from -> to
        let traversable = if forward {
            data.direction.allows_forward()
        } else {
            data.direction.allows_backward()
        };
        if traversable && best.map_or(true, |current| data.weight < current.weight) {
            best = Some(data);
        }
    };

    let mut enumerator = graph.edge_enumerator();
    enumerator.move_to(from);
    while enumerator.move_next() {
        if enumerator.neighbour() == to {
            consider(ContractedEdgeData::decode_from(
                enumerator.data(),
                enumerator.is_inverted(),
            ));
        }
    }
    enumerator.move_to(to);
    while enumerator.move_next() {
        if enumerator.neighbour() == from {
            let seen_from_to =
                ContractedEdgeData::decode_from(enumerator.data(), enumerator.is_inverted());
            let mut data = seen_from_to;
            data.direction = data.direction.reversed();
            consider(data);
        }
    }

    best.unwrap_or_else(|| panic!("no edge between {} and {} to expand", from, to))
}
