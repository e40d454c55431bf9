use super::witness_calculator::WitnessCalculator;
use super::ContractionObserver;
use crate::graphs::{
    edge_data::ContractedEdgeData, linked_graph::LinkedGraph, Direction, EdgeId, Vertex, Weight,
};

/// Snapshot of an edge incident to a vertex being contracted, decoded from
/// that vertex's perspective.
#[derive(Clone, Copy, Debug)]
pub struct IncidentEdge {
    pub edge: EdgeId,
    pub neighbour: Vertex,
    pub weight: Weight,
    pub direction: Direction,
}

pub fn incident_edges(graph: &LinkedGraph, vertex: Vertex) -> Vec<IncidentEdge> {
    let mut edges = Vec::new();
    let mut enumerator = graph.edge_enumerator();
    enumerator.move_to(vertex);
    while enumerator.move_next() {
        let data = ContractedEdgeData::decode_from(enumerator.data(), enumerator.is_inverted());
        edges.push(IncidentEdge {
            edge: enumerator.id(),
            neighbour: enumerator.neighbour(),
            weight: data.weight,
            direction: data.direction,
        });
    }
    edges
}

/// A shortcut that contracting `via` requires. Direction is stated from
/// `from`'s perspective.
#[derive(Clone, Copy, Debug)]
pub struct Shortcut {
    pub from: Vertex,
    pub to: Vertex,
    pub weight: Weight,
    pub direction: Direction,
    pub via: Vertex,
}

/// Simulates contracting `vertex` without mutating the graph: for every
/// ordered pair of distinct neighbours whose two legs are traversable, a
/// witness search decides whether the two-hop path is the only shortest
/// connector. Returns the shortcuts that survive.
///
/// Used both by the priority calculator (counting) and by the actual
/// contraction (insertion).
pub fn candidate_shortcuts(
    graph: &LinkedGraph,
    witness: &mut WitnessCalculator,
    vertex: Vertex,
) -> Vec<Shortcut> {
    let edges = incident_edges(graph, vertex);
    let mut shortcuts = Vec::new();

    let mut pairs: Vec<(Vertex, bool, bool)> = Vec::new();
    let mut targets: Vec<Vertex> = Vec::new();
    let mut limits: Vec<Weight> = Vec::new();

    for first in 1..edges.len() {
        let edge1 = edges[first];

        pairs.clear();
        targets.clear();
        limits.clear();
        for edge2 in edges.iter().take(first) {
            if edge2.neighbour == edge1.neighbour {
                continue;
            }
            // edge directions are from the contracted vertex's perspective:
            // travel into the vertex is the backward sense of its edge
            let forward_possible =
                edge1.direction.allows_backward() && edge2.direction.allows_forward();
            let backward_possible =
                edge2.direction.allows_backward() && edge1.direction.allows_forward();
            if !forward_possible && !backward_possible {
                continue;
            }
            pairs.push((edge2.neighbour, forward_possible, backward_possible));
            targets.push(edge2.neighbour);
            limits.push(edge1.weight + edge2.weight);
        }
        if pairs.is_empty() {
            continue;
        }

        let mut forward_found = vec![false; pairs.len()];
        let mut backward_found = vec![false; pairs.len()];
        witness.calculate(
            graph,
            edge1.neighbour,
            &targets,
            &limits,
            vertex,
            &mut forward_found,
            &mut backward_found,
        );

        for (index, &(to, forward_possible, backward_possible)) in pairs.iter().enumerate() {
            let needs_forward = forward_possible && !forward_found[index];
            let needs_backward = backward_possible && !backward_found[index];
            let direction = match (needs_forward, needs_backward) {
                (true, true) => Direction::Both,
                (true, false) => Direction::Forward,
                (false, true) => Direction::Backward,
                (false, false) => continue,
            };
            shortcuts.push(Shortcut {
                from: edge1.neighbour,
                to,
                weight: limits[index],
                direction,
                via: vertex,
            });
        }
    }

    shortcuts
}

/// Contracts one vertex in place: fires the before hook, inserts the
/// surviving shortcuts, detaches the vertex from every neighbour's edge
/// list and fires the after hook. The vertex keeps its own occurrences,
/// which queries and path expansion later traverse as the upward part of
/// the hierarchy.
///
/// Returns the snapshot of the edges that were incident when contraction
/// started.
pub fn contract_vertex(
    graph: &mut LinkedGraph,
    witness: &mut WitnessCalculator,
    vertex: Vertex,
    mut observer: Option<&mut (dyn ContractionObserver + '_)>,
) -> Vec<IncidentEdge> {
    let edges = incident_edges(graph, vertex);

    if let Some(observer) = observer.as_deref_mut() {
        observer.on_before_contraction(vertex, &edges);
    }

    let shortcuts = candidate_shortcuts(graph, witness, vertex);
    for shortcut in &shortcuts {
        add_or_update_shortcut(graph, shortcut);
    }

    for edge in &edges {
        graph
            .detach_edge(edge.neighbour, edge.edge)
            .expect("incident edge vanished during contraction");
    }

    if let Some(observer) = observer.as_deref_mut() {
        observer.on_after_contraction(vertex, &edges);
    }

    edges
}

/// Inserts a shortcut, merging with whatever already connects the pair:
/// a same-sense duplicate keeps the minimum weight; senses whose best
/// weight or via differ stay separate directed edges rather than being
/// merged into one bidirectional edge incorrectly.
pub fn add_or_update_shortcut(graph: &mut LinkedGraph, shortcut: &Shortcut) {
    let mut existing: Vec<EdgeId> = Vec::new();
    // best (weight, via) per travel sense, from `from`'s perspective
    let mut forward: Option<(Weight, Vertex)> = None;
    let mut backward: Option<(Weight, Vertex)> = None;

    let mut enumerator = graph.edge_enumerator();
    enumerator.move_to(shortcut.from);
    while enumerator.move_next() {
        if enumerator.neighbour() != shortcut.to {
            continue;
        }
        let data = ContractedEdgeData::decode_from(enumerator.data(), enumerator.is_inverted());
        if data.direction.allows_forward()
            && forward.map_or(true, |(weight, _)| data.weight < weight)
        {
            forward = Some((data.weight, data.contracted_id));
        }
        if data.direction.allows_backward()
            && backward.map_or(true, |(weight, _)| data.weight < weight)
        {
            backward = Some((data.weight, data.contracted_id));
        }
        existing.push(enumerator.id());
    }

    let before = (forward, backward);
    if shortcut.direction.allows_forward()
        && forward.map_or(true, |(weight, _)| shortcut.weight < weight)
    {
        forward = Some((shortcut.weight, shortcut.via));
    }
    if shortcut.direction.allows_backward()
        && backward.map_or(true, |(weight, _)| shortcut.weight < weight)
    {
        backward = Some((shortcut.weight, shortcut.via));
    }
    if (forward, backward) == before {
        return;
    }

    for edge in existing {
        graph
            .remove_edge(edge)
            .expect("existing edge disappeared while merging a shortcut");
    }

    match (forward, backward) {
        (Some((forward_weight, forward_via)), Some((backward_weight, backward_via)))
            if forward_weight == backward_weight && forward_via == backward_via =>
        {
            let data =
                ContractedEdgeData::new(forward_weight, Direction::Both, forward_via).encode();
            graph
                .add_edge(shortcut.from, shortcut.to, &data)
                .expect("shortcut endpoints are registered");
        }
        (forward, backward) => {
            if let Some((weight, via)) = forward {
                let data = ContractedEdgeData::new(weight, Direction::Forward, via).encode();
                graph
                    .add_edge(shortcut.from, shortcut.to, &data)
                    .expect("shortcut endpoints are registered");
            }
            if let Some((weight, via)) = backward {
                let data = ContractedEdgeData::new(weight, Direction::Backward, via).encode();
                graph
                    .add_edge(shortcut.from, shortcut.to, &data)
                    .expect("shortcut endpoints are registered");
            }
        }
    }
}
