use super::Factor;
use crate::graphs::{
    edge_data::{ContractedEdgeData, NetworkEdgeData, CONTRACTED_EDGE_SIZE},
    linked_graph::LinkedGraph,
    NO_VERTEX,
};

/// Converts a raw routing network into the weighted multigraph the
/// hierarchy builder contracts.
///
/// `get_factor` resolves an edge-profile id to a speed factor and travel
/// permission; it is called exactly once per edge, here — preprocessing
/// and queries afterwards only read the weights carried in the payload.
/// Edges whose factor is non-positive are not traversable by this profile
/// and are dropped.
pub fn build_search_graph<F>(network: &LinkedGraph, get_factor: F) -> LinkedGraph
where
    F: Fn(u16) -> Factor,
{
    let mut search_graph = LinkedGraph::new(CONTRACTED_EDGE_SIZE, true);
    if network.vertex_count() > 0 {
        search_graph.add_vertex(network.vertex_count() as u32 - 1);
    }

    let mut enumerator = network.edge_enumerator();
    for vertex in network.vertices() {
        enumerator.move_to(vertex);
        while enumerator.move_next() {
            // each record is seen from both endpoints; convert it once
            if enumerator.is_inverted() {
                continue;
            }
            let data = NetworkEdgeData::decode(enumerator.data());
            let factor = get_factor(data.profile);
            if factor.value <= 0.0 {
                continue;
            }

            let payload = ContractedEdgeData::new(
                data.distance * factor.value,
                factor.to_direction(),
                NO_VERTEX,
            )
            .encode();
            search_graph
                .add_edge(vertex, enumerator.neighbour(), &payload)
                .expect("network endpoints are registered in the search graph");
        }
    }

    search_graph
}
