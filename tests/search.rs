use rand::{rngs::StdRng, Rng, SeedableRng};
use routekit::ch::graph_builder::build_search_graph;
use routekit::ch::hierarchy_builder::HierarchyBuilder;
use routekit::ch::{ContractedGraph, Factor};
use routekit::graphs::edge_data::{
    ContractedEdgeData, NetworkEdgeData, CONTRACTED_EDGE_SIZE, NETWORK_EDGE_SIZE,
};
use routekit::graphs::linked_graph::LinkedGraph;
use routekit::graphs::{Direction, INFINITE_WEIGHT, NO_VERTEX};
use routekit::search::collections::dijkstra_data::{DijkstraData, DijkstraDataHashMap};
use routekit::search::collections::vertex_distance_queue::VertexDistanceQueueBinaryHeap;
use routekit::search::collections::vertex_expanded_data::VertexExpandedDataHashSet;
use routekit::search::dijkstra::{dijkstra_one_to_many, dijkstra_one_to_one_wrapped};
use routekit::search::{bidirectional_dijkstra, many_to_many, Seed};

fn search_graph(vertex_count: u32, edges: &[(u32, u32, f32, Direction)]) -> LinkedGraph {
    let mut graph = LinkedGraph::new(CONTRACTED_EDGE_SIZE, true);
    if vertex_count > 0 {
        graph.add_vertex(vertex_count - 1);
    }
    for &(from, to, weight, direction) in edges {
        let data = ContractedEdgeData::new(weight, direction, NO_VERTEX).encode();
        graph.add_edge(from, to, &data).unwrap();
    }
    graph
}

fn contracted_random_graph(seed: u64, vertex_count: u32, edge_count: usize) -> ContractedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = LinkedGraph::new(CONTRACTED_EDGE_SIZE, true);
    graph.add_vertex(vertex_count - 1);
    let mut added = 0;
    while added < edge_count {
        let from = rng.gen_range(0..vertex_count);
        let to = rng.gen_range(0..vertex_count);
        if from == to {
            continue;
        }
        let weight = rng.gen_range(1..=100) as f32;
        let direction = match rng.gen_range(0..3) {
            0 => Direction::Both,
            1 => Direction::Forward,
            _ => Direction::Backward,
        };
        let data = ContractedEdgeData::new(weight, direction, NO_VERTEX).encode();
        graph.add_edge(from, to, &data).unwrap();
        added += 1;
    }

    let order = HierarchyBuilder::new(&mut graph).run();
    ContractedGraph::new(graph, order)
}

#[test]
fn many_to_many_matches_point_to_point() {
    let contracted = contracted_random_graph(13, 35, 110);

    let source_vertices: Vec<u32> = (0..12).collect();
    let target_vertices: Vec<u32> = (6..20).collect();
    let sources: Vec<Vec<Seed>> = source_vertices
        .iter()
        .map(|&vertex| vec![Seed::new(vertex)])
        .collect();
    let targets: Vec<Vec<Seed>> = target_vertices
        .iter()
        .map(|&vertex| vec![Seed::new(vertex)])
        .collect();

    let matrix = contracted.weight_matrix(&sources, &targets);

    for (row, &source) in source_vertices.iter().enumerate() {
        for (column, &target) in target_vertices.iter().enumerate() {
            let expected = contracted
                .shortest_path_weight(source, target)
                .unwrap_or(INFINITE_WEIGHT);
            assert_eq!(
                matrix[row][column], expected,
                "cell {} -> {}",
                source, target
            );
        }
    }
}

#[test]
fn one_way_edges_make_the_matrix_asymmetric() {
    // 0 -> 1 forward-only, 1 -> 2 only through the backward edge (2, 1)
    let mut graph = search_graph(
        3,
        &[
            (0, 1, 100.0, Direction::Forward),
            (2, 1, 100.0, Direction::Backward),
        ],
    );
    let order = HierarchyBuilder::new(&mut graph).run();
    let contracted = ContractedGraph::new(graph, order);

    let seeds: Vec<Vec<Seed>> = (0..3).map(|vertex| vec![Seed::new(vertex)]).collect();
    let matrix = contracted.weight_matrix(&seeds, &seeds);

    assert_eq!(matrix[0][1], 100.0);
    assert_eq!(matrix[1][0], INFINITE_WEIGHT);
    assert_eq!(matrix[1][2], 100.0);
    assert_eq!(matrix[2][1], INFINITE_WEIGHT);
    assert_eq!(matrix[0][2], 200.0);
    assert_eq!(matrix[2][0], INFINITE_WEIGHT);
    for vertex in 0..3 {
        assert_eq!(matrix[vertex][vertex], 0.0);
    }
}

#[test]
fn unreachable_pairs_are_reported_not_raised() {
    // two components
    let mut graph = search_graph(
        4,
        &[(0, 1, 1.0, Direction::Both), (2, 3, 1.0, Direction::Both)],
    );
    let order = HierarchyBuilder::new(&mut graph).run();
    let contracted = ContractedGraph::new(graph, order);

    assert_eq!(contracted.shortest_path_weight(0, 3), None);
    assert!(contracted.shortest_path(0, 3).is_none());

    let sources = vec![vec![Seed::new(0)]];
    let targets = vec![vec![Seed::new(3)]];
    assert_eq!(
        contracted.weight_matrix(&sources, &targets),
        vec![vec![INFINITE_WEIGHT]]
    );
}

#[test]
fn source_equals_target() {
    let mut graph = search_graph(2, &[(0, 1, 5.0, Direction::Both)]);
    let order = HierarchyBuilder::new(&mut graph).run();
    let contracted = ContractedGraph::new(graph, order);

    assert_eq!(contracted.shortest_path_weight(1, 1), Some(0.0));
    let path = contracted.shortest_path(1, 1).unwrap();
    assert_eq!(path.vertices, vec![1]);
    assert_eq!(path.weight, 0.0);
}

#[test]
fn multi_origin_seeds_carry_initial_weights() {
    let graph = search_graph(
        3,
        &[(0, 1, 10.0, Direction::Both), (1, 2, 10.0, Direction::Both)],
    );

    // a query point snapped onto edge (0, 1): 3 from vertex 0, 7 from
    // vertex 1
    let sources = [Seed::with_weight(0, 3.0), Seed::with_weight(1, 7.0)];
    let targets = [Seed::new(2)];
    let (_meeting, weight) =
        bidirectional_dijkstra::calculate(&graph, &sources, &targets).unwrap();
    assert_eq!(weight, 17.0);

    let matrix = many_to_many::calculate(&graph, &[sources.to_vec()], &[targets.to_vec()]);
    assert_eq!(matrix, vec![vec![17.0]]);
}

#[test]
fn bidirectional_respects_one_way_edges() {
    let graph = search_graph(2, &[(0, 1, 4.0, Direction::Forward)]);

    let forward =
        bidirectional_dijkstra::calculate(&graph, &[Seed::new(0)], &[Seed::new(1)]);
    assert_eq!(forward.map(|(_meeting, weight)| weight), Some(4.0));

    let reverse =
        bidirectional_dijkstra::calculate(&graph, &[Seed::new(1)], &[Seed::new(0)]);
    assert_eq!(reverse, None);
}

#[test]
fn one_to_many_settles_every_target() {
    let graph = search_graph(
        5,
        &[
            (0, 1, 1.0, Direction::Both),
            (1, 2, 2.0, Direction::Both),
            (2, 3, 3.0, Direction::Both),
            (3, 4, 4.0, Direction::Both),
        ],
    );

    let mut data = DijkstraDataHashMap::new();
    let mut expanded = VertexExpandedDataHashSet::new();
    let mut queue = VertexDistanceQueueBinaryHeap::new();
    dijkstra_one_to_many(&graph, &mut data, &mut expanded, &mut queue, 0, &[2, 3]);

    assert_eq!(data.get_weight(2), 3.0);
    assert_eq!(data.get_weight(3), 6.0);
    let path = data.get_path(3).unwrap();
    assert_eq!(path.vertices, vec![0, 1, 2, 3]);

    assert_eq!(dijkstra_one_to_one_wrapped(&graph, 0, 4), Some(10.0));
}

#[test]
fn factor_callback_builds_the_search_graph() {
    let mut network = LinkedGraph::new(NETWORK_EDGE_SIZE, false);
    network.add_vertex(2);
    network
        .add_edge(0, 1, &NetworkEdgeData::new(100.0, 0).encode())
        .unwrap();
    network
        .add_edge(1, 2, &NetworkEdgeData::new(50.0, 1).encode())
        .unwrap();
    network
        .add_edge(0, 2, &NetworkEdgeData::new(1000.0, 2).encode())
        .unwrap();

    let mut graph = build_search_graph(&network, |profile| match profile {
        0 => Factor {
            value: 1.0,
            direction: Factor::DIRECTION_BOTH,
        },
        1 => Factor {
            value: 2.0,
            direction: Factor::DIRECTION_FORWARD,
        },
        // profile 2 is not traversable by this vehicle
        _ => Factor {
            value: 0.0,
            direction: Factor::DIRECTION_BOTH,
        },
    });
    assert_eq!(graph.edge_count(), 2);

    let order = HierarchyBuilder::new(&mut graph).run();
    let contracted = ContractedGraph::new(graph, order);
    assert_eq!(contracted.shortest_path_weight(0, 2), Some(200.0));
    assert_eq!(contracted.shortest_path_weight(2, 0), None);
}

#[test]
fn contracted_graph_round_trips_through_bincode() {
    let contracted = contracted_random_graph(99, 25, 70);

    let mut bytes = Vec::new();
    contracted.write_to(&mut bytes).unwrap();
    let restored = ContractedGraph::read_from(bytes.as_slice()).unwrap();

    assert_eq!(
        restored.contraction_order(),
        contracted.contraction_order()
    );
    for source in 0..25 {
        for target in [0, 9, 17, 24] {
            assert_eq!(
                restored.shortest_path_weight(source, target),
                contracted.shortest_path_weight(source, target)
            );
        }
    }
}
