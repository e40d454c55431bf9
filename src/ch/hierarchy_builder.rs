use std::cmp::Ordering;
use std::collections::BinaryHeap;

use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use super::contraction::contract_vertex;
use super::edge_difference::EdgeDifferencePriority;
use super::witness_calculator::{WitnessCalculator, DEFAULT_MAX_SETTLED};
use super::ContractionObserver;
use crate::graphs::{linked_graph::LinkedGraph, Vertex};
use crate::utility::get_progressbar;

#[derive(Copy, Clone, PartialEq)]
struct CandidateVertex {
    priority: f32,
    vertex: Vertex,
}

impl Eq for CandidateVertex {}

// Flip the ordering so the binary heap pops the lowest priority first.
impl Ord for CandidateVertex {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for CandidateVertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Drives contraction-hierarchy preprocessing: repeatedly contracts the
/// lowest-priority vertex until none is left, inserting witness-filtered
/// shortcuts and detaching the contracted vertex from the active graph.
///
/// The builder mutates the graph in place; afterwards every vertex's edge
/// list leads only to vertices contracted later, which is exactly what the
/// query algorithms traverse.
pub struct HierarchyBuilder<'a> {
    graph: &'a mut LinkedGraph,
    priority: EdgeDifferencePriority,
    witness: WitnessCalculator,
    observer: Option<&'a mut dyn ContractionObserver>,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(graph: &'a mut LinkedGraph) -> HierarchyBuilder<'a> {
        HierarchyBuilder {
            graph,
            priority: EdgeDifferencePriority::new(),
            witness: WitnessCalculator::new(DEFAULT_MAX_SETTLED),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn ContractionObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_priority(mut self, priority: EdgeDifferencePriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_witness_limit(mut self, max_settled: usize) -> Self {
        self.witness = WitnessCalculator::new(max_settled);
        self
    }

    /// Contracts every vertex. Returns the contraction order.
    pub fn run(mut self) -> Vec<Vertex> {
        let vertex_count = self.graph.vertex_count();

        info!("Initializing contraction queue");
        let progress = get_progressbar("Calculating priorities", vertex_count as u64);
        let graph = &*self.graph;
        let priority = &self.priority;
        let max_settled = self.witness.max_settled();
        let mut queue: BinaryHeap<CandidateVertex> = (0..vertex_count as Vertex)
            .into_par_iter()
            .progress_with(progress)
            .map(|vertex| {
                let mut witness = WitnessCalculator::new(max_settled);
                CandidateVertex {
                    priority: priority.priority(graph, &mut witness, vertex),
                    vertex,
                }
            })
            .collect();

        let mut order = Vec::with_capacity(vertex_count);
        let mut contracted = vec![false; vertex_count];

        info!("Start contracting");
        let progress = get_progressbar("Contracting", vertex_count as u64);
        while let Some(candidate) = queue.pop() {
            let vertex = candidate.vertex;
            if contracted[vertex as usize] {
                continue;
            }

            // lazy update: never contract on a stale priority
            let current = self.priority.priority(self.graph, &mut self.witness, vertex);
            if let Some(next) = queue.peek() {
                if current > next.priority {
                    queue.push(CandidateVertex {
                        priority: current,
                        vertex,
                    });
                    continue;
                }
            }

            let neighbours = self.contract(vertex);
            contracted[vertex as usize] = true;
            order.push(vertex);
            progress.inc(1);

            self.priority.notify_contracted(vertex, &neighbours);
            for &neighbour in &neighbours {
                if !contracted[neighbour as usize] {
                    let priority = self
                        .priority
                        .priority(self.graph, &mut self.witness, neighbour);
                    queue.push(CandidateVertex {
                        priority,
                        vertex: neighbour,
                    });
                }
            }
        }
        progress.finish_and_clear();
        info!("Finished contracting, {} vertices", order.len());

        order
    }

    /// Contracts one vertex and returns its distinct former neighbours.
    fn contract(&mut self, vertex: Vertex) -> Vec<Vertex> {
        let edges = contract_vertex(
            self.graph,
            &mut self.witness,
            vertex,
            self.observer.as_deref_mut(),
        );

        edges
            .iter()
            .map(|edge| edge.neighbour)
            .sorted_unstable()
            .dedup()
            .collect_vec()
    }
}
