use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use crate::graphs::{
    edge_data::ContractedEdgeData, linked_graph::LinkedGraph, Vertex, Weight, INFINITE_WEIGHT,
};

/// Default cap on settled vertices per witness search.
pub const DEFAULT_MAX_SETTLED: usize = 1 << 16;

#[derive(Copy, Clone, PartialEq)]
struct WitnessEntry {
    key: Weight,
    vertex: Vertex,
    forward: Weight,
    backward: Weight,
}

impl Eq for WitnessEntry {}

// Min-heap ordering on the smaller of the two sense weights.
impl Ord for WitnessEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for WitnessEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded local Dijkstra deciding whether candidate shortcuts are
/// redundant.
///
/// One search answers both travel senses at once: every queue entry carries
/// a forward and a backward tentative weight, relaxed independently along
/// edges permitting the respective sense, so settling a target can record a
/// forward witness, a backward witness, or both in the same pass.
///
/// The settled-vertex cap bounds preprocessing time per contraction.
/// Targets unresolved when the cap is hit count as "no witness", so the
/// shortcut is kept — conservative, never incorrect.
pub struct WitnessCalculator {
    max_settled: usize,
}

impl WitnessCalculator {
    pub fn new(max_settled: usize) -> WitnessCalculator {
        WitnessCalculator { max_settled }
    }

    pub fn max_settled(&self) -> usize {
        self.max_settled
    }

    /// Searches from `source`, never expanding `skip`, and flags each
    /// target for which a path of weight <= its limit exists. `forward_found[i]`
    /// reports a `source -> targets[i]` path, `backward_found[i]` a
    /// `targets[i] -> source` path.
    #[allow(clippy::too_many_arguments)]
    pub fn calculate(
        &mut self,
        graph: &LinkedGraph,
        source: Vertex,
        targets: &[Vertex],
        limits: &[Weight],
        skip: Vertex,
        forward_found: &mut [bool],
        backward_found: &mut [bool],
    ) {
        debug_assert_eq!(targets.len(), limits.len());
        forward_found.fill(false);
        backward_found.fill(false);

        let max_limit = limits.iter().cloned().fold(0.0, Weight::max);
        let mut remaining = targets.len();

        let mut settled: AHashSet<Vertex> = AHashSet::new();
        // entrywise-best pair seen per vertex, used only to prune the queue
        let mut seen: AHashMap<Vertex, (Weight, Weight)> = AHashMap::new();
        let mut queue: BinaryHeap<WitnessEntry> = BinaryHeap::new();
        queue.push(WitnessEntry {
            key: 0.0,
            vertex: source,
            forward: 0.0,
            backward: 0.0,
        });

        let mut enumerator = graph.edge_enumerator();
        while let Some(entry) = queue.pop() {
            if entry.key > max_limit {
                break;
            }
            if !settled.insert(entry.vertex) {
                continue;
            }
            if settled.len() > self.max_settled {
                break;
            }

            for (index, &target) in targets.iter().enumerate() {
                if target != entry.vertex {
                    continue;
                }
                if entry.forward <= limits[index] {
                    forward_found[index] = true;
                }
                if entry.backward <= limits[index] {
                    backward_found[index] = true;
                }
                remaining -= 1;
            }
            if remaining == 0 {
                break;
            }

            enumerator.move_to(entry.vertex);
            while enumerator.move_next() {
                let neighbour = enumerator.neighbour();
                if neighbour == skip || settled.contains(&neighbour) {
                    continue;
                }
                let edge =
                    ContractedEdgeData::decode_from(enumerator.data(), enumerator.is_inverted());

                let forward = if entry.forward != INFINITE_WEIGHT
                    && edge.direction.allows_forward()
                {
                    entry.forward + edge.weight
                } else {
                    INFINITE_WEIGHT
                };
                let backward = if entry.backward != INFINITE_WEIGHT
                    && edge.direction.allows_backward()
                {
                    entry.backward + edge.weight
                } else {
                    INFINITE_WEIGHT
                };
                if forward == INFINITE_WEIGHT && backward == INFINITE_WEIGHT {
                    continue;
                }

                let best = seen
                    .entry(neighbour)
                    .or_insert((INFINITE_WEIGHT, INFINITE_WEIGHT));
                if forward >= best.0 && backward >= best.1 {
                    continue;
                }
                best.0 = best.0.min(forward);
                best.1 = best.1.min(backward);

                let key = forward.min(backward);
                if key > max_limit {
                    continue;
                }
                queue.push(WitnessEntry {
                    key,
                    vertex: neighbour,
                    forward,
                    backward,
                });
            }
        }
    }
}
