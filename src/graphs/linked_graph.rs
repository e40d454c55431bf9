use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::{EdgeId, FormatError, GraphError, Vertex, NO_EDGE, NO_VERTEX};

const FORMAT_VERSION: u8 = 1;
const VERTEX_RECORD_SIZE: u32 = 1;

// Word offsets inside an edge record.
const VERTEX1: usize = 0;
const VERTEX2: usize = 1;
const NEXT1: usize = 2;
const NEXT2: usize = 3;
const EDGE_BASE_SIZE: usize = 4;

/// Array-backed adjacency structure holding vertices, edges and a fixed
/// number of payload words per edge.
///
/// Every edge is stored once as a flat record
/// `[vertex1, vertex2, next1, next2, data...]` and linked into the intrusive
/// edge lists of both endpoints, so it is enumerable from either side. An
/// occurrence seen from `vertex2` is "inverted": payload interpretation has
/// to flip its direction flag.
///
/// Removal tombstones a record (`vertex1 == NO_VERTEX`); [`LinkedGraph::compress`]
/// relocates live records over the gaps and reports the id moves to the
/// caller.
#[derive(Clone, Serialize, Deserialize)]
pub struct LinkedGraph {
    first_edge: Vec<EdgeId>,
    edges: Vec<u32>,
    edge_data_size: usize,
    edge_count: usize,
    multigraph: bool,
}

impl LinkedGraph {
    pub fn new(edge_data_size: usize, multigraph: bool) -> LinkedGraph {
        LinkedGraph {
            first_edge: Vec::new(),
            edges: Vec::new(),
            edge_data_size,
            edge_count: 0,
            multigraph,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.first_edge.len()
    }

    /// Number of live (non-tombstoned) edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn edge_data_size(&self) -> usize {
        self.edge_data_size
    }

    pub fn is_multigraph(&self) -> bool {
        self.multigraph
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> {
        0..self.first_edge.len() as Vertex
    }

    fn record_size(&self) -> usize {
        EDGE_BASE_SIZE + self.edge_data_size
    }

    /// Number of record slots, tombstones included.
    fn slot_count(&self) -> usize {
        self.edges.len() / self.record_size()
    }

    fn record(&self, edge: EdgeId) -> &[u32] {
        let start = edge as usize * self.record_size();
        &self.edges[start..start + self.record_size()]
    }

    fn word(&self, edge: EdgeId, offset: usize) -> u32 {
        self.edges[edge as usize * self.record_size() + offset]
    }

    fn set_word(&mut self, edge: EdgeId, offset: usize, value: u32) {
        let record_size = self.record_size();
        self.edges[edge as usize * record_size + offset] = value;
    }

    fn is_live(&self, edge: EdgeId) -> bool {
        (edge as usize) < self.slot_count() && self.word(edge, VERTEX1) != NO_VERTEX
    }

    fn check_vertex(&self, vertex: Vertex) -> Result<(), GraphError> {
        if (vertex as usize) < self.first_edge.len() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange(vertex))
        }
    }

    fn check_edge(&self, edge: EdgeId) -> Result<(), GraphError> {
        if self.is_live(edge) {
            Ok(())
        } else {
            Err(GraphError::EdgeOutOfRange(edge))
        }
    }

    /// The next edge in `vertex`'s list after `edge`.
    fn next_for(&self, edge: EdgeId, vertex: Vertex) -> EdgeId {
        if self.word(edge, VERTEX1) == vertex {
            self.word(edge, NEXT1)
        } else {
            self.word(edge, NEXT2)
        }
    }

    fn set_next_for(&mut self, edge: EdgeId, vertex: Vertex, next: EdgeId) {
        if self.word(edge, VERTEX1) == vertex {
            self.set_word(edge, NEXT1, next);
        } else {
            self.set_word(edge, NEXT2, next);
        }
    }

    /// Registers `vertex`, extending the vertex index array if needed.
    /// Idempotent for already registered ids.
    pub fn add_vertex(&mut self, vertex: Vertex) {
        if (vertex as usize) >= self.first_edge.len() {
            self.first_edge.resize(vertex as usize + 1, NO_EDGE);
        }
    }

    /// Appends a new edge record and links it into both endpoint lists.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex, data: &[u32]) -> Result<EdgeId, GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if data.len() != self.edge_data_size {
            return Err(GraphError::EdgeDataSizeMismatch {
                expected: self.edge_data_size,
                got: data.len(),
            });
        }
        if !self.multigraph {
            if from == to {
                return Err(GraphError::SelfLoop(from));
            }
            if self.has_edge_between(from, to)? {
                return Err(GraphError::DuplicateEdge(from, to));
            }
        }

        let edge = self.slot_count() as EdgeId;
        self.edges.push(from);
        self.edges.push(to);
        self.edges.push(self.first_edge[from as usize]);
        if from == to {
            // self loop: linked through next1 only
            self.edges.push(NO_EDGE);
        } else {
            self.edges.push(self.first_edge[to as usize]);
        }
        self.edges.extend_from_slice(data);

        self.first_edge[from as usize] = edge;
        if from != to {
            self.first_edge[to as usize] = edge;
        }
        self.edge_count += 1;

        Ok(edge)
    }

    /// Overwrites the payload words of a live edge.
    pub fn set_edge_data(&mut self, edge: EdgeId, data: &[u32]) -> Result<(), GraphError> {
        self.check_edge(edge)?;
        if data.len() != self.edge_data_size {
            return Err(GraphError::EdgeDataSizeMismatch {
                expected: self.edge_data_size,
                got: data.len(),
            });
        }
        let start = edge as usize * self.record_size() + EDGE_BASE_SIZE;
        self.edges[start..start + self.edge_data_size].copy_from_slice(data);
        Ok(())
    }

    pub fn edge_data(&self, edge: EdgeId) -> Result<&[u32], GraphError> {
        self.check_edge(edge)?;
        let start = edge as usize * self.record_size() + EDGE_BASE_SIZE;
        Ok(&self.edges[start..start + self.edge_data_size])
    }

    pub fn edge_endpoints(&self, edge: EdgeId) -> Result<(Vertex, Vertex), GraphError> {
        self.check_edge(edge)?;
        Ok((self.word(edge, VERTEX1), self.word(edge, VERTEX2)))
    }

    /// True if `from`'s edge list contains an edge to `to`. Before any
    /// contraction both occurrences exist, so containment is symmetric;
    /// a detached occurrence is only visible from the attached side.
    pub fn has_edge_between(&self, from: Vertex, to: Vertex) -> Result<bool, GraphError> {
        self.check_vertex(from)?;
        let mut current = self.first_edge[from as usize];
        while current != NO_EDGE {
            let (v1, v2) = (self.word(current, VERTEX1), self.word(current, VERTEX2));
            let neighbour = if v1 == from { v2 } else { v1 };
            if neighbour == to {
                return Ok(true);
            }
            current = self.next_for(current, from);
        }
        Ok(false)
    }

    /// Unlinks `edge` from `vertex`'s list. Returns false when the
    /// occurrence was already detached.
    fn unlink(&mut self, vertex: Vertex, edge: EdgeId) -> bool {
        let mut current = self.first_edge[vertex as usize];
        if current == edge {
            let after = self.next_for(edge, vertex);
            self.first_edge[vertex as usize] = after;
            self.set_next_for(edge, vertex, NO_EDGE);
            return true;
        }
        while current != NO_EDGE {
            let next = self.next_for(current, vertex);
            if next == edge {
                let after = self.next_for(edge, vertex);
                self.set_next_for(current, vertex, after);
                self.set_next_for(edge, vertex, NO_EDGE);
                return true;
            }
            current = next;
        }
        false
    }

    /// Unlinks one occurrence of `edge` from `vertex`'s list without
    /// removing the record; the edge stays reachable from its other
    /// endpoint. This is how contraction takes a vertex out of the active
    /// graph while keeping its edges addressable for path expansion.
    pub fn detach_edge(&mut self, vertex: Vertex, edge: EdgeId) -> Result<(), GraphError> {
        self.check_vertex(vertex)?;
        self.check_edge(edge)?;
        let (v1, v2) = (self.word(edge, VERTEX1), self.word(edge, VERTEX2));
        if v1 != vertex && v2 != vertex {
            return Err(GraphError::NoEdgeBetween(vertex, v1));
        }
        self.unlink(vertex, edge);
        Ok(())
    }

    /// Unlinks and tombstones a single edge.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<(), GraphError> {
        self.check_edge(edge)?;
        let (v1, v2) = (self.word(edge, VERTEX1), self.word(edge, VERTEX2));
        self.unlink(v1, edge);
        if v1 != v2 {
            self.unlink(v2, edge);
        }
        self.set_word(edge, VERTEX1, NO_VERTEX);
        self.set_word(edge, VERTEX2, NO_VERTEX);
        self.edge_count -= 1;
        Ok(())
    }

    /// Removes every edge in `vertex`'s list. Returns the count removed.
    pub fn remove_edges(&mut self, vertex: Vertex) -> Result<usize, GraphError> {
        self.check_vertex(vertex)?;
        let mut ids = Vec::new();
        let mut current = self.first_edge[vertex as usize];
        while current != NO_EDGE {
            ids.push(current);
            current = self.next_for(current, vertex);
        }
        for id in &ids {
            self.remove_edge(*id)?;
        }
        Ok(ids.len())
    }

    /// Removes every edge in `from`'s list leading to `to`. Returns the
    /// count removed.
    pub fn remove_edges_between(&mut self, from: Vertex, to: Vertex) -> Result<usize, GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        let mut ids = Vec::new();
        let mut current = self.first_edge[from as usize];
        while current != NO_EDGE {
            let (v1, v2) = (self.word(current, VERTEX1), self.word(current, VERTEX2));
            let neighbour = if v1 == from { v2 } else { v1 };
            if neighbour == to {
                ids.push(current);
            }
            current = self.next_for(current, from);
        }
        for id in &ids {
            self.remove_edge(*id)?;
        }
        Ok(ids.len())
    }

    /// A fresh, restartable cursor over the edges incident to a vertex.
    /// Enumerators share no state, so queries may hold one each.
    pub fn edge_enumerator(&self) -> EdgeEnumerator<'_> {
        EdgeEnumerator {
            graph: self,
            vertex: NO_VERTEX,
            current: NO_EDGE,
            next: NO_EDGE,
        }
    }

    /// Physically relocates live edge records over tombstoned gaps so
    /// storage holds exactly [`LinkedGraph::edge_count`] records. Every move
    /// is reported through `remap(old_id, new_id)` so callers can fix up
    /// external edge-id references. List structure, including detached
    /// occurrences, is preserved.
    pub fn compress<F: FnMut(EdgeId, EdgeId)>(&mut self, mut remap: F) {
        let record_size = self.record_size();
        let slots = self.slot_count();

        // old id -> new id, NO_EDGE for tombstones
        let mut id_map = vec![NO_EDGE; slots];
        let mut next_id: EdgeId = 0;
        for old in 0..slots {
            if self.edges[old * record_size + VERTEX1] != NO_VERTEX {
                id_map[old] = next_id;
                next_id += 1;
            }
        }

        for old in 0..slots {
            let new = id_map[old];
            if new == NO_EDGE {
                continue;
            }
            for offset in 0..record_size {
                let mut word = self.edges[old * record_size + offset];
                if (offset == NEXT1 || offset == NEXT2) && word != NO_EDGE {
                    word = id_map[word as usize];
                }
                self.edges[new as usize * record_size + offset] = word;
            }
            if new as usize != old {
                remap(old as EdgeId, new);
            }
        }

        for first in self.first_edge.iter_mut() {
            if *first != NO_EDGE {
                *first = id_map[*first as usize];
            }
        }

        self.edges.truncate(self.edge_count * record_size);
    }

    /// Shrinks the vertex array to the highest endpoint in use plus one.
    pub fn trim(&mut self) {
        let record_size = self.record_size();
        let mut highest = None;
        for slot in 0..self.slot_count() {
            let v1 = self.edges[slot * record_size + VERTEX1];
            if v1 == NO_VERTEX {
                continue;
            }
            let v2 = self.edges[slot * record_size + VERTEX2];
            let max = v1.max(v2);
            highest = Some(highest.map_or(max, |h: Vertex| h.max(max)));
        }
        let new_len = highest.map_or(0, |h| h as usize + 1);
        if new_len < self.first_edge.len() {
            self.first_edge.truncate(new_len);
        }
    }

    /// Writes the binary layout
    /// `[version:1][vertex_count:8][edge_count:8][vertex_record_size:4]
    /// [edge_record_size:4][vertex array][edge array]`, little-endian.
    /// Compacts first so the edge array is dense.
    pub fn serialize<W: Write>(&mut self, writer: &mut W) -> Result<(), FormatError> {
        self.compress(|_, _| {});

        writer.write_all(&[FORMAT_VERSION])?;
        writer.write_all(&(self.first_edge.len() as u64).to_le_bytes())?;
        writer.write_all(&(self.edge_count as u64).to_le_bytes())?;
        writer.write_all(&VERTEX_RECORD_SIZE.to_le_bytes())?;
        writer.write_all(&(self.record_size() as u32).to_le_bytes())?;
        for word in &self.first_edge {
            writer.write_all(&word.to_le_bytes())?;
        }
        for word in &self.edges {
            writer.write_all(&word.to_le_bytes())?;
        }
        Ok(())
    }

    /// Reads the layout written by [`LinkedGraph::serialize`]. The format
    /// carries no multigraph marker, so the caller states which kind of
    /// graph was persisted.
    pub fn deserialize<R: Read>(reader: &mut R, multigraph: bool) -> Result<LinkedGraph, FormatError> {
        let version = read_u8(reader)?;
        if version != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }
        let vertex_count = read_u64(reader)? as usize;
        let edge_count = read_u64(reader)? as usize;
        let vertex_record_size = read_u32(reader)?;
        if vertex_record_size != VERTEX_RECORD_SIZE {
            return Err(FormatError::InvalidRecordSize(vertex_record_size));
        }
        let edge_record_size = read_u32(reader)? as usize;
        if edge_record_size < EDGE_BASE_SIZE {
            return Err(FormatError::InvalidRecordSize(edge_record_size as u32));
        }

        let mut first_edge = Vec::with_capacity(vertex_count);
        for _ in 0..vertex_count {
            first_edge.push(read_u32(reader)?);
        }
        let mut edges = Vec::with_capacity(edge_count * edge_record_size);
        for _ in 0..edge_count * edge_record_size {
            edges.push(read_u32(reader)?);
        }

        Ok(LinkedGraph {
            first_edge,
            edges,
            edge_data_size: edge_record_size - EDGE_BASE_SIZE,
            edge_count,
            multigraph,
        })
    }
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8, FormatError> {
    let mut buffer = [0u8; 1];
    read_exact(reader, &mut buffer)?;
    Ok(buffer[0])
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, FormatError> {
    let mut buffer = [0u8; 4];
    read_exact(reader, &mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64, FormatError> {
    let mut buffer = [0u8; 8];
    read_exact(reader, &mut buffer)?;
    Ok(u64::from_le_bytes(buffer))
}

fn read_exact<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<(), FormatError> {
    reader.read_exact(buffer).map_err(|error| {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            FormatError::Truncated
        } else {
            FormatError::Io(error)
        }
    })
}

/// Lazy cursor over the edges incident to one vertex.
pub struct EdgeEnumerator<'a> {
    graph: &'a LinkedGraph,
    vertex: Vertex,
    current: EdgeId,
    next: EdgeId,
}

impl<'a> EdgeEnumerator<'a> {
    /// Restarts the cursor at `vertex`. An unregistered vertex yields an
    /// empty enumeration.
    pub fn move_to(&mut self, vertex: Vertex) {
        self.vertex = vertex;
        self.current = NO_EDGE;
        self.next = if (vertex as usize) < self.graph.first_edge.len() {
            self.graph.first_edge[vertex as usize]
        } else {
            NO_EDGE
        };
    }

    pub fn move_next(&mut self) -> bool {
        if self.next == NO_EDGE {
            self.current = NO_EDGE;
            return false;
        }
        self.current = self.next;
        self.next = self.graph.next_for(self.current, self.vertex);
        true
    }

    pub fn id(&self) -> EdgeId {
        self.current
    }

    /// The endpoint on the far side of the cursor's vertex.
    pub fn neighbour(&self) -> Vertex {
        let record = self.graph.record(self.current);
        if record[VERTEX1] == self.vertex {
            record[VERTEX2]
        } else {
            record[VERTEX1]
        }
    }

    /// True when the payload is stored from the other endpoint's
    /// perspective and direction decoding has to flip.
    pub fn is_inverted(&self) -> bool {
        self.graph.record(self.current)[VERTEX2] == self.vertex
            && self.graph.record(self.current)[VERTEX1] != self.vertex
    }

    pub fn data(&self) -> &[u32] {
        &self.graph.record(self.current)[EDGE_BASE_SIZE..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_graph(vertices: Vertex) -> LinkedGraph {
        let mut graph = LinkedGraph::new(1, false);
        graph.add_vertex(vertices - 1);
        graph
    }

    fn neighbours_of(graph: &LinkedGraph, vertex: Vertex) -> Vec<(Vertex, u32, bool)> {
        let mut enumerator = graph.edge_enumerator();
        enumerator.move_to(vertex);
        let mut result = Vec::new();
        while enumerator.move_next() {
            result.push((enumerator.neighbour(), enumerator.data()[0], enumerator.is_inverted()));
        }
        result.sort();
        result
    }

    #[test]
    fn add_vertex_is_idempotent() {
        let mut graph = LinkedGraph::new(1, false);
        graph.add_vertex(4);
        graph.add_vertex(2);
        graph.add_vertex(4);
        assert_eq!(graph.vertex_count(), 5);
    }

    #[test]
    fn edges_are_visible_from_both_endpoints() {
        let mut graph = simple_graph(3);
        graph.add_edge(0, 1, &[7]).unwrap();
        graph.add_edge(1, 2, &[9]).unwrap();

        assert_eq!(neighbours_of(&graph, 0), vec![(1, 7, false)]);
        assert_eq!(neighbours_of(&graph, 1), vec![(0, 7, true), (2, 9, false)]);
        assert_eq!(neighbours_of(&graph, 2), vec![(1, 9, true)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn reverse_lookup_holds_after_mutations() {
        let mut graph = simple_graph(6);
        let mut ids = Vec::new();
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (1, 4)] {
            ids.push(graph.add_edge(a, b, &[a + b]).unwrap());
        }
        graph.remove_edge(ids[1]).unwrap();
        graph.remove_edges_between(5, 0).unwrap();
        graph.compress(|_, _| {});

        for vertex in graph.vertices() {
            for (neighbour, data, _) in neighbours_of(&graph, vertex) {
                let back = neighbours_of(&graph, neighbour);
                assert!(
                    back.iter().any(|(v, d, _)| *v == vertex && *d == data),
                    "edge {}-{} not found from {}",
                    vertex,
                    neighbour,
                    neighbour
                );
            }
        }
    }

    #[test]
    fn contract_violations_are_rejected() {
        let mut graph = simple_graph(2);
        graph.add_edge(0, 1, &[1]).unwrap();

        assert_eq!(
            graph.add_edge(0, 5, &[1]),
            Err(GraphError::VertexOutOfRange(5))
        );
        assert_eq!(
            graph.add_edge(0, 1, &[1, 2]),
            Err(GraphError::EdgeDataSizeMismatch { expected: 1, got: 2 })
        );
        assert_eq!(graph.add_edge(0, 0, &[1]), Err(GraphError::SelfLoop(0)));
        assert_eq!(
            graph.add_edge(1, 0, &[2]),
            Err(GraphError::DuplicateEdge(1, 0))
        );
        assert_eq!(graph.remove_edges(9), Err(GraphError::VertexOutOfRange(9)));
    }

    #[test]
    fn multigraph_allows_parallel_edges() {
        let mut graph = LinkedGraph::new(1, true);
        graph.add_vertex(1);
        graph.add_edge(0, 1, &[1]).unwrap();
        graph.add_edge(0, 1, &[2]).unwrap();
        graph.add_edge(1, 0, &[3]).unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(neighbours_of(&graph, 0).len(), 3);
    }

    #[test]
    fn removing_the_list_head_relinks() {
        let mut graph = simple_graph(4);
        graph.add_edge(0, 1, &[1]).unwrap();
        graph.add_edge(0, 2, &[2]).unwrap();
        // head of 0's list is the most recently added edge
        let head = graph.add_edge(0, 3, &[3]).unwrap();
        graph.remove_edge(head).unwrap();

        assert_eq!(neighbours_of(&graph, 0), vec![(1, 1, false), (2, 2, false)]);
        assert_eq!(neighbours_of(&graph, 3), vec![]);
    }

    #[test]
    fn remove_edges_clears_a_vertex() {
        let mut graph = simple_graph(4);
        graph.add_edge(0, 1, &[1]).unwrap();
        graph.add_edge(1, 2, &[2]).unwrap();
        graph.add_edge(1, 3, &[3]).unwrap();

        assert_eq!(graph.remove_edges(1).unwrap(), 3);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(neighbours_of(&graph, 0), vec![]);
        assert_eq!(neighbours_of(&graph, 2), vec![]);
    }

    #[test]
    fn detach_hides_one_side_only() {
        let mut graph = simple_graph(2);
        let edge = graph.add_edge(0, 1, &[5]).unwrap();
        graph.detach_edge(0, edge).unwrap();

        assert!(!graph.has_edge_between(0, 1).unwrap());
        assert!(graph.has_edge_between(1, 0).unwrap());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn compress_reports_moves_and_preserves_lists() {
        let mut graph = simple_graph(4);
        let first = graph.add_edge(0, 1, &[1]).unwrap();
        graph.add_edge(1, 2, &[2]).unwrap();
        let third = graph.add_edge(2, 3, &[3]).unwrap();
        let detached = graph.add_edge(0, 3, &[4]).unwrap();
        graph.detach_edge(0, detached).unwrap();
        graph.remove_edge(first).unwrap();

        let mut moves = Vec::new();
        graph.compress(|old, new| moves.push((old, new)));

        assert!(moves.contains(&(third, third - 1)));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(neighbours_of(&graph, 1), vec![(2, 2, false)]);
        assert_eq!(neighbours_of(&graph, 2), vec![(1, 2, true), (3, 3, false)]);
        // the detached occurrence stays detached
        assert!(!graph.has_edge_between(0, 3).unwrap());
        assert!(graph.has_edge_between(3, 0).unwrap());
    }

    #[test]
    fn trim_shrinks_to_highest_used_vertex() {
        let mut graph = simple_graph(10);
        graph.add_edge(0, 3, &[1]).unwrap();
        graph.trim();
        assert_eq!(graph.vertex_count(), 4);

        graph.remove_edges(0).unwrap();
        graph.trim();
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn serialization_round_trips_after_compaction() {
        let mut graph = simple_graph(5);
        let first = graph.add_edge(0, 1, &[10]).unwrap();
        graph.add_edge(1, 2, &[11]).unwrap();
        graph.add_edge(2, 3, &[12]).unwrap();
        graph.add_edge(3, 4, &[13]).unwrap();
        graph.remove_edge(first).unwrap();

        let mut buffer = Vec::new();
        LinkedGraph::serialize(&mut graph, &mut buffer).unwrap();
        let restored = LinkedGraph::deserialize(&mut buffer.as_slice(), false).unwrap();

        assert_eq!(restored.vertex_count(), graph.vertex_count());
        assert_eq!(restored.edge_count(), graph.edge_count());
        for vertex in graph.vertices() {
            assert_eq!(neighbours_of(&restored, vertex), neighbours_of(&graph, vertex));
        }
    }

    #[test]
    fn unknown_version_is_fatal() {
        let mut graph = simple_graph(2);
        graph.add_edge(0, 1, &[1]).unwrap();
        let mut buffer = Vec::new();
        LinkedGraph::serialize(&mut graph, &mut buffer).unwrap();
        buffer[0] = 99;

        assert!(matches!(
            LinkedGraph::deserialize(&mut buffer.as_slice(), false),
            Err(FormatError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn truncated_stream_is_fatal() {
        let mut graph = simple_graph(2);
        graph.add_edge(0, 1, &[1]).unwrap();
        let mut buffer = Vec::new();
        LinkedGraph::serialize(&mut graph, &mut buffer).unwrap();
        buffer.truncate(buffer.len() - 3);

        assert!(matches!(
            LinkedGraph::deserialize(&mut buffer.as_slice(), false),
            Err(FormatError::Truncated)
        ));
    }
}
