use super::{Direction, Vertex, Weight, NO_VERTEX};

/// Number of payload words of an edge in a weighted search graph.
pub const CONTRACTED_EDGE_SIZE: usize = 2;

/// Number of payload words of an edge in a raw routing network.
pub const NETWORK_EDGE_SIZE: usize = 2;

/// Largest vertex id that fits the 30-bit contracted-id field.
pub const MAX_CONTRACTED_ID: Vertex = CONTRACTED_ID_MASK - 1;

const CONTRACTED_ID_MASK: u32 = (1 << 30) - 1;
const DIRECTION_SHIFT: u32 = 30;

/// Decoded payload of a search-graph edge.
///
/// Packed into two words:
/// word 0 holds the IEEE-754 bits of the (non-negative) weight, word 1 holds
/// the direction in bits 31..30 and the contracted id in bits 29..0. The
/// all-ones id pattern stands for [`NO_VERTEX`], i.e. an original edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContractedEdgeData {
    pub weight: Weight,
    pub direction: Direction,
    pub contracted_id: Vertex,
}

impl ContractedEdgeData {
    pub fn new(weight: Weight, direction: Direction, contracted_id: Vertex) -> ContractedEdgeData {
        ContractedEdgeData {
            weight,
            direction,
            contracted_id,
        }
    }

    /// True if this edge stands in for a two-hop path through
    /// `contracted_id`.
    pub fn is_shortcut(&self) -> bool {
        self.contracted_id != NO_VERTEX
    }

    pub fn encode(&self) -> [u32; CONTRACTED_EDGE_SIZE] {
        assert!(
            self.contracted_id == NO_VERTEX || self.contracted_id <= MAX_CONTRACTED_ID,
            "contracted id {} exceeds the 30 bit id field",
            self.contracted_id
        );
        assert!(
            self.weight >= 0.0,
            "edge weight {} must be non-negative",
            self.weight
        );

        let id_bits = if self.contracted_id == NO_VERTEX {
            CONTRACTED_ID_MASK
        } else {
            self.contracted_id
        };

        let direction_bits = match self.direction {
            Direction::Both => 0,
            Direction::Forward => 1,
            Direction::Backward => 2,
        };

        [
            self.weight.to_bits(),
            (direction_bits << DIRECTION_SHIFT) | id_bits,
        ]
    }

    /// Exact inverse of [`ContractedEdgeData::encode`].
    pub fn decode(words: &[u32]) -> ContractedEdgeData {
        let id_bits = words[1] & CONTRACTED_ID_MASK;

        ContractedEdgeData {
            weight: Weight::from_bits(words[0]),
            direction: match words[1] >> DIRECTION_SHIFT {
                0 => Direction::Both,
                1 => Direction::Forward,
                _ => Direction::Backward,
            },
            contracted_id: if id_bits == CONTRACTED_ID_MASK {
                NO_VERTEX
            } else {
                id_bits
            },
        }
    }

    /// Decodes an edge occurrence as seen from one of its endpoints. An
    /// inverted occurrence flips the direction; weight and contracted id
    /// carry no orientation.
    pub fn decode_from(words: &[u32], inverted: bool) -> ContractedEdgeData {
        let mut data = ContractedEdgeData::decode(words);
        if inverted {
            data.direction = data.direction.reversed();
        }
        data
    }
}

/// Decoded payload of a raw routing-network edge: the physical length and
/// the profile id resolved through the factor callback when the search
/// graph is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkEdgeData {
    pub distance: f32,
    pub profile: u16,
}

impl NetworkEdgeData {
    pub fn new(distance: f32, profile: u16) -> NetworkEdgeData {
        NetworkEdgeData { distance, profile }
    }

    pub fn encode(&self) -> [u32; NETWORK_EDGE_SIZE] {
        [self.distance.to_bits(), self.profile as u32]
    }

    pub fn decode(words: &[u32]) -> NetworkEdgeData {
        NetworkEdgeData {
            distance: f32::from_bits(words[0]),
            profile: words[1] as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contracted_data_round_trips() {
        let samples = [
            ContractedEdgeData::new(0.0, Direction::Both, NO_VERTEX),
            ContractedEdgeData::new(17.25, Direction::Forward, 3),
            ContractedEdgeData::new(1000.5, Direction::Backward, MAX_CONTRACTED_ID),
            ContractedEdgeData::new(f32::MAX, Direction::Both, 0),
            ContractedEdgeData::new(0.1, Direction::Backward, NO_VERTEX),
        ];

        for data in samples {
            assert_eq!(data, ContractedEdgeData::decode(&data.encode()));
        }
    }

    #[test]
    fn inverted_occurrence_flips_direction_only() {
        let data = ContractedEdgeData::new(42.0, Direction::Forward, 7);
        let words = data.encode();

        let inverted = ContractedEdgeData::decode_from(&words, true);
        assert_eq!(inverted.direction, Direction::Backward);
        assert_eq!(inverted.weight, 42.0);
        assert_eq!(inverted.contracted_id, 7);

        let plain = ContractedEdgeData::decode_from(&words, false);
        assert_eq!(plain, data);
    }

    #[test]
    fn bidirectional_is_inversion_invariant() {
        let words = ContractedEdgeData::new(3.5, Direction::Both, NO_VERTEX).encode();
        assert_eq!(
            ContractedEdgeData::decode_from(&words, true).direction,
            Direction::Both
        );
    }

    #[test]
    fn network_data_round_trips() {
        let data = NetworkEdgeData::new(123.75, 42);
        assert_eq!(data, NetworkEdgeData::decode(&data.encode()));

        let data = NetworkEdgeData::new(0.0, u16::MAX);
        assert_eq!(data, NetworkEdgeData::decode(&data.encode()));
    }
}
