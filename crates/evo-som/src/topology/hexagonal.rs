//! Hexagonal 2D lattice: six-neighbor grid whose offsets alternate by row
//! parity (an offset-coordinate hex grid laid out on a rectangular index
//! space).

use super::{wrap_or_bound, NeuronLocation, TopologyBuilder};
use evo_error::{Error, Result};

const EVEN_ROW_OFFSETS: [(i64, i64); 6] = [
    (-1, -1), // LeftUp
    (0, -1),  // Up
    (1, -1),  // RightUp
    (1, 0),   // Right
    (0, 1),   // Down
    (-1, 0),  // Left
];

const ODD_ROW_OFFSETS: [(i64, i64); 6] = [
    (-1, 0), // Left
    (0, -1), // Up
    (1, 0),  // Right
    (1, 1),  // RightDown
    (0, 1),  // Down
    (-1, 1), // LeftDown
];

#[derive(Debug, Clone)]
pub struct HexagonalBuilder {
    pub width: usize,
    pub height: usize,
    pub toroidal: bool,
}

impl HexagonalBuilder {
    pub fn new(width: usize, height: usize, toroidal: bool) -> Self {
        Self {
            width,
            height,
            toroidal,
        }
    }

    fn key(x: i64, y: i64) -> String {
        format!("{x},{y}")
    }

    fn coord_of(&self, index: usize) -> (i64, i64) {
        ((index % self.width) as i64, (index / self.width) as i64)
    }
}

impl TopologyBuilder for HexagonalBuilder {
    fn total_nodes(&self) -> usize {
        self.width * self.height
    }

    fn location_from_coord(&self, coords: &[i64]) -> String {
        let (x, y) = (coords[0], coords[1]);
        match (
            wrap_or_bound(x, self.width, self.toroidal),
            wrap_or_bound(y, self.height, self.toroidal),
        ) {
            (Some(x), Some(y)) => Self::key(x, y),
            _ => String::new(),
        }
    }

    fn location_from_index(&self, index: usize) -> Result<NeuronLocation> {
        if index >= self.total_nodes() {
            return Err(Error::out_of_range(format!(
                "index {index} out of range for {} nodes",
                self.total_nodes()
            )));
        }
        let (x, y) = self.coord_of(index);
        let offsets = if y % 2 == 0 {
            &EVEN_ROW_OFFSETS
        } else {
            &ODD_ROW_OFFSETS
        };
        let neighbor_keys = offsets
            .iter()
            .map(|(dx, dy)| self.location_from_coord(&[x + dx, y + dy]))
            .collect();
        Ok(NeuronLocation {
            key: Self::key(x, y),
            coords: vec![x, y],
            neighbor_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_and_odd_rows_use_different_offset_tables() {
        let builder = HexagonalBuilder::new(5, 5, false);
        let even_row = builder.location_from_index(builder.width * 2 + 2).unwrap();
        let odd_row = builder.location_from_index(builder.width * 3 + 2).unwrap();
        assert_eq!(even_row.neighbor_keys, vec!["1,1", "2,1", "3,1", "3,2", "2,3", "1,2"]);
        assert_eq!(odd_row.neighbor_keys, vec!["1,3", "2,2", "3,3", "3,4", "2,4", "1,4"]);
    }

    #[test]
    fn every_node_has_six_neighbor_slots() {
        let builder = HexagonalBuilder::new(4, 4, true);
        for i in 0..builder.total_nodes() {
            assert_eq!(builder.location_from_index(i).unwrap().neighbor_keys.len(), 6);
        }
    }
}
