//! Octagonal 2D lattice: a grid of eight-neighbor "octagonal" cells with
//! four-neighbor "rhombus" cells filling the diagonal gaps between them.
//! A cell's class is determined purely by the parity of its coordinates —
//! `x` and `y` sharing parity means an octagonal cell, differing parity
//! means a rhombus cell — and is encoded as a `:O`/`:R` suffix on the key.

use super::{wrap_or_bound, NeuronLocation, TopologyBuilder};
use evo_error::{Error, Result};

const OCTAGONAL_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), // LeftUp
    (0, -1),  // Up
    (1, -1),  // RightUp
    (-1, 0),  // Left
    (1, 0),   // Right
    (-1, 1),  // LeftDown
    (0, 1),   // Down
    (1, 1),   // RightDown
];

const RHOMBUS_OFFSETS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

pub(crate) fn is_octagonal_cell(x: i64, y: i64) -> bool {
    x.rem_euclid(2) == y.rem_euclid(2)
}

#[derive(Debug, Clone)]
pub struct OctagonalBuilder {
    pub width: usize,
    pub height: usize,
    pub toroidal: bool,
}

impl OctagonalBuilder {
    pub fn new(width: usize, height: usize, toroidal: bool) -> Result<Self> {
        if toroidal && (width % 2 != 0 || height % 2 != 0) {
            return Err(Error::invalid_configuration(
                "toroidal octagonal lattices require even width and height",
            ));
        }
        Ok(Self {
            width,
            height,
            toroidal,
        })
    }

    fn key(x: i64, y: i64) -> String {
        let suffix = if is_octagonal_cell(x, y) { "O" } else { "R" };
        format!("{x},{y}:{suffix}")
    }

    fn coord_of(&self, index: usize) -> (i64, i64) {
        ((index % self.width) as i64, (index / self.width) as i64)
    }
}

impl TopologyBuilder for OctagonalBuilder {
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
        let offsets: &[(i64, i64)] = if is_octagonal_cell(x, y) {
            &OCTAGONAL_OFFSETS
        } else {
            &RHOMBUS_OFFSETS
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
    fn octagonal_cells_get_eight_neighbors_rhombus_cells_get_four() {
        let builder = OctagonalBuilder::new(5, 5, false).unwrap();
        let octagon = builder.location_from_index(builder.width * 2 + 2).unwrap();
        let rhombus = builder.location_from_index(builder.width * 2 + 3).unwrap();
        assert_eq!(octagon.key, "2,2:O");
        assert_eq!(octagon.neighbor_keys.len(), 8);
        assert_eq!(rhombus.key, "3,2:R");
        assert_eq!(rhombus.neighbor_keys.len(), 4);
    }

    #[test]
    fn toroidal_lattice_rejects_odd_dimensions() {
        assert!(OctagonalBuilder::new(3, 4, true).is_err());
        assert!(OctagonalBuilder::new(4, 4, true).is_ok());
    }
}
