//! Cube 3D lattice: six-neighbor grid, `Up, Down, Left, Right, In, Out`
//! where `In`/`Out` step along the `z` axis.

use super::{wrap_or_bound, NeuronLocation, TopologyBuilder};
use evo_error::{Error, Result};

const OFFSETS: [(i64, i64, i64); 6] = [
    (0, -1, 0), // Up
    (0, 1, 0),  // Down
    (-1, 0, 0), // Left
    (1, 0, 0),  // Right
    (0, 0, 1),  // In
    (0, 0, -1), // Out
];

#[derive(Debug, Clone)]
pub struct CubeBuilder {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub toroidal: bool,
}

impl CubeBuilder {
    pub fn new(width: usize, height: usize, depth: usize, toroidal: bool) -> Self {
        Self {
            width,
            height,
            depth,
            toroidal,
        }
    }

    fn key(x: i64, y: i64, z: i64) -> String {
        format!("{x},{y},{z}")
    }

    fn coord_of(&self, index: usize) -> (i64, i64, i64) {
        let plane = self.width * self.height;
        let z = index / plane;
        let remainder = index % plane;
        ((remainder % self.width) as i64, (remainder / self.width) as i64, z as i64)
    }
}

impl TopologyBuilder for CubeBuilder {
    fn total_nodes(&self) -> usize {
        self.width * self.height * self.depth
    }

    fn location_from_coord(&self, coords: &[i64]) -> String {
        let (x, y, z) = (coords[0], coords[1], coords[2]);
        match (
            wrap_or_bound(x, self.width, self.toroidal),
            wrap_or_bound(y, self.height, self.toroidal),
            wrap_or_bound(z, self.depth, self.toroidal),
        ) {
            (Some(x), Some(y), Some(z)) => Self::key(x, y, z),
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
        let (x, y, z) = self.coord_of(index);
        let neighbor_keys = OFFSETS
            .iter()
            .map(|(dx, dy, dz)| self.location_from_coord(&[x + dx, y + dy, z + dz]))
            .collect();
        Ok(NeuronLocation {
            key: Self::key(x, y, z),
            coords: vec![x, y, z],
            neighbor_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_node_has_six_non_empty_neighbors() {
        let builder = CubeBuilder::new(3, 3, 3, false);
        let center = builder.location_from_index(1 + 3 + 9).unwrap();
        assert_eq!(center.key, "1,1,1");
        assert!(center.neighbor_keys.iter().all(|k| !k.is_empty()));
    }

    #[test]
    fn corner_node_has_three_missing_neighbors() {
        let builder = CubeBuilder::new(3, 3, 3, false);
        let corner = builder.location_from_index(0).unwrap();
        let missing = corner.neighbor_keys.iter().filter(|k| k.is_empty()).count();
        assert_eq!(missing, 3);
    }
}
