//! Octagonal prism: the octagonal 2D lattice extruded along `z`, with
//! `In`/`Out` neighbors stacking planes on top of the eight (or four)
//! planar neighbors.

use super::octagonal::is_octagonal_cell;
use super::{wrap_or_bound, NeuronLocation, TopologyBuilder};
use evo_error::{Error, Result};

const OCTAGONAL_PLANAR: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const RHOMBUS_PLANAR: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

#[derive(Debug, Clone)]
pub struct OctagonalPrismBuilder {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub toroidal: bool,
}

impl OctagonalPrismBuilder {
    pub fn new(width: usize, height: usize, depth: usize, toroidal: bool) -> Result<Self> {
        if toroidal && (width % 2 != 0 || height % 2 != 0) {
            return Err(Error::invalid_configuration(
                "toroidal octagonal prisms require even width and height",
            ));
        }
        Ok(Self {
            width,
            height,
            depth,
            toroidal,
        })
    }

    fn key(x: i64, y: i64, z: i64) -> String {
        let suffix = if is_octagonal_cell(x, y) { "O" } else { "R" };
        format!("{x},{y},{z}:{suffix}")
    }

    fn coord_of(&self, index: usize) -> (i64, i64, i64) {
        let plane = self.width * self.height;
        let z = index / plane;
        let remainder = index % plane;
        ((remainder % self.width) as i64, (remainder / self.width) as i64, z as i64)
    }
}

impl TopologyBuilder for OctagonalPrismBuilder {
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
        let planar: &[(i64, i64)] = if is_octagonal_cell(x, y) {
            &OCTAGONAL_PLANAR
        } else {
            &RHOMBUS_PLANAR
        };
        let mut neighbor_keys: Vec<String> = planar
            .iter()
            .map(|(dx, dy)| self.location_from_coord(&[x + dx, y + dy, z]))
            .collect();
        neighbor_keys.push(self.location_from_coord(&[x, y, z - 1])); // In
        neighbor_keys.push(self.location_from_coord(&[x, y, z + 1])); // Out
        Ok(NeuronLocation {
            key: Self::key(x, y, z),
            coords: vec![x, y, z],
            neighbor_keys,
        })
    }
}
