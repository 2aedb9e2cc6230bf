//! Rectangular 2D lattice: four-neighbor grid, `Up, Down, Left, Right`.

use super::{wrap_or_bound, NeuronLocation, TopologyBuilder};
use evo_error::{Error, Result};

const OFFSETS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

#[derive(Debug, Clone)]
pub struct RectangularBuilder {
    pub width: usize,
    pub height: usize,
    pub toroidal: bool,
}

impl RectangularBuilder {
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

impl TopologyBuilder for RectangularBuilder {
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
        let neighbor_keys = OFFSETS
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
