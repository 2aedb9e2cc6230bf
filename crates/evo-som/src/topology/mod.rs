//! Lattice builders for the self-organizing map (§4.10).
//!
//! Each builder owns its dimensions and toroidal flag and enumerates nodes
//! in row-major index order. A node's identity is its canonical string key;
//! its neighbors are a fixed-length, lattice-specific ordered list of keys,
//! with `""` standing in for "no neighbor here" at a non-toroidal edge.

use evo_core::random;
use evo_error::Result;

pub mod cube;
pub mod hexagonal;
pub mod octagonal;
pub mod octagonal_prism;
pub mod rectangular;

pub use cube::CubeBuilder;
pub use hexagonal::HexagonalBuilder;
pub use octagonal::OctagonalBuilder;
pub use octagonal_prism::OctagonalPrismBuilder;
pub use rectangular::RectangularBuilder;

/// How a lattice's initial weight vectors are seeded.
#[derive(Debug, Clone, Copy)]
pub enum WeightInit {
    /// Every element of neuron `i`'s weight vector is the same scalar,
    /// spread evenly across `[min, max)` by node index.
    Linear { min: f64, max: f64 },
    /// Every element is drawn independently and uniformly from `[min, max)`.
    Randomised { min: f64, max: f64 },
}

/// One lattice node: its canonical key, integer coordinates, and the
/// ordered keys of its neighbors.
#[derive(Debug, Clone)]
pub struct NeuronLocation {
    pub key: String,
    pub coords: Vec<i64>,
    pub neighbor_keys: Vec<String>,
}

/// Builds the nodes of one lattice shape.
pub trait TopologyBuilder {
    fn total_nodes(&self) -> usize;

    fn location_from_index(&self, index: usize) -> Result<NeuronLocation>;

    /// Resolves a coordinate to its canonical key, applying toroidal
    /// wraparound if configured, or returning `""` if the coordinate falls
    /// outside a bounded lattice.
    fn location_from_coord(&self, coords: &[i64]) -> String;

    fn weights_at_index(&self, index: usize, vector_size: usize, init: WeightInit) -> Vec<f64> {
        weights_at_index(index, self.total_nodes(), vector_size, init)
    }

    /// Enumerates every node once, in row-major index order.
    fn build(&self) -> Result<Vec<NeuronLocation>> {
        (0..self.total_nodes())
            .map(|i| self.location_from_index(i))
            .collect()
    }
}

pub(crate) fn weights_at_index(
    index: usize,
    total_nodes: usize,
    vector_size: usize,
    init: WeightInit,
) -> Vec<f64> {
    match init {
        WeightInit::Linear { min, max } => {
            let scalar = min + (index as f64) * (max - min) / (total_nodes.max(1) as f64);
            vec![scalar; vector_size]
        }
        WeightInit::Randomised { min, max } => (0..vector_size)
            .map(|_| min + random::next_double() * (max - min))
            .collect(),
    }
}

/// Wraps `value` into `[0, length)` if `toroidal`, otherwise returns `None`
/// when `value` falls outside `[0, length)`.
pub(crate) fn wrap_or_bound(value: i64, length: usize, toroidal: bool) -> Option<i64> {
    let length = length as i64;
    if toroidal {
        Some(((value % length) + length) % length)
    } else if value >= 0 && value < length {
        Some(value)
    } else {
        None
    }
}
