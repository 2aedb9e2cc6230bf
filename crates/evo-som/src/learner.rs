//! The SOM learner (§4.11): finds the winning neuron for an input, then
//! spreads a shrinking update outward across the lattice by Gaussian
//! falloff. Ring 0 (the winner) always gets the full, unscaled update.

use crate::network::DistanceNetwork;
use evo_error::Result;
use std::collections::HashSet;

/// `learning_radius == 0.0` updates only the winner. Otherwise the update
/// spreads outward via the lattice's own neighbor graph, ring by ring, until
/// a ring contributes no new nodes or `max(width, height, depth)` rings have
/// been walked.
#[derive(Debug, Clone, Copy)]
pub struct SomLearner {
    pub learning_rate: f64,
    pub learning_radius: f64,
}

impl Default for SomLearner {
    fn default() -> Self {
        SomLearner {
            learning_rate: 0.1,
            learning_radius: 7.0,
        }
    }
}

impl SomLearner {
    pub fn new(learning_rate: f64, learning_radius: f64) -> Self {
        SomLearner {
            learning_rate,
            learning_radius,
        }
    }

    fn squared_radius2(&self) -> f64 {
        2.0 * self.learning_radius * self.learning_radius
    }

    /// Runs one training step against `input`, returning the sum of
    /// absolute weight changes across every neuron touched.
    pub fn run(&self, network: &mut DistanceNetwork, input: &[f64]) -> Result<f64> {
        let winner = network.layer().get_winner(input)?;
        let mut total_error = network.layer_mut().neurons_mut()[winner].adjust(input, self.learning_rate)?;

        if self.learning_radius == 0.0 {
            return Ok(total_error);
        }

        let winner_coords = network.location(winner).coords.clone();
        let squared_radius2 = self.squared_radius2();
        let max_rings = network.width().max(network.height()).max(network.depth().max(1));

        let mut visited: HashSet<usize> = HashSet::new();
        visited.insert(winner);
        let mut frontier = vec![winner];

        for _ in 0..max_rings {
            let mut next_frontier = Vec::new();
            for &node in &frontier {
                let neighbor_keys = network.location(node).neighbor_keys.clone();
                for key in &neighbor_keys {
                    if key.is_empty() {
                        continue;
                    }
                    let neighbor_index = network.index_of(key)?;
                    if visited.insert(neighbor_index) {
                        next_frontier.push(neighbor_index);
                    }
                }
            }
            if next_frontier.is_empty() {
                break;
            }
            for &node in &next_frontier {
                let distance_sq = squared_distance(&winner_coords, &network.location(node).coords);
                let factor = (-distance_sq / squared_radius2).exp();
                total_error +=
                    network.layer_mut().neurons_mut()[node].adjust(input, self.learning_rate * factor)?;
            }
            frontier = next_frontier;
        }

        Ok(total_error)
    }

    /// Runs [`Self::run`] once per input, in order, and sums the error.
    pub fn run_epoch(&self, network: &mut DistanceNetwork, inputs: &[Vec<f64>]) -> Result<f64> {
        let mut total = 0.0;
        for input in inputs {
            total += self.run(network, input)?;
        }
        tracing::debug!(inputs = inputs.len(), total_error = total, "epoch complete");
        Ok(total)
    }
}

fn squared_distance(a: &[i64], b: &[i64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let delta = (x - y) as f64;
            delta * delta
        })
        .sum()
}
