//! Distance neurons and layers (§4.12): a neuron holds a weight vector and
//! reports the Euclidean distance between it and an input; a layer is a
//! flat collection of neurons sharing one input.

use evo_core::random;
use evo_error::{Error, Result};

/// The `[min, max)` range every new neuron's weights are drawn from, absent
/// an explicit linear seeding scheme.
#[derive(Debug, Clone, Copy)]
pub struct RandRange {
    pub min: f64,
    pub max: f64,
}

impl Default for RandRange {
    fn default() -> Self {
        RandRange { min: 0.0, max: 1.0 }
    }
}

impl RandRange {
    pub fn sample(&self, size: usize) -> Vec<f64> {
        (0..size)
            .map(|_| self.min + random::next_double() * (self.max - self.min))
            .collect()
    }
}

/// A single weight vector and its distance-to-input computation.
#[derive(Debug, Clone)]
pub struct DistanceNeuron {
    weights: Vec<f64>,
}

impl DistanceNeuron {
    pub fn new(weights: Vec<f64>) -> Self {
        DistanceNeuron { weights }
    }

    pub fn randomised(size: usize, range: RandRange) -> Self {
        DistanceNeuron::new(range.sample(size))
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// Euclidean distance between `input` and this neuron's weight vector.
    pub fn distance(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.weights.len() {
            return Err(Error::shape_mismatch(format!(
                "input has {} elements, neuron has {}",
                input.len(),
                self.weights.len()
            )));
        }
        let sum_sq: f64 = input
            .iter()
            .zip(self.weights.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Ok(sum_sq.sqrt())
    }

    /// Nudges every weight toward `input` by `factor` (already scaled by
    /// learning rate and, for non-winner nodes, neighborhood falloff).
    /// Returns the sum of absolute per-weight changes.
    pub fn adjust(&mut self, input: &[f64], factor: f64) -> Result<f64> {
        if input.len() != self.weights.len() {
            return Err(Error::shape_mismatch(format!(
                "input has {} elements, neuron has {}",
                input.len(),
                self.weights.len()
            )));
        }
        let mut total = 0.0;
        for (weight, value) in self.weights.iter_mut().zip(input.iter()) {
            let delta = factor * (value - *weight);
            *weight += delta;
            total += delta.abs();
        }
        Ok(total)
    }
}

/// A flat collection of [`DistanceNeuron`]s sharing one input vector.
#[derive(Debug, Clone)]
pub struct DistanceLayer {
    neurons: Vec<DistanceNeuron>,
}

impl DistanceLayer {
    pub fn new(neurons: Vec<DistanceNeuron>) -> Self {
        DistanceLayer { neurons }
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[DistanceNeuron] {
        &self.neurons
    }

    pub fn neurons_mut(&mut self) -> &mut [DistanceNeuron] {
        &mut self.neurons
    }

    pub fn compute(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.neurons.iter().map(|n| n.distance(input)).collect()
    }

    /// Index of the neuron with the smallest distance to `input`.
    pub fn get_winner(&self, input: &[f64]) -> Result<usize> {
        let distances = self.compute(input)?;
        distances
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.partial_cmp(b.1).expect("distances are finite"))
            .map(|(index, _)| index)
            .ok_or_else(|| Error::invalid_configuration("distance layer has no neurons"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_is_the_closest_neuron() {
        let layer = DistanceLayer::new(vec![
            DistanceNeuron::new(vec![0.0]),
            DistanceNeuron::new(vec![0.5]),
            DistanceNeuron::new(vec![1.0]),
        ]);
        assert_eq!(layer.get_winner(&[0.9]).unwrap(), 2);
    }

    #[test]
    fn adjust_moves_weights_toward_input_and_reports_the_change() {
        let mut neuron = DistanceNeuron::new(vec![1.0]);
        let change = neuron.adjust(&[0.9], 0.5).unwrap();
        assert!((neuron.weights()[0] - 0.95).abs() < 1e-9);
        assert!((change - 0.05).abs() < 1e-9);
    }

    #[test]
    fn mismatched_input_length_is_rejected() {
        let neuron = DistanceNeuron::new(vec![1.0, 2.0]);
        assert!(neuron.distance(&[1.0]).is_err());
    }
}
