//! Ties a [`TopologyBuilder`]'s lattice to a [`DistanceLayer`]: every node's
//! canonical key maps to its neuron index, so the learner can walk the
//! lattice by key without re-deriving coordinates.

use crate::neuron::{DistanceLayer, DistanceNeuron, RandRange};
use crate::topology::{NeuronLocation, TopologyBuilder, WeightInit};
use evo_error::{Error, Result};
use std::collections::HashMap;

pub struct DistanceNetwork {
    locations: Vec<NeuronLocation>,
    index_by_key: HashMap<String, usize>,
    layer: DistanceLayer,
    width: usize,
    height: usize,
    depth: usize,
}

impl DistanceNetwork {
    /// Builds every node of `topology`, seeding weight vectors of
    /// `vector_size` elements per the given scheme.
    pub fn build(
        topology: &dyn TopologyBuilder,
        vector_size: usize,
        init: WeightInit,
        width: usize,
        height: usize,
        depth: usize,
    ) -> Result<Self> {
        let locations = topology.build()?;
        let mut index_by_key = HashMap::with_capacity(locations.len());
        let mut neurons = Vec::with_capacity(locations.len());
        for (index, location) in locations.iter().enumerate() {
            index_by_key.insert(location.key.clone(), index);
            let weights = topology.weights_at_index(index, vector_size, init);
            neurons.push(DistanceNeuron::new(weights));
        }
        Ok(DistanceNetwork {
            locations,
            index_by_key,
            layer: DistanceLayer::new(neurons),
            width,
            height,
            depth,
        })
    }

    /// Builds a network whose weights are drawn independently per neuron
    /// from `range`, ignoring any linear seeding the topology would offer.
    pub fn randomised(
        topology: &dyn TopologyBuilder,
        vector_size: usize,
        range: RandRange,
        width: usize,
        height: usize,
        depth: usize,
    ) -> Result<Self> {
        let locations = topology.build()?;
        let mut index_by_key = HashMap::with_capacity(locations.len());
        let mut neurons = Vec::with_capacity(locations.len());
        for (index, location) in locations.iter().enumerate() {
            index_by_key.insert(location.key.clone(), index);
            neurons.push(DistanceNeuron::randomised(vector_size, range));
        }
        Ok(DistanceNetwork {
            locations,
            index_by_key,
            layer: DistanceLayer::new(neurons),
            width,
            height,
            depth,
        })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn layer(&self) -> &DistanceLayer {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut DistanceLayer {
        &mut self.layer
    }

    pub fn location(&self, index: usize) -> &NeuronLocation {
        &self.locations[index]
    }

    pub fn locations(&self) -> &[NeuronLocation] {
        &self.locations
    }

    /// Resolves a node key to its neuron index. Empty keys (lattice edges)
    /// are not errors: callers should filter them before calling this.
    pub fn index_of(&self, key: &str) -> Result<usize> {
        self.index_by_key
            .get(key)
            .copied()
            .ok_or_else(|| Error::unresolved_neighbor(format!("no node registered for key {key:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::RectangularBuilder;

    #[test]
    fn build_registers_every_node_by_key() {
        let topology = RectangularBuilder::new(3, 3, false);
        let network = DistanceNetwork::build(
            &topology,
            2,
            WeightInit::Randomised { min: 0.0, max: 1.0 },
            3,
            3,
            1,
        )
        .unwrap();
        assert_eq!(network.len(), 9);
        assert_eq!(network.index_of("1,1").unwrap(), 4);
    }

    #[test]
    fn unknown_key_is_unresolved() {
        let topology = RectangularBuilder::new(2, 2, false);
        let network = DistanceNetwork::build(
            &topology,
            1,
            WeightInit::Randomised { min: 0.0, max: 1.0 },
            2,
            2,
            1,
        )
        .unwrap();
        assert!(network.index_of("9,9").is_err());
    }

    #[test]
    fn linear_init_spreads_weights_evenly_by_index() {
        let topology = RectangularBuilder::new(4, 1, false);
        let network = DistanceNetwork::build(
            &topology,
            1,
            WeightInit::Linear { min: 0.0, max: 1.0 },
            4,
            1,
            1,
        )
        .unwrap();
        let first = network.layer().neurons()[0].weights()[0];
        let last = network.layer().neurons()[3].weights()[0];
        assert_eq!(first, 0.0);
        assert_eq!(last, 0.75);
    }
}
