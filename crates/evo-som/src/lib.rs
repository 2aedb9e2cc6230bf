//! Topology-aware self-organizing map engine (§4.10-§4.12): lattice
//! builders, distance neurons/layers, and the Gaussian-falloff learner.

pub mod learner;
pub mod network;
pub mod neuron;
pub mod topology;

pub use learner::SomLearner;
pub use network::DistanceNetwork;
pub use neuron::{DistanceLayer, DistanceNeuron, RandRange};
pub use topology::{
    CubeBuilder, HexagonalBuilder, NeuronLocation, OctagonalBuilder, OctagonalPrismBuilder,
    RectangularBuilder, TopologyBuilder, WeightInit,
};
