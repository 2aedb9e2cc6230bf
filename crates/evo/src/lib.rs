//! An island-model genetic algorithm engine and a topology-aware
//! self-organizing map engine.
//!
//! This crate re-exports the data model and strategy traits (`evo-core`),
//! the concrete selection/crossover/mutation/adaption strategies and the
//! parallel population variant (`evo-ga`), and the lattice/distance-network
//! SOM engine (`evo-som`), along with the shared error type (`evo-error`).

pub use evo_core::*;
pub use evo_error::{Error, Result};
pub use evo_ga::*;
pub use evo_som::*;
