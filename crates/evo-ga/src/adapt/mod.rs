//! Concrete [`evo_core::AdaptionOp`] local-search strategies (§4.7).

pub mod hill_climb;
pub mod simulated_annealing;
pub mod steepest_ascent;

pub use hill_climb::{NextAscentHillClimb, RandomAscentHillClimb};
pub use simulated_annealing::{Acceptance, CoolingSchedule, SimulatedAnnealing};
pub use steepest_ascent::SteepestAscentGradient;
