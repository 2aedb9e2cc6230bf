//! Concrete [`evo_core::MutationOp`] strategies (§4.6).

pub mod multi_drift;
pub mod multi_random;
pub mod single_drift;
pub mod single_random;

pub use multi_drift::MultiDriftMutation;
pub use multi_random::MultiRandomMutation;
pub use single_drift::SingleDriftMutation;
pub use single_random::SingleRandomMutation;
