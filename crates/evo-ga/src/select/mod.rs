//! Concrete [`evo_core::SelectOne`]/[`evo_core::SelectTwo`]/
//! [`evo_core::MigrationSelector`] strategies.

pub mod best_of_two;
pub mod every;
pub mod random;
pub mod random_rank;
pub mod roulette;

pub use best_of_two::{BestOfTwoSelectOne, BestOfTwoSelectTwo};
pub use every::{EverySelectOne, EverySelectTwo};
pub use random::{RandomMigrationSelector, RandomSelectOne, RandomSelectTwo};
pub use random_rank::{RandomRankSelectOne, RandomRankSelectTwo};
pub use roulette::{RouletteSelectOne, RouletteSelectTwo};
