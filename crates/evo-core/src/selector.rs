//! Selection strategy plug points (§4.6): stateful iterators over a
//! population's entity list, reset at the start of every generation.

use crate::entity::EntityModel;
use crate::population::Population;

/// Picks one entity index per call, for the mutation phase and for adaption
/// seeding.
pub trait SelectOne<M: EntityModel>: Send {
    /// Resets any per-generation state. Called once per generation before
    /// the first `next`.
    fn init(&mut self, population: &Population<M>);

    /// Returns the next selected entity's index into the population's
    /// entity list, or `None` once the selector has nothing left to offer
    /// this generation.
    fn next(&mut self, population: &Population<M>) -> Option<usize>;
}

/// Picks a pair of entity indices per call, for the crossover phase.
pub trait SelectTwo<M: EntityModel>: Send {
    fn init(&mut self, population: &Population<M>);
    fn next(&mut self, population: &Population<M>) -> Option<(usize, usize)>;
}

/// Picks the local entity to offer for outbound migration.
pub trait MigrationSelector<M: EntityModel>: Send {
    fn init(&mut self, population: &Population<M>);
    fn next(&mut self, population: &Population<M>) -> Option<usize>;
}
