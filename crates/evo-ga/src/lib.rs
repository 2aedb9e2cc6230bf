//! Concrete island-model genetic algorithm strategies built on `evo-core`:
//! selection, crossover, mutation, and local-search adaption operators, plus
//! a parallel population variant (§4.6, §4.7, §5).

pub mod adapt;
pub mod crossover;
pub mod mutate;
pub mod parallel;
pub mod select;

pub use adapt::{
    Acceptance, CoolingSchedule, NextAscentHillClimb, RandomAscentHillClimb, SimulatedAnnealing,
    SteepestAscentGradient,
};
pub use crossover::{DoublePointCrossover, MixingCrossover, SinglePointCrossover};
pub use mutate::{MultiDriftMutation, MultiRandomMutation, SingleDriftMutation, SingleRandomMutation};
pub use parallel::ParallelPopulation;
pub use select::{
    BestOfTwoSelectOne, BestOfTwoSelectTwo, EverySelectOne, EverySelectTwo, RandomMigrationSelector,
    RandomRankSelectOne, RandomRankSelectTwo, RandomSelectOne, RandomSelectTwo, RouletteSelectOne,
    RouletteSelectTwo,
};
