//! Shared data model and engine traits for the `evo` genetic-algorithm and
//! self-organizing-map crates: RNG, vector arithmetic, chromosomes, DNA,
//! entities, populations, and the strategy plug points a concrete GA wires
//! together.

pub mod adaption;
pub mod alter;
pub mod chromosome;
pub mod dna;
pub mod entity;
pub mod executor;
pub mod host;
pub mod population;
pub mod random;
pub mod selector;
pub mod vector;

pub use adaption::{AdaptionOp, AdaptionOutcome, Elitism, Evolution};
pub use alter::{CrossoverOp, MutationOp};
pub use chromosome::{
    BoolChromosome, CharChromosome, Chromosome, ChromosomeOps, Direction, DoubleChromosome,
    IntChromosome, Integer, IntegerChromosome, ShortChromosome,
};
pub use dna::Dna;
pub use entity::{Entity, EntityId, EntityModel, EntityState};
pub use executor::Executor;
pub use host::{HostId, IslandId, Migrant, PopulationHost};
pub use population::{Genesis, MigrationGateway, Population, PopulationSettings, StepOutcome};
pub use selector::{MigrationSelector, SelectOne, SelectTwo};

pub use evo_error::{Error, Result};

static INIT_LOGGING: std::sync::Once = std::sync::Once::new();

/// Installs a `tracing` subscriber reading `RUST_LOG` (default `info`),
/// once per process. Safe to call from every crate entry point and from
/// tests; later calls are no-ops.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber_env_filter();
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

fn tracing_subscriber_env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
