//! Parallel population variant (§5): the same generation loop as
//! [`evo_core::Population`], but with fitness evaluation for the current
//! entity list batched across an [`Executor`] before each generation steps.
//! With `Executor::Serial` this produces bit-identical results to driving
//! the inner [`Population`] directly — the property the single-threaded
//! case is required to hold (§8, testable property 7).

use evo_core::{Entity, EntityModel, Executor, MigrationGateway, Population, StepOutcome};
use evo_error::Result;

pub struct ParallelPopulation<M: EntityModel> {
    population: Population<M>,
    executor: Executor,
}

impl<M> ParallelPopulation<M>
where
    M: EntityModel + Send,
    M::Phenotype: Send,
{
    pub fn new(population: Population<M>, executor: Executor) -> Self {
        ParallelPopulation {
            population,
            executor,
        }
    }

    pub fn population(&self) -> &Population<M> {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population<M> {
        &mut self.population
    }

    pub fn into_population(self) -> Population<M> {
        self.population
    }

    /// Drives every current entity through whatever lifecycle steps remain,
    /// across the executor. A no-op per entity that's already `Ready`, so
    /// calling this redundantly (as [`Self::step_generation`] does every
    /// generation) costs nothing beyond the batch dispatch overhead.
    pub fn ready_all(&mut self) -> Result<()> {
        let snapshot: Vec<Entity<M>> = self.population.entities().to_vec();
        let results: Vec<Result<Entity<M>>> = self.executor.map(snapshot, |mut entity| {
            entity.init_entity()?;
            entity.load_entity()?;
            entity.ensure_fitness()?;
            Ok(entity)
        });
        for (slot, result) in self.population.entities_mut().iter_mut().zip(results) {
            *slot = result?;
        }
        Ok(())
    }

    /// Batches fitness evaluation for the current entity list, then runs one
    /// generation exactly as [`Population::step_generation`] would.
    pub fn step_generation(&mut self, migration: Option<&MigrationGateway<M>>) -> Result<StepOutcome> {
        self.ready_all()?;
        self.population.step_generation(migration)
    }

    pub fn evolve(&mut self, migration: Option<&MigrationGateway<M>>) -> Result<()> {
        loop {
            if self.step_generation(migration)? == StepOutcome::Stop {
                return Ok(());
            }
        }
    }
}
