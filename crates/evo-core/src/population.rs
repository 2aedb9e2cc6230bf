//! A generation-stepping container of entities (§3, §4.5–§4.9).

use crate::adaption::{AdaptionOp, Elitism, Evolution};
use crate::alter::{CrossoverOp, MutationOp};
use crate::dna::Dna;
use crate::entity::{Entity, EntityModel, EntityState};
use crate::host::{HostId, IslandId, Migrant};
use crate::random;
use crate::selector::{MigrationSelector, SelectOne, SelectTwo};
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossbeam_queue::ArrayQueue;
use evo_error::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// How the initial entity list is produced (§6).
pub enum Genesis<M: EntityModel> {
    /// Build `StableSize` fresh entities from the model, run each through
    /// the lifecycle, and sort.
    Random,
    /// Seed from an already-constructed set of entities.
    Soup(Vec<Entity<M>>),
    /// Call a user factory for the initial set.
    User(Arc<dyn Fn() -> Vec<Entity<M>> + Send + Sync>),
}

impl<M: EntityModel> Clone for Genesis<M> {
    fn clone(&self) -> Self {
        match self {
            Genesis::Random => Genesis::Random,
            Genesis::Soup(entities) => Genesis::Soup(entities.clone()),
            Genesis::User(factory) => Genesis::User(factory.clone()),
        }
    }
}

/// A handle a [`crate::host`]-style coordinator hands to a `Population` so
/// its migration phase can post an outbound entity onto the shared queue,
/// tagged with the host it departed from.
#[derive(Clone)]
pub struct MigrationGateway<M: EntityModel> {
    pub host_id: HostId,
    pub sender: Sender<Migrant<M>>,
}

/// The pluggable behavior and numeric knobs a `Population` is constructed
/// with (§6). Cheaply `Clone`-able: every strategy slot is an `Arc`, so
/// cloning a settings object shares strategy state rather than duplicating
/// it — matching the source's "settings cloned on assignment" semantics,
/// where the clone is shallow.
pub struct PopulationSettings<M: EntityModel> {
    pub stable_size: usize,
    pub max_generations: u64,
    pub steady_state: bool,
    pub evolution_event_interval: u64,
    pub crossover_ratio: f64,
    pub mutation_ratio: f64,
    pub migration_ratio: f64,
    pub genesis: Genesis<M>,
    pub evolution: Evolution,
    pub elitism: Elitism,
    pub max_adaption_iterations: u32,
    pub free_pool_capacity: usize,
    pub select_one: Arc<Mutex<dyn SelectOne<M>>>,
    pub select_two: Arc<Mutex<dyn SelectTwo<M>>>,
    pub migration_selector: Arc<Mutex<dyn MigrationSelector<M>>>,
    pub crossover: Option<Arc<dyn CrossoverOp<M>>>,
    pub mutate: Option<Arc<dyn MutationOp<M>>>,
    pub adaption: Option<Arc<Mutex<dyn AdaptionOp<M>>>>,
    pub generation_handler: Option<Arc<Mutex<dyn FnMut(u64) -> bool + Send>>>,
    pub fitness_handler: Option<Arc<dyn Fn(&Entity<M>) + Send + Sync>>,
}

impl<M: EntityModel> Clone for PopulationSettings<M> {
    fn clone(&self) -> Self {
        PopulationSettings {
            stable_size: self.stable_size,
            max_generations: self.max_generations,
            steady_state: self.steady_state,
            evolution_event_interval: self.evolution_event_interval,
            crossover_ratio: self.crossover_ratio,
            mutation_ratio: self.mutation_ratio,
            migration_ratio: self.migration_ratio,
            genesis: self.genesis.clone(),
            evolution: self.evolution,
            elitism: self.elitism,
            max_adaption_iterations: self.max_adaption_iterations,
            free_pool_capacity: self.free_pool_capacity,
            select_one: self.select_one.clone(),
            select_two: self.select_two.clone(),
            migration_selector: self.migration_selector.clone(),
            crossover: self.crossover.clone(),
            mutate: self.mutate.clone(),
            adaption: self.adaption.clone(),
            generation_handler: self.generation_handler.clone(),
            fitness_handler: self.fitness_handler.clone(),
        }
    }
}

/// Whether [`Population::step_generation`] should be called again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Stop,
}

/// A single island: an entity list, a bounded free-entity pool, an inbound
/// migration queue, and the settings driving its generation loop.
pub struct Population<M: EntityModel> {
    model: M,
    settings: PopulationSettings<M>,
    entities: Vec<Entity<M>>,
    free_pool: ArrayQueue<Entity<M>>,
    inbound_tx: Sender<Migrant<M>>,
    inbound_rx: Receiver<Migrant<M>>,
    island_id: IslandId,
    generation: u64,
    original_count: usize,
    restart_requested: bool,
    cancelled: Arc<AtomicBool>,
}

impl<M: EntityModel> Population<M> {
    pub fn new(model: M, settings: PopulationSettings<M>) -> Result<Self> {
        let (inbound_tx, inbound_rx) = unbounded();
        let mut population = Population {
            model,
            free_pool: ArrayQueue::new(settings.free_pool_capacity.max(1)),
            inbound_tx,
            inbound_rx,
            island_id: IslandId::new(),
            generation: 0,
            original_count: 0,
            restart_requested: false,
            cancelled: Arc::new(AtomicBool::new(false)),
            entities: Vec::new(),
            settings,
        };
        population.populate_genesis()?;
        Ok(population)
    }

    pub fn entities(&self) -> &[Entity<M>] {
        &self.entities
    }

    /// Mutable access to the entity list, for callers batching fitness
    /// evaluation across a worker pool (the parallel population variant).
    pub fn entities_mut(&mut self) -> &mut [Entity<M>] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn original_count(&self) -> usize {
        self.original_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn island_id(&self) -> IslandId {
        self.island_id
    }

    pub fn settings(&self) -> &PopulationSettings<M> {
        &self.settings
    }

    /// A clone of this island's inbound migration sender, handed to a host
    /// so it can route accepted migrants here.
    pub fn inbound_sender(&self) -> Sender<Migrant<M>> {
        self.inbound_tx.clone()
    }

    /// A shared flag a caller can trip from another thread to cancel the
    /// generation loop between phases.
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    fn populate_genesis(&mut self) -> Result<()> {
        self.entities.clear();
        let genesis = self.settings.genesis.clone();
        match genesis {
            Genesis::Random => {
                for _ in 0..self.settings.stable_size {
                    let mut entity = Entity::new(self.model.clone());
                    Self::ready(&mut entity)?;
                    self.entities.push(entity);
                }
            }
            Genesis::Soup(seed) => {
                for mut entity in seed {
                    Self::ready(&mut entity)?;
                    self.entities.push(entity);
                }
            }
            Genesis::User(factory) => {
                for mut entity in factory() {
                    Self::ready(&mut entity)?;
                    self.entities.push(entity);
                }
            }
        }
        self.sort_descending();
        Ok(())
    }

    /// Drives an entity forward through whatever lifecycle steps remain —
    /// a no-op for anything already `Ready`.
    fn ready(entity: &mut Entity<M>) -> Result<()> {
        entity.init_entity()?;
        entity.load_entity()?;
        entity.ensure_fitness()?;
        Ok(())
    }

    fn sort_descending(&mut self) {
        self.entities.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancelled.load(Ordering::SeqCst) {
            tracing::info!(island = ?self.island_id, generation = self.generation, "cancelled");
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    /// Runs generations until `step_generation` reports `Stop`.
    pub fn evolve(&mut self, migration: Option<&MigrationGateway<M>>) -> Result<()> {
        loop {
            if self.step_generation(migration)? == StepOutcome::Stop {
                return Ok(());
            }
        }
    }

    /// Runs exactly one generation (§4.5).
    pub fn step_generation(
        &mut self,
        migration: Option<&MigrationGateway<M>>,
    ) -> Result<StepOutcome> {
        if let Some(handler) = self.settings.generation_handler.clone() {
            let mut handler = handler.lock().unwrap();
            if !(&mut *handler)(self.generation) {
                return Ok(StepOutcome::Stop);
            }
        }
        self.check_cancelled()?;

        let select_one = self.settings.select_one.clone();
        let select_two = self.settings.select_two.clone();
        let migration_selector = self.settings.migration_selector.clone();
        select_one.lock().unwrap().init(self);
        select_two.lock().unwrap().init(self);
        migration_selector.lock().unwrap().init(self);

        self.generation += 1;
        self.original_count = self.entities.len();
        tracing::debug!(
            island = ?self.island_id,
            generation = self.generation,
            population = self.original_count,
            "generation start"
        );

        self.crossover_phase(&select_two)?;
        self.check_cancelled()?;
        self.mutation_phase(&select_one)?;
        self.check_cancelled()?;
        self.adaption_phase()?;
        self.check_cancelled()?;
        self.survival_phase()?;
        self.check_cancelled()?;
        self.migration_phase(&migration_selector, migration)?;
        self.check_cancelled()?;

        if self.restart_requested {
            tracing::info!(island = ?self.island_id, "restart requested, re-running genesis");
            self.restart_requested = false;
            self.generation = 0;
            self.populate_genesis()?;
        }

        if !self.settings.steady_state && self.generation >= self.settings.max_generations {
            return Ok(StepOutcome::Stop);
        }
        Ok(StepOutcome::Continue)
    }

    fn crossover_phase(&mut self, select_two: &Arc<Mutex<dyn SelectTwo<M>>>) -> Result<()> {
        let Some(crossover_op) = self.settings.crossover.clone() else {
            return Ok(());
        };
        if !random::random_prob(self.settings.crossover_ratio)? {
            return Ok(());
        }
        loop {
            let pair = select_two.lock().unwrap().next(self);
            let Some((mother_idx, father_idx)) = pair else {
                break;
            };
            let mother_len = self.entities[mother_idx].dna().map(Dna::len);
            let father_len = self.entities[father_idx].dna().map(Dna::len);
            if mother_len != father_len {
                return Err(Error::shape_mismatch(
                    "parents have a differing number of chromosomes",
                ));
            }

            let mut son = Entity::new(self.model.clone());
            son.reinitialise_from(&self.entities[mother_idx]);
            let mut daughter = Entity::new(self.model.clone());
            daughter.reinitialise_from(&self.entities[father_idx]);

            crossover_op.cross(&mut son, &mut daughter)?;

            self.entities.push(son);
            self.entities.push(daughter);
        }
        Ok(())
    }

    fn mutation_phase(&mut self, select_one: &Arc<Mutex<dyn SelectOne<M>>>) -> Result<()> {
        let Some(mutate_op) = self.settings.mutate.clone() else {
            return Ok(());
        };
        if !random::random_prob(self.settings.mutation_ratio)? {
            return Ok(());
        }
        loop {
            let picked = select_one.lock().unwrap().next(self);
            let Some(parent_idx) = picked else {
                break;
            };
            let mut child = Entity::new(self.model.clone());
            child.reinitialise_from(&self.entities[parent_idx]);
            mutate_op.mutate(&mut child)?;
            self.entities.push(child);
        }
        Ok(())
    }

    fn adaption_phase(&mut self) -> Result<()> {
        if self.settings.evolution.is_darwin() {
            return Ok(());
        }
        let Some(adaption_op) = self.settings.adaption.clone() else {
            return Ok(());
        };
        let evolution = self.settings.evolution;
        let max_iterations = self.settings.max_adaption_iterations;
        let original_count = self.original_count;

        for idx in 0..self.entities.len() {
            if !evolution.applies_to(idx, original_count) {
                continue;
            }
            Self::ready(&mut self.entities[idx])?;
            let outcome = adaption_op
                .lock()
                .unwrap()
                .optimise(&self.entities[idx], max_iterations)?;
            if evolution.is_lamarckian() {
                self.entities[idx] = outcome.adapted;
            } else if let Some(score) = outcome.adapted.fitness() {
                self.entities[idx].set_fitness(score);
            }
        }
        Ok(())
    }

    fn survival_phase(&mut self) -> Result<()> {
        match self.settings.elitism {
            Elitism::ParentsDie => {
                let end = self.original_count.min(self.entities.len());
                self.release_range(0..end);
            }
            Elitism::OneParentSurvives => {
                let end = self.original_count.min(self.entities.len());
                if end > 1 {
                    self.release_range(1..end);
                }
            }
            Elitism::RescoreParents => {
                let end = self.original_count.min(self.entities.len());
                for entity in self.entities[..end].iter_mut() {
                    entity.force_reevaluate();
                }
            }
            Elitism::None | Elitism::ParentsSurvive => {}
        }

        for entity in self.entities.iter_mut() {
            Self::ready(entity)?;
        }

        self.sort_descending();

        let stable_size = self.settings.stable_size;
        while self.entities.len() > stable_size {
            let trimmed = self
                .entities
                .pop()
                .expect("len > stable_size implies at least one element");
            self.release(trimmed);
        }

        if let Some(handler) = self.settings.fitness_handler.clone() {
            for entity in &self.entities {
                handler(entity);
            }
        }

        Ok(())
    }

    fn migration_phase(
        &mut self,
        migration_selector: &Arc<Mutex<dyn MigrationSelector<M>>>,
        gateway: Option<&MigrationGateway<M>>,
    ) -> Result<()> {
        if let Some(gateway) = gateway {
            if random::random_prob(self.settings.migration_ratio)? {
                let picked = migration_selector.lock().unwrap().next(self);
                if let Some(idx) = picked {
                    let entity = self.entities.remove(idx);
                    let migrant = Migrant::new(gateway.host_id, self.island_id, entity);
                    tracing::debug!(
                        island = ?self.island_id,
                        generation = self.generation,
                        "migrant dispatched"
                    );
                    let _ = gateway.sender.send(migrant);
                }
            }
        }

        while let Ok(migrant) = self.inbound_rx.try_recv() {
            if migrant.source_island != self.island_id {
                tracing::debug!(
                    island = ?self.island_id,
                    generation = self.generation,
                    source = ?migrant.source_island,
                    "migrant received"
                );
                self.entities.push(migrant.entity);
            }
        }
        Ok(())
    }

    fn release(&mut self, mut entity: Entity<M>) {
        entity.mark_as_free();
        let _ = self.free_pool.push(entity);
    }

    fn release_range(&mut self, range: std::ops::Range<usize>) {
        let drained: Vec<Entity<M>> = self.entities.drain(range).collect();
        for entity in drained {
            self.release(entity);
        }
    }

    /// Pops a reusable entity out of the free pool and re-marks it
    /// `Created`, or returns `None` if the pool is empty.
    pub fn acquire_from_pool(&self) -> Option<Entity<M>> {
        self.free_pool.pop().map(|mut entity| {
            entity
                .mark_as_created()
                .expect("entities only enter the free pool via mark_as_free");
            entity
        })
    }

    pub fn free_pool_len(&self) -> usize {
        self.free_pool.len()
    }
}
