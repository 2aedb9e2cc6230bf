//! One candidate solution: a DNA bundle, a cached fitness, and a lifecycle
//! state machine (§3, §4.4).

use crate::dna::Dna;
use evo_error::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// A process-wide monotonically increasing entity identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The entity lifecycle (§4.4). Transitions are monotonic forward except
/// [`EntityModel`]-independent reuse (`Free → Created`) and release
/// (any alive state → `Free`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityState {
    Created,
    Initialised,
    Loaded,
    Ready,
    Free,
}

/// The virtual hooks a concrete problem domain implements to participate in
/// the entity lifecycle. `Phenotype` is the rebuilt-from-DNA representation
/// the fitness function actually evaluates (e.g. a decoded parameter set, a
/// constructed distance network).
pub trait EntityModel: Clone {
    type Phenotype: Clone;

    fn create_dna(&self) -> Result<Dna>;
    fn load_from_dna(&self, dna: &Dna) -> Result<Self::Phenotype>;
    fn evaluate_fitness(&self, phenotype: &Self::Phenotype) -> Result<f64>;

    /// Fires once, on the `Initialised` transition.
    fn on_init(&self, _dna: &Dna) {}
    /// Fires once, on the `Loaded` transition.
    fn on_load(&self, _phenotype: &Self::Phenotype) {}
}

/// One candidate solution, parameterized by the domain's [`EntityModel`].
#[derive(Clone, Debug)]
pub struct Entity<M: EntityModel> {
    id: EntityId,
    model: M,
    dna: Option<Dna>,
    phenotype: Option<M::Phenotype>,
    fitness: Option<f64>,
    state: EntityState,
}

impl<M: EntityModel> Entity<M> {
    pub fn new(model: M) -> Self {
        Entity {
            id: EntityId::next(),
            model,
            dna: None,
            phenotype: None,
            fitness: None,
            state: EntityState::Created,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn dna(&self) -> Option<&Dna> {
        self.dna.as_ref()
    }

    pub fn dna_mut(&mut self) -> Option<&mut Dna> {
        self.dna.as_mut()
    }

    pub fn phenotype(&self) -> Option<&M::Phenotype> {
        self.phenotype.as_ref()
    }

    fn guard_not_free(&self) -> Result<()> {
        if self.state == EntityState::Free {
            return Err(Error::disposed("entity has been marked free"));
        }
        Ok(())
    }

    /// `Created → Initialised`. A no-op if already past `Created` (besides
    /// `Free`, which is rejected).
    pub fn init_entity(&mut self) -> Result<()> {
        self.guard_not_free()?;
        if self.state == EntityState::Created {
            let dna = self.model.create_dna()?;
            self.model.on_init(&dna);
            self.dna = Some(dna);
            self.state = EntityState::Initialised;
        }
        Ok(())
    }

    /// `Initialised → Loaded`. A no-op if already past `Initialised`.
    pub fn load_entity(&mut self) -> Result<()> {
        self.guard_not_free()?;
        if self.state == EntityState::Initialised {
            let dna = self
                .dna
                .as_ref()
                .ok_or_else(|| Error::invalid_configuration("load_entity called without dna"))?;
            let phenotype = self.model.load_from_dna(dna)?;
            self.model.on_load(&phenotype);
            self.phenotype = Some(phenotype);
            self.state = EntityState::Loaded;
        }
        Ok(())
    }

    /// `Loaded → Ready`. Idempotent: once `Ready`, returns the cached score
    /// without invoking [`EntityModel::evaluate_fitness`] again.
    pub fn ensure_fitness(&mut self) -> Result<f64> {
        self.guard_not_free()?;
        if self.state == EntityState::Ready {
            return Ok(self
                .fitness
                .expect("Ready state always carries a cached fitness"));
        }
        if self.state != EntityState::Loaded {
            return Err(Error::invalid_configuration(
                "ensure_fitness requires a loaded entity",
            ));
        }
        let phenotype = self
            .phenotype
            .as_ref()
            .expect("Loaded state always carries a phenotype");
        let score = self.model.evaluate_fitness(phenotype)?;
        self.fitness = Some(score);
        self.state = EntityState::Ready;
        Ok(score)
    }

    /// Re-derives the phenotype from the current DNA and recomputes fitness,
    /// regardless of the current state. Used by adaption operators that
    /// tweak alleles directly on [`Entity::dna_mut`] and need a fresh score
    /// for the resulting candidate.
    pub fn reevaluate(&mut self) -> Result<f64> {
        self.guard_not_free()?;
        let dna = self
            .dna
            .as_ref()
            .ok_or_else(|| Error::invalid_configuration("reevaluate called without dna"))?;
        let phenotype = self.model.load_from_dna(dna)?;
        let score = self.model.evaluate_fitness(&phenotype)?;
        self.phenotype = Some(phenotype);
        self.fitness = Some(score);
        self.state = EntityState::Ready;
        Ok(score)
    }

    /// Forces `Ready` with a given score; idempotent if already `Ready` with
    /// that score, and overwrites an existing cached score otherwise.
    pub fn set_fitness(&mut self, score: f64) {
        self.fitness = Some(score);
        self.state = EntityState::Ready;
    }

    /// Any alive state → `Free`, discarding DNA, phenotype, and fitness.
    pub fn mark_as_free(&mut self) {
        self.dna = None;
        self.phenotype = None;
        self.fitness = None;
        self.state = EntityState::Free;
    }

    /// `Free → Created`, for reuse out of the free pool.
    pub fn mark_as_created(&mut self) -> Result<()> {
        if self.state != EntityState::Free {
            return Err(Error::invalid_configuration(
                "mark_as_created requires a free entity",
            ));
        }
        self.state = EntityState::Created;
        Ok(())
    }

    /// Deep-copies `other`'s model, DNA, phenotype, fitness, and state into
    /// `self`, keeping `self`'s own id.
    pub fn copy_from(&mut self, other: &Entity<M>) {
        self.model = other.model.clone();
        self.dna = other.dna.clone();
        self.phenotype = other.phenotype.clone();
        self.fitness = other.fitness;
        self.state = other.state;
    }

    /// Copies `source`'s model and DNA, discards any phenotype/fitness, and
    /// enters `Initialised` — used when crossover or mutation produces a
    /// child whose DNA must be re-evaluated from scratch rather than
    /// inheriting the parent's cached fitness.
    pub(crate) fn reinitialise_from(&mut self, source: &Entity<M>) {
        self.model = source.model.clone();
        self.dna = source.dna.clone();
        self.phenotype = None;
        self.fitness = None;
        self.state = EntityState::Initialised;
    }

    /// If `Ready`, drops the cached fitness and steps back to `Loaded` so
    /// the next `ensure_fitness` call recomputes it. Used by the
    /// `RescoreParents` elitism mode.
    pub(crate) fn force_reevaluate(&mut self) {
        if self.state == EntityState::Ready {
            self.fitness = None;
            self.state = EntityState::Loaded;
        }
    }

    /// Deep-copies `self` and assigns the clone a fresh id.
    pub fn clone_with_new_id(&self) -> Entity<M> {
        Entity {
            id: EntityId::next(),
            model: self.model.clone(),
            dna: self.dna.clone(),
            phenotype: self.phenotype.clone(),
            fitness: self.fitness,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::{BoolChromosome, Chromosome};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct CountingModel {
        evaluations: Rc<Cell<u32>>,
    }

    impl EntityModel for CountingModel {
        type Phenotype = bool;

        fn create_dna(&self) -> Result<Dna> {
            let mut dna = Dna::new();
            dna.add("bits", Chromosome::Bool(BoolChromosome::new(4)))?;
            Ok(dna)
        }

        fn load_from_dna(&self, _dna: &Dna) -> Result<bool> {
            Ok(true)
        }

        fn evaluate_fitness(&self, _phenotype: &bool) -> Result<f64> {
            self.evaluations.set(self.evaluations.get() + 1);
            Ok(42.0)
        }
    }

    fn counting_entity() -> Entity<CountingModel> {
        Entity::new(CountingModel {
            evaluations: Rc::new(Cell::new(0)),
        })
    }

    #[test]
    fn lifecycle_progresses_through_every_state() {
        let mut entity = counting_entity();
        assert_eq!(entity.state(), EntityState::Created);
        entity.init_entity().unwrap();
        assert_eq!(entity.state(), EntityState::Initialised);
        entity.load_entity().unwrap();
        assert_eq!(entity.state(), EntityState::Loaded);
        let score = entity.ensure_fitness().unwrap();
        assert_eq!(score, 42.0);
        assert_eq!(entity.state(), EntityState::Ready);
    }

    #[test]
    fn ensure_fitness_is_idempotent() {
        let mut entity = counting_entity();
        entity.init_entity().unwrap();
        entity.load_entity().unwrap();
        let model = entity.model.clone();

        entity.ensure_fitness().unwrap();
        entity.ensure_fitness().unwrap();
        entity.ensure_fitness().unwrap();

        assert_eq!(model.evaluations.get(), 1);
    }

    #[test]
    fn reevaluate_picks_up_a_direct_dna_edit() {
        let mut entity = counting_entity();
        entity.init_entity().unwrap();
        entity.load_entity().unwrap();
        entity.ensure_fitness().unwrap();

        // evaluate_fitness on CountingModel ignores the phenotype, so this
        // only proves reevaluate bumps the counter and stays Ready — the
        // DNA-sensitive path is exercised by the evo-ga adaption ops.
        entity.reevaluate().unwrap();
        assert_eq!(entity.model.evaluations.get(), 2);
        assert_eq!(entity.state(), EntityState::Ready);
    }

    #[test]
    fn mark_as_free_then_created_resets_lifecycle() {
        let mut entity = counting_entity();
        entity.init_entity().unwrap();
        entity.mark_as_free();
        assert_eq!(entity.state(), EntityState::Free);
        assert!(entity.dna().is_none());

        entity.mark_as_created().unwrap();
        assert_eq!(entity.state(), EntityState::Created);
    }

    #[test]
    fn operations_on_a_free_entity_are_disposed_errors() {
        let mut entity = counting_entity();
        entity.mark_as_free();
        assert!(matches!(
            entity.init_entity(),
            Err(Error::Disposed { .. })
        ));
    }

    #[test]
    fn clone_with_new_id_differs_from_original() {
        let entity = counting_entity();
        let clone = entity.clone_with_new_id();
        assert_ne!(entity.id(), clone.id());
    }
}
