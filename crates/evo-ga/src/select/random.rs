use evo_core::{random, EntityModel, MigrationSelector, Population, SelectOne, SelectTwo};

/// Uniform independent picks, terminating after `OriginalCount × MutationRatio`
/// successful draws (§4.6).
#[derive(Default)]
pub struct RandomSelectOne {
    remaining: usize,
}

impl RandomSelectOne {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> SelectOne<M> for RandomSelectOne {
    fn init(&mut self, population: &Population<M>) {
        self.remaining =
            (population.original_count() as f64 * population.settings().mutation_ratio).round() as usize;
    }

    fn next(&mut self, population: &Population<M>) -> Option<usize> {
        if self.remaining == 0 || population.is_empty() {
            return None;
        }
        self.remaining -= 1;
        Some(random::next_int_max(population.len() as i64) as usize)
    }
}

/// Uniform independent pair picks, using `nextExcept` to avoid self-pairing.
/// Terminates after `OriginalCount × CrossoverRatio` successful draws (§4.6,
/// scenario S2).
#[derive(Default)]
pub struct RandomSelectTwo {
    remaining: usize,
}

impl RandomSelectTwo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> SelectTwo<M> for RandomSelectTwo {
    fn init(&mut self, population: &Population<M>) {
        self.remaining =
            (population.original_count() as f64 * population.settings().crossover_ratio).round() as usize;
    }

    fn next(&mut self, population: &Population<M>) -> Option<(usize, usize)> {
        if self.remaining == 0 || population.len() < 2 {
            return None;
        }
        self.remaining -= 1;
        let mother = random::next_int_max(population.len() as i64);
        let father = random::next_except(population.len() as i64, &[mother])
            .expect("mother is a single, in-range excluded value");
        Some((mother as usize, father as usize))
    }
}

/// Picks one local entity uniformly at random for outbound migration.
#[derive(Default)]
pub struct RandomMigrationSelector;

impl RandomMigrationSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<M: EntityModel> MigrationSelector<M> for RandomMigrationSelector {
    fn init(&mut self, _population: &Population<M>) {}

    fn next(&mut self, population: &Population<M>) -> Option<usize> {
        if population.is_empty() {
            return None;
        }
        Some(random::next_int_max(population.len() as i64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_core::{BoolChromosome, Chromosome, Dna, Elitism, Entity, Evolution, Genesis};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct ConstantModel;

    impl EntityModel for ConstantModel {
        type Phenotype = ();

        fn create_dna(&self) -> evo_core::Result<Dna> {
            let mut dna = Dna::new();
            dna.add("bits", Chromosome::Bool(BoolChromosome::new(4)))?;
            Ok(dna)
        }

        fn load_from_dna(&self, _dna: &Dna) -> evo_core::Result<()> {
            Ok(())
        }

        fn evaluate_fitness(&self, _phenotype: &()) -> evo_core::Result<f64> {
            Ok(1.0)
        }
    }

    fn settings_for(stable_size: usize, crossover_ratio: f64) -> evo_core::PopulationSettings<ConstantModel> {
        evo_core::PopulationSettings {
            stable_size,
            max_generations: 1,
            steady_state: false,
            evolution_event_interval: 10,
            crossover_ratio,
            mutation_ratio: 0.0,
            migration_ratio: 0.0,
            genesis: Genesis::Random,
            evolution: Evolution::Darwin,
            elitism: Elitism::None,
            max_adaption_iterations: 0,
            free_pool_capacity: 10,
            select_one: Arc::new(Mutex::new(RandomSelectOne::new())),
            select_two: Arc::new(Mutex::new(RandomSelectTwo::new())),
            migration_selector: Arc::new(Mutex::new(RandomMigrationSelector::new())),
            crossover: None,
            mutate: None,
            adaption: None,
            generation_handler: None,
            fitness_handler: None,
        }
    }

    #[test]
    fn select_two_random_draws_exactly_ratio_times_original_count() {
        let mut population =
            evo_core::Population::new(ConstantModel, settings_for(10, 0.5)).unwrap();
        // Primes original_count = 10 without mutating the entity list (no
        // crossover/mutate operator is wired up).
        population.step_generation(None).unwrap();

        let mut selector = RandomSelectTwo::new();
        SelectTwo::init(&mut selector, &population);
        let mut draws = 0;
        while SelectTwo::next(&mut selector, &population).is_some() {
            draws += 1;
        }
        assert_eq!(draws, 5);
    }

    #[test]
    fn select_two_random_never_self_pairs() {
        let mut population =
            evo_core::Population::new(ConstantModel, settings_for(10, 1.0)).unwrap();
        population.step_generation(None).unwrap();

        let mut selector = RandomSelectTwo::new();
        SelectTwo::init(&mut selector, &population);
        while let Some((mother, father)) = SelectTwo::next(&mut selector, &population) {
            assert_ne!(mother, father);
        }
    }

    #[test]
    fn entity_accessor_smoke_test() {
        let entity: Entity<ConstantModel> = Entity::new(ConstantModel);
        assert!(entity.dna().is_none());
    }
}
