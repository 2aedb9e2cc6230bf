use evo_core::{random, EntityModel, Population, SelectOne, SelectTwo};

fn better_of_two<M: EntityModel>(population: &Population<M>, excluded: Option<i64>) -> usize {
    let len = population.len() as i64;
    let (a, b) = match excluded {
        Some(e) => {
            let a = random::next_except(len, &[e]).expect("excluded index is in range");
            let b = loop {
                let candidate = random::next_except(len, &[e]).expect("excluded index is in range");
                if candidate != a {
                    break candidate;
                }
            };
            (a, b)
        }
        None => {
            let a = random::next_int_max(len);
            let b = loop {
                let candidate = random::next_int_max(len);
                if candidate != a {
                    break candidate;
                }
            };
            (a, b)
        }
    };
    let entities = population.entities();
    if entities[a as usize].fitness() >= entities[b as usize].fitness() {
        a as usize
    } else {
        b as usize
    }
}

/// Samples two entities uniformly and keeps the fitter of the pair.
#[derive(Default)]
pub struct BestOfTwoSelectOne;

impl BestOfTwoSelectOne {
    pub fn new() -> Self {
        Self
    }
}

impl<M: EntityModel> SelectOne<M> for BestOfTwoSelectOne {
    fn init(&mut self, _population: &Population<M>) {}

    fn next(&mut self, population: &Population<M>) -> Option<usize> {
        if population.len() < 2 {
            return None;
        }
        Some(better_of_two(population, None))
    }
}

/// Applies [`better_of_two`] twice, once per parent, re-drawing the father's
/// tournament until it differs from the chosen mother.
#[derive(Default)]
pub struct BestOfTwoSelectTwo;

impl BestOfTwoSelectTwo {
    pub fn new() -> Self {
        Self
    }
}

impl<M: EntityModel> SelectTwo<M> for BestOfTwoSelectTwo {
    fn init(&mut self, _population: &Population<M>) {}

    fn next(&mut self, population: &Population<M>) -> Option<(usize, usize)> {
        if population.len() < 2 {
            return None;
        }
        let mother = better_of_two(population, None);
        let father = if population.len() == 2 {
            1 - mother
        } else {
            better_of_two(population, Some(mother as i64))
        };
        Some((mother, father))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_core::{BoolChromosome, Chromosome, Dna, Elitism, Entity, Evolution, Genesis};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct RankedModel {
        fitness: f64,
    }

    impl EntityModel for RankedModel {
        type Phenotype = f64;

        fn create_dna(&self) -> evo_core::Result<Dna> {
            let mut dna = Dna::new();
            dna.add("bits", Chromosome::Bool(BoolChromosome::new(1)))?;
            Ok(dna)
        }

        fn load_from_dna(&self, _dna: &Dna) -> evo_core::Result<f64> {
            Ok(self.fitness)
        }

        fn evaluate_fitness(&self, phenotype: &f64) -> evo_core::Result<f64> {
            Ok(*phenotype)
        }
    }

    fn ranked_population() -> evo_core::Population<RankedModel> {
        let entities: Vec<Entity<RankedModel>> = (0..8)
            .map(|i| Entity::new(RankedModel { fitness: i as f64 }))
            .collect();
        let settings = evo_core::PopulationSettings {
            stable_size: 8,
            max_generations: 1,
            steady_state: false,
            evolution_event_interval: 10,
            crossover_ratio: 0.0,
            mutation_ratio: 0.0,
            migration_ratio: 0.0,
            genesis: Genesis::Soup(entities),
            evolution: Evolution::Darwin,
            elitism: Elitism::None,
            max_adaption_iterations: 0,
            free_pool_capacity: 10,
            select_one: Arc::new(Mutex::new(BestOfTwoSelectOne::new())),
            select_two: Arc::new(Mutex::new(BestOfTwoSelectTwo::new())),
            migration_selector: Arc::new(Mutex::new(crate::RandomMigrationSelector::new())),
            crossover: None,
            mutate: None,
            adaption: None,
            generation_handler: None,
            fitness_handler: None,
        };
        evo_core::Population::new(RankedModel { fitness: 0.0 }, settings).unwrap()
    }

    #[test]
    fn select_two_never_returns_the_same_parent_twice() {
        evo_core::random::set_seed(9);
        let population = ranked_population();
        let mut selector = BestOfTwoSelectTwo::new();
        for _ in 0..200 {
            let (mother, father) = SelectTwo::next(&mut selector, &population).unwrap();
            assert_ne!(mother, father);
        }
    }
}
