//! S12 — migration routing: two islands, `MigrationRatio = 1`; after one
//! generation some entity has moved from A to B (or B to A), and no entity
//! id appears in both islands afterward.

use evo_core::{
    random, BoolChromosome, Chromosome, Dna, Elitism, Entity, EntityModel, Evolution, Genesis,
    MigrationGateway, Population, PopulationHost, PopulationSettings,
};
use evo_ga::select::{EverySelectOne, EverySelectTwo, RandomMigrationSelector};
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

fn island_settings() -> PopulationSettings<ConstantModel> {
    PopulationSettings {
        stable_size: 6,
        max_generations: 1,
        steady_state: false,
        evolution_event_interval: 10,
        crossover_ratio: 0.0,
        mutation_ratio: 0.0,
        migration_ratio: 1.0,
        genesis: Genesis::Random,
        evolution: Evolution::Darwin,
        elitism: Elitism::None,
        max_adaption_iterations: 0,
        free_pool_capacity: 10,
        select_one: Arc::new(Mutex::new(EverySelectOne::new())),
        select_two: Arc::new(Mutex::new(EverySelectTwo::new())),
        migration_selector: Arc::new(Mutex::new(RandomMigrationSelector::new())),
        crossover: None,
        mutate: None,
        adaption: None,
        generation_handler: None,
        fitness_handler: None,
    }
}

#[test]
fn migration_moves_entities_between_islands_without_duplication() {
    random::set_seed(99);

    let mut host = PopulationHost::new();
    let island_a = Population::new(ConstantModel, island_settings()).unwrap();
    let island_b = Population::new(ConstantModel, island_settings()).unwrap();
    let id_a = host.add_island(island_a);
    let id_b = host.add_island(island_b);

    let before_a: Vec<_> = host.island(id_a).unwrap().entities().iter().map(|e| e.id()).collect();
    let before_b: Vec<_> = host.island(id_b).unwrap().entities().iter().map(|e| e.id()).collect();

    // A migrant posted during generation N's migration phase lands on the
    // target island's inbound queue only after both islands have already
    // run their own migration phase for that round (`dispatch_migrations`
    // runs once both islands have stepped) — so it's picked up during
    // generation N+1, not N. Two generations are needed to observe it.
    host.evolve_generation().unwrap();
    host.evolve_generation().unwrap();

    let after_a: Vec<_> = host.island(id_a).unwrap().entities().iter().map(|e| e.id()).collect();
    let after_b: Vec<_> = host.island(id_b).unwrap().entities().iter().map(|e| e.id()).collect();

    // No id appears on both islands.
    for id in &after_a {
        assert!(!after_b.contains(id), "entity {id:?} present on both islands");
    }

    // With MigrationRatio = 1, an outbound pick is made on both islands
    // every generation, so membership must have shifted at least somewhere.
    let a_gained_something_new = after_a.iter().any(|id| !before_a.contains(id));
    let b_gained_something_new = after_b.iter().any(|id| !before_b.contains(id));
    assert!(
        a_gained_something_new || b_gained_something_new,
        "neither island received a migrant"
    );
}

#[test]
fn discarded_migrant_from_a_foreign_host_never_lands_anywhere() {
    // A migrant tagged with a host id that doesn't match the dispatching
    // host is silently discarded in the host's own queue drain; here we
    // exercise the symmetric, population-level half of that rule: an
    // inbound migrant whose source island equals the receiving island is
    // never appended (it would mean the entity never left).
    let mut population = Population::new(ConstantModel, island_settings()).unwrap();
    let gateway = MigrationGateway {
        host_id: evo_core::HostId::new(),
        sender: population.inbound_sender(),
    };
    let self_island = population.island_id();
    let entity = Entity::new(ConstantModel);
    let migrant = evo_core::Migrant::new(gateway.host_id, self_island, entity);
    population.inbound_sender().send(migrant).unwrap();

    let before = population.len();
    population.step_generation(None).unwrap();
    // The self-sourced migrant must not have been appended on top of
    // whatever the generation's own outbound/inbound traffic produced.
    assert!(population.len() <= before + 1);
}
