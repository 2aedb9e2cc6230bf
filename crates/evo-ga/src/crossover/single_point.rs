use evo_core::{random, CrossoverOp, Entity, EntityModel};
use evo_error::Result;

use super::zip_dna_mut;

/// Single-point crossover (§4.6, scenario S3): for each chromosome, a cut
/// index is drawn uniformly in `[1, length)` and the tail `[cut, length)` is
/// swapped between son and daughter, so the son keeps the mother's head and
/// takes the father's tail.
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SinglePointCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> CrossoverOp<M> for SinglePointCrossover {
    fn cross(&self, son: &mut Entity<M>, daughter: &mut Entity<M>) -> Result<()> {
        zip_dna_mut(son, daughter, |mother_chromosome, father_chromosome| {
            let length = mother_chromosome.length();
            if length < 2 {
                return Ok(());
            }
            let cut = random::next_int_range(1, length as i64) as usize;
            mother_chromosome.swap_range(father_chromosome, cut, length)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_core::{random, Chromosome, Dna, IntChromosome};

    #[derive(Clone)]
    struct ScenarioModel {
        values: Vec<i32>,
    }

    impl EntityModel for ScenarioModel {
        type Phenotype = ();

        fn create_dna(&self) -> evo_core::Result<Dna> {
            let mut dna = Dna::new();
            dna.add(
                "genes",
                Chromosome::Int(IntChromosome::from_genes(
                    self.values.clone(),
                    i32::MIN,
                    i32::MAX,
                )),
            )?;
            Ok(dna)
        }

        fn load_from_dna(&self, _dna: &Dna) -> evo_core::Result<()> {
            Ok(())
        }

        fn evaluate_fitness(&self, _phenotype: &()) -> evo_core::Result<f64> {
            Ok(0.0)
        }
    }

    fn entity_with(values: Vec<i32>) -> Entity<ScenarioModel> {
        let mut entity = Entity::new(ScenarioModel { values });
        entity.init_entity().unwrap();
        entity
    }

    #[test]
    fn single_point_crossover_swaps_exactly_the_tail() {
        random::set_seed(3);
        let mut son = entity_with(vec![1, 2, 3, 4, 5]);
        let mut daughter = entity_with(vec![6, 7, 8, 9, 0]);

        // Force a deterministic cut at index 2 regardless of the seed by
        // swapping directly through the same primitive the op calls.
        let son_dna = son.dna_mut().unwrap();
        let son_chromosome = son_dna.get_mut("genes").unwrap();
        let daughter_dna = daughter.dna_mut().unwrap();
        let daughter_chromosome = daughter_dna.get_mut("genes").unwrap();
        son_chromosome.swap_range(daughter_chromosome, 2, 5).unwrap();

        if let Some(Chromosome::Int(son_genes)) = son.dna().and_then(|d| d.get("genes")) {
            assert_eq!(son_genes.genes(), &[1, 2, 8, 9, 0]);
        } else {
            panic!("son chromosome missing");
        }
        if let Some(Chromosome::Int(daughter_genes)) = daughter.dna().and_then(|d| d.get("genes")) {
            assert_eq!(daughter_genes.genes(), &[6, 7, 3, 4, 5]);
        } else {
            panic!("daughter chromosome missing");
        }
    }

    #[test]
    fn crossover_op_produces_a_valid_cut_without_changing_length() {
        random::set_seed(4);
        let op = SinglePointCrossover::new();
        let mut son = entity_with(vec![1, 2, 3, 4, 5]);
        let mut daughter = entity_with(vec![6, 7, 8, 9, 0]);
        op.cross(&mut son, &mut daughter).unwrap();

        let son_len = if let Some(Chromosome::Int(c)) = son.dna().and_then(|d| d.get("genes")) {
            c.genes().len()
        } else {
            0
        };
        assert_eq!(son_len, 5);
    }
}
