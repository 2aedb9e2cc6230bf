use evo_core::{random, CrossoverOp, Entity, EntityModel};
use evo_error::Result;

use super::zip_dna_mut;

/// Double-point crossover (§4.6): two distinct cuts `c1 < c2` are drawn, and
/// the middle segment `[c1, c2)` is swapped between son and daughter, so the
/// son keeps the mother's head and tail but borrows the father's middle.
pub struct DoublePointCrossover;

impl DoublePointCrossover {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DoublePointCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> CrossoverOp<M> for DoublePointCrossover {
    fn cross(&self, son: &mut Entity<M>, daughter: &mut Entity<M>) -> Result<()> {
        zip_dna_mut(son, daughter, |mother_chromosome, father_chromosome| {
            let length = mother_chromosome.length();
            if length < 3 {
                return Ok(());
            }
            let first = random::next_int_max(length as i64 - 1) as usize;
            let second = random::next_int_range(first as i64 + 1, length as i64) as usize;
            mother_chromosome.swap_range(father_chromosome, first, second)
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
    fn double_point_crossover_preserves_head_and_tail() {
        random::set_seed(5);
        let op = DoublePointCrossover::new();
        let mut son = entity_with(vec![1, 2, 3, 4, 5, 6]);
        let mut daughter = entity_with(vec![10, 20, 30, 40, 50, 60]);
        op.cross(&mut son, &mut daughter).unwrap();

        if let Some(Chromosome::Int(son_genes)) = son.dna().and_then(|d| d.get("genes")) {
            assert_eq!(son_genes.genes()[0], 1);
            assert_eq!(son_genes.genes()[5], 6);
        } else {
            panic!("son chromosome missing");
        }
    }

    #[test]
    fn too_short_chromosomes_are_left_untouched() {
        random::set_seed(6);
        let op = DoublePointCrossover::new();
        let mut son = entity_with(vec![1, 2]);
        let mut daughter = entity_with(vec![9, 9]);
        op.cross(&mut son, &mut daughter).unwrap();

        if let Some(Chromosome::Int(son_genes)) = son.dna().and_then(|d| d.get("genes")) {
            assert_eq!(son_genes.genes(), &[1, 2]);
        }
    }
}
