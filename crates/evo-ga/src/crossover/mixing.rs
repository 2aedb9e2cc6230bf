use evo_core::{random, CrossoverOp, Entity, EntityModel};
use evo_error::Result;

use super::zip_dna_mut;

/// Mixing crossover (§4.6): each chromosome has roughly a 1-in-4 chance of
/// being swapped whole between son and daughter, independent of every other
/// chromosome. Within a chromosome it's all-or-nothing — no partial swap.
pub struct MixingCrossover;

impl MixingCrossover {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MixingCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> CrossoverOp<M> for MixingCrossover {
    fn cross(&self, son: &mut Entity<M>, daughter: &mut Entity<M>) -> Result<()> {
        zip_dna_mut(son, daughter, |son_chromosome, daughter_chromosome| {
            if random::next_int_max(4) == 0 {
                let length = son_chromosome.length();
                son_chromosome.swap_range(daughter_chromosome, 0, length)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_core::{random, BoolChromosome, Chromosome, Dna};

    #[derive(Clone)]
    struct TwoChromosomeModel {
        a: bool,
        b: bool,
    }

    impl EntityModel for TwoChromosomeModel {
        type Phenotype = ();

        fn create_dna(&self) -> evo_core::Result<Dna> {
            let mut dna = Dna::new();
            dna.add("a", Chromosome::Bool(BoolChromosome::from_genes(vec![self.a; 3])))?;
            dna.add("b", Chromosome::Bool(BoolChromosome::from_genes(vec![self.b; 3])))?;
            Ok(dna)
        }

        fn load_from_dna(&self, _dna: &Dna) -> evo_core::Result<()> {
            Ok(())
        }

        fn evaluate_fitness(&self, _phenotype: &()) -> evo_core::Result<f64> {
            Ok(0.0)
        }
    }

    fn entity_with(a: bool, b: bool) -> Entity<TwoChromosomeModel> {
        let mut entity = Entity::new(TwoChromosomeModel { a, b });
        entity.init_entity().unwrap();
        entity
    }

    #[test]
    fn each_chromosome_either_swaps_fully_or_not_at_all() {
        random::set_seed(13);
        let op = MixingCrossover::new();
        for _ in 0..50 {
            let mut son = entity_with(true, true);
            let mut daughter = entity_with(false, false);
            op.cross(&mut son, &mut daughter).unwrap();

            for name in ["a", "b"] {
                if let Some(Chromosome::Bool(c)) = son.dna().and_then(|d| d.get(name)) {
                    let genes = c.genes();
                    let all_true = genes.iter().all(|&g| g);
                    let all_false = genes.iter().all(|&g| !g);
                    assert!(all_true || all_false, "chromosome {name} was partially swapped");
                }
            }
        }
    }
}
