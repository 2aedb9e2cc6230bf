use evo_core::{random, Entity, EntityModel, MutationOp};
use evo_error::Result;

/// Picks one chromosome and one gene within it, and replaces that gene with
/// a fresh, uniformly random allele (§4.6).
pub struct SingleRandomMutation;

impl SingleRandomMutation {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SingleRandomMutation {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> MutationOp<M> for SingleRandomMutation {
    fn mutate(&self, child: &mut Entity<M>) -> Result<()> {
        let Some(dna) = child.dna_mut() else {
            return Ok(());
        };
        if dna.is_empty() {
            return Ok(());
        }
        let chromosome_index = random::next_int_max(dna.len() as i64) as usize;
        let Some((_, chromosome)) = dna.iter_mut().nth(chromosome_index) else {
            return Ok(());
        };
        if chromosome.length() == 0 {
            return Ok(());
        }
        let gene_index = random::next_int_max(chromosome.length() as i64) as usize;
        chromosome.mutate_random(gene_index)
    }
}
