use evo_core::{random, Direction, Entity, EntityModel, MutationOp};
use evo_error::Result;

/// Visits every gene in every chromosome and, independently for each, rolls
/// a three-way choice: drift up, drift down, or leave untouched (§4.6).
pub struct MultiRandomMutation;

impl MultiRandomMutation {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MultiRandomMutation {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> MutationOp<M> for MultiRandomMutation {
    fn mutate(&self, child: &mut Entity<M>) -> Result<()> {
        let Some(dna) = child.dna_mut() else {
            return Ok(());
        };
        for (_, chromosome) in dna.iter_mut() {
            for gene_index in 0..chromosome.length() {
                match random::next_int_max(3) {
                    0 => chromosome.mutate_drift(gene_index, Direction::Up)?,
                    1 => chromosome.mutate_drift(gene_index, Direction::Down)?,
                    _ => {}
                }
            }
        }
        Ok(())
    }
}
