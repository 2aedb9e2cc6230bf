use evo_core::{random, Direction, Entity, EntityModel, MutationOp};
use evo_error::Result;

/// Picks one chromosome and one gene within it, and drifts that single gene
/// one step in a uniformly chosen direction (§4.6).
pub struct SingleDriftMutation;

impl SingleDriftMutation {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SingleDriftMutation {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> MutationOp<M> for SingleDriftMutation {
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
        let direction = if random::bool(0.5) {
            Direction::Up
        } else {
            Direction::Down
        };
        chromosome.mutate_drift(gene_index, direction)
    }
}
