use evo_core::{random, Direction, Entity, EntityModel, MutationOp};
use evo_error::Result;

const DRIFT_PROBABILITY: f64 = 0.47;

/// Picks a single drift direction for the whole child, then drifts every
/// gene in every chromosome independently with probability 0.47 (§4.6).
pub struct MultiDriftMutation;

impl MultiDriftMutation {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MultiDriftMutation {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> MutationOp<M> for MultiDriftMutation {
    fn mutate(&self, child: &mut Entity<M>) -> Result<()> {
        let direction = if random::bool(0.5) {
            Direction::Up
        } else {
            Direction::Down
        };
        let Some(dna) = child.dna_mut() else {
            return Ok(());
        };
        for (_, chromosome) in dna.iter_mut() {
            for gene_index in 0..chromosome.length() {
                if random::bool(DRIFT_PROBABILITY) {
                    chromosome.mutate_drift(gene_index, direction)?;
                }
            }
        }
        Ok(())
    }
}
