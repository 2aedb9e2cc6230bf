//! Crossover and mutation operator plug points (§4.6).

use crate::entity::{Entity, EntityModel};
use evo_error::Result;

/// Applies a crossover in place to two freshly `copy_from`'d children.
/// Implementations operate chromosome-by-chromosome via
/// [`crate::chromosome::Chromosome::swap_range`]; a shape mismatch between
/// the two parents' DNA surfaces as [`evo_error::Error::ShapeMismatch`].
pub trait CrossoverOp<M: EntityModel>: Send {
    fn cross(&self, son: &mut Entity<M>, daughter: &mut Entity<M>) -> Result<()>;
}

/// Mutates a freshly `copy_from`'d child in place.
pub trait MutationOp<M: EntityModel>: Send {
    fn mutate(&self, child: &mut Entity<M>) -> Result<()>;
}
