//! Concrete [`evo_core::CrossoverOp`] strategies (§4.6).

pub mod double_point;
pub mod mixing;
pub mod single_point;

pub use double_point::DoublePointCrossover;
pub use mixing::MixingCrossover;
pub use single_point::SinglePointCrossover;

use evo_core::{Dna, Entity, EntityModel};
use evo_error::{Error, Result};

/// Runs `f` over every `(son, daughter)` chromosome pair, matched by name in
/// DNA-iteration order. Both entities must carry the same chromosome names
/// in the same order — true for any pair reinitialised from parents of the
/// same model — otherwise this returns [`Error::ShapeMismatch`].
pub(crate) fn zip_dna_mut<M, F>(son: &mut Entity<M>, daughter: &mut Entity<M>, mut f: F) -> Result<()>
where
    M: EntityModel,
    F: FnMut(&mut evo_core::Chromosome, &mut evo_core::Chromosome) -> Result<()>,
{
    let son_dna: &mut Dna = son
        .dna_mut()
        .ok_or_else(|| Error::disposed("son has no dna to cross"))?;
    let names: Vec<String> = son_dna.iter().map(|(name, _)| name.to_string()).collect();

    for name in names {
        let daughter_dna: &mut Dna = daughter
            .dna_mut()
            .ok_or_else(|| Error::disposed("daughter has no dna to cross"))?;
        let Some(daughter_chromosome) = daughter_dna.get_mut(&name) else {
            return Err(Error::shape_mismatch(format!(
                "daughter is missing chromosome {name:?} present on son"
            )));
        };
        // SAFETY-free approach: re-borrow son's dna per-iteration since the
        // name list was snapshotted up front and son's shape never changes
        // mid-loop.
        let son_dna: &mut Dna = son
            .dna_mut()
            .ok_or_else(|| Error::disposed("son has no dna to cross"))?;
        let son_chromosome = son_dna
            .get_mut(&name)
            .expect("name was read from this same dna moments ago");
        f(son_chromosome, daughter_chromosome)?;
    }
    Ok(())
}
