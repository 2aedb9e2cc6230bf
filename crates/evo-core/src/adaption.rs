//! Local-search ("adaption") post-pass over a generation (§4.7).

use crate::entity::{Entity, EntityModel};
use evo_error::Result;

/// Which entities an adaption pass touches, and whether an improvement
/// writes back into the genotype (Lamarckian) or only into the cached
/// fitness (Baldwinian). `Darwin` disables adaption entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Evolution {
    #[default]
    Darwin,
    LamarckParents,
    LamarckChildren,
    LamarckAll,
    BaldwinParents,
    BaldwinChildren,
    BaldwinAll,
}

impl Evolution {
    pub fn is_darwin(self) -> bool {
        matches!(self, Evolution::Darwin)
    }

    /// `true` if an improvement should be written back into the genotype
    /// rather than just the cached fitness.
    pub fn is_lamarckian(self) -> bool {
        matches!(
            self,
            Evolution::LamarckParents | Evolution::LamarckChildren | Evolution::LamarckAll
        )
    }

    /// Whether index `i` (against an `original_count`-sized parent prefix)
    /// falls within this variant's target range.
    pub fn applies_to(self, index: usize, original_count: usize) -> bool {
        match self {
            Evolution::Darwin => false,
            Evolution::LamarckParents | Evolution::BaldwinParents => index < original_count,
            Evolution::LamarckChildren | Evolution::BaldwinChildren => index >= original_count,
            Evolution::LamarckAll | Evolution::BaldwinAll => true,
        }
    }
}

/// Which parents survive the crossover/mutation phases before trimming to
/// `StableSize` (§4.8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Elitism {
    #[default]
    None,
    ParentsSurvive,
    OneParentSurvives,
    ParentsDie,
    RescoreParents,
}

/// The outcome of one [`AdaptionOp::optimise`] call: the number of steps the
/// search actually took and the locally-improved candidate it settled on.
/// Callers decide whether to write `adapted` back into the population
/// (Lamarckian) or only copy its fitness onto the original entity
/// (Baldwinian) — the operator itself is agnostic to that choice.
pub struct AdaptionOutcome<M: EntityModel> {
    pub iterations: u32,
    pub adapted: Entity<M>,
}

/// A stateful local-search sub-optimizer (§4.7): hill climbing, simulated
/// annealing, steepest ascent.
pub trait AdaptionOp<M: EntityModel>: Send {
    /// Locally improves `best`, running for at most `max_iterations` steps
    /// or until the operator's own termination condition fires (a step-size
    /// underflow, for instance — that is normal termination, not an error).
    fn optimise(&mut self, best: &Entity<M>, max_iterations: u32) -> Result<AdaptionOutcome<M>>;
}
