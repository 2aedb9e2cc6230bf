//! Chromosome variants (§3, §4.2).
//!
//! The source material models chromosomes through a deep inheritance
//! hierarchy (a base chromosome type specialized per gene primitive, with a
//! "locking" decorator layered on top). Per the redesign notes, that becomes
//! a tagged union: [`Chromosome`] is a sum type over five concrete structs,
//! each implementing the shared [`ChromosomeOps`] surface. Locking is not a
//! separate wrapper type — every concrete chromosome carries its own lazily
//! allocated lock bitset, which is simpler in Rust than a generic decorator
//! and gives the same short-circuiting behavior (see DESIGN.md).

mod bool_chromosome;
mod char_chromosome;
mod double_chromosome;
mod int_chromosome;

pub use bool_chromosome::BoolChromosome;
pub use char_chromosome::CharChromosome;
pub use double_chromosome::DoubleChromosome;
pub use int_chromosome::{Integer, IntegerChromosome};

use evo_error::{Error, Result};

/// A chromosome, parameterized over its short-integer variant so call sites
/// that only ever deal with one lattice of integer width don't have to spell
/// out the generic.
pub type ShortChromosome = IntegerChromosome<i16>;
pub type IntChromosome = IntegerChromosome<i32>;

/// Direction of a drift mutation (§4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The operations every chromosome variant shares (§4.2): indexed
/// length/seeding/mutation plus a per-gene lock bit. `mutate_drift` and
/// `mutate_random` are no-ops (not errors) when the target gene is locked —
/// locking short-circuits the mutator rather than rejecting the call.
pub trait ChromosomeOps: Clone + PartialEq {
    fn length(&self) -> usize;

    /// Broadcast-seed every unlocked gene. For [`BoolChromosome`], `p` is the
    /// Bernoulli probability of `true`; every other variant ignores `p`'s
    /// value (beyond validating it's in `[0, 1]`) and assigns uniformly
    /// within its declared domain.
    fn seed(&mut self, p: f64) -> Result<()>;

    fn mutate_drift(&mut self, index: usize, direction: Direction) -> Result<()>;
    fn mutate_random(&mut self, index: usize) -> Result<()>;

    fn lock(&mut self, index: usize, locked: bool) -> Result<()>;
    fn is_locked(&self, index: usize) -> bool;

    /// Reallocates gene (and lock) storage to `new_len`, copying
    /// `min(old, new)` entries and filling any new slots with the variant's
    /// default allele.
    fn resize(&mut self, new_len: usize);

    /// Every stored gene lies within its declared bounds (always true for
    /// [`BoolChromosome`]/[`CharChromosome`]; checked for the numeric
    /// variants).
    fn is_valid(&self) -> bool;
}

fn check_index(index: usize, length: usize) -> Result<()> {
    if index >= length {
        return Err(Error::out_of_range(format!(
            "index {index} not in [0, {length})"
        )));
    }
    Ok(())
}

fn check_prob(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::out_of_range(format!("probability {p} not in [0, 1]")));
    }
    Ok(())
}

/// A resizable, lazily allocated per-gene lock bitset shared by every
/// concrete chromosome variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LockBits(Option<Vec<bool>>);

impl LockBits {
    pub(crate) fn is_locked(&self, index: usize) -> bool {
        self.0.as_ref().map(|bits| bits[index]).unwrap_or(false)
    }

    pub(crate) fn set(&mut self, index: usize, locked: bool, length: usize) {
        let bits = self.0.get_or_insert_with(|| vec![false; length]);
        bits[index] = locked;
    }

    pub(crate) fn resize(&mut self, new_len: usize) {
        if let Some(bits) = self.0.as_mut() {
            bits.resize(new_len, false);
        }
    }
}

/// The gene primitive types named in §3, as a closed sum type.
#[derive(Clone, Debug, PartialEq)]
pub enum Chromosome {
    Bool(BoolChromosome),
    Char(CharChromosome),
    Short(ShortChromosome),
    Int(IntChromosome),
    Double(DoubleChromosome),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Chromosome::Bool($inner) => $body,
            Chromosome::Char($inner) => $body,
            Chromosome::Short($inner) => $body,
            Chromosome::Int($inner) => $body,
            Chromosome::Double($inner) => $body,
        }
    };
}

impl Chromosome {
    pub fn length(&self) -> usize {
        dispatch!(self, c => c.length())
    }

    pub fn seed(&mut self, p: f64) -> Result<()> {
        dispatch!(self, c => c.seed(p))
    }

    pub fn mutate_drift(&mut self, index: usize, direction: Direction) -> Result<()> {
        dispatch!(self, c => c.mutate_drift(index, direction))
    }

    pub fn mutate_random(&mut self, index: usize) -> Result<()> {
        dispatch!(self, c => c.mutate_random(index))
    }

    pub fn lock(&mut self, index: usize, locked: bool) -> Result<()> {
        dispatch!(self, c => c.lock(index, locked))
    }

    pub fn is_locked(&self, index: usize) -> bool {
        dispatch!(self, c => c.is_locked(index))
    }

    pub fn resize(&mut self, new_len: usize) {
        dispatch!(self, c => c.resize(new_len))
    }

    pub fn is_valid(&self) -> bool {
        dispatch!(self, c => c.is_valid())
    }

    /// Swaps genes at indices `[start, end)` between two chromosomes of the
    /// *same* variant, skipping any index locked on either side. Returns
    /// [`Error::ShapeMismatch`] if the variants differ or either side is too
    /// short for the range, per the crossover precondition in §4.6.
    pub fn swap_range(&mut self, other: &mut Chromosome, start: usize, end: usize) -> Result<()> {
        match (self, other) {
            (Chromosome::Bool(a), Chromosome::Bool(b)) => swap_range_impl(a, b, start, end),
            (Chromosome::Char(a), Chromosome::Char(b)) => swap_range_impl(a, b, start, end),
            (Chromosome::Short(a), Chromosome::Short(b)) => swap_range_impl(a, b, start, end),
            (Chromosome::Int(a), Chromosome::Int(b)) => swap_range_impl(a, b, start, end),
            (Chromosome::Double(a), Chromosome::Double(b)) => swap_range_impl(a, b, start, end),
            _ => Err(Error::shape_mismatch(
                "cannot swap genes between chromosomes of different variants",
            )),
        }
    }
}

/// Per-variant swap helper, shared by every arm of [`Chromosome::swap_range`].
fn swap_range_impl<G: GeneSwap>(
    a: &mut G,
    b: &mut G,
    start: usize,
    end: usize,
) -> Result<()> {
    if end > a.length() || end > b.length() || start > end {
        return Err(Error::shape_mismatch(format!(
            "swap range [{start}, {end}) out of bounds for lengths {} and {}",
            a.length(),
            b.length()
        )));
    }
    for i in start..end {
        if !a.is_locked(i) && !b.is_locked(i) {
            a.swap_gene(b, i);
        }
    }
    Ok(())
}

/// Narrow trait used only by [`swap_range_impl`] so each variant module can
/// define its own elementwise swap without exposing its gene storage type.
pub(crate) trait GeneSwap: ChromosomeOps {
    fn swap_gene(&mut self, other: &mut Self, index: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_range_rejects_mismatched_variants() {
        let mut a = Chromosome::Bool(BoolChromosome::new(4));
        let mut b = Chromosome::Double(DoubleChromosome::new(4, 0.0, 1.0, 0.1).unwrap());
        assert!(a.swap_range(&mut b, 0, 2).is_err());
    }

    #[test]
    fn swap_range_skips_locked_indices() {
        let mut a = Chromosome::Bool(BoolChromosome::from_genes(vec![true, true, true]));
        let mut b = Chromosome::Bool(BoolChromosome::from_genes(vec![false, false, false]));
        a.lock(1, true).unwrap();

        a.swap_range(&mut b, 0, 3).unwrap();

        if let Chromosome::Bool(a) = &a {
            assert_eq!(a.genes(), &[false, true, false]);
        }
    }
}
