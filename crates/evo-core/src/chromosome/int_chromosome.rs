use super::{check_index, check_prob, ChromosomeOps, Direction, GeneSwap, LockBits};
use crate::random;
use evo_error::{Error, Result};

/// A narrow conversion surface letting [`IntegerChromosome`] stay generic
/// over the fixed-width integer types it's instantiated with, without
/// pulling in `num-traits` for two impls.
pub trait Integer: Copy + PartialOrd + Send + Sync + 'static {
    fn from_i64(v: i64) -> Self;
    fn to_i64(self) -> i64;
    fn min_value() -> Self;
    fn max_value() -> Self;
}

macro_rules! impl_integer {
    ($t:ty) => {
        impl Integer for $t {
            fn from_i64(v: i64) -> Self {
                v as $t
            }
            fn to_i64(self) -> i64 {
                self as i64
            }
            fn min_value() -> Self {
                <$t>::MIN
            }
            fn max_value() -> Self {
                <$t>::MAX
            }
        }
    };
}

impl_integer!(i16);
impl_integer!(i32);

/// A fixed-length sequence of bounded integer genes, generic over the
/// integer width (§3: `Short`/`Int` both reduce to this one shape).
#[derive(Clone, Debug, PartialEq)]
pub struct IntegerChromosome<T: Integer> {
    genes: Vec<T>,
    min: T,
    max: T,
    locks: LockBits,
}

impl<T: Integer> IntegerChromosome<T> {
    /// Builds a chromosome of `length` genes drawn uniformly from the
    /// inclusive range `[min, max]`.
    pub fn new(length: usize, min: T, max: T) -> Result<Self> {
        if min.to_i64() > max.to_i64() {
            return Err(Error::out_of_range(format!(
                "min ({}) must not exceed max ({})",
                min.to_i64(),
                max.to_i64()
            )));
        }
        let mut genes = Vec::with_capacity(length);
        for _ in 0..length {
            genes.push(Self::random_in(min, max));
        }
        Ok(IntegerChromosome {
            genes,
            min,
            max,
            locks: LockBits::default(),
        })
    }

    pub fn from_genes(genes: Vec<T>, min: T, max: T) -> Self {
        IntegerChromosome {
            genes,
            min,
            max,
            locks: LockBits::default(),
        }
    }

    pub fn genes(&self) -> &[T] {
        &self.genes
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn get(&self, index: usize) -> Result<T> {
        check_index(index, self.genes.len())?;
        Ok(self.genes[index])
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = value;
        }
        Ok(())
    }

    fn random_in(min: T, max: T) -> T {
        T::from_i64(random::next_int_range(min.to_i64(), max.to_i64() + 1))
    }
}

impl<T: Integer> ChromosomeOps for IntegerChromosome<T> {
    fn length(&self) -> usize {
        self.genes.len()
    }

    fn seed(&mut self, p: f64) -> Result<()> {
        check_prob(p)?;
        for i in 0..self.genes.len() {
            if !self.locks.is_locked(i) {
                self.genes[i] = Self::random_in(self.min, self.max);
            }
        }
        Ok(())
    }

    /// Drifts by one unit, wrapping around at the declared bounds (e.g.
    /// drifting `Up` from `max` lands on `min`).
    fn mutate_drift(&mut self, index: usize, direction: Direction) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            let current = self.genes[index].to_i64();
            let next = match direction {
                Direction::Up if current >= self.max.to_i64() => self.min.to_i64(),
                Direction::Up => current + 1,
                Direction::Down if current <= self.min.to_i64() => self.max.to_i64(),
                Direction::Down => current - 1,
            };
            self.genes[index] = T::from_i64(next);
        }
        Ok(())
    }

    fn mutate_random(&mut self, index: usize) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = Self::random_in(self.min, self.max);
        }
        Ok(())
    }

    fn lock(&mut self, index: usize, locked: bool) -> Result<()> {
        check_index(index, self.genes.len())?;
        self.locks.set(index, locked, self.genes.len());
        Ok(())
    }

    fn is_locked(&self, index: usize) -> bool {
        self.locks.is_locked(index)
    }

    fn resize(&mut self, new_len: usize) {
        let fill = self.min;
        self.genes.resize(new_len, fill);
        self.locks.resize(new_len);
    }

    fn is_valid(&self) -> bool {
        self.genes
            .iter()
            .all(|g| g.to_i64() >= self.min.to_i64() && g.to_i64() <= self.max.to_i64())
    }
}

impl<T: Integer> GeneSwap for IntegerChromosome<T> {
    fn swap_gene(&mut self, other: &mut Self, index: usize) {
        std::mem::swap(&mut self.genes[index], &mut other.genes[index]);
    }
}
