use super::{check_index, check_prob, ChromosomeOps, Direction, GeneSwap, LockBits};
use crate::random;
use evo_error::Result;

/// A fixed-length sequence of boolean genes (§4.2).
#[derive(Clone, Debug, PartialEq)]
pub struct BoolChromosome {
    genes: Vec<bool>,
    locks: LockBits,
}

impl BoolChromosome {
    pub fn new(length: usize) -> Self {
        BoolChromosome {
            genes: vec![false; length],
            locks: LockBits::default(),
        }
    }

    pub fn from_genes(genes: Vec<bool>) -> Self {
        BoolChromosome {
            genes,
            locks: LockBits::default(),
        }
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        check_index(index, self.genes.len())?;
        Ok(self.genes[index])
    }

    /// Sets the gene at `index`, unless it is locked, in which case the call
    /// is a silent no-op.
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = value;
        }
        Ok(())
    }
}

impl ChromosomeOps for BoolChromosome {
    fn length(&self) -> usize {
        self.genes.len()
    }

    fn seed(&mut self, p: f64) -> Result<()> {
        check_prob(p)?;
        for i in 0..self.genes.len() {
            if !self.locks.is_locked(i) {
                self.genes[i] = random::bool(p);
            }
        }
        Ok(())
    }

    fn mutate_drift(&mut self, index: usize, _direction: Direction) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = !self.genes[index];
        }
        Ok(())
    }

    fn mutate_random(&mut self, index: usize) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = random::bool(0.5);
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
        self.genes.resize(new_len, false);
        self.locks.resize(new_len);
    }

    fn is_valid(&self) -> bool {
        true
    }
}

impl GeneSwap for BoolChromosome {
    fn swap_gene(&mut self, other: &mut Self, index: usize) {
        std::mem::swap(&mut self.genes[index], &mut other.genes[index]);
    }
}
