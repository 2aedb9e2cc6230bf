use super::{check_index, check_prob, ChromosomeOps, Direction, GeneSwap, LockBits};
use crate::random;
use evo_error::{Error, Result};

/// A fixed-length sequence of bounded floating-point genes, with a single
/// per-chromosome drift step (§3: the `Double` gene primitive, which carries
/// its own `[min, max]` bound and step size rather than a discrete universe).
#[derive(Clone, Debug, PartialEq)]
pub struct DoubleChromosome {
    genes: Vec<f64>,
    min: f64,
    max: f64,
    drift: f64,
    locks: LockBits,
}

impl DoubleChromosome {
    pub fn new(length: usize, min: f64, max: f64, drift: f64) -> Result<Self> {
        validate_bounds(min, max)?;
        let mut genes = Vec::with_capacity(length);
        for _ in 0..length {
            genes.push(random::range(min..max));
        }
        Ok(DoubleChromosome {
            genes,
            min,
            max,
            drift,
            locks: LockBits::default(),
        })
    }

    pub fn from_genes(genes: Vec<f64>, min: f64, max: f64, drift: f64) -> Self {
        DoubleChromosome {
            genes,
            min,
            max,
            drift,
            locks: LockBits::default(),
        }
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn drift_step(&self) -> f64 {
        self.drift
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        check_index(index, self.genes.len())?;
        Ok(self.genes[index])
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = value.clamp(self.min, self.max);
        }
        Ok(())
    }
}

impl ChromosomeOps for DoubleChromosome {
    fn length(&self) -> usize {
        self.genes.len()
    }

    fn seed(&mut self, p: f64) -> Result<()> {
        check_prob(p)?;
        for i in 0..self.genes.len() {
            if !self.locks.is_locked(i) {
                self.genes[i] = random::range(self.min..self.max);
            }
        }
        Ok(())
    }

    /// Nudges by `±drift`, clamping to `[min, max]` rather than wrapping —
    /// the continuous domain has no natural wraparound point.
    fn mutate_drift(&mut self, index: usize, direction: Direction) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            let delta = match direction {
                Direction::Up => self.drift,
                Direction::Down => -self.drift,
            };
            self.genes[index] = (self.genes[index] + delta).clamp(self.min, self.max);
        }
        Ok(())
    }

    fn mutate_random(&mut self, index: usize) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = random::range(self.min..self.max);
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
        self.genes.iter().all(|&g| g >= self.min && g <= self.max)
    }
}

impl GeneSwap for DoubleChromosome {
    fn swap_gene(&mut self, other: &mut Self, index: usize) {
        std::mem::swap(&mut self.genes[index], &mut other.genes[index]);
    }
}

pub(crate) fn validate_bounds(min: f64, max: f64) -> Result<()> {
    if min > max {
        return Err(Error::out_of_range(format!(
            "min ({min}) must not exceed max ({max})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_clamps_at_bounds() {
        let mut c = DoubleChromosome::from_genes(vec![9.9], 0.0, 10.0, 1.0);
        c.mutate_drift(0, Direction::Up).unwrap();
        assert_eq!(c.get(0).unwrap(), 10.0);

        let mut c = DoubleChromosome::from_genes(vec![0.1], 0.0, 10.0, 1.0);
        c.mutate_drift(0, Direction::Down).unwrap();
        assert_eq!(c.get(0).unwrap(), 0.0);
    }

    #[test]
    fn new_chromosome_stays_within_bounds() {
        let c = DoubleChromosome::new(200, -1.0, 1.0, 0.05).unwrap();
        assert!(c.is_valid());
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(DoubleChromosome::new(3, 10.0, 0.0, 0.05).is_err());
    }

    #[test]
    fn locked_gene_survives_mutation() {
        let mut c = DoubleChromosome::from_genes(vec![5.0], 0.0, 10.0, 1.0);
        c.lock(0, true).unwrap();
        c.mutate_drift(0, Direction::Up).unwrap();
        c.mutate_random(0).unwrap();
        assert_eq!(c.get(0).unwrap(), 5.0);
    }

    #[test]
    fn set_clamps_out_of_range_value() {
        let mut c = DoubleChromosome::from_genes(vec![5.0], 0.0, 10.0, 1.0);
        c.set(0, 50.0).unwrap();
        assert_eq!(c.get(0).unwrap(), 10.0);
    }
}
