use super::{check_index, check_prob, ChromosomeOps, Direction, GeneSwap, LockBits};
use crate::random;
use evo_error::Result;

const MIN_CHAR: u8 = b' ';
const MAX_CHAR: u8 = b'~';

fn wrap_up(c: char) -> char {
    if c as u8 == MAX_CHAR {
        MIN_CHAR as char
    } else {
        (c as u8 + 1) as char
    }
}

fn wrap_down(c: char) -> char {
    if c as u8 == MIN_CHAR {
        MAX_CHAR as char
    } else {
        (c as u8 - 1) as char
    }
}

fn random_char() -> char {
    random::next_int_range(MIN_CHAR as i64, MAX_CHAR as i64 + 1) as u8 as char
}

/// A fixed-length sequence of printable-ASCII genes over `[' ', '~']` (§4.2).
#[derive(Clone, Debug, PartialEq)]
pub struct CharChromosome {
    genes: Vec<char>,
    locks: LockBits,
}

impl CharChromosome {
    pub fn new(length: usize) -> Self {
        let mut c = CharChromosome {
            genes: vec![' '; length],
            locks: LockBits::default(),
        };
        for g in c.genes.iter_mut() {
            *g = random_char();
        }
        c
    }

    pub fn from_genes(genes: Vec<char>) -> Self {
        CharChromosome {
            genes,
            locks: LockBits::default(),
        }
    }

    pub fn genes(&self) -> &[char] {
        &self.genes
    }

    pub fn get(&self, index: usize) -> Result<char> {
        check_index(index, self.genes.len())?;
        Ok(self.genes[index])
    }

    pub fn set(&mut self, index: usize, value: char) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = value;
        }
        Ok(())
    }
}

impl ChromosomeOps for CharChromosome {
    fn length(&self) -> usize {
        self.genes.len()
    }

    fn seed(&mut self, p: f64) -> Result<()> {
        check_prob(p)?;
        for i in 0..self.genes.len() {
            if !self.locks.is_locked(i) {
                self.genes[i] = random_char();
            }
        }
        Ok(())
    }

    fn mutate_drift(&mut self, index: usize, direction: Direction) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = match direction {
                Direction::Up => wrap_up(self.genes[index]),
                Direction::Down => wrap_down(self.genes[index]),
            };
        }
        Ok(())
    }

    fn mutate_random(&mut self, index: usize) -> Result<()> {
        check_index(index, self.genes.len())?;
        if !self.locks.is_locked(index) {
            self.genes[index] = random_char();
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
        self.genes.resize(new_len, ' ');
        self.locks.resize(new_len);
    }

    fn is_valid(&self) -> bool {
        self.genes
            .iter()
            .all(|&c| (c as u8) >= MIN_CHAR && (c as u8) <= MAX_CHAR)
    }
}

impl GeneSwap for CharChromosome {
    fn swap_gene(&mut self, other: &mut Self, index: usize) {
        std::mem::swap(&mut self.genes[index], &mut other.genes[index]);
    }
}
