//! Ordered, name-keyed chromosome collection owned by an entity (§3, §4.3).

use crate::chromosome::Chromosome;
use evo_error::{Error, Result};

/// An order-preserving, case-insensitive name → [`Chromosome`] map.
///
/// Lookups fold the key to lowercase; iteration order always matches
/// insertion order regardless of case.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dna {
    entries: Vec<(String, Chromosome)>,
}

impl Dna {
    pub fn new() -> Self {
        Dna {
            entries: Vec::new(),
        }
    }

    /// Inserts `chromosome` under `name`. Fails with
    /// [`Error::DuplicateName`] if `name` (case-insensitively) is already
    /// present.
    pub fn add(&mut self, name: impl Into<String>, chromosome: Chromosome) -> Result<()> {
        let name = name.into();
        let folded = name.to_lowercase();
        if self.entries.iter().any(|(k, _)| k.to_lowercase() == folded) {
            return Err(Error::duplicate_name(format!(
                "chromosome name {name:?} already present"
            )));
        }
        self.entries.push((name, chromosome));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Chromosome> {
        let folded = name.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| k.to_lowercase() == folded)
            .map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Chromosome> {
        let folded = name.to_lowercase();
        self.entries
            .iter_mut()
            .find(|(k, _)| k.to_lowercase() == folded)
            .map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, chromosome)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Chromosome)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Chromosome)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Broadcasts `seed(p)` to every chromosome.
    pub fn seed(&mut self, p: f64) -> Result<()> {
        for (_, chromosome) in self.entries.iter_mut() {
            chromosome.seed(p)?;
        }
        Ok(())
    }

    /// Drops every chromosome, leaving the DNA empty.
    pub fn dispose(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::BoolChromosome;

    fn bool_chromosome(len: usize) -> Chromosome {
        Chromosome::Bool(BoolChromosome::new(len))
    }

    #[test]
    fn add_rejects_duplicate_name_case_insensitively() {
        let mut dna = Dna::new();
        dna.add("Fitness", bool_chromosome(3)).unwrap();
        assert!(dna.add("fitness", bool_chromosome(3)).is_err());
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut dna = Dna::new();
        dna.add("b", bool_chromosome(1)).unwrap();
        dna.add("a", bool_chromosome(1)).unwrap();
        let names: Vec<&str> = dna.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn get_is_case_insensitive() {
        let mut dna = Dna::new();
        dna.add("Weights", bool_chromosome(1)).unwrap();
        assert!(dna.get("weights").is_some());
        assert!(dna.get("WEIGHTS").is_some());
    }

    #[test]
    fn dispose_clears_every_chromosome() {
        let mut dna = Dna::new();
        dna.add("a", bool_chromosome(1)).unwrap();
        dna.dispose();
        assert!(dna.is_empty());
    }

    #[test]
    fn seed_broadcasts_to_every_chromosome() {
        let mut dna = Dna::new();
        dna.add("a", bool_chromosome(10)).unwrap();
        dna.add("b", bool_chromosome(10)).unwrap();
        dna.seed(1.0).unwrap();
        for (_, c) in dna.iter() {
            if let Chromosome::Bool(b) = c {
                assert!(b.genes().iter().all(|&g| g));
            }
        }
    }
}
