use evo_core::{random, AdaptionOp, AdaptionOutcome, Direction, Entity, EntityModel};
use evo_error::Result;

const BOLTZMANN_CONSTANT: f64 = 1.38066e-23;

/// How temperature falls across the run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoolingSchedule {
    /// `T(step) = initial - step * (initial / max_iterations)`.
    Linear,
    /// `T` drops by `factor` every `interval` steps, otherwise holds.
    Step { interval: u32, factor: f64 },
}

/// Whether a worse candidate's acceptance probability is a plain linear
/// function of temperature or the Boltzmann factor
/// `exp((putative.f - best.f) / (k * T))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Acceptance {
    Linear,
    Boltzmann,
}

/// Single-gene-drift simulated annealing (§4.7): each step proposes a random
/// drift, accepts it outright if it improves fitness, and otherwise accepts
/// it with a temperature-dependent probability that decays over the run.
pub struct SimulatedAnnealing {
    initial_temperature: f64,
    schedule: CoolingSchedule,
    acceptance: Acceptance,
}

impl SimulatedAnnealing {
    pub fn new(initial_temperature: f64, schedule: CoolingSchedule, acceptance: Acceptance) -> Self {
        Self {
            initial_temperature,
            schedule,
            acceptance,
        }
    }

    fn temperature_at(&self, step: u32, max_iterations: u32) -> f64 {
        match self.schedule {
            CoolingSchedule::Linear => {
                if max_iterations == 0 {
                    return self.initial_temperature;
                }
                let slope = self.initial_temperature / max_iterations as f64;
                (self.initial_temperature - step as f64 * slope).max(f64::EPSILON)
            }
            CoolingSchedule::Step { interval, factor } => {
                if interval == 0 {
                    return self.initial_temperature;
                }
                let drops = step / interval;
                (self.initial_temperature * factor.powi(drops as i32)).max(f64::EPSILON)
            }
        }
    }

    fn accept(&self, delta: f64, temperature: f64) -> bool {
        if delta >= 0.0 {
            return true;
        }
        match self.acceptance {
            // `best.f < putative.f + T` — a deterministic test, not a draw.
            Acceptance::Linear => delta > -temperature,
            Acceptance::Boltzmann => {
                let probability = (delta / (BOLTZMANN_CONSTANT * temperature)).exp().min(1.0);
                random::next_double() < probability
            }
        }
    }
}

fn total_genes<M: EntityModel>(entity: &Entity<M>) -> usize {
    entity
        .dna()
        .map(|dna| dna.iter().map(|(_, c)| c.length()).sum())
        .unwrap_or(0)
}

fn locate<M: EntityModel>(entity: &Entity<M>, cursor: usize) -> Option<(usize, usize)> {
    let dna = entity.dna()?;
    let mut remaining = cursor;
    for (chromosome_index, (_, chromosome)) in dna.iter().enumerate() {
        let length = chromosome.length();
        if remaining < length {
            return Some((chromosome_index, remaining));
        }
        remaining -= length;
    }
    None
}

impl<M: EntityModel> AdaptionOp<M> for SimulatedAnnealing {
    fn optimise(&mut self, best: &Entity<M>, max_iterations: u32) -> Result<AdaptionOutcome<M>> {
        let gene_count = total_genes(best);
        if gene_count == 0 {
            return Ok(AdaptionOutcome {
                iterations: 0,
                adapted: best.clone_with_new_id(),
            });
        }

        let mut current = best.clone_with_new_id();
        let mut iterations = 0;

        for step in 0..max_iterations {
            let cursor = random::next_int_max(gene_count as i64) as usize;
            let (chromosome_index, gene_index) =
                locate(&current, cursor).expect("cursor < gene_count");
            let direction = if random::bool(0.5) {
                Direction::Up
            } else {
                Direction::Down
            };

            let mut candidate = current.clone_with_new_id();
            {
                let dna = candidate
                    .dna_mut()
                    .expect("current carries dna: gene_count > 0 implies dna is present");
                let chromosome = dna
                    .iter_mut()
                    .nth(chromosome_index)
                    .expect("chromosome_index came from locate() against this same dna")
                    .1;
                chromosome.mutate_drift(gene_index, direction)?;
            }
            candidate.reevaluate()?;

            let delta = candidate.fitness().unwrap_or(f64::NEG_INFINITY)
                - current.fitness().unwrap_or(f64::NEG_INFINITY);
            let temperature = self.temperature_at(step, max_iterations);
            iterations += 1;

            if self.accept(delta, temperature) {
                current = candidate;
            }
        }

        tracing::debug!(
            iterations,
            delta = current.fitness().unwrap_or(f64::NEG_INFINITY)
                - best.fitness().unwrap_or(f64::NEG_INFINITY),
            "simulated annealing run complete"
        );

        Ok(AdaptionOutcome {
            iterations,
            adapted: current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_core::{Chromosome, Dna, IntChromosome};

    #[derive(Clone)]
    struct SumModel {
        target: i32,
    }

    impl EntityModel for SumModel {
        type Phenotype = Vec<i32>;

        fn create_dna(&self) -> evo_core::Result<Dna> {
            let mut dna = Dna::new();
            dna.add(
                "genes",
                Chromosome::Int(IntChromosome::from_genes(vec![0, 0, 0, 0], 0, 20)),
            )?;
            Ok(dna)
        }

        fn load_from_dna(&self, dna: &Dna) -> evo_core::Result<Vec<i32>> {
            if let Some(Chromosome::Int(c)) = dna.get("genes") {
                Ok(c.genes().to_vec())
            } else {
                Ok(vec![])
            }
        }

        fn evaluate_fitness(&self, phenotype: &Vec<i32>) -> evo_core::Result<f64> {
            let sum: i32 = phenotype.iter().sum();
            Ok(-((sum - self.target).abs() as f64))
        }
    }

    #[test]
    fn temperature_decays_linearly_to_near_zero() {
        let sa = SimulatedAnnealing::new(100.0, CoolingSchedule::Linear, Acceptance::Linear);
        assert_eq!(sa.temperature_at(0, 100), 100.0);
        assert!(sa.temperature_at(99, 100) < 2.0);
    }

    #[test]
    fn worse_candidates_are_always_rejected_at_zero_delta_or_better() {
        let sa = SimulatedAnnealing::new(10.0, CoolingSchedule::Linear, Acceptance::Boltzmann);
        assert!(sa.accept(0.0, 1.0));
        assert!(sa.accept(5.0, 1.0));
    }

    #[test]
    fn annealing_tends_to_improve_over_many_iterations() {
        evo_core::random::set_seed(41);
        let model = SumModel { target: 40 };
        let mut entity = Entity::new(model);
        entity.init_entity().unwrap();
        entity.load_entity().unwrap();
        entity.ensure_fitness().unwrap();
        let start = entity.fitness().unwrap();

        let mut sa = SimulatedAnnealing::new(5.0, CoolingSchedule::Linear, Acceptance::Linear);
        let outcome = sa.optimise(&entity, 300).unwrap();
        assert!(outcome.adapted.fitness().unwrap() >= start);
    }
}
