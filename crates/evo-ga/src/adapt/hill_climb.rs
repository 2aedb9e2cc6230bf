use evo_core::{random, AdaptionOp, AdaptionOutcome, Direction, Entity, EntityModel};
use evo_error::Result;

fn total_genes<M: EntityModel>(entity: &Entity<M>) -> usize {
    entity
        .dna()
        .map(|dna| dna.iter().map(|(_, c)| c.length()).sum())
        .unwrap_or(0)
}

/// Locates the `(chromosome_index, gene_index)` pair `cursor` genes into the
/// DNA, walking chromosomes in iteration order.
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

fn try_drift<M: EntityModel>(
    best: &Entity<M>,
    chromosome_index: usize,
    gene_index: usize,
    direction: Direction,
) -> Result<Entity<M>> {
    let mut candidate = best.clone_with_new_id();
    let dna = candidate
        .dna_mut()
        .expect("best carries dna: checked by the caller before drifting");
    let chromosome = dna
        .iter_mut()
        .nth(chromosome_index)
        .expect("chromosome_index came from locate() against this same dna")
        .1;
    chromosome.mutate_drift(gene_index, direction)?;
    candidate.reevaluate()?;
    Ok(candidate)
}

/// Walks every allele in lockstep, wrapping from the last gene of the last
/// chromosome back to the first: at each stop it tries drifting up and down
/// and keeps whichever of {current, up, down} scores highest, then advances
/// regardless of whether that stop improved anything. Terminates early once
/// a full lap produces no improvement (§4.7).
#[derive(Default)]
pub struct NextAscentHillClimb {
    cursor: usize,
}

impl NextAscentHillClimb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> AdaptionOp<M> for NextAscentHillClimb {
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
        let mut improved_this_lap = false;

        for step in 0..max_iterations {
            if step > 0 && step as usize % gene_count == 0 {
                if !improved_this_lap {
                    break;
                }
                improved_this_lap = false;
            }

            let (chromosome_index, gene_index) = locate(&current, self.cursor % gene_count)
                .expect("cursor is reduced modulo the gene count computed from this dna");
            self.cursor = (self.cursor + 1) % gene_count;
            iterations += 1;

            let up = try_drift(&current, chromosome_index, gene_index, Direction::Up)?;
            let down = try_drift(&current, chromosome_index, gene_index, Direction::Down)?;
            let current_score = current.fitness().unwrap_or(f64::NEG_INFINITY);

            let mut best_candidate = &current;
            if up.fitness().unwrap_or(f64::NEG_INFINITY) > best_candidate.fitness().unwrap_or(f64::NEG_INFINITY) {
                best_candidate = &up;
            }
            if down.fitness().unwrap_or(f64::NEG_INFINITY) > best_candidate.fitness().unwrap_or(f64::NEG_INFINITY) {
                best_candidate = &down;
            }

            if best_candidate.fitness().unwrap_or(f64::NEG_INFINITY) > current_score {
                improved_this_lap = true;
                current = best_candidate.clone_with_new_id();
            }
        }

        Ok(AdaptionOutcome {
            iterations,
            adapted: current,
        })
    }
}

/// Each step picks a uniformly random chromosome, gene, and direction, and
/// keeps the result only if it improves on the current fitness (§4.7).
pub struct RandomAscentHillClimb;

impl RandomAscentHillClimb {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomAscentHillClimb {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> AdaptionOp<M> for RandomAscentHillClimb {
    fn optimise(&mut self, best: &Entity<M>, max_iterations: u32) -> Result<AdaptionOutcome<M>> {
        let gene_count = total_genes(best);
        if gene_count == 0 {
            return Ok(AdaptionOutcome {
                iterations: 0,
                adapted: best.clone_with_new_id(),
            });
        }

        let mut current = best.clone_with_new_id();
        for iterations in 0..max_iterations {
            let cursor = random::next_int_max(gene_count as i64) as usize;
            let (chromosome_index, gene_index) =
                locate(&current, cursor).expect("cursor < gene_count");
            let direction = if random::bool(0.5) {
                Direction::Up
            } else {
                Direction::Down
            };
            let candidate = try_drift(&current, chromosome_index, gene_index, direction)?;
            if candidate.fitness().unwrap_or(f64::NEG_INFINITY)
                > current.fitness().unwrap_or(f64::NEG_INFINITY)
            {
                current = candidate;
            }
            if iterations + 1 == max_iterations {
                break;
            }
        }

        Ok(AdaptionOutcome {
            iterations: max_iterations,
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
                Chromosome::Int(IntChromosome::from_genes(vec![0, 0, 0], 0, 10)),
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
    fn next_ascent_climbs_toward_the_target_sum() {
        evo_core::random::set_seed(31);
        let model = SumModel { target: 15 };
        let mut entity = Entity::new(model);
        entity.init_entity().unwrap();
        entity.load_entity().unwrap();
        entity.ensure_fitness().unwrap();
        let start_fitness = entity.fitness().unwrap();

        let mut climb = NextAscentHillClimb::new();
        let outcome = climb.optimise(&entity, 60).unwrap();

        assert!(outcome.adapted.fitness().unwrap() >= start_fitness);
    }

    #[test]
    fn random_ascent_never_regresses() {
        evo_core::random::set_seed(32);
        let model = SumModel { target: 20 };
        let mut entity = Entity::new(model);
        entity.init_entity().unwrap();
        entity.load_entity().unwrap();
        entity.ensure_fitness().unwrap();
        let start_fitness = entity.fitness().unwrap();

        let mut climb = RandomAscentHillClimb::new();
        let outcome = climb.optimise(&entity, 40).unwrap();

        assert!(outcome.adapted.fitness().unwrap() >= start_fitness);
    }
}
