use evo_core::{AdaptionOp, AdaptionOutcome, Direction, Entity, EntityModel};
use evo_error::Result;

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

fn drift_gene<M: EntityModel>(
    entity: &Entity<M>,
    chromosome_index: usize,
    gene_index: usize,
    direction: Direction,
    repeats: u32,
) -> Result<Entity<M>> {
    let mut candidate = entity.clone_with_new_id();
    {
        let dna = candidate
            .dna_mut()
            .expect("entity carries dna: checked by the caller");
        let chromosome = dna
            .iter_mut()
            .nth(chromosome_index)
            .expect("chromosome_index came from locate() against this same dna")
            .1;
        for _ in 0..repeats.max(1) {
            chromosome.mutate_drift(gene_index, direction)?;
        }
    }
    candidate.reevaluate()?;
    Ok(candidate)
}

/// A per-gene finite-difference gradient sign: `Some(Up)`/`Some(Down)` when
/// nudging that gene one step improves fitness, `None` at a local flat spot.
fn gradient<M: EntityModel>(entity: &Entity<M>, gene_count: usize) -> Result<Vec<Option<Direction>>> {
    let baseline = entity.fitness().unwrap_or(f64::NEG_INFINITY);
    let mut signs = Vec::with_capacity(gene_count);
    for cursor in 0..gene_count {
        let (chromosome_index, gene_index) = locate(entity, cursor).expect("cursor < gene_count");
        let up = drift_gene(entity, chromosome_index, gene_index, Direction::Up, 1)?;
        let down = drift_gene(entity, chromosome_index, gene_index, Direction::Down, 1)?;
        let up_delta = up.fitness().unwrap_or(f64::NEG_INFINITY) - baseline;
        let down_delta = down.fitness().unwrap_or(f64::NEG_INFINITY) - baseline;
        signs.push(if up_delta > 0.0 && up_delta >= down_delta {
            Some(Direction::Up)
        } else if down_delta > 0.0 {
            Some(Direction::Down)
        } else {
            None
        });
    }
    Ok(signs)
}

fn apply_step<M: EntityModel>(
    entity: &Entity<M>,
    signs: &[Option<Direction>],
    repeats: u32,
) -> Result<Entity<M>> {
    let mut candidate = entity.clone_with_new_id();
    {
        let dna = candidate
            .dna_mut()
            .expect("entity carries dna: checked by the caller");
        let mut signs_iter = signs.iter();
        for (_, chromosome) in dna.iter_mut() {
            for gene_index in 0..chromosome.length() {
                if let Some(Some(direction)) = signs_iter.next() {
                    for _ in 0..repeats {
                        chromosome.mutate_drift(gene_index, *direction)?;
                    }
                }
            }
        }
    }
    candidate.reevaluate()?;
    Ok(candidate)
}

/// Steepest-ascent gradient search (§4.7): estimates a per-gene improving
/// direction by finite difference, then takes a multi-unit step along the
/// whole gradient at once. A rejected step is halved (`step *= beta`) and
/// retried without recomputing the gradient; once the step underflows to
/// zero with no acceptance, the search stops — it has either reached a flat
/// spot (zero gradient) or exhausted every step size around one.
pub struct SteepestAscentGradient {
    initial_step: u32,
    beta: f64,
}

impl SteepestAscentGradient {
    pub fn new(initial_step: u32, beta: f64) -> Self {
        Self { initial_step, beta }
    }
}

impl Default for SteepestAscentGradient {
    fn default() -> Self {
        Self::new(4, 0.5)
    }
}

impl<M: EntityModel> AdaptionOp<M> for SteepestAscentGradient {
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

        while iterations < max_iterations {
            let signs = gradient(&current, gene_count)?;
            let gradient_norm = signs.iter().filter(|s| s.is_some()).count();
            if gradient_norm == 0 {
                break;
            }

            let mut step = self.initial_step as f64;
            let mut accepted = false;
            while step >= 1.0 && iterations < max_iterations {
                let candidate = apply_step(&current, &signs, step.round() as u32)?;
                iterations += 1;
                if candidate.fitness().unwrap_or(f64::NEG_INFINITY)
                    > current.fitness().unwrap_or(f64::NEG_INFINITY)
                {
                    current = candidate;
                    accepted = true;
                    break;
                }
                step *= self.beta;
            }

            if !accepted {
                break;
            }
        }

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
                Chromosome::Int(IntChromosome::from_genes(vec![0, 0, 0, 0, 0], 0, 50)),
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
    fn converges_toward_the_target_sum_without_regressing() {
        evo_core::random::set_seed(51);
        let model = SumModel { target: 90 };
        let mut entity = Entity::new(model);
        entity.init_entity().unwrap();
        entity.load_entity().unwrap();
        entity.ensure_fitness().unwrap();
        let start = entity.fitness().unwrap();

        let mut climb = SteepestAscentGradient::default();
        let outcome = climb.optimise(&entity, 50).unwrap();

        assert!(outcome.adapted.fitness().unwrap() >= start);
    }

    #[test]
    fn stops_reporting_progress_once_at_the_optimum() {
        evo_core::random::set_seed(52);
        let model = SumModel { target: 0 };
        let mut entity = Entity::new(model);
        entity.init_entity().unwrap();
        entity.load_entity().unwrap();
        entity.ensure_fitness().unwrap();

        let mut climb = SteepestAscentGradient::default();
        let outcome = climb.optimise(&entity, 50).unwrap();
        assert_eq!(outcome.adapted.fitness().unwrap(), 0.0);
    }
}
