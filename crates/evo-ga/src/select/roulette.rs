use evo_core::{random, EntityModel, Population, SelectOne, SelectTwo};

/// Fitness-proportional statistics computed once per generation and shared
/// by every draw that generation: total fitness, mean, and the
/// stochastic-universal-sampling step (`total / len`).
#[derive(Clone, Copy, Default)]
struct RouletteStats {
    total: f64,
    step: f64,
    marker: f64,
}

fn compute_stats<M: EntityModel>(population: &Population<M>) -> RouletteStats {
    let len = population.len();
    if len == 0 {
        return RouletteStats::default();
    }
    // Fitness can be negative; shift by the minimum so every share is
    // nonnegative before accumulating the wheel.
    let min = population
        .entities()
        .iter()
        .map(|e| e.fitness().unwrap_or(0.0))
        .fold(f64::INFINITY, f64::min);
    let shift = if min < 0.0 { -min } else { 0.0 };
    let total: f64 = population
        .entities()
        .iter()
        .map(|e| e.fitness().unwrap_or(0.0) + shift)
        .sum();
    let step = if total > 0.0 { total / len as f64 } else { 1.0 };
    RouletteStats {
        total: total.max(f64::EPSILON),
        step,
        marker: random::next_double() * step,
    }
}

fn spin<M: EntityModel>(population: &Population<M>, stats: &mut RouletteStats) -> usize {
    let min = population
        .entities()
        .iter()
        .map(|e| e.fitness().unwrap_or(0.0))
        .fold(f64::INFINITY, f64::min);
    let shift = if min < 0.0 { -min } else { 0.0 };

    let mut accumulated = 0.0;
    let mut chosen = population.len() - 1;
    for (index, entity) in population.entities().iter().enumerate() {
        accumulated += entity.fitness().unwrap_or(0.0) + shift;
        if accumulated >= stats.marker {
            chosen = index;
            break;
        }
    }
    stats.marker += stats.step;
    if stats.marker > stats.total {
        stats.marker -= stats.total;
    }
    chosen
}

/// Fitness-proportional selection: a single rotating marker walks the
/// fitness wheel once per draw (stochastic universal sampling), so the
/// expected number of picks for an entity tracks its share of total fitness.
/// Draws are bounded at `population.len()` per generation, the same way
/// `random.rs`'s `remaining` counter bounds `Random`, so `next()` eventually
/// returns `None` instead of spinning the wheel forever.
#[derive(Default)]
pub struct RouletteSelectOne {
    stats: RouletteStats,
    drawn: usize,
    target: usize,
}

impl RouletteSelectOne {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> SelectOne<M> for RouletteSelectOne {
    fn init(&mut self, population: &Population<M>) {
        self.stats = compute_stats(population);
        self.drawn = 0;
        self.target = population.len();
    }

    fn next(&mut self, population: &Population<M>) -> Option<usize> {
        if population.is_empty() || self.drawn >= self.target {
            return None;
        }
        self.drawn += 1;
        Some(spin(population, &mut self.stats))
    }
}

#[derive(Default)]
pub struct RouletteSelectTwo {
    stats: RouletteStats,
    drawn: usize,
    target: usize,
}

impl RouletteSelectTwo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> SelectTwo<M> for RouletteSelectTwo {
    fn init(&mut self, population: &Population<M>) {
        self.stats = compute_stats(population);
        self.drawn = 0;
        self.target = population.len();
    }

    fn next(&mut self, population: &Population<M>) -> Option<(usize, usize)> {
        if population.len() < 2 || self.drawn >= self.target {
            return None;
        }
        self.drawn += 1;
        let mother = spin(population, &mut self.stats);
        let father = loop {
            let candidate = spin(population, &mut self.stats);
            if candidate != mother {
                break candidate;
            }
        };
        Some((mother, father))
    }
}
