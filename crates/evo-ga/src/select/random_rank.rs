use evo_core::{random, EntityModel, Population, SelectOne, SelectTwo};

/// Rank-biased single selection (§4.6): `state` walks upward from 1; with
/// probability `MutationRatio` the entity at index `state` is picked
/// outright. Terminates once `state` reaches `OriginalCount` (§9's fixed
/// `state < OriginalCount` termination convention, not `state > OriginalCount`).
#[derive(Default)]
pub struct RandomRankSelectOne {
    state: usize,
    target: usize,
}

impl RandomRankSelectOne {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> SelectOne<M> for RandomRankSelectOne {
    fn init(&mut self, population: &Population<M>) {
        self.state = 1;
        self.target = population.original_count();
    }

    fn next(&mut self, population: &Population<M>) -> Option<usize> {
        while self.state < self.target {
            let state = self.state;
            self.state += 1;
            if state >= population.len() {
                continue;
            }
            if random::bool(population.settings().mutation_ratio) {
                return Some(state);
            }
        }
        None
    }
}

/// Rank-biased pair selection (§4.6): `state` walks upward from 1; with
/// probability `CrossoverRatio` the entity at index `state` is paired with a
/// uniformly drawn entity from `[0, state)`, the fitter, earlier-ranked part
/// of the (descending-sorted) population. Terminates once `state` reaches
/// `OriginalCount`.
#[derive(Default)]
pub struct RandomRankSelectTwo {
    state: usize,
    target: usize,
}

impl RandomRankSelectTwo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> SelectTwo<M> for RandomRankSelectTwo {
    fn init(&mut self, population: &Population<M>) {
        self.state = 1;
        self.target = population.original_count();
    }

    fn next(&mut self, population: &Population<M>) -> Option<(usize, usize)> {
        while self.state < self.target {
            let state = self.state;
            self.state += 1;
            if state >= population.len() {
                continue;
            }
            if random::bool(population.settings().crossover_ratio) {
                let earlier = random::next_int_max(state as i64) as usize;
                return Some((state, earlier));
            }
        }
        None
    }
}
