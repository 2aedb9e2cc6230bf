use evo_core::{EntityModel, Population, SelectOne, SelectTwo};

/// Enumerates every entity exactly once, in population order.
#[derive(Default)]
pub struct EverySelectOne {
    next_index: usize,
}

impl EverySelectOne {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> SelectOne<M> for EverySelectOne {
    fn init(&mut self, _population: &Population<M>) {
        self.next_index = 0;
    }

    fn next(&mut self, population: &Population<M>) -> Option<usize> {
        if self.next_index >= population.len() {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(index)
    }
}

/// Enumerates every ordered pair `(i, j)` with `i != j`, row-major over the
/// population.
#[derive(Default)]
pub struct EverySelectTwo {
    row: usize,
    col: usize,
}

impl EverySelectTwo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: EntityModel> SelectTwo<M> for EverySelectTwo {
    fn init(&mut self, _population: &Population<M>) {
        self.row = 0;
        self.col = 0;
    }

    fn next(&mut self, population: &Population<M>) -> Option<(usize, usize)> {
        let len = population.len();
        if len < 2 {
            return None;
        }
        loop {
            if self.row >= len {
                return None;
            }
            if self.col >= len {
                self.row += 1;
                self.col = 0;
                continue;
            }
            if self.row == self.col {
                self.col += 1;
                continue;
            }
            let pair = (self.row, self.col);
            self.col += 1;
            return Some(pair);
        }
    }
}
