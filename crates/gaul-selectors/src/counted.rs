use gaul_core::{Chromosome, EntityId, Population, SelectOne, SelectTwo};

/// Bounds an otherwise-infinite selection strategy (tournament, roulette) to
/// a fixed number of picks per phase. The generational and steady-state
/// engines reset the cursor at the start of each crossover/mutation phase
/// and call `select_one`/`select_two` until it returns `None` — `Counted`
/// is what turns "pick forever" into "pick `count` times, then stop".
pub struct Counted<S> {
    inner: S,
    count: usize,
    taken: usize,
}

impl<S> Counted<S> {
    pub fn new(inner: S, count: usize) -> Self {
        Counted { inner, count, taken: 0 }
    }
}

impl<C: Chromosome, P, S: SelectOne<C, P>> SelectOne<C, P> for Counted<S> {
    fn reset(&mut self) {
        self.taken = 0;
        self.inner.reset();
    }

    fn select_one(&mut self, population: &Population<C, P>) -> Option<EntityId> {
        if self.taken >= self.count {
            return None;
        }
        let picked = self.inner.select_one(population);
        if picked.is_some() {
            self.taken += 1;
        }
        picked
    }
}

impl<C: Chromosome, P, S: SelectTwo<C, P>> SelectTwo<C, P> for Counted<S> {
    fn reset(&mut self) {
        self.taken = 0;
        self.inner.reset();
    }

    fn select_two(&mut self, population: &Population<C, P>) -> Option<(EntityId, EntityId)> {
        if self.taken >= self.count {
            return None;
        }
        let picked = self.inner.select_two(population);
        if picked.is_some() {
            self.taken += 1;
        }
        picked
    }
}
