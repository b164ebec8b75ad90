use gaul_core::{Chromosome, EntityId, Population, SelectOne, SelectTwo};

/// Draws `tournament_size` random ranks (with replacement) from the live
/// population and returns the best of them. Never exhausts — `select_one`
/// always returns `Some` as long as the population is non-empty — so
/// `reset` is a no-op.
pub struct TournamentSelectOne {
    tournament_size: usize,
}

impl TournamentSelectOne {
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "tournament_size must be at least 1");
        TournamentSelectOne { tournament_size }
    }
}

impl<C: Chromosome, P> SelectOne<C, P> for TournamentSelectOne {
    fn select_one(&mut self, population: &Population<C, P>) -> Option<EntityId> {
        tournament_pick(population, self.tournament_size)
    }
}

/// Picks two independent tournament winners for crossover. The same entity
/// may be drawn as both mother and father; callers that need distinct
/// parents should retry.
pub struct TournamentSelectTwo {
    tournament_size: usize,
}

impl TournamentSelectTwo {
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "tournament_size must be at least 1");
        TournamentSelectTwo { tournament_size }
    }
}

impl<C: Chromosome, P> SelectTwo<C, P> for TournamentSelectTwo {
    fn select_two(&mut self, population: &Population<C, P>) -> Option<(EntityId, EntityId)> {
        let mother = tournament_pick(population, self.tournament_size)?;
        let father = tournament_pick(population, self.tournament_size)?;
        Some((mother, father))
    }
}

fn tournament_pick<C: Chromosome, P>(
    population: &Population<C, P>,
    tournament_size: usize,
) -> Option<EntityId> {
    let size = population.current_size();
    if size == 0 {
        return None;
    }
    let mut rng = population.rng();
    let mut best_rank = rng.gen_range_usize(0..size);
    for _ in 1..tournament_size {
        let candidate = rng.gen_range_usize(0..size);
        if candidate < best_rank {
            best_rank = candidate;
        }
    }
    population.id_at_rank(best_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaul_codecs::BitChromosome;
    use gaul_core::{Fitness, Genotype, Prng};
    use std::sync::Arc;

    fn ctor() -> Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> {
        Arc::new(|| Genotype::new(vec![BitChromosome::new(vec![])]))
    }

    fn population(n: usize) -> Population<BitChromosome> {
        let mut pop = Population::new(n.max(1), n.max(1), (1, 0), ctor(), Prng::from_seed(1)).unwrap();
        for i in 0..n {
            let id = pop.allocate_entity().unwrap();
            pop.entity_mut(id).unwrap().set_fitness(Fitness::new(i as f64));
        }
        pop.sort();
        pop
    }

    #[test]
    fn large_tournament_almost_always_returns_best_rank() {
        let pop = population(20);
        let mut selector = TournamentSelectOne::new(20);
        let winner = selector.select_one(&pop).unwrap();
        assert_eq!(pop.rank_of(winner), Some(0));
    }

    #[test]
    fn empty_population_returns_none() {
        let pop = population(0);
        let mut selector = TournamentSelectOne::new(3);
        assert!(selector.select_one(&pop).is_none());
    }
}
