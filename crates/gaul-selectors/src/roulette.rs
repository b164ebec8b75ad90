use gaul_core::{Chromosome, EntityId, Population, SelectOne, SelectTwo};

/// Fitness-proportional selection: each live entity's chance of being
/// picked is proportional to its fitness, shifted so the worst entity
/// still has a small positive weight. Falls back to a uniform pick when
/// every entity ties (zero spread).
pub struct RouletteSelectOne;

impl RouletteSelectOne {
    pub fn new() -> Self {
        RouletteSelectOne
    }
}

impl Default for RouletteSelectOne {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Chromosome, P> SelectOne<C, P> for RouletteSelectOne {
    fn select_one(&mut self, population: &Population<C, P>) -> Option<EntityId> {
        roulette_pick(population)
    }
}

/// Two independent roulette draws for crossover.
pub struct RouletteSelectTwo;

impl RouletteSelectTwo {
    pub fn new() -> Self {
        RouletteSelectTwo
    }
}

impl Default for RouletteSelectTwo {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Chromosome, P> SelectTwo<C, P> for RouletteSelectTwo {
    fn select_two(&mut self, population: &Population<C, P>) -> Option<(EntityId, EntityId)> {
        let mother = roulette_pick(population)?;
        let father = roulette_pick(population)?;
        Some((mother, father))
    }
}

fn roulette_pick<C: Chromosome, P>(population: &Population<C, P>) -> Option<EntityId> {
    let size = population.current_size();
    if size == 0 {
        return None;
    }

    let values: Vec<f64> = (0..size)
        .map(|rank| population.entity_at_rank(rank).map(|e| e.fitness().value()).unwrap_or(0.0))
        .collect();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = values.iter().map(|v| (v - min) + 1.0).collect();
    let total: f64 = weights.iter().sum();

    let mut rng = population.rng();
    if !total.is_finite() || total <= 0.0 {
        let rank = rng.gen_range_usize(0..size);
        return population.id_at_rank(rank);
    }

    let threshold = rng.gen_range_f32(0.0..1.0) as f64 * total;
    let mut cumulative = 0.0;
    for (rank, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative >= threshold {
            return population.id_at_rank(rank);
        }
    }
    population.id_at_rank(size - 1)
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
        let mut pop = Population::new(n.max(1), n.max(1), (1, 0), ctor(), Prng::from_seed(2)).unwrap();
        for i in 0..n {
            let id = pop.allocate_entity().unwrap();
            pop.entity_mut(id).unwrap().set_fitness(Fitness::new(i as f64));
        }
        pop.sort();
        pop
    }

    #[test]
    fn ties_fall_back_to_a_valid_pick() {
        let mut pop = population(4);
        for rank in 0..4 {
            let id = pop.id_at_rank(rank).unwrap();
            pop.entity_mut(id).unwrap().set_fitness(Fitness::new(5.0));
        }
        let mut selector = RouletteSelectOne::new();
        assert!(selector.select_one(&pop).is_some());
    }

    #[test]
    fn empty_population_returns_none() {
        let pop = population(0);
        let mut selector = RouletteSelectOne::new();
        assert!(selector.select_one(&pop).is_none());
    }
}
