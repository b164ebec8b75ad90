//! The archipelago driver (C8): K independently-operated populations,
//! each tagged with an island index, advanced one generation at a time
//! with a migration phase in between. Migration runs on a cyclic ring —
//! island i sends to island i-1, and island 0 wraps around to island
//! K-1 — so every island has exactly one upstream and one downstream
//! neighbor regardless of K.

use gaul_core::{Chromosome, EntityId, Population};
use gaul_error::{gaul_err, GaulResult};

/// Runs the archipelago to completion. Returns the number of generations
/// actually completed. Stops at `max_generations` or as soon as any
/// island's bound generation hook returns stop.
pub fn evolve<C: Chromosome, P>(
    islands: &mut [Population<C, P>],
    max_generations: usize,
) -> GaulResult<usize> {
    if islands.is_empty() {
        return Err(gaul_err!(Misconfiguration: "archipelago requires at least one island"));
    }

    let mut generation = 0;
    while generation < max_generations && islands.iter().all(|island| island.generation_hook()) {
        migrate(islands)?;
        for island in islands.iter_mut() {
            island.sort();
        }
        for island in islands.iter_mut() {
            gaul_engines::generational::run_generation(island)?;
            island.increment_generation();
        }
        generation += 1;
    }
    Ok(generation)
}

/// One migration phase: every island but 0 sends a coin-flip subset of its
/// start-of-generation entities to its lower neighbor; island 0 sends to
/// the last island, closing the ring.
fn migrate<C: Chromosome, P>(islands: &mut [Population<C, P>]) -> GaulResult<()> {
    let k = islands.len();
    if k < 2 {
        return Ok(());
    }
    for i in 1..k {
        migrate_pair(islands, i, i - 1)?;
    }
    migrate_pair(islands, 0, k - 1)?;
    Ok(())
}

fn migrate_pair<C: Chromosome, P>(
    islands: &mut [Population<C, P>],
    from: usize,
    to: usize,
) -> GaulResult<()> {
    let ratio = islands[from].migration_ratio();
    if !ratio.is_positive() {
        return Ok(());
    }

    let migrants = {
        let source = &islands[from];
        let snapshot: Vec<EntityId> = (0..source.current_size())
            .filter_map(|rank| source.id_at_rank(rank))
            .collect();
        let mut rng = source.rng();
        snapshot
            .into_iter()
            .filter(|_| rng.gen_bool(ratio.value() as f64))
            .map(|id| {
                let entity = source.entity(id).expect("live id");
                (entity.genotype().clone(), entity.fitness())
            })
            .collect::<Vec<_>>()
    };

    let (lower, upper) = if from < to { (from, to) } else { (to, from) };
    let (left, right) = islands.split_at_mut(upper);
    let dest = if to == lower { &mut left[lower] } else { &mut right[0] };

    for (genotype, fitness) in migrants {
        let id = dest.allocate_entity()?;
        let entity = dest.entity_mut(id).expect("just allocated");
        entity.set_genotype(genotype);
        entity.set_fitness(fitness);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaul_alters::{MultiPointCrossover, UniformMutator};
    use gaul_codecs::{BitChromosome, BitSeed};
    use gaul_core::{Fitness, Gene, Genotype, Prng, Ratio};
    use gaul_error::GaulResult;
    use gaul_selectors::{Counted, SteadyStateReplace, TournamentSelectOne, TournamentSelectTwo};
    use std::sync::Arc;

    struct Onemax;

    impl gaul_core::Evaluate<BitChromosome, ()> for Onemax {
        fn evaluate(&self, genotype: &Genotype<BitChromosome>) -> GaulResult<gaul_core::operators::EvaluationOutcome<()>> {
            let count = genotype.chromosomes()[0].genes().iter().filter(|g| *g.allele()).count();
            Ok(gaul_core::operators::EvaluationOutcome::fitness(Fitness::new(count as f64)))
        }
    }

    fn island(size: usize, bits: usize, seed: u64, migration_ratio: f32) -> Population<BitChromosome, ()> {
        let ctor: Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> =
            Arc::new(move || Genotype::new(vec![BitChromosome::random(bits, &mut Prng::from_seed(0))]));
        let mut population = Population::new(size * 2, size, (1, bits), ctor, Prng::from_seed(seed)).unwrap();
        population.bind_seed(BitSeed { num_chromosomes: 1, chromosome_len: bits });
        population.bind_evaluate(Onemax);
        population.bind_crossover(MultiPointCrossover::new(Ratio::new(0.8).unwrap(), 2));
        population.bind_mutate(UniformMutator::new(Ratio::new(0.1).unwrap()));
        population.bind_select_two(Counted::new(TournamentSelectTwo::new(3), size / 2));
        population.bind_select_one(Counted::new(TournamentSelectOne::new(3), size / 4));
        population.bind_replace(SteadyStateReplace::new(true));
        population.set_crossover_ratio(Ratio::new(0.8).unwrap());
        population.set_mutation_ratio(Ratio::new(0.1).unwrap());
        population.set_migration_ratio(Ratio::new(migration_ratio).unwrap());
        for _ in 0..size {
            let id = population.allocate_entity().unwrap();
            population.seed_entity(id).unwrap();
        }
        population
    }

    #[test]
    fn archipelago_preserves_total_population_modulo_migration_growth() {
        let mut islands: Vec<_> = (0..3).map(|i| island(20, 16, 10 + i, 0.0)).collect();
        let total_before: usize = islands.iter().map(|isl| isl.current_size()).sum();
        evolve(&mut islands, 5).unwrap();
        let total_after: usize = islands.iter().map(|isl| isl.current_size()).sum();
        assert_eq!(total_before, total_after);
    }

    #[test]
    fn migration_can_move_entities_between_neighboring_islands() {
        let mut islands: Vec<_> = (0..3).map(|i| island(20, 16, 30 + i, 1.0)).collect();
        migrate(&mut islands).unwrap();
        assert!(islands.iter().any(|isl| isl.current_size() > 20));
    }

    #[test]
    fn single_island_archipelago_runs_without_migration() {
        let mut islands = vec![island(20, 16, 77, 0.5)];
        let generations = evolve(&mut islands, 3).unwrap();
        assert_eq!(generations, 3);
    }

    #[test]
    fn empty_archipelago_is_a_misconfiguration_error() {
        let mut islands: Vec<Population<BitChromosome>> = Vec::new();
        assert!(evolve(&mut islands, 1).is_err());
    }
}
