use gaul_core::{AdaptPolicy, Chromosome, Elitism, EntityId, Population};
use gaul_error::{gaul_err, GaulResult};
use tracing::{debug, trace};

/// Runs the generational engine to completion: crossover, mutation, adapt,
/// and survival each generation until `max_generations` is reached or the
/// bound generation hook asks the engine to stop. Returns the number of
/// generations actually completed.
///
/// Requires evaluate, select_one, select_two, mutate, and crossover bound;
/// adapt is required only when the population's scheme is not Darwin.
pub fn evolve<C: Chromosome, P>(
    population: &mut Population<C, P>,
    max_generations: usize,
) -> GaulResult<usize> {
    require_bindings(population)?;
    if population.current_size() == 0 {
        return Err(gaul_err!(Misconfiguration: "evolve called on an empty population"));
    }

    population.evaluate_unevaluated()?;
    population.sort();

    let mut generation = 0;
    while generation < max_generations && population.generation_hook() {
        run_generation(population)?;
        generation = population.increment_generation();
        trace!(generation, "completed generation");
    }
    debug!(generations = generation, "generational engine stopped");
    Ok(generation)
}

fn require_bindings<C: Chromosome, P>(population: &Population<C, P>) -> GaulResult<()> {
    if !population.has_evaluate() {
        return Err(gaul_err!(Misconfiguration: "evolve requires an evaluate operator"));
    }
    if !population.has_select_one() || !population.has_select_two() {
        return Err(gaul_err!(Misconfiguration: "evolve requires select_one and select_two operators"));
    }
    if !population.has_mutate() || !population.has_crossover() {
        return Err(gaul_err!(Misconfiguration: "evolve requires mutate and crossover operators"));
    }
    if population.scheme().requires_adapt() && !population.has_adapt() {
        return Err(gaul_err!(Misconfiguration: "non-Darwin scheme requires an adapt operator"));
    }
    Ok(())
}

/// One pass of §4.4 steps 2.1 through 2.5: latch, crossover, mutation,
/// adapt-and-evaluate, survival. Exposed at crate visibility so the
/// archipelago driver can apply it island-by-island after migration.
pub fn run_generation<C: Chromosome, P>(population: &mut Population<C, P>) -> GaulResult<()> {
    population.latch_orig_size();
    let orig_size = population.orig_size().expect("just latched");

    crossover_phase(population)?;
    mutation_phase(population)?;
    adapt_and_evaluate_phase(population, orig_size)?;
    survival_phase(population, orig_size)?;

    population.clear_orig_size();
    Ok(())
}

fn crossover_phase<C: Chromosome, P>(population: &mut Population<C, P>) -> GaulResult<()> {
    if !population.crossover_ratio().is_positive() {
        return Ok(());
    }
    population.reset_selection();
    while let Some((mother_id, father_id)) = population.select_two() {
        let mother = population.entity(mother_id).expect("live id").genotype().clone();
        let father = population.entity(father_id).expect("live id").genotype().clone();
        let (daughter, son) = population.crossover_genotypes(&mother, &father)?;

        let daughter_id = population.allocate_entity()?;
        population.entity_mut(daughter_id).expect("just allocated").set_genotype(daughter);
        let son_id = population.allocate_entity()?;
        population.entity_mut(son_id).expect("just allocated").set_genotype(son);
    }
    Ok(())
}

fn mutation_phase<C: Chromosome, P>(population: &mut Population<C, P>) -> GaulResult<()> {
    if !population.mutation_ratio().is_positive() {
        return Ok(());
    }
    population.reset_selection();
    while let Some(mother_id) = population.select_one() {
        let mother = population.entity(mother_id).expect("live id").genotype().clone();
        let daughter = population.mutate_genotype(&mother)?;

        let daughter_id = population.allocate_entity()?;
        population.entity_mut(daughter_id).expect("just allocated").set_genotype(daughter);
    }
    Ok(())
}

/// Parents occupy ranks `[0, orig_size)`, children `[orig_size, n)` — true
/// because crossover and mutation only ever append via `allocate_entity`.
fn adapt_and_evaluate_phase<C: Chromosome, P>(
    population: &mut Population<C, P>,
    orig_size: usize,
) -> GaulResult<()> {
    let scheme = population.scheme();
    apply_adapt_policy(population, 0..orig_size, scheme.parent_adapt)?;
    apply_adapt_policy(population, orig_size..population.current_size(), scheme.child_adapt)?;

    let ids: Vec<EntityId> = (orig_size..population.current_size())
        .filter_map(|rank| population.id_at_rank(rank))
        .filter(|&id| !population.entity(id).expect("live id").is_evaluated())
        .collect();
    for id in ids {
        population.evaluate_entity(id)?;
    }
    Ok(())
}

/// Applies one adapt policy to a contiguous rank range. None leaves the
/// range alone (it is evaluated, if needed, by the caller). Baldwinian
/// copies only the adapted fitness back; Lamarckian swaps the adapted
/// chromosomes into the rank as well.
fn apply_adapt_policy<C: Chromosome, P>(
    population: &mut Population<C, P>,
    ranks: std::ops::Range<usize>,
    policy: AdaptPolicy,
) -> GaulResult<()> {
    if policy == AdaptPolicy::None {
        return Ok(());
    }
    let ids: Vec<EntityId> = ranks.filter_map(|rank| population.id_at_rank(rank)).collect();
    for id in ids {
        let genotype = population.entity(id).expect("live id").genotype().clone();
        let (adult, adult_fitness) = population.adapt_genotype(&genotype)?;
        let entity = population.entity_mut(id).expect("live id");
        entity.set_fitness(adult_fitness);
        if policy == AdaptPolicy::Lamarck {
            entity.set_genotype(adult);
        }
    }
    Ok(())
}

fn survival_phase<C: Chromosome, P>(
    population: &mut Population<C, P>,
    orig_size: usize,
) -> GaulResult<()> {
    match population.elitism() {
        Elitism::ParentsDie => {
            population.dereference_rank_range(0, orig_size)?;
        }
        Elitism::OneParentSurvives => {
            let best_parent = best_rank_in(population, 0..orig_size);
            for rank in (0..orig_size).rev() {
                if Some(rank) == best_parent {
                    continue;
                }
                population.dereference_by_rank(rank)?;
            }
        }
        Elitism::ParentsSurvive => {}
    }

    if population.rescore_parents() {
        let ids: Vec<EntityId> = (0..population.current_size().min(orig_size))
            .filter_map(|rank| population.id_at_rank(rank))
            .collect();
        for id in ids {
            population.evaluate_entity(id)?;
        }
    }

    population.sort();
    population.genocide_to_stable_size()?;
    Ok(())
}

fn best_rank_in<C: Chromosome, P>(population: &Population<C, P>, ranks: std::ops::Range<usize>) -> Option<usize> {
    ranks
        .filter(|&rank| population.id_at_rank(rank).is_some())
        .max_by(|&a, &b| {
            let fa = population.entity_at_rank(a).expect("live rank").fitness();
            let fb = population.entity_at_rank(b).expect("live rank").fitness();
            fa.cmp(&fb)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaul_alters::{MultiPointCrossover, UniformMutator};
    use gaul_codecs::{BitChromosome, BitSeed};
    use gaul_core::{Gene, Prng, Ratio};
    use gaul_selectors::{Counted, TournamentSelectOne, TournamentSelectTwo};

    struct Onemax;

    impl gaul_core::Evaluate<BitChromosome, ()> for Onemax {
        fn evaluate(
            &self,
            genotype: &gaul_core::Genotype<BitChromosome>,
        ) -> GaulResult<gaul_core::operators::EvaluationOutcome<()>> {
            let count = genotype.chromosomes()[0]
                .genes()
                .iter()
                .filter(|gene| *gene.allele())
                .count();
            Ok(gaul_core::operators::EvaluationOutcome::fitness(gaul_core::Fitness::new(
                count as f64,
            )))
        }
    }

    fn onemax_population(size: usize, bits: usize, seed: u64) -> Population<BitChromosome, ()> {
        let seeder = BitSeed { num_chromosomes: 1, chromosome_len: bits };
        let ctor: std::sync::Arc<dyn Fn() -> gaul_core::Genotype<BitChromosome> + Send + Sync> =
            std::sync::Arc::new(move || gaul_core::Genotype::new(vec![BitChromosome::random(bits, &mut Prng::from_seed(0))]));
        let mut population = Population::new(size * 2, size, (1, bits), ctor, Prng::from_seed(seed)).unwrap();
        population.bind_seed(seeder);
        population.bind_evaluate(Onemax);
        population.bind_crossover(MultiPointCrossover::new(Ratio::new(0.9).unwrap(), 2));
        population.bind_mutate(UniformMutator::new(Ratio::new(0.1).unwrap()));
        population.bind_select_two(Counted::new(TournamentSelectTwo::new(3), size / 2));
        population.bind_select_one(Counted::new(TournamentSelectOne::new(3), size / 4));
        population.bind_replace(gaul_selectors::SteadyStateReplace::new(true));
        population.set_crossover_ratio(Ratio::new(0.9).unwrap());
        population.set_mutation_ratio(Ratio::new(0.1).unwrap());
        population.set_elitism(Elitism::ParentsDie);

        for _ in 0..size {
            let id = population.allocate_entity().unwrap();
            population.seed_entity(id).unwrap();
        }
        population
    }

    #[test]
    fn onemax_converges_toward_all_ones() {
        let mut population = onemax_population(60, 32, 12345678);
        let generations = evolve(&mut population, 150).unwrap();
        assert!(generations > 0);
        population.sort();
        let best = population.entity_at_rank(0).unwrap().fitness().value();
        assert!(best >= 28.0, "expected near-optimal fitness, got {best}");
    }

    #[test]
    fn parents_die_leaves_only_this_generations_children() {
        let mut population = onemax_population(20, 16, 7);
        evolve(&mut population, 1).unwrap();
        assert!(population.current_size() <= population.stable_size());
    }

    #[test]
    fn missing_bindings_is_a_misconfiguration_error() {
        let ctor: std::sync::Arc<dyn Fn() -> gaul_core::Genotype<BitChromosome> + Send + Sync> =
            std::sync::Arc::new(|| gaul_core::Genotype::new(vec![BitChromosome::new(vec![])]));
        let mut population: Population<BitChromosome> =
            Population::new(4, 4, (1, 0), ctor, Prng::from_seed(1)).unwrap();
        assert!(evolve(&mut population, 10).is_err());
    }
}
