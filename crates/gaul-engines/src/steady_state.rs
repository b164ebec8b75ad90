use gaul_core::{AdaptPolicy, Chromosome, Population};
use gaul_error::{gaul_err, GaulResult};
use tracing::trace;

/// Runs one steady-state iteration: a crossover child pair and a mutation
/// child, each evaluated and handed to the bound `replace` policy as soon
/// as it exists, rather than waiting for a whole generation to complete.
///
/// Callers drive the loop themselves (the engine has no notion of
/// `max_generations`) so they can terminate on iteration count,
/// convergence, or a found target.
pub fn iterate<C: Chromosome, P>(population: &mut Population<C, P>) -> GaulResult<()> {
    require_bindings(population)?;

    if let Some((mother_id, father_id)) = population.select_two() {
        let mother = population.entity(mother_id).expect("live id").genotype().clone();
        let father = population.entity(father_id).expect("live id").genotype().clone();
        let (daughter, son) = population.crossover_genotypes(&mother, &father)?;
        for child in [daughter, son] {
            spawn_child(population, child)?;
        }
    }

    if let Some(mother_id) = population.select_one() {
        let mother = population.entity(mother_id).expect("live id").genotype().clone();
        let daughter = population.mutate_genotype(&mother)?;
        spawn_child(population, daughter)?;
    }

    Ok(())
}

/// Runs `iterate` until `max_iterations` elapses or the generation hook
/// (reused here as the steady-state stop signal) returns false. Returns the
/// number of iterations completed.
pub fn run<C: Chromosome, P>(
    population: &mut Population<C, P>,
    max_iterations: usize,
) -> GaulResult<usize> {
    let mut completed = 0;
    while completed < max_iterations && population.generation_hook() {
        iterate(population)?;
        completed += 1;
        trace!(iteration = completed, "completed steady-state iteration");
    }
    Ok(completed)
}

fn require_bindings<C: Chromosome, P>(population: &Population<C, P>) -> GaulResult<()> {
    if !population.has_evaluate() {
        return Err(gaul_err!(Misconfiguration: "steady-state engine requires an evaluate operator"));
    }
    if !population.has_select_one() || !population.has_select_two() {
        return Err(gaul_err!(Misconfiguration: "steady-state engine requires select_one and select_two operators"));
    }
    if !population.has_mutate() || !population.has_crossover() {
        return Err(gaul_err!(Misconfiguration: "steady-state engine requires mutate and crossover operators"));
    }
    if !population.has_replace() {
        return Err(gaul_err!(Misconfiguration: "steady-state engine requires a replace operator"));
    }
    if population.scheme().requires_adapt() && !population.has_adapt() {
        return Err(gaul_err!(Misconfiguration: "non-Darwin scheme requires an adapt operator"));
    }
    Ok(())
}

/// Allocates, adapts (per the child policy), evaluates, and hands one new
/// child off to the bound replace operator.
fn spawn_child<C: Chromosome, P>(
    population: &mut Population<C, P>,
    genotype: gaul_core::Genotype<C>,
) -> GaulResult<()> {
    let id = population.allocate_entity()?;
    population.entity_mut(id).expect("just allocated").set_genotype(genotype);

    let policy = population.scheme().child_adapt;
    if policy != AdaptPolicy::None {
        let current = population.entity(id).expect("live id").genotype().clone();
        let (adult, adult_fitness) = population.adapt_genotype(&current)?;
        let entity = population.entity_mut(id).expect("live id");
        entity.set_fitness(adult_fitness);
        if policy == AdaptPolicy::Lamarck {
            entity.set_genotype(adult);
        }
    }

    if !population.entity(id).expect("live id").is_evaluated() {
        population.evaluate_entity(id)?;
    }

    population.apply_replace(id)
}
