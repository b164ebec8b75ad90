use std::sync::Arc;

use gaul_error::GaulResult;

use crate::genome::{Chromosome, Entity, EntityId, Genotype};
use crate::population::Population;

/// Compute and store fitness for a genotype. Must be deterministic given
/// the genotype (exceptions acceptable for intentionally stochastic
/// objectives). Takes only the genotype, not the population, so it is
/// trivially shippable across the parallel evaluator variants (C7).
pub trait Evaluate<C: Chromosome, P = ()>: Send + Sync {
    fn evaluate(&self, genotype: &Genotype<C>) -> GaulResult<EvaluationOutcome<P>>;
}

/// The result of one `evaluate` call: the fitness and, optionally, the
/// per-chromosome artifacts produced while computing it.
pub struct EvaluationOutcome<P = ()> {
    pub fitness: crate::fitness::Fitness,
    pub phenotype: Vec<Arc<P>>,
}

impl<P> EvaluationOutcome<P> {
    pub fn fitness(fitness: crate::fitness::Fitness) -> Self {
        Self {
            fitness,
            phenotype: Vec::new(),
        }
    }

    pub fn with_phenotype(fitness: crate::fitness::Fitness, phenotype: Vec<Arc<P>>) -> Self {
        Self { fitness, phenotype }
    }
}

/// Initializes a fresh entity's chromosomes to a starting state.
pub trait Seed<C: Chromosome, P = ()>: Send + Sync {
    fn seed(&self, population: &Population<C, P>) -> GaulResult<Genotype<C>>;
}

/// Local search: returns a possibly-new adult genotype and its fitness.
/// Required only when the population's scheme is not `Scheme::DARWIN`.
pub trait Adapt<C: Chromosome, P = ()>: Send + Sync {
    fn adapt(
        &self,
        population: &Population<C, P>,
        genotype: &Genotype<C>,
    ) -> GaulResult<(Genotype<C>, crate::fitness::Fitness)>;
}

/// Iterator-style asexual selection: called repeatedly with a cursor reset
/// at the start of each mutation phase; returns `None` when the engine
/// should stop selecting.
pub trait SelectOne<C: Chromosome, P = ()>: Send + Sync {
    fn reset(&mut self) {}
    fn select_one(&mut self, population: &Population<C, P>) -> Option<EntityId>;
}

/// Iterator-style sexual selection, analogous to [`SelectOne`].
pub trait SelectTwo<C: Chromosome, P = ()>: Send + Sync {
    fn reset(&mut self) {}
    fn select_two(&mut self, population: &Population<C, P>) -> Option<(EntityId, EntityId)>;
}

/// Writes a mutated copy of `parent`.
pub trait Mutate<C: Chromosome, P = ()>: Send + Sync {
    fn mutate(&self, population: &Population<C, P>, parent: &Genotype<C>) -> Genotype<C>;
}

/// Writes recombined offspring (daughter, son) from (mother, father).
pub trait Crossover<C: Chromosome, P = ()>: Send + Sync {
    fn crossover(
        &self,
        population: &Population<C, P>,
        mother: &Genotype<C>,
        father: &Genotype<C>,
    ) -> (Genotype<C>, Genotype<C>);
}

/// Steady-state insertion policy: encapsulates how `child` enters the
/// population (e.g. displace the worst entity, probabilistic replacement).
pub trait Replace<C: Chromosome, P = ()>: Send + Sync {
    fn replace(&self, population: &mut Population<C, P>, child: EntityId) -> GaulResult<()>;
}

/// Pre-generation callback; returning `false` terminates evolution at the
/// next phase boundary.
pub trait GenerationHook<C: Chromosome, P = ()>: Send + Sync {
    fn on_generation(&mut self, generation: usize, population: &Population<C, P>) -> bool;
}

/// Analogous to [`GenerationHook`] for non-evolutionary iterative methods
/// (e.g. the steady-state engine, counted by iteration rather than
/// generation).
pub trait IterationHook<C: Chromosome, P = ()>: Send + Sync {
    fn on_iteration(&mut self, iteration: usize, entity: &Entity<C, P>) -> bool;
}
