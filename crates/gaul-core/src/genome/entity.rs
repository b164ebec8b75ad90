use std::sync::Arc;

use super::chromosome::Chromosome;
use super::genotype::Genotype;
use crate::fitness::Fitness;

/// A stable identity for a live entity, backed by its pool slot. Dereferenced
/// entities free their id; a later `get_free_entity` may reuse the same id
/// for an unrelated new entity.
pub type EntityId = gaul_utils::SlabKey;

/// One candidate solution: a genotype, its fitness (or the unevaluated
/// sentinel), and an optional phenotype of evaluation artifacts. Phenotype
/// entries are reference-counted via `Arc` so cloning an entity shares them
/// rather than deep-copying — the typed-language alternative the design
/// notes call out to the source's linked-list-plus-user-destructor scheme.
#[derive(Clone, Debug)]
pub struct Entity<C: Chromosome, P = ()> {
    genotype: Genotype<C>,
    fitness: Fitness,
    phenotype: Vec<Arc<P>>,
}

impl<C: Chromosome, P> Entity<C, P> {
    pub fn new(genotype: Genotype<C>) -> Self {
        Self {
            genotype,
            fitness: Fitness::UNEVALUATED,
            phenotype: Vec::new(),
        }
    }

    pub fn genotype(&self) -> &Genotype<C> {
        &self.genotype
    }

    pub fn set_genotype(&mut self, genotype: Genotype<C>) {
        self.genotype = genotype;
    }

    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: Fitness) {
        self.fitness = fitness;
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_evaluated()
    }

    pub fn invalidate(&mut self) {
        self.fitness = Fitness::UNEVALUATED;
    }

    pub fn phenotype(&self) -> &[Arc<P>] {
        &self.phenotype
    }

    pub fn set_phenotype(&mut self, phenotype: Vec<Arc<P>>) {
        self.phenotype = phenotype;
    }

    /// Resets this entity to a blank scratch state without releasing its
    /// pool slot: phenotype cleared, fitness reset to the unevaluated
    /// sentinel. The genotype is left for the caller to overwrite.
    pub fn blank(&mut self) {
        self.phenotype.clear();
        self.fitness = Fitness::UNEVALUATED;
    }
}
