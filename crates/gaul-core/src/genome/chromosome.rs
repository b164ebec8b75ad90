use super::gene::{Gene, Valid};

/// One of the N fixed-length arrays that together form an entity's
/// genotype. This is the "Genome capability" the design notes call for: a
/// trait every concrete encoding implements, replacing a void-pointer +
/// callback-table representation. The population is generic over it, and
/// operator bindings take typed references — the engine never inspects
/// chromosome contents directly.
pub trait Chromosome: Clone + std::fmt::Debug + Send + Sync {
    type Gene: Gene;

    fn genes(&self) -> &[Self::Gene];
    fn genes_mut(&mut self) -> &mut [Self::Gene];

    fn get(&self, index: usize) -> &Self::Gene {
        &self.genes()[index]
    }

    fn set(&mut self, index: usize, gene: Self::Gene) {
        self.genes_mut()[index] = gene;
    }

    fn len(&self) -> usize {
        self.genes().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> std::slice::Iter<'_, Self::Gene> {
        self.genes().iter()
    }

    fn is_valid(&self) -> bool {
        self.genes().iter().all(Valid::is_valid)
    }

    /// Serializes this chromosome's loci for transport to a worker process
    /// or MPI rank, or for a persisted population dump.
    fn to_bytes(&self) -> Vec<u8>;
    fn from_bytes(bytes: &[u8]) -> Self;

    fn to_display(&self) -> String {
        format!("{:?}", self)
    }
}
