use gaul_core::{Chromosome, Genotype, Mutate, Population, Ratio};

/// With probability `rate`, reverses a random contiguous section of a
/// chromosome. Best used on longer chromosomes — on small ones the random
/// section is rarely wide enough to matter.
#[derive(Debug, Clone)]
pub struct InversionMutator {
    rate: Ratio,
}

impl InversionMutator {
    pub fn new(rate: Ratio) -> Self {
        InversionMutator { rate }
    }
}

impl<C: Chromosome, P> Mutate<C, P> for InversionMutator {
    fn mutate(&self, population: &Population<C, P>, parent: &Genotype<C>) -> Genotype<C> {
        let mut child = parent.clone();
        let mut rng = population.rng();

        for chromosome in child.chromosomes_mut() {
            let len = chromosome.len();
            if len < 2 || !rng.gen_bool(self.rate.value() as f64) {
                continue;
            }
            let start = rng.gen_range_usize(0..len);
            let end = rng.gen_range_usize(start..len);
            chromosome.genes_mut()[start..end].reverse();
        }

        child
    }
}
