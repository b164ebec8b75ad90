use gaul_core::{Chromosome, Genotype, Mutate, Population, Ratio};

/// Swaps each gene with another random locus in the same chromosome with
/// probability `rate`. Preserves the chromosome's multiset of alleles —
/// useful for permutation-flavored encodings where `UniformMutator` would
/// break a validity invariant.
#[derive(Debug, Clone)]
pub struct SwapMutator {
    rate: Ratio,
}

impl SwapMutator {
    pub fn new(rate: Ratio) -> Self {
        SwapMutator { rate }
    }
}

impl<C: Chromosome, P> Mutate<C, P> for SwapMutator {
    fn mutate(&self, population: &Population<C, P>, parent: &Genotype<C>) -> Genotype<C> {
        let mut child = parent.clone();
        let mut rng = population.rng();

        for chromosome in child.chromosomes_mut() {
            let len = chromosome.len();
            if len < 2 {
                continue;
            }
            for i in 0..len {
                if rng.gen_bool(self.rate.value() as f64) {
                    let j = rng.gen_range_usize(0..len);
                    if j != i {
                        chromosome.genes_mut().swap(i, j);
                    }
                }
            }
        }

        child
    }
}
