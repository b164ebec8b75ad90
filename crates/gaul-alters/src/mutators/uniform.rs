use gaul_core::{Chromosome, Gene, Genotype, Mutate, Population, Ratio};

/// Replaces each gene independently with a fresh random instance with
/// probability `rate`. The default mutator and a good starting point for
/// most problems, regardless of encoding.
#[derive(Debug, Clone)]
pub struct UniformMutator {
    rate: Ratio,
}

impl UniformMutator {
    pub fn new(rate: Ratio) -> Self {
        UniformMutator { rate }
    }
}

impl<C: Chromosome, P> Mutate<C, P> for UniformMutator {
    fn mutate(&self, population: &Population<C, P>, parent: &Genotype<C>) -> Genotype<C> {
        let mut child = parent.clone();
        let mut rng = population.rng();

        for chromosome in child.chromosomes_mut() {
            for i in 0..chromosome.len() {
                if rng.gen_bool(self.rate.value() as f64) {
                    let fresh = chromosome.get(i).new_instance(&mut rng);
                    chromosome.set(i, fresh);
                }
            }
        }

        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaul_codecs::{BitChromosome, BitGene};
    use gaul_core::Prng;
    use std::sync::Arc;

    fn ctor() -> Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> {
        Arc::new(|| Genotype::new(vec![BitChromosome::new(vec![BitGene::new(false); 8])]))
    }

    #[test]
    fn zero_rate_never_mutates() {
        let population: Population<BitChromosome> =
            Population::new(1, 1, (1, 8), ctor(), Prng::from_seed(6)).unwrap();
        let parent = Genotype::new(vec![BitChromosome::new(vec![BitGene::new(true); 8])]);

        let mutator = UniformMutator::new(Ratio::ZERO);
        let child = mutator.mutate(&population, &parent);

        assert_eq!(child.get(0).genes(), parent.get(0).genes());
    }
}
