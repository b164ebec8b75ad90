use gaul_core::{Chromosome, Crossover, Genotype, Population, Ratio};

/// Swaps each gene independently between parents with probability `rate`.
/// The simplest crossover and a reasonable default for any encoding.
pub struct UniformCrossover {
    rate: Ratio,
}

impl UniformCrossover {
    pub fn new(rate: Ratio) -> Self {
        UniformCrossover { rate }
    }
}

impl<C: Chromosome, P> Crossover<C, P> for UniformCrossover {
    fn crossover(
        &self,
        population: &Population<C, P>,
        mother: &Genotype<C>,
        father: &Genotype<C>,
    ) -> (Genotype<C>, Genotype<C>) {
        let mut daughter = mother.clone();
        let mut son = father.clone();
        let mut rng = population.rng();

        for (d_chrom, s_chrom) in daughter.chromosomes_mut().iter_mut().zip(son.chromosomes_mut()) {
            let len = d_chrom.len().min(s_chrom.len());
            for i in 0..len {
                if rng.gen_bool(self.rate.value() as f64) {
                    let d_gene = d_chrom.get(i).clone();
                    let s_gene = s_chrom.get(i).clone();
                    d_chrom.set(i, s_gene);
                    s_chrom.set(i, d_gene);
                }
            }
        }

        (daughter, son)
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
    fn full_rate_swaps_every_gene() {
        let population: Population<BitChromosome> =
            Population::new(1, 1, (1, 8), ctor(), Prng::from_seed(4)).unwrap();
        let mother = Genotype::new(vec![BitChromosome::new(vec![BitGene::new(true); 8])]);
        let father = Genotype::new(vec![BitChromosome::new(vec![BitGene::new(false); 8])]);

        let crossover = UniformCrossover::new(Ratio::ONE);
        let (daughter, son) = crossover.crossover(&population, &mother, &father);

        assert_eq!(daughter.get(0).genes(), father.get(0).genes());
        assert_eq!(son.get(0).genes(), mother.get(0).genes());
    }

    #[test]
    fn zero_rate_leaves_parents_unchanged() {
        let population: Population<BitChromosome> =
            Population::new(1, 1, (1, 8), ctor(), Prng::from_seed(4)).unwrap();
        let mother = Genotype::new(vec![BitChromosome::new(vec![BitGene::new(true); 8])]);
        let father = Genotype::new(vec![BitChromosome::new(vec![BitGene::new(false); 8])]);

        let crossover = UniformCrossover::new(Ratio::ZERO);
        let (daughter, son) = crossover.crossover(&population, &mother, &father);

        assert_eq!(daughter.get(0).genes(), mother.get(0).genes());
        assert_eq!(son.get(0).genes(), father.get(0).genes());
    }
}
