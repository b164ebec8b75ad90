use gaul_core::{Genotype, Population, Seed};
use gaul_error::GaulResult;

use crate::bit::BitChromosome;
use crate::char::CharChromosome;
use crate::int::IntChromosome;
use crate::real::RealChromosome;

/// Seeds a genotype of `num_chromosomes` independent [`BitChromosome`]s,
/// each `chromosome_len` bits long, drawn from the population's PRNG.
pub struct BitSeed {
    pub num_chromosomes: usize,
    pub chromosome_len: usize,
}

impl<P> Seed<BitChromosome, P> for BitSeed {
    fn seed(&self, population: &Population<BitChromosome, P>) -> GaulResult<Genotype<BitChromosome>> {
        let mut rng = population.rng();
        let chromosomes = (0..self.num_chromosomes)
            .map(|_| BitChromosome::random(self.chromosome_len, &mut rng))
            .collect();
        Ok(Genotype::new(chromosomes))
    }
}

/// Seeds a genotype of bounded-integer chromosomes.
pub struct IntSeed {
    pub num_chromosomes: usize,
    pub chromosome_len: usize,
    pub min: i64,
    pub max: i64,
}

impl<P> Seed<IntChromosome, P> for IntSeed {
    fn seed(&self, population: &Population<IntChromosome, P>) -> GaulResult<Genotype<IntChromosome>> {
        let mut rng = population.rng();
        let chromosomes = (0..self.num_chromosomes)
            .map(|_| IntChromosome::random(self.chromosome_len, self.min, self.max, &mut rng))
            .collect();
        Ok(Genotype::new(chromosomes))
    }
}

/// Seeds a genotype of bounded-real chromosomes.
pub struct RealSeed {
    pub num_chromosomes: usize,
    pub chromosome_len: usize,
    pub min: f64,
    pub max: f64,
}

impl<P> Seed<RealChromosome, P> for RealSeed {
    fn seed(&self, population: &Population<RealChromosome, P>) -> GaulResult<Genotype<RealChromosome>> {
        let mut rng = population.rng();
        let chromosomes = (0..self.num_chromosomes)
            .map(|_| RealChromosome::random(self.chromosome_len, self.min, self.max, &mut rng))
            .collect();
        Ok(Genotype::new(chromosomes))
    }
}

/// Seeds a genotype of printable-character chromosomes — each chromosome a
/// random string the same length as a text-match target phrase.
pub struct CharSeed {
    pub num_chromosomes: usize,
    pub chromosome_len: usize,
}

impl<P> Seed<CharChromosome, P> for CharSeed {
    fn seed(&self, population: &Population<CharChromosome, P>) -> GaulResult<Genotype<CharChromosome>> {
        let mut rng = population.rng();
        let chromosomes = (0..self.num_chromosomes)
            .map(|_| CharChromosome::random(self.chromosome_len, &mut rng))
            .collect();
        Ok(Genotype::new(chromosomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaul_core::{Chromosome, Prng};
    use std::sync::Arc;

    fn ctor() -> Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> {
        Arc::new(|| Genotype::new(vec![BitChromosome::random(1, &mut Prng::from_seed(0))]))
    }

    #[test]
    fn bit_seed_produces_requested_shape() {
        let population: Population<BitChromosome> =
            Population::new(1, 1, (2, 8), ctor(), Prng::from_seed(1)).unwrap();
        let seed = BitSeed {
            num_chromosomes: 2,
            chromosome_len: 8,
        };
        let genotype = seed.seed(&population).unwrap();
        assert_eq!(genotype.len(), 2);
        assert_eq!(genotype.get(0).len(), 8);
    }
}
