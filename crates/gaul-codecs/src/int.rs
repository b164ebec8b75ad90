use std::fmt;

use gaul_core::{Chromosome, Gene, Prng, Valid};

/// A bounded integer locus. The allele is always kept within `[min, max]`;
/// `new_instance` draws a fresh value from the same bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntGene {
    allele: i64,
    min: i64,
    max: i64,
}

impl IntGene {
    pub fn new(allele: i64, min: i64, max: i64) -> Self {
        debug_assert!(min <= max, "IntGene bounds must be ordered");
        IntGene {
            allele: allele.clamp(min, max),
            min,
            max,
        }
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.min, self.max)
    }
}

impl Valid for IntGene {
    fn is_valid(&self) -> bool {
        (self.min..=self.max).contains(&self.allele)
    }
}

impl Gene for IntGene {
    type Allele = i64;

    fn allele(&self) -> &i64 {
        &self.allele
    }

    fn new_instance(&self, rng: &mut Prng) -> Self {
        let span = (self.max - self.min) as f32 + 1.0;
        let offset = (rng.gen_range_f32(0.0..span)).floor() as i64;
        IntGene::new(self.min + offset, self.min, self.max)
    }

    fn with_allele(&self, allele: &i64) -> Self {
        IntGene::new(*allele, self.min, self.max)
    }
}

impl fmt::Display for IntGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.allele)
    }
}

/// A fixed-length array of bounded integers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntChromosome {
    genes: Vec<IntGene>,
}

impl IntChromosome {
    pub fn new(genes: Vec<IntGene>) -> Self {
        IntChromosome { genes }
    }

    pub fn random(length: usize, min: i64, max: i64, rng: &mut Prng) -> Self {
        let template = IntGene::new(min, min, max);
        let genes = (0..length).map(|_| template.new_instance(rng)).collect();
        IntChromosome { genes }
    }
}

impl Chromosome for IntChromosome {
    type Gene = IntGene;

    fn genes(&self) -> &[IntGene] {
        &self.genes
    }

    fn genes_mut(&mut self) -> &mut [IntGene] {
        &mut self.genes
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.genes.len() * 8);
        for gene in &self.genes {
            bytes.extend_from_slice(&gene.allele.to_le_bytes());
        }
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        let genes = bytes
            .chunks_exact(8)
            .map(|chunk| {
                let allele = i64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
                IntGene::new(allele, i64::MIN, i64::MAX)
            })
            .collect();
        IntChromosome { genes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_allele_into_bounds() {
        let gene = IntGene::new(100, 0, 10);
        assert_eq!(*gene.allele(), 10);
    }

    #[test]
    fn new_instance_stays_within_bounds() {
        let gene = IntGene::new(5, 0, 10);
        let mut rng = Prng::from_seed(11);
        for _ in 0..50 {
            let fresh = gene.new_instance(&mut rng);
            assert!(fresh.is_valid());
        }
    }

    #[test]
    fn round_trips_through_bytes() {
        let chromosome = IntChromosome::new(vec![IntGene::new(-5, -100, 100), IntGene::new(42, -100, 100)]);
        let restored = IntChromosome::from_bytes(&chromosome.to_bytes());
        let original: Vec<i64> = chromosome.genes().iter().map(|g| *g.allele()).collect();
        let round_tripped: Vec<i64> = restored.genes().iter().map(|g| *g.allele()).collect();
        assert_eq!(original, round_tripped);
    }
}
