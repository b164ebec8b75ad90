use std::fmt;

use gaul_core::{Chromosome, Gene, Prng, Valid};

/// A single bit locus. Always valid — there is no invalid state for a bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitGene {
    allele: bool,
}

impl BitGene {
    pub fn new(allele: bool) -> Self {
        BitGene { allele }
    }
}

impl Valid for BitGene {}

impl Gene for BitGene {
    type Allele = bool;

    fn allele(&self) -> &bool {
        &self.allele
    }

    fn new_instance(&self, rng: &mut Prng) -> Self {
        BitGene::new(rng.gen_bool(0.5))
    }

    fn with_allele(&self, allele: &bool) -> Self {
        BitGene::new(*allele)
    }
}

impl fmt::Display for BitGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.allele { 1 } else { 0 })
    }
}

impl From<bool> for BitGene {
    fn from(allele: bool) -> Self {
        BitGene::new(allele)
    }
}

impl From<BitGene> for bool {
    fn from(gene: BitGene) -> bool {
        gene.allele
    }
}

/// A fixed-length array of bits — the classic onemax / bit-string encoding.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitChromosome {
    genes: Vec<BitGene>,
}

impl BitChromosome {
    pub fn new(genes: Vec<BitGene>) -> Self {
        BitChromosome { genes }
    }

    /// A chromosome of `length` bits, each drawn independently from `rng`.
    pub fn random(length: usize, rng: &mut Prng) -> Self {
        let genes = (0..length).map(|_| BitGene::new(rng.gen_bool(0.5))).collect();
        BitChromosome { genes }
    }
}

impl Chromosome for BitChromosome {
    type Gene = BitGene;

    fn genes(&self) -> &[BitGene] {
        &self.genes
    }

    fn genes_mut(&mut self) -> &mut [BitGene] {
        &mut self.genes
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.genes.iter().map(|g| g.allele as u8).collect()
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        BitChromosome {
            genes: bytes.iter().map(|b| BitGene::new(*b != 0)).collect(),
        }
    }
}

impl From<Vec<bool>> for BitChromosome {
    fn from(alleles: Vec<bool>) -> Self {
        BitChromosome {
            genes: alleles.into_iter().map(BitGene::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_allele_flips_in_place() {
        let gene = BitGene::new(false);
        let flipped = gene.with_allele(&true);
        assert!(*flipped.allele());
    }

    #[test]
    fn round_trips_through_bytes() {
        let chromosome = BitChromosome::from(vec![true, false, true, true]);
        let bytes = chromosome.to_bytes();
        let restored = BitChromosome::from_bytes(&bytes);
        assert_eq!(chromosome, restored);
    }

    #[test]
    fn random_chromosome_has_requested_length() {
        let mut rng = Prng::from_seed(3);
        let chromosome = BitChromosome::random(16, &mut rng);
        assert_eq!(chromosome.genes().len(), 16);
    }
}
