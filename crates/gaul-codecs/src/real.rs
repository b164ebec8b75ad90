use std::fmt;

use gaul_core::{Chromosome, Gene, Prng, Valid};

/// A bounded real-valued locus, used for function-optimization problems
/// like the quartic polynomial. `min`/`max` bound both the randomly-seeded
/// value and the valid range after crossover/mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealGene {
    allele: f64,
    min: f64,
    max: f64,
}

impl RealGene {
    pub fn new(allele: f64, min: f64, max: f64) -> Self {
        debug_assert!(min <= max, "RealGene bounds must be ordered");
        RealGene {
            allele: allele.clamp(min, max),
            min,
            max,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl Valid for RealGene {
    fn is_valid(&self) -> bool {
        self.allele.is_finite() && self.allele >= self.min && self.allele <= self.max
    }
}

impl Gene for RealGene {
    type Allele = f64;

    fn allele(&self) -> &f64 {
        &self.allele
    }

    fn new_instance(&self, rng: &mut Prng) -> Self {
        let span = (self.max - self.min) as f32;
        let allele = self.min + rng.gen_range_f32(0.0..span.max(f32::MIN_POSITIVE)) as f64;
        RealGene::new(allele, self.min, self.max)
    }

    fn with_allele(&self, allele: &f64) -> Self {
        RealGene::new(*allele, self.min, self.max)
    }
}

impl fmt::Display for RealGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.allele)
    }
}

/// A fixed-length array of bounded reals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealChromosome {
    genes: Vec<RealGene>,
}

impl RealChromosome {
    pub fn new(genes: Vec<RealGene>) -> Self {
        RealChromosome { genes }
    }

    pub fn random(length: usize, min: f64, max: f64, rng: &mut Prng) -> Self {
        let template = RealGene::new(min, min, max);
        let genes = (0..length).map(|_| template.new_instance(rng)).collect();
        RealChromosome { genes }
    }
}

impl Chromosome for RealChromosome {
    type Gene = RealGene;

    fn genes(&self) -> &[RealGene] {
        &self.genes
    }

    fn genes_mut(&mut self) -> &mut [RealGene] {
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
                let allele = f64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
                RealGene::new(allele, f64::MIN, f64::MAX)
            })
            .collect();
        RealChromosome { genes }
    }
}
