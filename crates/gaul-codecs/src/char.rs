use std::fmt;

use gaul_core::{Chromosome, Gene, Prng, Valid};

/// Printable ASCII, space through tilde — the alphabet used by the
/// text-match style of problem (evolve a string towards a target phrase).
pub const PRINTABLE_ASCII: std::ops::RangeInclusive<u8> = 32..=126;

/// A single printable-character locus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharGene {
    allele: char,
}

impl CharGene {
    pub fn new(allele: char) -> Self {
        CharGene { allele }
    }

    fn random(rng: &mut Prng) -> Self {
        let code = rng.gen_range_usize(*PRINTABLE_ASCII.start() as usize..*PRINTABLE_ASCII.end() as usize + 1);
        CharGene::new(code as u8 as char)
    }
}

impl Valid for CharGene {
    fn is_valid(&self) -> bool {
        self.allele.is_ascii() && PRINTABLE_ASCII.contains(&(self.allele as u8))
    }
}

impl Gene for CharGene {
    type Allele = char;

    fn allele(&self) -> &char {
        &self.allele
    }

    fn new_instance(&self, rng: &mut Prng) -> Self {
        CharGene::random(rng)
    }

    fn with_allele(&self, allele: &char) -> Self {
        CharGene::new(*allele)
    }
}

impl fmt::Display for CharGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.allele)
    }
}

impl From<char> for CharGene {
    fn from(allele: char) -> Self {
        CharGene::new(allele)
    }
}

/// A fixed-length string of printable characters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharChromosome {
    genes: Vec<CharGene>,
}

impl CharChromosome {
    pub fn new(genes: Vec<CharGene>) -> Self {
        CharChromosome { genes }
    }

    pub fn random(length: usize, rng: &mut Prng) -> Self {
        let genes = (0..length).map(|_| CharGene::random(rng)).collect();
        CharChromosome { genes }
    }

    pub fn to_string_lossy(&self) -> String {
        self.genes.iter().map(|g| g.allele).collect()
    }
}

impl Chromosome for CharChromosome {
    type Gene = CharGene;

    fn genes(&self) -> &[CharGene] {
        &self.genes
    }

    fn genes_mut(&mut self) -> &mut [CharGene] {
        &mut self.genes
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.genes.iter().map(|g| g.allele as u8).collect()
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        CharChromosome {
            genes: bytes.iter().map(|b| CharGene::new(*b as char)).collect(),
        }
    }
}

impl From<&str> for CharChromosome {
    fn from(text: &str) -> Self {
        CharChromosome {
            genes: text.chars().map(CharGene::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_gene_is_printable() {
        let mut rng = Prng::from_seed(5);
        for _ in 0..100 {
            assert!(CharGene::random(&mut rng).is_valid());
        }
    }

    #[test]
    fn from_str_round_trips_text() {
        let chromosome = CharChromosome::from("Hello!");
        assert_eq!(chromosome.to_string_lossy(), "Hello!");
    }
}
