use super::chromosome::Chromosome;

/// An entity's genetic encoding: an ordered sequence of chromosomes.
#[derive(Clone, Debug)]
pub struct Genotype<C: Chromosome> {
    chromosomes: Vec<C>,
}

impl<C: Chromosome> Genotype<C> {
    pub fn new(chromosomes: Vec<C>) -> Self {
        Self { chromosomes }
    }

    pub fn chromosomes(&self) -> &[C] {
        &self.chromosomes
    }

    pub fn chromosomes_mut(&mut self) -> &mut [C] {
        &mut self.chromosomes
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn get(&self, index: usize) -> &C {
        &self.chromosomes[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.chromosomes.iter()
    }

    pub fn is_valid(&self) -> bool {
        self.chromosomes.iter().all(Chromosome::is_valid)
    }
}

impl<C: Chromosome> IntoIterator for Genotype<C> {
    type Item = C;
    type IntoIter = std::vec::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.into_iter()
    }
}
