use gaul_core::{Chromosome, Crossover, Genotype, Population, Prng, Ratio};

/// Crosses two chromosomes at `num_points` randomly-chosen loci, swapping
/// alternating segments between parents. `num_points` must be at least 1;
/// more than 2 points rarely helps but is not rejected. The traditional
/// crossover method, usable with any gene encoding since it only moves
/// whole genes, never inspects alleles.
pub struct MultiPointCrossover {
    rate: Ratio,
    num_points: usize,
}

impl MultiPointCrossover {
    pub fn new(rate: Ratio, num_points: usize) -> Self {
        assert!(num_points >= 1, "MultiPointCrossover needs at least one point");
        MultiPointCrossover { rate, num_points }
    }
}

impl<C: Chromosome, P> Crossover<C, P> for MultiPointCrossover {
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
            if rng.gen_bool(self.rate.value() as f64) {
                cross_at_points(d_chrom.genes_mut(), s_chrom.genes_mut(), self.num_points, &mut rng);
            }
        }

        (daughter, son)
    }
}

fn cross_at_points<G>(one: &mut [G], two: &mut [G], num_points: usize, rng: &mut Prng) {
    let length = one.len().min(two.len());
    if length < 2 {
        return;
    }

    let mut indices: Vec<usize> = (0..length).collect();
    for i in (1..indices.len()).rev() {
        let j = rng.gen_range_usize(0..i + 1);
        indices.swap(i, j);
    }
    let mut points: Vec<usize> = indices.into_iter().take(num_points.min(length - 1).max(1)).collect();
    points.sort_unstable();

    let mut current_parent = 1u8;
    let mut last_point = 0;
    for point in &points {
        if current_parent == 1 {
            one[last_point..*point].swap_with_slice(&mut two[last_point..*point]);
        }
        current_parent = 3 - current_parent;
        last_point = *point;
    }
    if current_parent == 1 {
        one[last_point..].swap_with_slice(&mut two[last_point..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaul_codecs::{BitChromosome, BitGene};
    use gaul_core::Gene;
    use std::sync::Arc;

    fn ctor() -> Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> {
        Arc::new(|| Genotype::new(vec![BitChromosome::new(vec![BitGene::new(false); 10])]))
    }

    #[test]
    fn produces_children_with_genes_from_both_parents() {
        let population: Population<BitChromosome> =
            Population::new(1, 1, (1, 10), ctor(), Prng::from_seed(2)).unwrap();
        let mother = Genotype::new(vec![BitChromosome::new(vec![BitGene::new(true); 10])]);
        let father = Genotype::new(vec![BitChromosome::new(vec![BitGene::new(false); 10])]);

        let crossover = MultiPointCrossover::new(Ratio::ONE, 2);
        let (daughter, _son) = crossover.crossover(&population, &mother, &father);

        let has_true = daughter.get(0).genes().iter().any(|g| *g.allele());
        let has_false = daughter.get(0).genes().iter().any(|g| !*g.allele());
        assert!(has_true && has_false);
    }
}
