use gaul_core::{Chromosome, Population};
use gaul_error::{gaul_err, GaulResult};

/// Text dump of one population: a header, a size line, and one block per
/// entity (fitness, then one line of space-separated chromosome bytes per
/// chromosome). Only genetic material and fitness survive a round trip —
/// phenotype artifacts are evaluation-run state, not part of a genotype
/// snapshot, and are dropped.
pub fn dump_population<C: Chromosome, P>(population: &Population<C, P>) -> String {
    let mut out = String::new();
    out.push_str("gaul-codecs population dump\n");
    out.push_str(concat!(env!("CARGO_PKG_VERSION"), "\n"));

    let (num_chromosomes, _) = population.chromosome_shape();
    out.push_str(&format!(
        "{} {} {} {}\n",
        population.max_size(),
        population.current_size(),
        population.stable_size(),
        num_chromosomes,
    ));

    for &id in population.rank_view() {
        let entity = population.entity(id).expect("rank-view id is live");
        out.push_str(&format!("{}\n", entity.fitness().value()));
        for chromosome in entity.genotype().chromosomes() {
            let line: Vec<String> = chromosome.to_bytes().iter().map(|b| b.to_string()).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
    }

    out.push_str("That's all folks!\n");
    out
}

/// One entity's genetic material and fitness, parsed out of a dump.
pub struct DumpedEntity {
    pub fitness: f64,
    pub chromosomes: Vec<Vec<u8>>,
}

/// A parsed population dump, independent of any concrete chromosome type —
/// [`DumpedEntity::chromosomes`] holds raw bytes the caller decodes with
/// its own `Chromosome::from_bytes`.
pub struct PopulationDump {
    pub max_size: usize,
    pub current_size: usize,
    pub stable_size: usize,
    pub num_chromosomes: usize,
    pub entities: Vec<DumpedEntity>,
}

pub fn parse_population_dump(text: &str) -> GaulResult<PopulationDump> {
    let mut lines = text.lines();

    lines
        .next()
        .ok_or_else(|| gaul_err!(Misconfiguration: "population dump missing header line"))?;
    lines
        .next()
        .ok_or_else(|| gaul_err!(Misconfiguration: "population dump missing version line"))?;

    let size_line = lines
        .next()
        .ok_or_else(|| gaul_err!(Misconfiguration: "population dump missing size line"))?;
    let mut fields = size_line.split_whitespace();
    let mut next_usize = |what: &str| -> GaulResult<usize> {
        fields
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| gaul_err!(Misconfiguration: "population dump: bad {}", what))
    };
    let max_size = next_usize("max_size")?;
    let current_size = next_usize("current_size")?;
    let stable_size = next_usize("stable_size")?;
    let num_chromosomes = next_usize("num_chromosomes")?;

    let mut entities = Vec::with_capacity(current_size);
    for _ in 0..current_size {
        let fitness_line = lines
            .next()
            .ok_or_else(|| gaul_err!(Misconfiguration: "population dump: truncated before fitness line"))?;
        let fitness: f64 = fitness_line
            .trim()
            .parse()
            .map_err(|_| gaul_err!(Misconfiguration: "population dump: bad fitness value"))?;

        let mut chromosomes = Vec::with_capacity(num_chromosomes);
        for _ in 0..num_chromosomes {
            let gene_line = lines
                .next()
                .ok_or_else(|| gaul_err!(Misconfiguration: "population dump: truncated chromosome line"))?;
            let bytes: GaulResult<Vec<u8>> = gene_line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<u8>()
                        .map_err(|_| gaul_err!(Misconfiguration: "population dump: bad byte token"))
                })
                .collect();
            chromosomes.push(bytes?);
        }
        entities.push(DumpedEntity { fitness, chromosomes });
    }

    Ok(PopulationDump {
        max_size,
        current_size,
        stable_size,
        num_chromosomes,
        entities,
    })
}

/// Allocates one fresh entity per dumped entity into `population` and
/// restores its genotype and fitness via `C::from_bytes`. Does not
/// re-evaluate — fitness is trusted from the dump.
pub fn restore_into<C: Chromosome, P>(
    dump: &PopulationDump,
    population: &mut Population<C, P>,
) -> GaulResult<()> {
    use gaul_core::{Fitness, Genotype};

    for dumped in &dump.entities {
        let id = population.allocate_entity()?;
        let chromosomes: Vec<C> = dumped
            .chromosomes
            .iter()
            .map(|bytes| C::from_bytes(bytes))
            .collect();
        let entity = population
            .entity_mut(id)
            .expect("just allocated");
        entity.set_genotype(Genotype::new(chromosomes));
        entity.set_fitness(Fitness::new(dumped.fitness));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit::{BitChromosome, BitGene};
    use gaul_core::{Genotype, Prng};
    use std::sync::Arc;

    fn ctor() -> Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> {
        Arc::new(|| Genotype::new(vec![BitChromosome::new(vec![BitGene::new(false); 4])]))
    }

    #[test]
    fn dump_and_restore_round_trips_fitness_and_genes() {
        let mut source: Population<BitChromosome> =
            Population::new(4, 4, (1, 4), ctor(), Prng::from_seed(1)).unwrap();
        for i in 0..3 {
            let id = source.allocate_entity().unwrap();
            let bits: Vec<BitGene> = (0..4).map(|b| BitGene::new(b < i)).collect();
            let entity = source.entity_mut(id).unwrap();
            entity.set_genotype(Genotype::new(vec![BitChromosome::new(bits)]));
            entity.set_fitness(gaul_core::Fitness::new(i as f64));
        }

        let text = dump_population(&source);
        let parsed = parse_population_dump(&text).unwrap();
        assert_eq!(parsed.current_size, 3);
        assert_eq!(parsed.max_size, 4);

        let mut restored: Population<BitChromosome> =
            Population::new(4, 4, (1, 4), ctor(), Prng::from_seed(1)).unwrap();
        restore_into(&parsed, &mut restored).unwrap();
        assert_eq!(restored.current_size(), 3);
        assert_eq!(
            restored.entity_at_rank(2).unwrap().fitness(),
            gaul_core::Fitness::new(2.0)
        );
    }
}
