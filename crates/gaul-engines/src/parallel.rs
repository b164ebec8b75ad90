use std::collections::HashMap;
use std::io::{Read, Write};
use std::process::{Command, Stdio};

use gaul_core::{Chromosome, EntityId, Fitness, Population};
use gaul_error::{gaul_err, GaulResult};

use crate::config::ParallelConfig;

/// Evaluates every unevaluated live entity on a fixed-size thread pool.
/// Only `evaluate` is distributed; selection, crossover, mutation, adapt,
/// survival, and ranking stay on the calling thread. Worker count comes
/// from [`ParallelConfig::thread_workers`] (`NUM_THREADS`, default 4).
///
/// A worker job panicking is treated as a lost worker: its entity's
/// fitness is left at the unevaluated sentinel so a later evaluation phase
/// picks it back up, matching the transport-failure recovery policy.
pub fn evaluate_with_threads<C, P>(
    population: &mut Population<C, P>,
    evaluate: impl Fn(&gaul_core::Genotype<C>) -> GaulResult<Fitness> + Send + Sync + 'static,
    config: ParallelConfig,
) -> GaulResult<()>
where
    C: Chromosome + 'static,
    P: 'static,
{
    let pending: Vec<EntityId> = (0..population.current_size())
        .filter_map(|rank| population.id_at_rank(rank))
        .filter(|&id| !population.entity(id).expect("live id").is_evaluated())
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let evaluate = std::sync::Arc::new(evaluate);
    let pool = gaul_core::thread_pool::ThreadPool::new(config.thread_workers.min(pending.len().max(1)));

    let mut handles = HashMap::new();
    for &id in &pending {
        let genotype = population.entity(id).expect("live id").genotype().clone();
        let evaluate = std::sync::Arc::clone(&evaluate);
        let handle = pool.submit(move || evaluate(&genotype));
        handles.insert(id, handle);
    }

    for (id, handle) in handles {
        match handle.join() {
            Some(Ok(fitness)) => {
                population.entity_mut(id).expect("live id").set_fitness(fitness);
            }
            Some(Err(_)) | None => {
                // worker failed or the job panicked: leave the sentinel in place.
            }
        }
    }
    Ok(())
}

/// Evaluates every unevaluated live entity by forking one short-lived
/// worker process per evaluation, writing the chromosome bytes of the
/// first chromosome to the child's stdin and reading back an 8-byte
/// little-endian fitness from stdout. `command` is the worker executable
/// invoked once per entity; `config.process_workers` caps how many run
/// concurrently (`NUM_PROCESSES`, default 8).
///
/// A child that exits non-zero, or whose stdout is short, leaves that
/// entity's fitness at the sentinel rather than reporting a corrupt value.
pub fn evaluate_with_processes<C, P>(
    population: &mut Population<C, P>,
    command: &str,
    config: ParallelConfig,
) -> GaulResult<()>
where
    C: Chromosome,
{
    let pending: Vec<EntityId> = (0..population.current_size())
        .filter_map(|rank| population.id_at_rank(rank))
        .filter(|&id| !population.entity(id).expect("live id").is_evaluated())
        .collect();

    for batch in pending.chunks(config.process_workers.max(1)) {
        let mut children = Vec::with_capacity(batch.len());
        for &id in batch {
            let bytes = population.entity(id).expect("live id").genotype().chromosomes()[0].to_bytes();
            let mut child = Command::new(command)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .spawn()
                .map_err(|e| gaul_err!(WorkerFailure: "failed to spawn evaluator process: {e}"))?;
            child
                .stdin
                .take()
                .expect("piped stdin")
                .write_all(&bytes)
                .map_err(|e| gaul_err!(WorkerFailure: "failed to write chromosome bytes: {e}"))?;
            children.push((id, child));
        }

        for (id, mut child) in children {
            let status = child
                .wait()
                .map_err(|e| gaul_err!(WorkerFailure: "evaluator process wait failed: {e}"))?;
            if !status.success() {
                continue;
            }
            let mut out = [0u8; 8];
            let mut stdout = child.stdout.take().expect("piped stdout");
            if stdout.read_exact(&mut out).is_err() {
                continue;
            }
            population
                .entity_mut(id)
                .expect("live id")
                .set_fitness(Fitness::new(f64::from_le_bytes(out)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaul_codecs::BitChromosome;
    use gaul_core::{Genotype, Prng};
    use std::sync::Arc;

    fn ctor() -> Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> {
        Arc::new(|| Genotype::new(vec![BitChromosome::new(vec![])]))
    }

    #[test]
    fn thread_evaluator_writes_back_every_fitness() {
        let mut pop: Population<BitChromosome> =
            Population::new(5, 5, (1, 0), ctor(), Prng::from_seed(1)).unwrap();
        for i in 0..5 {
            let id = pop.allocate_entity().unwrap();
            pop.entity_mut(id).unwrap().set_genotype(Genotype::new(vec![BitChromosome::new(vec![])]));
            let _ = i;
        }

        evaluate_with_threads(
            &mut pop,
            |genotype| Ok(Fitness::new(genotype.chromosomes().len() as f64)),
            ParallelConfig { process_workers: 8, thread_workers: 3 },
        )
        .unwrap();

        for rank in 0..5 {
            let id = pop.id_at_rank(rank).unwrap();
            assert!(pop.entity(id).unwrap().is_evaluated());
        }
    }

    #[test]
    fn thread_evaluator_is_a_no_op_on_an_already_evaluated_population() {
        let mut pop: Population<BitChromosome> =
            Population::new(3, 3, (1, 0), ctor(), Prng::from_seed(1)).unwrap();
        for _ in 0..3 {
            let id = pop.allocate_entity().unwrap();
            pop.entity_mut(id).unwrap().set_fitness(Fitness::new(1.0));
        }
        evaluate_with_threads(
            &mut pop,
            |_| panic!("should never be called"),
            ParallelConfig::default(),
        )
        .unwrap();
    }
}
