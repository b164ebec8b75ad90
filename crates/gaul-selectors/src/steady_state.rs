use gaul_core::{Chromosome, EntityId, Population, Replace};
use gaul_error::GaulResult;

/// The steady-state engine's one-at-a-time insertion policy: find the
/// current worst live entity (excluding the child itself) and, if
/// `elitist` is set, dereference the child instead when it is no better
/// than that worst entity. With `elitist` unset, the worst entity is
/// always displaced, matching a pure generational-churn steady-state loop.
pub struct SteadyStateReplace {
    elitist: bool,
}

impl SteadyStateReplace {
    pub fn new(elitist: bool) -> Self {
        SteadyStateReplace { elitist }
    }
}

impl<C: Chromosome, P> Replace<C, P> for SteadyStateReplace {
    fn replace(&self, population: &mut Population<C, P>, child: EntityId) -> GaulResult<()> {
        let mut worst: Option<(usize, EntityId)> = None;
        for rank in 0..population.current_size() {
            let id = population.id_at_rank(rank).expect("rank in bounds");
            if id == child {
                continue;
            }
            let fitness = population.entity(id).expect("live id").fitness();
            let is_worse = worst
                .map(|(_, worst_id)| fitness < population.entity(worst_id).expect("live id").fitness())
                .unwrap_or(true);
            if is_worse {
                worst = Some((rank, id));
            }
        }

        let Some((worst_rank, worst_id)) = worst else {
            return Ok(());
        };

        let child_fitness = population.entity(child).expect("live id").fitness();
        let worst_fitness = population.entity(worst_id).expect("live id").fitness();

        if self.elitist && child_fitness <= worst_fitness {
            population.dereference(child)?;
        } else {
            population.dereference_by_rank(worst_rank)?;
        }
        Ok(())
    }
}
