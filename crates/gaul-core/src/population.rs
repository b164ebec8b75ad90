use std::any::Any;
use std::cell::{RefCell, RefMut};
use std::sync::Arc;

use gaul_error::{gaul_err, GaulResult};

use crate::fitness::Fitness;
use crate::genome::{Chromosome, Entity, EntityId, Genotype};
use crate::operators::{
    Adapt, Crossover, Evaluate, GenerationHook, IterationHook, Mutate, Replace, Seed, SelectOne,
    SelectTwo,
};
use crate::pool::EntityPool;
use crate::prng::Prng;
use crate::ratio::Ratio;
use crate::scheme::{Elitism, Scheme};
use crate::stats::{self, FitnessStats};

/// The container for a run of the evolutionary search: stable/current/
/// orig size, chromosome shape, operator bindings, evolutionary
/// parameters, and two views over the same live entities — an id-indexed
/// pool and a fitness-ordered rank view. Both views always hold the same
/// multiset of live entities; new entities are appended to the end of the
/// rank view (never inserted in sorted position), so that during a
/// generation ranks `[0, orig_size)` stay the latched parents and ranks
/// `[orig_size, current_size)` are this generation's children in creation
/// order.
pub struct Population<C: Chromosome, P = ()> {
    pool: EntityPool<C, P>,
    rank_view: Vec<EntityId>,
    stable_size: usize,
    orig_size: Option<usize>,
    shape: (usize, usize),
    crossover_ratio: Ratio,
    mutation_ratio: Ratio,
    migration_ratio: Ratio,
    scheme: Scheme,
    elitism: Elitism,
    rescore_parents: bool,
    generation: usize,
    island: usize,
    prng: RefCell<Prng>,
    user_data: Option<Box<dyn Any + Send + Sync>>,

    evaluate_binding: Option<Box<dyn Evaluate<C, P>>>,
    seed_binding: Option<Box<dyn Seed<C, P>>>,
    adapt_binding: Option<Box<dyn Adapt<C, P>>>,
    select_one_binding: Option<RefCell<Box<dyn SelectOne<C, P>>>>,
    select_two_binding: Option<RefCell<Box<dyn SelectTwo<C, P>>>>,
    mutate_binding: Option<Box<dyn Mutate<C, P>>>,
    crossover_binding: Option<Box<dyn Crossover<C, P>>>,
    replace_binding: Option<Box<dyn Replace<C, P>>>,
    generation_hook_binding: Option<RefCell<Box<dyn GenerationHook<C, P>>>>,
    iteration_hook_binding: Option<RefCell<Box<dyn IterationHook<C, P>>>>,
}

impl<C: Chromosome, P> Population<C, P> {
    pub fn new(
        max_size: usize,
        stable_size: usize,
        shape: (usize, usize),
        constructor: Arc<dyn Fn() -> Genotype<C> + Send + Sync>,
        prng: Prng,
    ) -> GaulResult<Self> {
        if stable_size > max_size {
            return Err(gaul_err!(
                Misconfiguration: "stable_size ({}) exceeds max_size ({})",
                stable_size, max_size
            ));
        }
        Ok(Self {
            pool: EntityPool::new(max_size, constructor),
            rank_view: Vec::with_capacity(max_size),
            stable_size,
            orig_size: None,
            shape,
            crossover_ratio: Ratio::ZERO,
            mutation_ratio: Ratio::ZERO,
            migration_ratio: Ratio::ZERO,
            scheme: Scheme::DARWIN,
            elitism: Elitism::default(),
            rescore_parents: false,
            generation: 0,
            island: 0,
            prng: RefCell::new(prng),
            user_data: None,
            evaluate_binding: None,
            seed_binding: None,
            adapt_binding: None,
            select_one_binding: None,
            select_two_binding: None,
            mutate_binding: None,
            crossover_binding: None,
            replace_binding: None,
            generation_hook_binding: None,
            iteration_hook_binding: None,
        })
    }

    // ----- operator bindings -----

    pub fn bind_evaluate(&mut self, op: impl Evaluate<C, P> + 'static) -> &mut Self {
        self.evaluate_binding = Some(Box::new(op));
        self
    }

    pub fn bind_seed(&mut self, op: impl Seed<C, P> + 'static) -> &mut Self {
        self.seed_binding = Some(Box::new(op));
        self
    }

    pub fn bind_adapt(&mut self, op: impl Adapt<C, P> + 'static) -> &mut Self {
        self.adapt_binding = Some(Box::new(op));
        self
    }

    pub fn bind_select_one(&mut self, op: impl SelectOne<C, P> + 'static) -> &mut Self {
        self.select_one_binding = Some(RefCell::new(Box::new(op)));
        self
    }

    pub fn bind_select_two(&mut self, op: impl SelectTwo<C, P> + 'static) -> &mut Self {
        self.select_two_binding = Some(RefCell::new(Box::new(op)));
        self
    }

    pub fn bind_mutate(&mut self, op: impl Mutate<C, P> + 'static) -> &mut Self {
        self.mutate_binding = Some(Box::new(op));
        self
    }

    pub fn bind_crossover(&mut self, op: impl Crossover<C, P> + 'static) -> &mut Self {
        self.crossover_binding = Some(Box::new(op));
        self
    }

    pub fn bind_replace(&mut self, op: impl Replace<C, P> + 'static) -> &mut Self {
        self.replace_binding = Some(Box::new(op));
        self
    }

    pub fn bind_generation_hook(&mut self, hook: impl GenerationHook<C, P> + 'static) -> &mut Self {
        self.generation_hook_binding = Some(RefCell::new(Box::new(hook)));
        self
    }

    pub fn bind_iteration_hook(&mut self, hook: impl IterationHook<C, P> + 'static) -> &mut Self {
        self.iteration_hook_binding = Some(RefCell::new(Box::new(hook)));
        self
    }

    pub fn has_evaluate(&self) -> bool {
        self.evaluate_binding.is_some()
    }
    pub fn has_select_one(&self) -> bool {
        self.select_one_binding.is_some()
    }
    pub fn has_select_two(&self) -> bool {
        self.select_two_binding.is_some()
    }
    pub fn has_mutate(&self) -> bool {
        self.mutate_binding.is_some()
    }
    pub fn has_crossover(&self) -> bool {
        self.crossover_binding.is_some()
    }
    pub fn has_adapt(&self) -> bool {
        self.adapt_binding.is_some()
    }
    pub fn has_replace(&self) -> bool {
        self.replace_binding.is_some()
    }

    // ----- parameters -----

    pub fn set_crossover_ratio(&mut self, ratio: Ratio) -> &mut Self {
        self.crossover_ratio = ratio;
        self
    }
    pub fn set_mutation_ratio(&mut self, ratio: Ratio) -> &mut Self {
        self.mutation_ratio = ratio;
        self
    }
    pub fn set_migration_ratio(&mut self, ratio: Ratio) -> &mut Self {
        self.migration_ratio = ratio;
        self
    }
    pub fn set_scheme(&mut self, scheme: Scheme) -> &mut Self {
        self.scheme = scheme;
        self
    }
    pub fn set_elitism(&mut self, elitism: Elitism) -> &mut Self {
        self.elitism = elitism;
        self
    }
    pub fn set_rescore_parents(&mut self, rescore: bool) -> &mut Self {
        self.rescore_parents = rescore;
        self
    }
    pub fn set_island(&mut self, island: usize) -> &mut Self {
        self.island = island;
        self
    }
    pub fn set_user_data<T: Send + Sync + 'static>(&mut self, data: T) -> &mut Self {
        self.user_data = Some(Box::new(data));
        self
    }

    pub fn crossover_ratio(&self) -> Ratio {
        self.crossover_ratio
    }
    pub fn mutation_ratio(&self) -> Ratio {
        self.mutation_ratio
    }
    pub fn migration_ratio(&self) -> Ratio {
        self.migration_ratio
    }
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }
    pub fn elitism(&self) -> Elitism {
        self.elitism
    }
    pub fn rescore_parents(&self) -> bool {
        self.rescore_parents
    }
    pub fn island(&self) -> usize {
        self.island
    }
    pub fn generation(&self) -> usize {
        self.generation
    }
    pub fn increment_generation(&mut self) -> usize {
        self.generation += 1;
        self.generation
    }
    pub fn stable_size(&self) -> usize {
        self.stable_size
    }
    pub fn max_size(&self) -> usize {
        self.pool.capacity()
    }
    pub fn current_size(&self) -> usize {
        self.rank_view.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rank_view.is_empty()
    }
    pub fn chromosome_shape(&self) -> (usize, usize) {
        self.shape
    }
    pub fn orig_size(&self) -> Option<usize> {
        self.orig_size
    }
    pub fn user_data<T: 'static>(&self) -> Option<&T> {
        self.user_data.as_ref().and_then(|data| data.downcast_ref())
    }

    pub fn rng(&self) -> RefMut<'_, Prng> {
        self.prng.borrow_mut()
    }

    // ----- id/rank views -----

    pub fn entity(&self, id: EntityId) -> Option<&Entity<C, P>> {
        self.pool.get(id)
    }
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity<C, P>> {
        self.pool.get_mut(id)
    }
    pub fn contains(&self, id: EntityId) -> bool {
        self.pool.contains(id)
    }
    pub fn rank_view(&self) -> &[EntityId] {
        &self.rank_view
    }
    pub fn id_at_rank(&self, rank: usize) -> Option<EntityId> {
        self.rank_view.get(rank).copied()
    }
    pub fn entity_at_rank(&self, rank: usize) -> Option<&Entity<C, P>> {
        self.id_at_rank(rank).and_then(|id| self.entity(id))
    }
    pub fn rank_of(&self, id: EntityId) -> Option<usize> {
        self.rank_view.iter().position(|&candidate| candidate == id)
    }

    // ----- lifecycle (C1) -----

    /// Allocates a new entity and appends it to the end of the rank view.
    /// Fails with a capacity error once `current_size` reaches `max_size`.
    pub fn allocate_entity(&mut self) -> GaulResult<EntityId> {
        let id = self.pool.get_free_entity()?;
        self.rank_view.push(id);
        Ok(id)
    }

    pub fn dereference(&mut self, id: EntityId) -> GaulResult<()> {
        let rank = self
            .rank_of(id)
            .ok_or_else(|| gaul_err!(Misconfiguration: "dereference of an id not in rank-view"))?;
        self.dereference_by_rank(rank).map(|_| ())
    }

    /// Removes the entity at `rank`, shifting later ranks down by one to
    /// preserve relative order; the fast path used by survival pressure.
    pub fn dereference_by_rank(&mut self, rank: usize) -> GaulResult<EntityId> {
        if rank >= self.rank_view.len() {
            return Err(
                gaul_err!(Misconfiguration: "dereference_by_rank: rank {} out of bounds", rank),
            );
        }
        let id = self.rank_view.remove(rank);
        self.pool.dereference(id)?;
        Ok(id)
    }

    /// Removes ranks `[start, end)`.
    pub fn dereference_rank_range(&mut self, start: usize, end: usize) -> GaulResult<()> {
        let available = self.rank_view.len().saturating_sub(start);
        let count = end.saturating_sub(start).min(available);
        for _ in 0..count {
            self.dereference_by_rank(start)?;
        }
        Ok(())
    }

    /// Dereferences ranks `[stable_size, current_size)`.
    pub fn genocide_to_stable_size(&mut self) -> GaulResult<()> {
        self.dereference_rank_range(self.stable_size, self.current_size())
    }

    /// Clears phenotype and resets fitness without releasing the slot.
    pub fn blank(&mut self, id: EntityId) -> GaulResult<()> {
        self.pool.blank(id)
    }

    pub fn latch_orig_size(&mut self) {
        self.orig_size = Some(self.current_size());
    }

    pub fn clear_orig_size(&mut self) {
        self.orig_size = None;
    }

    // ----- seeding / evaluation / ranking (C3/C4) -----

    pub fn seed_entity(&mut self, id: EntityId) -> GaulResult<()> {
        let genotype = {
            let op = self
                .seed_binding
                .as_deref()
                .ok_or_else(|| gaul_err!(Misconfiguration: "no seed operator bound"))?;
            op.seed(&*self)?
        };
        let entity = self
            .entity_mut(id)
            .ok_or_else(|| gaul_err!(Misconfiguration: "seed of unknown entity"))?;
        entity.set_genotype(genotype);
        Ok(())
    }

    pub fn evaluate_entity(&mut self, id: EntityId) -> GaulResult<()> {
        let outcome = {
            let op = self
                .evaluate_binding
                .as_deref()
                .ok_or_else(|| gaul_err!(Misconfiguration: "no evaluate operator bound"))?;
            let genotype = self
                .entity(id)
                .ok_or_else(|| gaul_err!(Misconfiguration: "evaluate of unknown entity"))?
                .genotype();
            op.evaluate(genotype)?
        };
        let entity = self.entity_mut(id).expect("checked above");
        entity.set_fitness(outcome.fitness);
        entity.set_phenotype(outcome.phenotype);
        Ok(())
    }

    /// Evaluates every live entity whose fitness is still the unevaluated
    /// sentinel.
    pub fn evaluate_unevaluated(&mut self) -> GaulResult<()> {
        let ids: Vec<EntityId> = self
            .rank_view
            .iter()
            .copied()
            .filter(|&id| {
                self.entity(id)
                    .map(|entity| !entity.is_evaluated())
                    .unwrap_or(false)
            })
            .collect();
        for id in ids {
            self.evaluate_entity(id)?;
        }
        Ok(())
    }

    /// Re-evaluates every live entity, then sorts.
    pub fn score_and_sort(&mut self) -> GaulResult<()> {
        let ids = self.rank_view.clone();
        for id in ids {
            self.evaluate_entity(id)?;
        }
        self.sort();
        Ok(())
    }

    /// Sorts the rank view by fitness descending. Ties are broken
    /// arbitrarily; no phase may depend on tie ordering.
    pub fn sort(&mut self) {
        let pool = &self.pool;
        self.rank_view.sort_by(|&a, &b| {
            let fa = pool.get(a).map(Entity::fitness).unwrap_or(Fitness::UNEVALUATED);
            let fb = pool.get(b).map(Entity::fitness).unwrap_or(Fitness::UNEVALUATED);
            fb.cmp(&fa)
        });
    }

    pub fn sort_population(&mut self) {
        self.sort();
    }

    // ----- operator delegates -----

    pub fn crossover_genotypes(
        &self,
        mother: &Genotype<C>,
        father: &Genotype<C>,
    ) -> GaulResult<(Genotype<C>, Genotype<C>)> {
        let op = self
            .crossover_binding
            .as_deref()
            .ok_or_else(|| gaul_err!(Misconfiguration: "no crossover operator bound"))?;
        Ok(op.crossover(self, mother, father))
    }

    pub fn mutate_genotype(&self, parent: &Genotype<C>) -> GaulResult<Genotype<C>> {
        let op = self
            .mutate_binding
            .as_deref()
            .ok_or_else(|| gaul_err!(Misconfiguration: "no mutate operator bound"))?;
        Ok(op.mutate(self, parent))
    }

    pub fn adapt_genotype(&self, genotype: &Genotype<C>) -> GaulResult<(Genotype<C>, Fitness)> {
        let op = self
            .adapt_binding
            .as_deref()
            .ok_or_else(|| gaul_err!(Misconfiguration: "no adapt operator bound"))?;
        op.adapt(self, genotype)
    }

    pub fn select_one(&self) -> Option<EntityId> {
        let cell = self.select_one_binding.as_ref()?;
        cell.borrow_mut().select_one(self)
    }

    pub fn select_two(&self) -> Option<(EntityId, EntityId)> {
        let cell = self.select_two_binding.as_ref()?;
        cell.borrow_mut().select_two(self)
    }

    /// Resets both selection cursors; called at the start of each
    /// crossover/mutation phase.
    pub fn reset_selection(&self) {
        if let Some(cell) = &self.select_one_binding {
            cell.borrow_mut().reset();
        }
        if let Some(cell) = &self.select_two_binding {
            cell.borrow_mut().reset();
        }
    }

    pub fn apply_replace(&mut self, child: EntityId) -> GaulResult<()> {
        let op = self
            .replace_binding
            .take()
            .ok_or_else(|| gaul_err!(Misconfiguration: "no replace operator bound"))?;
        let result = op.replace(self, child);
        self.replace_binding = Some(op);
        result
    }

    pub fn generation_hook(&self) -> bool {
        match &self.generation_hook_binding {
            Some(cell) => cell.borrow_mut().on_generation(self.generation, self),
            None => true,
        }
    }

    pub fn iteration_hook(&self, iteration: usize, id: EntityId) -> bool {
        match (&self.iteration_hook_binding, self.entity(id)) {
            (Some(cell), Some(entity)) => cell.borrow_mut().on_iteration(iteration, entity),
            _ => true,
        }
    }

    // ----- statistics -----

    pub fn fitness_stats(&self) -> Option<FitnessStats> {
        let values: Vec<f64> = self
            .rank_view
            .iter()
            .filter_map(|&id| self.entity(id))
            .filter(|entity| entity.is_evaluated())
            .map(|entity| entity.fitness().value())
            .collect();
        stats::summarize(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Gene, Valid};
    use crate::operators::EvaluationOutcome;

    #[derive(Clone, Debug, PartialEq)]
    struct Bit(bool);
    impl Valid for Bit {}
    impl Gene for Bit {
        type Allele = bool;
        fn allele(&self) -> &bool {
            &self.0
        }
        fn new_instance(&self, rng: &mut Prng) -> Self {
            Bit(rng.gen_bool(0.5))
        }
        fn with_allele(&self, allele: &bool) -> Self {
            Bit(*allele)
        }
    }

    #[derive(Clone, Debug)]
    struct BitChromosome(Vec<Bit>);
    impl Chromosome for BitChromosome {
        type Gene = Bit;
        fn genes(&self) -> &[Bit] {
            &self.0
        }
        fn genes_mut(&mut self) -> &mut [Bit] {
            &mut self.0
        }
        fn to_bytes(&self) -> Vec<u8> {
            self.0.iter().map(|g| g.0 as u8).collect()
        }
        fn from_bytes(bytes: &[u8]) -> Self {
            BitChromosome(bytes.iter().map(|b| Bit(*b != 0)).collect())
        }
    }

    struct PopcountEvaluate;
    impl Evaluate<BitChromosome> for PopcountEvaluate {
        fn evaluate(&self, genotype: &Genotype<BitChromosome>) -> GaulResult<EvaluationOutcome> {
            let popcount: usize = genotype
                .iter()
                .flat_map(|c| c.iter())
                .filter(|bit| bit.0)
                .count();
            Ok(EvaluationOutcome::fitness(Fitness::new(popcount as f64)))
        }
    }

    fn ctor() -> Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> {
        Arc::new(|| Genotype::new(vec![BitChromosome(vec![Bit(false); 8])]))
    }

    fn population(max_size: usize, stable_size: usize) -> Population<BitChromosome> {
        let mut pop = Population::new(max_size, stable_size, (1, 8), ctor(), Prng::from_seed(1)).unwrap();
        pop.bind_evaluate(PopcountEvaluate);
        pop
    }

    #[test]
    fn seed_evaluate_and_sort_orders_descending() {
        let mut pop = population(4, 4);
        for i in 0..4 {
            let id = pop.allocate_entity().unwrap();
            let bits = (0..8).map(|b| Bit(b < i)).collect();
            pop.entity_mut(id)
                .unwrap()
                .set_genotype(Genotype::new(vec![BitChromosome(bits)]));
        }
        pop.score_and_sort().unwrap();
        for rank in 0..pop.current_size() - 1 {
            let a = pop.entity_at_rank(rank).unwrap().fitness();
            let b = pop.entity_at_rank(rank + 1).unwrap().fitness();
            assert!(a >= b);
        }
    }

    #[test]
    fn dereference_by_rank_reuses_slot() {
        let mut pop = population(2, 2);
        let a = pop.allocate_entity().unwrap();
        pop.allocate_entity().unwrap();
        pop.dereference(a).unwrap();
        assert_eq!(pop.current_size(), 1);

        let c = pop.allocate_entity().unwrap();
        assert_eq!(c.index(), a.index());
        assert!(!pop.entity(c).unwrap().is_evaluated());
    }

    #[test]
    fn allocate_past_max_size_fails_deterministically() {
        let mut pop = population(2, 2);
        pop.allocate_entity().unwrap();
        pop.allocate_entity().unwrap();
        assert!(pop.allocate_entity().is_err());
    }

    #[test]
    fn genocide_trims_to_stable_size_keeping_the_best() {
        let mut pop = population(5, 2);
        for i in 0..5 {
            let id = pop.allocate_entity().unwrap();
            let bits = (0..8).map(|b| Bit(b < i)).collect();
            pop.entity_mut(id)
                .unwrap()
                .set_genotype(Genotype::new(vec![BitChromosome(bits)]));
        }
        pop.score_and_sort().unwrap();
        pop.genocide_to_stable_size().unwrap();

        assert_eq!(pop.current_size(), 2);
        assert_eq!(pop.entity_at_rank(0).unwrap().fitness(), Fitness::new(4.0));
        assert_eq!(pop.entity_at_rank(1).unwrap().fitness(), Fitness::new(3.0));
    }
}
