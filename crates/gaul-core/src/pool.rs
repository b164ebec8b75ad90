use std::sync::Arc;

use gaul_error::{gaul_err, GaulResult};
use gaul_utils::Slab;

use crate::genome::{Chromosome, Entity, EntityId, Genotype};

/// Slab-like allocator of reusable entity slots within one population:
/// O(1) amortized allocate/release up to `max_size`, stable slot identity
/// across reuse.
pub struct EntityPool<C: Chromosome, P = ()> {
    slots: Slab<Entity<C, P>>,
    constructor: Arc<dyn Fn() -> Genotype<C> + Send + Sync>,
}

impl<C: Chromosome, P> EntityPool<C, P> {
    pub fn new(max_size: usize, constructor: Arc<dyn Fn() -> Genotype<C> + Send + Sync>) -> Self {
        Self {
            slots: Slab::with_capacity(max_size),
            constructor,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Allocates a fresh slot and constructs its chromosomes via the pool's
    /// constructor; fitness starts at the unevaluated sentinel and
    /// phenotype is empty. Fails with a capacity error at `max_size`.
    pub fn get_free_entity(&mut self) -> GaulResult<EntityId> {
        let entity = Entity::new((self.constructor)());
        self.slots
            .try_insert(entity)
            .ok_or_else(|| gaul_err!(Capacity: "entity pool at capacity ({})", self.slots.capacity()))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity<C, P>> {
        self.slots.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity<C, P>> {
        self.slots.get_mut(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains(id)
    }

    /// Releases `id`'s slot: its chromosome storage and phenotype handles
    /// drop, and the slot returns to the free pool for reuse.
    pub fn dereference(&mut self, id: EntityId) -> GaulResult<()> {
        self.slots
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| gaul_err!(Misconfiguration: "dereference of a non-live entity"))
    }

    /// Clears phenotype and resets fitness to the unevaluated sentinel
    /// without releasing the slot; recycles a scratch entity mid-generation.
    pub fn blank(&mut self, id: EntityId) -> GaulResult<()> {
        self.slots
            .get_mut(id)
            .map(Entity::blank)
            .ok_or_else(|| gaul_err!(Misconfiguration: "blank of a non-live entity"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Gene, Valid};

    #[derive(Clone, Debug, PartialEq)]
    struct Bit(bool);
    impl Valid for Bit {}
    impl Gene for Bit {
        type Allele = bool;
        fn allele(&self) -> &bool {
            &self.0
        }
        fn new_instance(&self, rng: &mut crate::prng::Prng) -> Self {
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

    fn ctor() -> Arc<dyn Fn() -> Genotype<BitChromosome> + Send + Sync> {
        Arc::new(|| Genotype::new(vec![BitChromosome(vec![Bit(false); 4])]))
    }

    #[test]
    fn allocate_and_release_reuses_slot() {
        let mut pool: EntityPool<BitChromosome> = EntityPool::new(2, ctor());
        let a = pool.get_free_entity().unwrap();
        pool.get_free_entity().unwrap();
        pool.dereference(a).unwrap();
        let c = pool.get_free_entity().unwrap();

        assert_eq!(c.index(), a.index());
        assert!(!pool.get(c).unwrap().is_evaluated());
        assert!(pool.get(c).unwrap().phenotype().is_empty());
    }

    #[test]
    fn allocate_past_capacity_fails() {
        let mut pool: EntityPool<BitChromosome> = EntityPool::new(1, ctor());
        pool.get_free_entity().unwrap();
        assert!(pool.get_free_entity().is_err());
    }

    #[test]
    fn blank_keeps_slot_but_resets_fitness() {
        let mut pool: EntityPool<BitChromosome> = EntityPool::new(1, ctor());
        let a = pool.get_free_entity().unwrap();
        pool.get_mut(a).unwrap().set_fitness(crate::fitness::Fitness::new(5.0));
        pool.blank(a).unwrap();
        assert!(!pool.get(a).unwrap().is_evaluated());
    }
}
