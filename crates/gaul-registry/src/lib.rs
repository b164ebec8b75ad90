//! The population registry (C9): populations are addressed by a stable
//! integer handle rather than by reference, for callers (FFI or scripting
//! bridges) that cannot hold a Rust reference across a call boundary.
//! `transcend`/`resurrect` move ownership in and out of the registry
//! without destroying the population; `extinction` drops it.
//!
//! A static generic singleton isn't expressible on stable Rust (a `static`
//! can't close over a caller's type parameters), and the design notes
//! already invite dropping the source's true process-wide global in favor
//! of an explicitly owned table: a process that wants one registry simply
//! keeps one `PopulationRegistry` alive (in an `Arc<Mutex<_>>` if shared
//! across threads) for as long as it needs handle-addressed populations.
//! Mutations are still serialized behind this struct's own mutex, and the
//! registry is never touched from inside an engine's inner loop — only at
//! population creation, handoff, and teardown.

use std::sync::Mutex;

use gaul_core::{Chromosome, Population};
use gaul_error::{gaul_err, GaulResult};
use gaul_utils::{Handle, HandleTable};

pub struct PopulationRegistry<C: Chromosome, P = ()> {
    table: Mutex<HandleTable<Population<C, P>>>,
}

impl<C: Chromosome, P> PopulationRegistry<C, P> {
    pub fn new() -> Self {
        PopulationRegistry {
            table: Mutex::new(HandleTable::new()),
        }
    }

    /// Creates a population registry entry lazily: the table itself is
    /// only allocated (via `Self::new`) on first use by a caller, matching
    /// the source's "created lazily on first call" lifecycle note.
    pub fn population_new(&self, population: Population<C, P>) -> Handle {
        let mut table = self.table.lock().expect("registry mutex poisoned");
        table.insert(population)
    }

    /// Removes the entry and returns the population without destroying it.
    pub fn transcend(&self, handle: Handle) -> GaulResult<Population<C, P>> {
        let mut table = self.table.lock().expect("registry mutex poisoned");
        table
            .remove(handle)
            .ok_or_else(|| gaul_err!(Registry: "no population registered under this handle"))
    }

    /// Reinserts a transcended population, returning a (possibly new)
    /// handle — the source contract never promises the same handle back.
    pub fn resurrect(&self, population: Population<C, P>) -> Handle {
        let mut table = self.table.lock().expect("registry mutex poisoned");
        table.insert(population)
    }

    /// Removes the entry and drops the population, releasing its pool.
    pub fn extinction(&self, handle: Handle) -> GaulResult<()> {
        let mut table = self.table.lock().expect("registry mutex poisoned");
        table
            .remove(handle)
            .map(drop)
            .ok_or_else(|| gaul_err!(Registry: "no population registered under this handle"))
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.table.lock().expect("registry mutex poisoned").contains(handle)
    }

    pub fn len(&self) -> usize {
        self.table.lock().expect("registry mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Chromosome, P> Default for PopulationRegistry<C, P> {
    fn default() -> Self {
        Self::new()
    }
}
