use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A process-wide stable handle into a [`HandleTable`]. Handles are plain
/// `u64`s assigned by an atomic counter, so they stay unique even across
/// entries removed and reinserted under a new handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(transparent)]
pub struct Handle(u64);

impl Handle {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Handle(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A generic handle -> value table, the primitive behind a process-wide
/// registry (e.g. the population registry in `gaul-registry`). `insert`
/// mints a fresh handle every time, matching the source contract that
/// `resurrect` may hand a population back a *different* handle than it had
/// before `transcend`.
#[derive(Default)]
pub struct HandleTable<T> {
    entries: HashMap<Handle, T>,
}

impl<T> HandleTable<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> Handle {
        let handle = Handle::next();
        self.entries.insert(handle, value);
        handle
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.entries.get(&handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.entries.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.entries.remove(&handle)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut table = HandleTable::new();
        let h1 = table.insert("one");
        let h2 = table.insert("two");

        assert_ne!(h1, h2);
        assert_eq!(table.get(h1), Some(&"one"));
        assert_eq!(table.remove(h1), Some("one"));
        assert_eq!(table.get(h1), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn reinsert_mints_new_handle() {
        let mut table = HandleTable::new();
        let h1 = table.insert(1);
        let value = table.remove(h1).unwrap();
        let h2 = table.insert(value);

        assert_ne!(h1, h2);
    }
}
