//! Metadata registry
//!
//! One registry per resource kind binds typed ids to metadata. Binding is an
//! unconditional upsert; there is no way to unbind an id.

use ahash::AHashMap;
use parking_lot::RwLock;
use std::hash::Hash;

/// Resource metadata association index
pub struct Registry<I, M> {
    mapping: RwLock<AHashMap<I, M>>,
}

impl<I, M> Registry<I, M>
where
    I: Copy + Eq + Hash,
    M: Clone,
{
    pub fn new() -> Self {
        Self {
            mapping: RwLock::new(AHashMap::new()),
        }
    }

    /// Bind `id` to `info`, replacing any previous metadata.
    ///
    /// Replacing metadata before the first load changes what will be
    /// loaded. After the first load it has no effect on that id.
    pub fn set(&self, id: I, info: M) {
        self.mapping.write().insert(id, info);
    }

    /// Bind multiple ids at once. Application order is unspecified.
    pub fn assign<T>(&self, batch: T)
    where
        T: IntoIterator<Item = (I, M)>,
    {
        let mut mapping = self.mapping.write();
        for (id, info) in batch {
            mapping.insert(id, info);
        }
    }

    pub fn get(&self, id: I) -> Option<M> {
        self.mapping.read().get(&id).cloned()
    }

    pub fn contains(&self, id: I) -> bool {
        self.mapping.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.mapping.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.read().is_empty()
    }

    /// Snapshot of all bound ids, in no particular order
    pub fn ids(&self) -> Vec<I> {
        self.mapping.read().keys().copied().collect()
    }
}

impl<I, M> Default for Registry<I, M>
where
    I: Copy + Eq + Hash,
    M: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
