// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Memoization table for decoded resources
//!
//! Entries live as long as the cache. There is no eviction, no invalidation
//! and no removal. Each id owns a slot that is filled at most once; the map
//! lock is held only while finding the slot, so different ids load in
//! parallel while concurrent loads of the same id wait for a single decode.

use crate::error::Result;
use crate::resource::ResourceKind;
use ahash::AHashMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[cfg(feature = "profiling")]
use tracing::info_span;

type Slot<R> = Arc<OnceCell<Arc<R>>>;

/// Cache statistics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Successful decodes
    pub loads: u64,
    /// Failed decodes
    pub failures: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    pub(crate) fn merge(mut self, other: CacheStats) -> CacheStats {
        self.hits += other.hits;
        self.misses += other.misses;
        self.loads += other.loads;
        self.failures += other.failures;
        self
    }
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
    failures: AtomicU64,
}

/// Per-kind memoization table
pub struct ResourceCache<I, R> {
    kind: ResourceKind,
    slots: Mutex<AHashMap<I, Slot<R>>>,
    counters: Counters,
}

impl<I, R> ResourceCache<I, R>
where
    I: Copy + Eq + Hash + fmt::Display,
{
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            slots: Mutex::new(AHashMap::new()),
            counters: Counters::default(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Get an already loaded resource without loading it
    pub fn get(&self, id: I) -> Option<Arc<R>> {
        let slot = self.slots.lock().get(&id).cloned()?;
        let resource = slot.get().cloned();
        if resource.is_some() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
        }
        resource
    }

    pub fn is_loaded(&self, id: I) -> bool {
        self.slots
            .lock()
            .get(&id)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Return the resource for `id`, running `load` if it is not cached yet.
    ///
    /// `load` runs at most once per successful id. Concurrent callers for the
    /// same id block until the first one finishes and then share its result.
    /// A failed load leaves the slot empty, so a later call starts over.
    ///
    /// `load` must not load the same id from this cache again: the re-entrant
    /// call would wait on its own slot forever.
    pub fn get_or_try_load<F>(&self, id: I, load: F) -> Result<Arc<R>>
    where
        F: FnOnce() -> Result<R>,
    {
        let slot = {
            let mut slots = self.slots.lock();
            slots.entry(id).or_default().clone()
        };

        if let Some(resource) = slot.get() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(resource.clone());
        }

        let mut ran = false;
        let outcome = slot.get_or_try_init(|| {
            ran = true;
            self.counters.misses.fetch_add(1, Ordering::Relaxed);

            #[cfg(feature = "profiling")]
            let _span = info_span!("resource_load", kind = %self.kind, id = %id).entered();

            load().map(Arc::new)
        });

        match outcome {
            Ok(resource) => {
                if ran {
                    self.counters.loads.fetch_add(1, Ordering::Relaxed);
                    #[cfg(feature = "profiling")]
                    tracing::debug!(kind = %self.kind, id = %id, "resource loaded");
                } else {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                }
                Ok(resource.clone())
            }
            Err(err) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                Err(err)
            }
        }
    }

    /// Number of loaded resources
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            loads: self.counters.loads.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }
}
