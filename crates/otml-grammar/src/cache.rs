//! Memoization of composed transducers.
//!
//! Entries are keyed by the canonical string of a constraint set and hold an
//! immutable [`Arc<Transducer>`] snapshot. An entry is never edited in place:
//! callers that need a modified transducer clone the snapshot and insert the
//! result under its own key.
//!
//! The cache does not observe the feature table. Call
//! [`invalidate_all`](TransducerCache::invalidate_all) between independent
//! runs or after the table changes.

use std::collections::HashMap;
use std::sync::Arc;

use otml_core::Transducer;
use tracing::{debug, trace};

/// Counters for cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Transducers composed by [`TransducerCache::get_or_build`].
    pub builds: u64,
    /// Transducers stored directly through [`TransducerCache::insert`].
    pub inserts: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Canonical constraint-set string to composed transducer.
#[derive(Debug, Default)]
pub struct TransducerCache {
    entries: HashMap<String, Arc<Transducer>>,
    stats: CacheStats,
}

impl TransducerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a transducer, counting a hit or a miss.
    pub fn get(&mut self, key: &str) -> Option<Arc<Transducer>> {
        match self.entries.get(key) {
            Some(transducer) => {
                self.stats.hits += 1;
                trace!(event = "cache_hit", key);
                Some(Arc::clone(transducer))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Returns true if `key` has an entry. Does not touch the counters.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the entry for `key`, building and storing it on a miss.
    ///
    /// A failed build stores nothing.
    pub fn get_or_build<E>(
        &mut self,
        key: &str,
        build: impl FnOnce() -> Result<Transducer, E>,
    ) -> Result<Arc<Transducer>, E> {
        if let Some(transducer) = self.get(key) {
            return Ok(transducer);
        }
        let transducer = Arc::new(build()?);
        self.stats.builds += 1;
        debug!(
            event = "cache_build",
            key,
            states = transducer.state_count(),
            arcs = transducer.arc_count(),
            entries = self.entries.len() + 1,
        );
        self.entries.insert(key.to_string(), Arc::clone(&transducer));
        Ok(transducer)
    }

    /// Stores `transducer` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, transducer: Transducer) -> Arc<Transducer> {
        let key = key.into();
        let transducer = Arc::new(transducer);
        self.stats.inserts += 1;
        trace!(event = "cache_insert", key = %key);
        self.entries.insert(key, Arc::clone(&transducer));
        transducer
    }

    /// Drops every entry. Counters are kept.
    pub fn invalidate_all(&mut self) {
        debug!(event = "cache_invalidate", entries = self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
