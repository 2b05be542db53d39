//! Memoisation of derived results keyed by `(store fingerprint, selection)`.
//!
//! Repeated UI interactions with an identical filter set reuse the previous
//! result. The cache is purely a performance aid: a miss recomputes the same
//! value a hit would return.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::aggregate::Selection;
use crate::timeseries::ProcessedData;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    fingerprint: String,
    selection: Selection,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Bounded memo table. When full, it is cleared before the next insert.
#[derive(Debug)]
pub struct MemoCache<V> {
    entries: HashMap<MemoKey, Arc<V>>,
    capacity: usize,
    stats: MemoStats,
}

impl<V> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V> MemoCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            stats: MemoStats::default(),
        }
    }

    /// Return the cached value for `(store, selection)` or compute and cache it.
    pub fn get_or_compute<F>(&mut self, store: &ProcessedData, selection: &Selection, compute: F) -> Arc<V>
    where
        F: FnOnce(&ProcessedData, &Selection) -> V,
    {
        let key = MemoKey {
            fingerprint: store.fingerprint().to_string(),
            selection: selection.clone(),
        };
        if let Some(hit) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Arc::clone(hit);
        }

        self.stats.misses += 1;
        if self.entries.len() >= self.capacity {
            debug!(capacity = self.capacity, "memo cache full, clearing");
            self.entries.clear();
        }
        let value = Arc::new(compute(store, selection));
        self.entries.insert(key, Arc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}
