//! Bounded memoization for Pauli-string composition.
//!
//! The energy evaluator calls [`compose`] `O(|H|·|U|²)` times per
//! evaluation, and the same pairs recur on every annealing iteration. The
//! cache is an explicit object owned by whoever drives the evaluation and
//! passed by reference, so its lifetime and sharing are visible in the types.
//! It is `Send + Sync`; independent sweeps may share one instance or each
//! own their own.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use num_complex::Complex64;

use crate::error::{AnnealError, AnnealResult};
use crate::pauli::{PauliString, compose};

/// Default number of memoized pairs.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

type ComposeKey = (PauliString, PauliString);
type ComposeValue = (Complex64, PauliString);

/// Snapshot of cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compose.
    pub misses: u64,
    /// Entries currently held.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

impl CacheStatistics {
    /// Hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

struct Inner {
    entries: LruCache<ComposeKey, ComposeValue>,
    hits: u64,
    misses: u64,
}

/// LRU cache in front of [`compose`].
pub struct ComposeCache {
    inner: Mutex<Inner>,
}

impl ComposeCache {
    /// Create a cache holding at most `capacity` composed pairs.
    pub fn new(capacity: usize) -> AnnealResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            AnnealError::InvalidConfig("compose cache capacity must be at least 1".into())
        })?;
        Ok(Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        })
    }

    /// Compose `s1 · s2`, consulting the cache first.
    ///
    /// Failed compositions are returned but never stored.
    pub fn compose(
        &self,
        s1: &PauliString,
        s2: &PauliString,
    ) -> AnnealResult<(Complex64, PauliString)> {
        let key = (s1.clone(), s2.clone());
        {
            let mut inner = self.lock();
            if let Some(hit) = inner.entries.get(&key).cloned() {
                inner.hits += 1;
                return Ok(hit);
            }
            inner.misses += 1;
        }

        // Compose outside the lock; a racing miss on the same pair just
        // stores an identical value twice.
        let value = compose(s1, s2)?;
        self.lock().entries.put(key, value.clone());
        Ok(value)
    }

    /// Current statistics.
    pub fn statistics(&self) -> CacheStatistics {
        let inner = self.lock();
        CacheStatistics {
            hits: inner.hits,
            misses: inner.misses,
            len: inner.entries.len(),
            capacity: inner.entries.cap().get(),
        }
    }

    /// Drop all entries and reset the counters.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.hits = 0;
        inner.misses = 0;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ComposeCache {
    fn default() -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }
}

impl std::fmt::Debug for ComposeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.statistics();
        f.debug_struct("ComposeCache")
            .field("len", &stats.len)
            .field("capacity", &stats.capacity)
            .field("hits", &stats.hits)
            .field("misses", &stats.misses)
            .finish()
    }
}
