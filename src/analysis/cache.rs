use crate::analysis::assembler::DimensionOutcome;
use crate::analysis::dimensions::Dimension;
use crate::source::Filter;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Memo key: one dimension over one table and filter set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub dimension: Dimension,
    pub table: String,
    /// Filters rendered as `column.op.value`, sorted
    pub filters: Vec<String>,
}

impl CacheKey {
    pub fn new(dimension: Dimension, table: &str, filters: &[Filter]) -> Self {
        let mut rendered: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
        rendered.sort();
        Self {
            dimension,
            table: table.to_string(),
            filters: rendered,
        }
    }
}

/// Thread-safe, caller-owned memo of dimension outcomes
#[derive(Clone)]
pub struct ReportCache {
    cache: Arc<Mutex<HashMap<CacheKey, DimensionOutcome>>>,
    hits: Arc<Mutex<u64>>,
    misses: Arc<Mutex<u64>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ReportCache {
    /// Create a new empty report cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
            hits: Arc::new(Mutex::new(0)),
            misses: Arc::new(Mutex::new(0)),
        }
    }

    /// Get an outcome from cache if it exists
    pub fn get(&self, key: &CacheKey) -> Option<DimensionOutcome> {
        let cache = lock(&self.cache);
        match cache.get(key) {
            Some(outcome) => {
                *lock(&self.hits) += 1;
                debug!("Cache hit for dimension: {}", key.dimension);
                Some(outcome.clone())
            }
            None => {
                *lock(&self.misses) += 1;
                debug!("Cache miss for dimension: {}", key.dimension);
                None
            }
        }
    }

    /// Store an outcome in the cache
    pub fn put(&self, key: CacheKey, outcome: DimensionOutcome) {
        debug!("Cached dimension: {}", key.dimension);
        lock(&self.cache).insert(key, outcome);
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        lock(&self.cache).clear();
        *lock(&self.hits) = 0;
        *lock(&self.misses) = 0;
    }

    pub fn size(&self) -> usize {
        lock(&self.cache).len()
    }

    /// Get cache statistics
    pub fn get_stats(&self) -> CacheStats {
        CacheStats {
            hits: *lock(&self.hits),
            misses: *lock(&self.misses),
        }
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache performance statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            (self.hits as f64 / (self.hits + self.misses) as f64) * 100.0
        }
    }

    /// Get total cache requests
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }
}
