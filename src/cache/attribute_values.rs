use super::clock::{Clock, SystemClock};
use crate::database::OrderStore;
use crate::errors::AppResult;
use crate::types::FilterAttribute;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Default lifetime of a cached value set
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug, Clone)]
struct CachedValueSet {
    values: Arc<BTreeSet<String>>,
    expires_at: DateTime<Utc>,
}

/// Time-bounded cache of the distinct values seen for each filter attribute
///
/// Entries are only ever replaced whole. Two callers missing at the same
/// time both query the store and the last one to finish wins; the lock is
/// never held across a store call.
#[derive(Clone)]
pub struct AttributeValueCache {
    entries: Arc<Mutex<HashMap<FilterAttribute, CachedValueSet>>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl AttributeValueCache {
    /// Create an empty cache using the wall clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<FilterAttribute, CachedValueSet>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Distinct non-empty values of `attribute`, served from cache while fresh
    ///
    /// On a miss the full set is recomputed from `store` and replaces any
    /// previous entry. A store failure is returned as
    /// `AppError::StoreUnavailable`; an expired entry is never served instead.
    pub fn get_distinct_values<S: OrderStore + ?Sized>(
        &self,
        store: &S,
        attribute: FilterAttribute,
    ) -> AppResult<BTreeSet<String>> {
        let now = self.clock.now();

        if let Some(entry) = self.lock_entries().get(&attribute) {
            if now < entry.expires_at {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {}", attribute);
                return Ok(entry.values.as_ref().clone());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for {}", attribute);

        let raw = store
            .distinct_attribute_values(attribute.key())
            .map_err(|e| {
                warn!("Could not load {} values: {}", attribute, e);
                e
            })?;

        // Stores are not trusted to deduplicate or to filter blanks
        let values: BTreeSet<String> = raw
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();

        let entry = CachedValueSet {
            values: Arc::new(values.clone()),
            expires_at: self.expiry_from(self.clock.now()),
        };
        self.lock_entries().insert(attribute, entry);
        debug!("Cached {} values for {}", values.len(), attribute);

        Ok(values)
    }

    /// Drop the cached set for one attribute
    pub fn invalidate(&self, attribute: FilterAttribute) {
        if self.lock_entries().remove(&attribute).is_some() {
            debug!("Invalidated cached values for {}", attribute);
        }
    }

    /// Drop every cached set and reset statistics
    pub fn clear(&self) {
        self.lock_entries().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Get cache statistics
    pub fn get_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of attributes currently cached (fresh or expired)
    pub fn size(&self) -> usize {
        self.lock_entries().len()
    }
}

impl Default for AttributeValueCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

/// Cache performance statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
