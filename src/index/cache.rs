//! Bounded in-memory cache of document indexes keyed by filename.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use super::DocumentIndex;

/// Least-recently-used cache of indexes shared across requests.
///
/// Entries are keyed by sanitized filename only. Inserting under an existing name replaces the
/// previous index (last writer wins); nothing else invalidates an entry.
pub struct IndexCache {
    entries: Mutex<LruCache<String, Arc<DocumentIndex>>>,
}

impl IndexCache {
    /// Cache holding at most `capacity` indexes (minimum one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Fetch the cached index for `filename`, marking it recently used.
    pub fn get(&self, filename: &str) -> Option<Arc<DocumentIndex>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(filename).cloned()
    }

    /// Insert or replace the index for `filename`.
    pub fn insert(&self, filename: &str, index: Arc<DocumentIndex>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((evicted, _)) = entries.push(filename.to_string(), index) {
            if evicted != filename {
                tracing::debug!(evicted = %evicted, "Evicted index from cache");
            }
        }
    }

    /// Number of cached indexes.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
