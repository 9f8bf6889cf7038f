//! Cache storage - named partitions of URL-keyed responses.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::core::host::FetchResponse;

/// A cached response plus when it was stored.
#[derive(Debug, Clone)]
pub struct CachedEntry {
    pub response: FetchResponse,
    pub stored_at: DateTime<Utc>,
}

/// Storage seam for the cache manager.
///
/// Partitions are created implicitly on first put and enumerated for
/// version eviction. Lookups never consider response freshness; eviction
/// happens only by partition.
pub trait CacheStore: Send + Sync {
    fn put(&self, partition: &str, url: &str, response: FetchResponse);

    fn get(&self, partition: &str, url: &str) -> Option<CachedEntry>;

    /// Look the URL up across all partitions, newest entry wins.
    fn match_any(&self, url: &str) -> Option<CachedEntry>;

    fn partitions(&self) -> Vec<String>;

    /// Drop a whole partition. Returns whether it existed.
    fn delete_partition(&self, partition: &str) -> bool;

    /// Drop everything.
    fn clear(&self);
}

/// In-memory store used by tests and the default build.
#[derive(Default)]
pub struct MemoryCacheStore {
    partitions: Mutex<HashMap<String, HashMap<String, CachedEntry>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a partition, zero when absent.
    pub fn len(&self, partition: &str) -> usize {
        self.lock().get(partition).map_or(0, HashMap::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, HashMap<String, CachedEntry>>> {
        self.partitions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CacheStore for MemoryCacheStore {
    fn put(&self, partition: &str, url: &str, response: FetchResponse) {
        self.lock().entry(partition.to_string()).or_default().insert(
            url.to_string(),
            CachedEntry {
                response,
                stored_at: Utc::now(),
            },
        );
    }

    fn get(&self, partition: &str, url: &str) -> Option<CachedEntry> {
        self.lock().get(partition)?.get(url).cloned()
    }

    fn match_any(&self, url: &str) -> Option<CachedEntry> {
        self.lock()
            .values()
            .filter_map(|entries| entries.get(url))
            .max_by_key(|entry| entry.stored_at)
            .cloned()
    }

    fn partitions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn delete_partition(&self, partition: &str) -> bool {
        self.lock().remove(partition).is_some()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
