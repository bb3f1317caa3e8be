//! Query Cache
//!
//! Fetched server data keyed by segment lists such as `["projects", "0"]`.
//! Entries go stale after `stale_time` and are dropped after `gc_time`.
//! Mutations invalidate by key prefix; every live query under that prefix
//! refetches.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};

/// Ordered key segments; the first one is the query family
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Family name, e.g. `projects`
    pub fn root(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or("")
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
    }
}

impl From<&str> for QueryKey {
    fn from(root: &str) -> Self {
        QueryKey::new([root])
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// Milliseconds since epoch
    fetched_at: f64,
    invalidated: bool,
}

/// Time-aware key/value cache; `now` is always passed in
#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    entries: HashMap<QueryKey, CacheEntry<V>>,
    stale_time: Duration,
    gc_time: Duration,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self { entries: HashMap::new(), stale_time, gc_time }
    }

    /// Cached value if it is neither invalidated nor older than `stale_time`
    pub fn get_fresh(&self, key: &QueryKey, now: f64) -> Option<V> {
        let entry = self.entries.get(key)?;
        let age = now - entry.fetched_at;
        if entry.invalidated || age > self.stale_time.as_millis() as f64 {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Cached value regardless of staleness
    pub fn get_any(&self, key: &QueryKey) -> Option<V> {
        self.entries.get(key).map(|e| e.value.clone())
    }

    pub fn insert(&mut self, key: QueryKey, value: V, now: f64) {
        self.entries.insert(key, CacheEntry { value, fetched_at: now, invalidated: false });
    }

    /// Mark every key under `prefix` stale, returning how many matched
    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        count
    }

    pub fn invalidate_all(&mut self) -> usize {
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
        }
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries older than `gc_time`
    pub fn collect_garbage(&mut self, now: f64) -> usize {
        let limit = self.gc_time.as_millis() as f64;
        let before = self.entries.len();
        self.entries.retain(|_, entry| now - entry.fetched_at <= limit);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Milliseconds since epoch
pub fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        chrono::Utc::now().timestamp_millis() as f64
    }
}

type AnyValue = Arc<dyn Any + Send + Sync>;

/// One version signal per query family. A query subscribes to its own
/// family only, so bumping `unread-count` leaves `projects` alone.
#[derive(Default)]
struct FamilyVersions {
    signals: HashMap<String, ArcRwSignal<u64>>,
}

impl FamilyVersions {
    fn signal(&mut self, root: &str) -> ArcRwSignal<u64> {
        self.signals.entry(root.to_string()).or_insert_with(|| ArcRwSignal::new(0)).clone()
    }

    /// Nobody subscribed to an unknown family, so there is nothing to bump
    fn bump(&self, root: &str) {
        if let Some(signal) = self.signals.get(root) {
            signal.update(|v| *v += 1);
        }
    }

    fn bump_all(&self) {
        for signal in self.signals.values() {
            signal.update(|v| *v += 1);
        }
    }

    fn version(&self, root: &str) -> u64 {
        self.signals.get(root).map(|s| s.get_untracked()).unwrap_or(0)
    }
}

/// Reactive handle over the cache, provided through context
#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: StoredValue<QueryCache<AnyValue>>,
    versions: StoredValue<FamilyVersions>,
}

impl QueryClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            cache: StoredValue::new(QueryCache::new(config.query_stale_time, config.query_gc_time)),
            versions: StoredValue::new(FamilyVersions::default()),
        }
    }

    /// Subscribe the running query to its family's version
    fn track(&self, key: &QueryKey) {
        if let Some(signal) = self.versions.try_update_value(|v| v.signal(key.root())) {
            signal.track();
        }
    }

    fn cached<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<T> {
        let now = now_ms();
        self.cache
            .with_value(|c| c.get_fresh(key, now))
            .and_then(|v| v.downcast_ref::<T>().cloned())
    }

    fn store<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        let now = now_ms();
        self.cache.update_value(|c| {
            c.insert(key, Arc::new(value), now);
            c.collect_garbage(now);
        });
    }

    /// Last known value even if stale, for optimistic reads
    pub fn peek<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.cache
            .with_value(|c| c.get_any(key))
            .and_then(|v| v.downcast_ref::<T>().cloned())
    }

    /// Mark a key prefix stale and refetch its live queries
    pub fn invalidate(&self, prefix: impl Into<QueryKey>) {
        let prefix = prefix.into();
        let count = self.cache.try_update_value(|c| c.invalidate(&prefix)).unwrap_or(0);
        let version = self.versions.with_value(|v| {
            v.bump(prefix.root());
            v.version(prefix.root())
        });
        log::debug!("invalidated {:?} ({} entries, v{})", prefix, count, version);
    }

    pub fn invalidate_many(&self, prefixes: &[&str]) {
        for prefix in prefixes {
            self.invalidate(*prefix);
        }
    }

    /// Everything stale; used after login
    pub fn invalidate_all(&self) {
        self.cache.update_value(|c| {
            c.invalidate_all();
        });
        self.versions.with_value(FamilyVersions::bump_all);
    }

    /// Drop everything; used on logout
    pub fn clear(&self) {
        self.cache.update_value(|c| c.clear());
        self.versions.with_value(FamilyVersions::bump_all);
    }
}

/// Get the query client from context
pub fn use_query_client() -> QueryClient {
    expect_context::<QueryClient>()
}

fn is_transient(err: &ApiError) -> bool {
    match err {
        ApiError::Network(_) | ApiError::Timeout => true,
        ApiError::Server { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Cached async query. Re-runs when `key` changes or its family is
/// invalidated; a transient failure is retried once.
pub fn use_query<T, K, F, Fut>(key: K, fetch: F) -> LocalResource<ApiResult<T>>
where
    T: Clone + Send + Sync + 'static,
    K: Fn() -> QueryKey + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let client = use_query_client();
    LocalResource::new(move || {
        let key = key();
        client.track(&key);
        let cached = client.cached::<T>(&key);
        // Futures are lazy; the second one only runs on retry
        let first = fetch();
        let second = fetch();
        async move {
            if let Some(value) = cached {
                return Ok(value);
            }
            let result = match first.await {
                Err(e) if is_transient(&e) => {
                    log::debug!("retrying {:?} after {}", key, e);
                    second.await
                }
                other => other,
            };
            if let Ok(value) = &result {
                client.store(key, value.clone());
            }
            result
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 60_000.0;

    fn cache() -> QueryCache<u32> {
        QueryCache::new(Duration::from_secs(300), Duration::from_secs(600))
    }

    #[test]
    fn test_fresh_until_stale_time() {
        let mut cache = cache();
        let key = QueryKey::new(["projects", "0"]);
        cache.insert(key.clone(), 7, 0.0);

        assert_eq!(cache.get_fresh(&key, 4.0 * MIN), Some(7));
        assert_eq!(cache.get_fresh(&key, 5.5 * MIN), None);
        assert_eq!(cache.get_any(&key), Some(7));
    }

    #[test]
    fn test_prefix_invalidation_by_segment() {
        let mut cache = cache();
        cache.insert(QueryKey::new(["projects", "0"]), 1, 0.0);
        cache.insert(QueryKey::new(["projects", "1"]), 2, 0.0);
        cache.insert(QueryKey::new(["popular-projects"]), 3, 0.0);
        cache.insert(QueryKey::new(["post", "5"]), 4, 0.0);
        cache.insert(QueryKey::new(["post", "50"]), 5, 0.0);

        assert_eq!(cache.invalidate(&QueryKey::from("projects")), 2);
        assert_eq!(cache.get_fresh(&QueryKey::new(["projects", "0"]), 1.0), None);
        assert_eq!(cache.get_fresh(&QueryKey::from("popular-projects"), 1.0), Some(3));

        assert_eq!(cache.invalidate(&QueryKey::new(["post", "5"])), 1);
        assert_eq!(cache.get_fresh(&QueryKey::new(["post", "50"]), 1.0), Some(5));
    }

    #[test]
    fn test_reinsert_clears_invalidation() {
        let mut cache = cache();
        let key = QueryKey::from("unread-count");
        cache.insert(key.clone(), 1, 0.0);
        cache.invalidate(&key);
        cache.insert(key.clone(), 2, 10.0);
        assert_eq!(cache.get_fresh(&key, 20.0), Some(2));
    }

    #[test]
    fn test_garbage_collection() {
        let mut cache = cache();
        cache.insert(QueryKey::from("old"), 1, 0.0);
        cache.insert(QueryKey::from("new"), 2, 8.0 * MIN);

        assert_eq!(cache.collect_garbage(11.0 * MIN), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_any(&QueryKey::from("new")), Some(2));
    }

    #[test]
    fn test_clear_and_invalidate_all() {
        let mut cache = cache();
        cache.insert(QueryKey::from("a"), 1, 0.0);
        cache.insert(QueryKey::from("b"), 2, 0.0);
        assert_eq!(cache.invalidate_all(), 2);
        assert_eq!(cache.get_fresh(&QueryKey::from("a"), 0.0), None);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_family_versions_are_independent() {
        let mut versions = FamilyVersions::default();
        let projects = versions.signal("projects");
        let unread = versions.signal("unread-count");

        versions.bump("unread-count");
        versions.bump("unread-count");
        assert_eq!(unread.get_untracked(), 2);
        assert_eq!(projects.get_untracked(), 0);
        assert_eq!(versions.version("projects"), 0);

        // Same family hands back the same signal
        versions.signal("projects");
        versions.bump("projects");
        assert_eq!(projects.get_untracked(), 1);

        versions.bump("never-queried");
        assert_eq!(versions.version("never-queried"), 0);

        versions.bump_all();
        assert_eq!((versions.version("projects"), versions.version("unread-count")), (2, 3));
    }

    #[test]
    fn test_transient_errors() {
        assert!(is_transient(&ApiError::Timeout));
        assert!(is_transient(&ApiError::Server { status: 503, message: String::new() }));
        assert!(!is_transient(&ApiError::Server { status: 400, message: String::new() }));
        assert!(!is_transient(&ApiError::Unauthorized));
    }
}
