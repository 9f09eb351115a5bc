//! A generic session-scoped cache for fetched assets (slice images, mask
//! overlays, the lookup table).
//!
//! Append-only with last-write-wins on key collision; no eviction — the
//! cache lives for one viewing session. Values are handed out behind `Arc`
//! so readers never block each other on large assets.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

pub struct SessionCache<K, V> {
    inner: RwLock<HashMap<K, Arc<V>>>,
}

impl<K: Eq + Hash, V> SessionCache<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Insert `value`, replacing any previous entry for `key`.
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.clone());
        value
    }

    /// Return the cached value for `key`, computing and storing it on a
    /// miss. If two threads race on the same missing key, the first write
    /// wins and both observe the same stored value.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .entry(key)
            .or_insert_with(|| Arc::new(compute()))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash, V> Default for SessionCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn insert_and_get() {
        let cache: SessionCache<String, Vec<u8>> = SessionCache::new();
        assert!(cache.get(&"a.png".to_string()).is_none());
        cache.insert("a.png".to_string(), vec![1, 2, 3]);
        assert_eq!(*cache.get(&"a.png".to_string()).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn last_write_wins_on_collision() {
        let cache: SessionCache<&str, u32> = SessionCache::new();
        cache.insert("k", 1);
        cache.insert("k", 2);
        assert_eq!(*cache.get(&"k").unwrap(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_or_insert_computes_once() {
        let cache: SessionCache<u32, String> = SessionCache::new();
        let first = cache.get_or_insert_with(7, || "computed".to_string());
        let second = cache.get_or_insert_with(7, || "recomputed".to_string());
        assert_eq!(*first, "computed");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn concurrent_population() {
        let cache: Arc<SessionCache<u32, u32>> = Arc::new(SessionCache::new());
        let mut handles = Vec::new();
        for t in 0..8u32 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    cache.get_or_insert_with(i, || i * 10);
                    let _ = cache.get(&i);
                }
                t
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 100);
        assert_eq!(*cache.get(&42).unwrap(), 420);
    }
}
