//! Keyed value providers and an LRU caching decorator.
//!
//! A [`Provider`] is the function-shaped seam between the resolver and
//! whatever produces values for it (ephemeris lookups, file reads). Any
//! `FnMut(&K) -> Result<V, _>` closure is a provider, and [`LruProvider`]
//! wraps one to memoize its most recent results.

use crate::astrodyn_errors::AstrodynError;

pub trait Provider<K, V> {
    fn provide(&mut self, key: &K) -> Result<V, AstrodynError>;
}

impl<K, V, F> Provider<K, V> for F
where
    F: FnMut(&K) -> Result<V, AstrodynError>,
{
    fn provide(&mut self, key: &K) -> Result<V, AstrodynError> {
        self(key)
    }
}

/// Least-recently-used cache over an inner provider.
///
/// Entries are kept most-recent-first; a hit moves its entry to the front and
/// an insert beyond capacity drops the back. Capacity zero disables caching
/// entirely, turning the wrapper into a pass-through. Errors from the inner
/// provider are never cached.
pub struct LruProvider<K, V, P> {
    inner: P,
    capacity: usize,
    entries: Vec<(K, V)>,
}

impl<K, V, P> LruProvider<K, V, P>
where
    K: PartialEq + Clone,
    V: Clone,
    P: Provider<K, V>,
{
    pub fn new(inner: P, capacity: usize) -> Self {
        LruProvider {
            inner,
            capacity,
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resize the cache. Shrinking evicts from the least-recent end; existing
    /// entries within the new capacity stay valid.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.entries.truncate(capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V, P> Provider<K, V> for LruProvider<K, V, P>
where
    K: PartialEq + Clone,
    V: Clone,
    P: Provider<K, V>,
{
    fn provide(&mut self, key: &K) -> Result<V, AstrodynError> {
        if self.capacity == 0 {
            return self.inner.provide(key);
        }
        if let Some(pos) = self.entries.iter().position(|(k, _)| k == key) {
            let entry = self.entries.remove(pos);
            let value = entry.1.clone();
            self.entries.insert(0, entry);
            return Ok(value);
        }
        let value = self.inner.provide(key)?;
        self.entries.insert(0, (key.clone(), value.clone()));
        self.entries.truncate(self.capacity);
        Ok(value)
    }
}

#[cfg(test)]
mod provider_test {
    use super::*;

    /// Counts how often the wrapped provider is actually consulted.
    struct Counting {
        calls: usize,
    }

    impl Provider<u32, u32> for Counting {
        fn provide(&mut self, key: &u32) -> Result<u32, AstrodynError> {
            self.calls += 1;
            Ok(key * 10)
        }
    }

    #[test]
    fn test_hit_avoids_inner_call() {
        let mut cache = LruProvider::new(Counting { calls: 0 }, 4);
        assert_eq!(cache.provide(&1).unwrap(), 10);
        assert_eq!(cache.provide(&1).unwrap(), 10);
        assert_eq!(cache.inner.calls, 1);
    }

    #[test]
    fn test_eviction_of_least_recent() {
        let mut cache = LruProvider::new(Counting { calls: 0 }, 2);
        cache.provide(&1).unwrap();
        cache.provide(&2).unwrap();
        // Touch 1 so that 2 becomes the eviction candidate.
        cache.provide(&1).unwrap();
        cache.provide(&3).unwrap();
        assert_eq!(cache.inner.calls, 3);

        // 2 was evicted, so asking for it consults the inner provider again
        // and in turn evicts 1, now the least recent entry.
        cache.provide(&2).unwrap();
        assert_eq!(cache.inner.calls, 4);
        cache.provide(&1).unwrap();
        assert_eq!(cache.inner.calls, 5);
        // 2 stayed resident through that refill.
        cache.provide(&2).unwrap();
        assert_eq!(cache.inner.calls, 5);
    }

    #[test]
    fn test_zero_capacity_is_pass_through() {
        let mut cache = LruProvider::new(Counting { calls: 0 }, 0);
        cache.provide(&7).unwrap();
        cache.provide(&7).unwrap();
        assert_eq!(cache.inner.calls, 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shrink_keeps_most_recent() {
        let mut cache = LruProvider::new(Counting { calls: 0 }, 3);
        cache.provide(&1).unwrap();
        cache.provide(&2).unwrap();
        cache.provide(&3).unwrap();
        cache.set_capacity(1);
        assert_eq!(cache.len(), 1);

        // Only the most recent key is still cached.
        cache.provide(&3).unwrap();
        assert_eq!(cache.inner.calls, 3);
        cache.provide(&1).unwrap();
        assert_eq!(cache.inner.calls, 4);
    }

    #[test]
    fn test_closure_is_a_provider() {
        let mut double = |k: &i64| -> Result<i64, AstrodynError> { Ok(k * 2) };
        assert_eq!(double.provide(&21).unwrap(), 42);
    }
}
