//! Process-wide memoization of API responses.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;

/// Key → value store where the first insert for a key wins.
pub trait MemoCache<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;

    /// Stores `value` unless `key` is already present and returns whatever is stored.
    fn insert_once(&self, key: K, value: V) -> V;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct MemoryCache<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> MemoryCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for MemoryCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoCache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().get(key).cloned()
    }

    fn insert_once(&self, key: K, value: V) -> V {
        self.entries.lock().entry(key).or_insert(value).clone()
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
