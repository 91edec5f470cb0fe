use std::{collections::HashMap, hash::Hash};
use tokio::sync::RwLock;

/// Generic in-memory key-value map store.
///
/// Wraps a `HashMap<K, V>` in an async read/write lock: readers share the lock,
/// writers take it exclusively. All access goes through the helpers below so the
/// locking discipline stays in one place.
pub struct MemoryMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for MemoryMapStore<K, V> {
    fn default() -> Self {
        Self { inner: RwLock::new(HashMap::new()) }
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries.
    pub async fn list(&self) -> HashMap<K, V> {
        let map = self.inner.read().await;
        map.clone()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Remove a key; returns the removed value if it existed.
    pub async fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().await;
        map.remove(key)
    }

    /// Run `f` against the map while holding the write lock.
    pub async fn update_map<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<K, V>) -> R,
    {
        let mut map = self.inner.write().await;
        f(&mut map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn memory_map_store_crud() {
        let store = MemoryMapStore::<String, String>::new();

        // initially empty
        assert!(store.list().await.is_empty());

        store
            .update_map(|m| {
                m.insert("a".into(), "1".into());
                m.insert("b".into(), "2".into());
            })
            .await;
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("1"));
        assert_eq!(store.get(&"c".into()).await, None);

        // update_map hands back the closure result
        let previous = store
            .update_map(|m| m.get_mut("a").map(|v| std::mem::replace(v, "10".into())))
            .await;
        assert_eq!(previous.as_deref(), Some("1"));
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("10"));

        assert_eq!(store.remove(&"b".into()).await.as_deref(), Some("2"));
        assert_eq!(store.remove(&"b".into()).await, None);

        let snapshot = store.list().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("a").map(String::as_str), Some("10"));
    }

    #[tokio::test]
    async fn concurrent_writers_do_not_lose_entries() {
        let store = Arc::new(MemoryMapStore::<u32, u32>::new());
        let mut handles = Vec::new();
        for i in 0..32u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.update_map(|m| m.insert(i, i * 2)).await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(store.list().await.len(), 32);
        assert_eq!(store.get(&7).await, Some(14));
    }
}
