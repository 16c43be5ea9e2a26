use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::trace;

use crate::error::StoreError;
use crate::store::Store;

/// A `Store` backed by a locked in-memory map, for tests and embedders that
/// do not need durability across restarts (§1 Non-goals: the durable engine
/// itself is out of scope).
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<BTreeMap<(String, Vec<u8>), Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, prefix: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let data = self.data.lock().expect("memory store lock poisoned");
        Ok(data.get(&(prefix.to_string(), key.to_vec())).cloned())
    }

    fn set(&self, prefix: &str, key: &[u8], value: Vec<u8>) -> Result<(), StoreError> {
        trace!(prefix, key_len = key.len(), "storing record");
        let mut data = self.data.lock().expect("memory store lock poisoned");
        data.insert((prefix.to_string(), key.to_vec()), value);
        Ok(())
    }

    fn delete(&self, prefix: &str, key: &[u8]) -> Result<(), StoreError> {
        let mut data = self.data.lock().expect("memory store lock poisoned");
        data.remove(&(prefix.to_string(), key.to_vec()));
        Ok(())
    }

    fn get_all(&self, prefix: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let data = self.data.lock().expect("memory store lock poisoned");
        Ok(data
            .iter()
            .filter(|((p, _), _)| p == prefix)
            .map(|((_, k), v)| (k.clone(), v.clone()))
            .collect())
    }

    fn remove_all_by_collection(&self, prefix: &str) -> Result<(), StoreError> {
        let mut data = self.data.lock().expect("memory store lock poisoned");
        data.retain(|(p, _), _| p != prefix);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set("instances", b"k1", vec![1, 2, 3]).unwrap();
        assert_eq!(store.get("instances", b"k1").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("instances", b"missing").unwrap(), None);
    }

    #[test]
    fn collections_are_isolated_by_prefix() {
        let store = MemoryStore::new();
        store.set("a", b"k", vec![1]).unwrap();
        store.set("b", b"k", vec![2]).unwrap();
        assert_eq!(store.count_by_collection("a").unwrap(), 1);
        assert_eq!(store.count_by_collection("b").unwrap(), 1);

        store.remove_all_by_collection("a").unwrap();
        assert_eq!(store.count_by_collection("a").unwrap(), 0);
        assert_eq!(store.count_by_collection("b").unwrap(), 1);
    }
}
