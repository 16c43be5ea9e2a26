use crate::error::StoreError;

/// The key-value persistence boundary the core consumes (§6 "Store
/// interface"). The durable engine itself (badger/pebble-equivalent) is out
/// of scope; this trait is the seam an embedder implements against.
pub trait Store: Send + Sync {
    fn get(&self, prefix: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&self, prefix: &str, key: &[u8], value: Vec<u8>) -> Result<(), StoreError>;

    fn delete(&self, prefix: &str, key: &[u8]) -> Result<(), StoreError>;

    fn get_many(&self, prefix: &str, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StoreError> {
        keys.iter().map(|key| self.get(prefix, key)).collect()
    }

    fn set_many(&self, prefix: &str, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(prefix, &key, value)?;
        }
        Ok(())
    }

    fn get_all(&self, prefix: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;

    fn count_by_collection(&self, prefix: &str) -> Result<usize, StoreError> {
        Ok(self.get_all(prefix)?.len())
    }

    fn remove_all_by_collection(&self, prefix: &str) -> Result<(), StoreError>;

    /// Run `f` against this store as a single transaction. The in-memory
    /// implementation holds its lock for the duration; a durable backend is
    /// expected to offer the same single-writer-per-key guarantee (§5
    /// "Shared resources").
    fn update(&self, f: &mut dyn FnMut(&dyn Store) -> Result<(), StoreError>) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        f(self)
    }
}
