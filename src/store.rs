use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// The Store holds the server's data set: flat string keys and hash keys,
/// kept in two independent maps. It is thread-safe and can be shared and
/// cloned cheaply using reference counting.
#[derive(Clone)]
pub struct Store {
    inner: Arc<InnerStore>,
}

struct InnerStore {
    strings: RwLock<HashMap<String, Bytes>>,
    hashes: RwLock<HashMap<String, HashMap<String, Bytes>>>,
}

impl Store {
    pub fn new() -> Store {
        let inner = Arc::new(InnerStore {
            strings: RwLock::new(HashMap::new()),
            hashes: RwLock::new(HashMap::new()),
        });

        Self { inner }
    }

    pub fn set(&self, key: String, value: Bytes) {
        self.inner.strings.write().unwrap().insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.inner.strings.read().unwrap().get(key).cloned()
    }

    pub fn hset(&self, key: String, field: String, value: Bytes) {
        self.inner
            .hashes
            .write()
            .unwrap()
            .entry(key)
            .or_default()
            .insert(field, value);
    }

    pub fn hget(&self, key: &str, field: &str) -> Option<Bytes> {
        self.inner
            .hashes
            .read()
            .unwrap()
            .get(key)
            .and_then(|hash| hash.get(field).cloned())
    }

    /// Returns every field of a hash key, or `None` when the key does not
    /// exist. Field order follows map iteration and is not stable.
    pub fn hgetall(&self, key: &str) -> Option<Vec<(String, Bytes)>> {
        self.inner.hashes.read().unwrap().get(key).map(|hash| {
            hash.iter()
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect()
        })
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
