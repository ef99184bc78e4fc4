//! JSON persistence in a key-value store.
//!
//! Backs the auth session so it survives reloads and new tabs.

use serde::{Serialize, de::DeserializeOwned};

use super::dom;
use crate::core::error::StorageError;

/// String key-value store with localStorage semantics.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str);
}

/// The page's localStorage.
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        dom::local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        dom::local_storage()
            .ok_or(StorageError::Unavailable)?
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed)
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = dom::local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Outcome of reading a stored value.
#[derive(Debug, PartialEq, Eq)]
pub enum Stored<T> {
    Missing,
    Present(T),
    /// The key exists but its content does not parse.
    Corrupt,
}

/// Read a JSON value.
pub fn get<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Stored<T> {
    match store.get_item(key) {
        Some(json) => decode(&json),
        None => Stored::Missing,
    }
}

/// Write a JSON value.
pub fn set<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    data: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(data).map_err(|_| StorageError::SerializationFailed)?;
    store.set_item(key, &json)
}

fn decode<T: DeserializeOwned>(json: &str) -> Stored<T> {
    serde_json::from_str(json).map_or(Stored::Corrupt, Stored::Present)
}

#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::KeyValueStore;
    use crate::core::error::StorageError;

    /// In-memory store whose writes can be made to fail like a full quota.
    #[derive(Default)]
    pub struct MemoryStorage {
        items: RefCell<HashMap<String, String>>,
        reject_writes: Cell<bool>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reject_writes(&self, enabled: bool) {
            self.reject_writes.set(enabled);
        }

        pub fn contains(&self, key: &str) -> bool {
            self.items.borrow().contains_key(key)
        }
    }

    impl KeyValueStore for MemoryStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.reject_writes.get() {
                return Err(StorageError::WriteFailed);
            }
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove_item(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }
}
