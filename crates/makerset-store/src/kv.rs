//! Key-value store trait with JSON helpers.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};

/// A byte-oriented key-value store.
///
/// Implementations must be safe to share between threads; writes are
/// last-writer-wins.
pub trait KvStore: Send + Sync {
    /// Get the raw value for a key. Returns `None` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check whether a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Typed JSON access on top of any [`KvStore`].
pub trait KvStoreExt: KvStore {
    /// Get and deserialize a value.
    ///
    /// ```rust,ignore
    /// let info: Option<CustomerInfo> = store.get_json("makerset_customer_info")?;
    /// ```
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.set(key, &bytes)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}
