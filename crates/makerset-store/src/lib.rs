//! Durable key-value storage for MakerSet client state.
//!
//! Holds small pieces of state that must survive restarts, such as the
//! saved checkout form. Values are stored as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use makerset_store::{FileStore, KvStoreExt};
//!
//! let store = FileStore::open(".makerset")?;
//! store.set_json("makerset_customer_info", &info)?;
//! let info: Option<CustomerInfo> = store.get_json("makerset_customer_info")?;
//! store.delete("makerset_customer_info")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::{KvStore, KvStoreExt};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KvStore, KvStoreExt, MemoryStore, StoreError};
}
