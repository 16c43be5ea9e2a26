//! The persisted-record boundary for QBFT instances (§6): the `Store`
//! trait, its key layout, the versioned `StoredInstance` encoding, and an
//! in-memory reference implementation.

mod error;
mod key;
mod memory;
mod record;
mod store;

pub use error::StoreError;
pub use key::instance_key;
pub use memory::MemoryStore;
pub use record::{decode, encode, StoredInstance, StoredState, CURRENT_VERSION};
pub use store::Store;
