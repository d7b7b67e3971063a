//! Mock Module
//!
//! Request fingerprinting and the key-value stores that hold mock records.

mod canonical;
mod fingerprint;
mod memory;
mod store;


// Re-export public types
pub use canonical::{canonicalize, canonicalize_value};
pub use fingerprint::{fingerprint, Fingerprint};
pub use memory::{MemoryEntry, MemoryStore};
pub use store::{MockStore, RedisStore, StoreError, StoreResult};
