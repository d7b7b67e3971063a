//! In-Memory Store Module
//!
//! Process-local `MockStore` with per-entry expiry. Records are lost on restart.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::mock::store::{MockStore, StoreResult};
use crate::mock::Fingerprint;

// == Memory Entry ==
/// A stored mock record with its absolute expiry.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    /// Serialized JSON response
    pub value: String,
    /// Instant at which the record stops being served
    pub expires_at: Instant,
}

impl MemoryEntry {
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// == Memory Store ==
/// HashMap-backed store guarded by an async RwLock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    /// Number of entries held, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl MockStore for MemoryStore {
    async fn get(&self, key: &Fingerprint) -> StoreResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key.as_str()) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it unless a writer refreshed it in between
        let mut entries = self.entries.write().await;
        if entries.get(key.as_str()).is_some_and(MemoryEntry::is_expired) {
            entries.remove(key.as_str());
        }
        Ok(None)
    }

    async fn set(&self, key: &Fingerprint, value: String, ttl: Duration) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.as_str().to_string(), MemoryEntry::new(value, ttl));
        Ok(())
    }
}
