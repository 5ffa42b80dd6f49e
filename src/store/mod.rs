pub mod disk;
pub mod memory;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Byte-level key-value storage holding whole values under fixed keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

/// Reads the JSON value stored under `key`.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    let Some(bytes) = store.get(key).await? else {
        debug!("Store MISS for key: {}", key);
        return Ok(None);
    };
    debug!("Store HIT for key: {}", key);
    let value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse stored value for key: {key}"))?;
    Ok(Some(value))
}

/// Replaces the value under `key` with the JSON encoding of `value`.
pub async fn put_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let bytes = serde_json::to_vec(value)
        .with_context(|| format!("Failed to serialize value for key: {key}"))?;
    store.put(key, bytes).await?;
    debug!("Store PUT for key: {}", key);
    Ok(())
}
