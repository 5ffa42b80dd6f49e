use super::KeyValueStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "state";

/// Persistent store backed by a fjall keyspace.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(data_path: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_path)
            .with_context(|| format!("Failed to create directory: {}", data_path.display()))?;

        let keyspace = Config::new(data_path.join("store"))
            .open()
            .with_context(|| format!("Failed to open store at {}", data_path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open store partition")?;
        debug!("Opened store at {}", data_path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl KeyValueStore for DiskStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .partition
            .get(key.as_bytes())
            .with_context(|| format!("Failed to read key: {key}"))?;
        Ok(value.map(|v| v.to_vec()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.partition
            .insert(key.as_bytes().to_vec(), value)
            .with_context(|| format!("Failed to write key: {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist store")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_disk_store_get_put() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();

        assert!(store.get("key1").await.unwrap().is_none());

        store.put("key1", b"[1,2,3]".to_vec()).await.unwrap();
        assert_eq!(store.get("key1").await.unwrap(), Some(b"[1,2,3]".to_vec()));
        assert!(store.get("key2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_disk_store_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = DiskStore::open(dir.path()).unwrap();
            store.put("key1", b"123".to_vec()).await.unwrap();
        }

        let store = DiskStore::open(dir.path()).unwrap();
        assert_eq!(store.get("key1").await.unwrap(), Some(b"123".to_vec()));
    }
}
