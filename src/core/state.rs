//! Persisted user state: conversion history and favorite pairs.

use crate::core::favorites::Favorites;
use crate::core::history::{History, HistoryEntry};
use crate::store::{self, KeyValueStore};
use anyhow::Result;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const HISTORY_KEY: &str = "conversionHistory";
pub const FAVORITES_KEY: &str = "favoritePairs";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub history: History,
    pub favorites: Favorites,
}

async fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match store::get_json(store, key).await {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(error = %e, key, "Ignoring unreadable stored value");
            T::default()
        }
    }
}

impl AppState {
    /// Loads state from `store`; missing or unreadable values load as defaults.
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        let entries: Vec<HistoryEntry> = load_or_default(store, HISTORY_KEY).await;
        let favorites: Favorites = load_or_default(store, FAVORITES_KEY).await;
        let state = Self {
            history: History::from(entries),
            favorites,
        };
        debug!(
            history = state.history.len(),
            favorites = state.favorites.pairs().len(),
            "Loaded state"
        );
        state
    }

    pub async fn save_history(&self, store: &dyn KeyValueStore) -> Result<()> {
        store::put_json(store, HISTORY_KEY, &self.history).await
    }

    pub async fn save_favorites(&self, store: &dyn KeyValueStore) -> Result<()> {
        store::put_json(store, FAVORITES_KEY, &self.favorites).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Utc;

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let store = MemoryStore::new();
        let state = AppState::load(&store).await;

        assert!(state.history.is_empty());
        assert_eq!(state.favorites, Favorites::default());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let store = MemoryStore::new();
        let mut state = AppState::load(&store).await;

        state.history.record(HistoryEntry::new(
            100.0,
            "USD".parse().unwrap(),
            8350.0,
            "INR".parse().unwrap(),
            Utc::now(),
        ));
        state.favorites.add("GBP-INR".parse().unwrap());
        state.save_history(&store).await.unwrap();
        state.save_favorites(&store).await.unwrap();

        let reloaded = AppState::load(&store).await;
        assert_eq!(reloaded, state);
    }

    #[tokio::test]
    async fn test_corrupt_values_fall_back_to_defaults() {
        let store = MemoryStore::new();
        store.put(HISTORY_KEY, b"oops".to_vec()).await.unwrap();
        store
            .put(FAVORITES_KEY, br#"["not a pair"]"#.to_vec())
            .await
            .unwrap();

        let state = AppState::load(&store).await;
        assert!(state.history.is_empty());
        assert_eq!(state.favorites, Favorites::default());
    }
}
