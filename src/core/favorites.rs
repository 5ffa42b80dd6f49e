use crate::core::currency::PairKey;
use serde::{Deserialize, Serialize};

const DEFAULT_FAVORITES: [&str; 2] = ["USD-INR", "EUR-USD"];

/// Ordered list of favorite currency pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    pairs: Vec<PairKey>,
}

impl Default for Favorites {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_FAVORITES
                .iter()
                .filter_map(|p| p.parse().ok())
                .collect(),
        }
    }
}

impl Favorites {
    /// Appends `pair`; returns `false` if it was already present.
    pub fn add(&mut self, pair: PairKey) -> bool {
        if self.contains(&pair) {
            return false;
        }
        self.pairs.push(pair);
        true
    }

    /// Removes `pair`; returns `false` if it was not present.
    pub fn remove(&mut self, pair: &PairKey) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|p| p != pair);
        self.pairs.len() != before
    }

    pub fn contains(&self, pair: &PairKey) -> bool {
        self.pairs.contains(pair)
    }

    pub fn pairs(&self) -> &[PairKey] {
        &self.pairs
    }
}
