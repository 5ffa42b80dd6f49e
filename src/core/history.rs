use crate::core::currency::CurrencyCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of conversions kept in history.
pub const HISTORY_CAPACITY: usize = 10;

/// A completed conversion. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub from_amount: f64,
    pub from_currency: CurrencyCode,
    pub to_amount: f64,
    pub to_currency: CurrencyCode,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        from_amount: f64,
        from_currency: CurrencyCode,
        to_amount: f64,
        to_currency: CurrencyCode,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: timestamp.timestamp_millis(),
            from_amount,
            from_currency,
            to_amount,
            to_currency,
            timestamp,
        }
    }
}

/// Newest-first list of recent conversions, capped at [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `entry`, dropping the oldest entries beyond capacity.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<HistoryEntry>> for History {
    /// Builds a history from stored entries, keeping the first
    /// [`HISTORY_CAPACITY`] in the given (newest-first) order.
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut entries: VecDeque<_> = entries.into();
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(n: i64) -> HistoryEntry {
        let ts = DateTime::from_timestamp(1_700_000_000 + n, 0).unwrap();
        HistoryEntry::new(
            n as f64,
            "USD".parse().unwrap(),
            n as f64 * 83.12,
            "INR".parse().unwrap(),
            ts,
        )
    }

    #[test]
    fn test_record_is_newest_first() {
        let mut history = History::new();
        history.record(entry(1));
        history.record(entry(2));

        let amounts: Vec<f64> = history.entries().map(|e| e.from_amount).collect();
        assert_eq!(amounts, vec![2.0, 1.0]);
        assert_eq!(history.latest().unwrap().from_amount, 2.0);
    }

    #[test]
    fn test_eleventh_entry_evicts_oldest() {
        let mut history = History::new();
        for n in 1..=HISTORY_CAPACITY as i64 {
            history.record(entry(n));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        history.record(entry(11));
        assert_eq!(history.len(), HISTORY_CAPACITY);

        let amounts: Vec<f64> = history.entries().map(|e| e.from_amount).collect();
        assert_eq!(amounts.first(), Some(&11.0));
        assert_eq!(amounts.last(), Some(&2.0));
        assert!(!amounts.contains(&1.0));
    }

    #[test]
    fn test_stored_history_is_capped() {
        let stored: Vec<HistoryEntry> = (0..15).rev().map(entry).collect();
        let history = History::from(stored);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest().unwrap().from_amount, 14.0);
    }

    #[test]
    fn test_serialized_shape() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap() + Duration::milliseconds(250);
        let mut history = History::new();
        history.record(HistoryEntry::new(
            100.0,
            "USD".parse().unwrap(),
            8350.0,
            "INR".parse().unwrap(),
            ts,
        ));

        let json: serde_json::Value = serde_json::to_value(&history).unwrap();
        let item = &json[0];
        assert_eq!(item["id"], 1_700_000_000_250i64);
        assert_eq!(item["fromAmount"], 100.0);
        assert_eq!(item["fromCurrency"], "USD");
        assert_eq!(item["toAmount"], 8350.0);
        assert_eq!(item["toCurrency"], "INR");
        let timestamp = item["timestamp"].as_str().unwrap();
        assert!(timestamp.starts_with("2023-11-14T22:13:20"));
    }
}
