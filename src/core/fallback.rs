//! Embedded demo rates used when the live source is unavailable.

use crate::core::currency::PairKey;
use tracing::debug;

const DEMO_RATES: &[(&str, f64)] = &[
    ("USD-INR", 83.12),
    ("INR-USD", 0.012),
    ("USD-EUR", 0.85),
    ("EUR-USD", 1.18),
    ("USD-GBP", 0.73),
    ("GBP-USD", 1.37),
    ("EUR-INR", 97.79),
    ("INR-EUR", 0.010),
    ("GBP-INR", 113.89),
    ("INR-GBP", 0.009),
    ("USD-JPY", 110.25),
    ("JPY-USD", 0.009),
    ("USD-AUD", 1.35),
    ("AUD-USD", 0.74),
    ("USD-CAD", 1.25),
    ("CAD-USD", 0.80),
];

/// Read-only table of directional rates keyed by `FROM-TO`.
#[derive(Debug, Clone, Copy)]
pub struct RateTable {
    entries: &'static [(&'static str, f64)],
}

impl RateTable {
    /// The built-in demo table: 16 pairs among USD, INR, EUR, GBP, JPY, AUD and CAD.
    pub const fn demo() -> Self {
        Self {
            entries: DEMO_RATES,
        }
    }

    pub const fn from_entries(entries: &'static [(&'static str, f64)]) -> Self {
        Self { entries }
    }

    fn direct(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, rate)| *rate)
    }

    /// Looks up `pair`, deriving it as `1 / rate` from the reverse pair when
    /// only that direction is present.
    pub fn lookup(&self, pair: &PairKey) -> Option<f64> {
        let key = pair.to_string();
        if let Some(rate) = self.direct(&key) {
            debug!(%key, rate, "Fallback rate found");
            return Some(rate);
        }

        let reverse_key = pair.reverse().to_string();
        let rate = self.direct(&reverse_key).map(|reverse| 1.0 / reverse);
        match rate {
            Some(rate) => debug!(%key, %reverse_key, rate, "Using reverse fallback rate"),
            None => debug!(%key, %reverse_key, "No fallback rate"),
        }
        rate
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> {
        self.entries.iter().copied()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::demo()
    }
}
