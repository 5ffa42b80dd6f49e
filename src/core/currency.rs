//! Currency codes, pair keys and the live rate abstraction

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A three letter ISO 4217 style currency code, always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// For compile-time known, already uppercase codes.
    pub(crate) fn from_static(code: &'static str) -> Self {
        debug_assert!(code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()));
        CurrencyCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CurrencyCode(code.to_ascii_uppercase()))
        } else {
            Err(anyhow!("Invalid currency code: {}", s))
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directional currency pair, rendered as `FROM-TO`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PairKey {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl PairKey {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }

    pub fn reverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

impl FromStr for PairKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid currency pair: {} (expected FROM-TO)", s))?;
        Ok(PairKey::new(from.parse()?, to.parse()?))
    }
}

impl TryFrom<String> for PairKey {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PairKey> for String {
    fn from(pair: PairKey) -> Self {
        pair.to_string()
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Source of live exchange rates.
#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_normalizes_case() {
        let code: CurrencyCode = " usd ".parse().unwrap();
        assert_eq!(code.as_str(), "USD");
    }

    #[test]
    fn test_currency_code_rejects_invalid() {
        assert!("US".parse::<CurrencyCode>().is_err());
        assert!("USDT".parse::<CurrencyCode>().is_err());
        assert!("U$D".parse::<CurrencyCode>().is_err());
        assert!("".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_pair_key_parse_and_display() {
        let pair: PairKey = "eur-usd".parse().unwrap();
        assert_eq!(pair.to_string(), "EUR-USD");
        assert_eq!(pair.reverse().to_string(), "USD-EUR");
        assert!("EURUSD".parse::<PairKey>().is_err());
    }

    #[test]
    fn test_pair_key_serde_as_string() {
        let pair: PairKey = "USD-INR".parse().unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"USD-INR\"");
        let back: PairKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
        assert!(serde_json::from_str::<PairKey>("\"nonsense\"").is_err());
    }
}
