use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

use crate::core::currency::CurrencyCode;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
}

impl Default for ExchangeRateProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.exchangerate-api.com/v4/latest".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct FlagsProviderConfig {
    pub base_url: String,
}

impl Default for FlagsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://flagsapi.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub exchange_rate: ExchangeRateProviderConfig,
    #[serde(default)]
    pub flags: FlagsProviderConfig,
}

/// Selection used when a conversion doesn't name an amount or currency.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DefaultsConfig {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            from: CurrencyCode::from_static("USD"),
            to: CurrencyCode::from_static("INR"),
            amount: 100.0,
        }
    }
}

fn default_quick_amounts() -> Vec<f64> {
    vec![1.0, 10.0, 100.0, 500.0, 1000.0]
}

fn default_debounce_ms() -> u64 {
    500
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default = "default_quick_amounts")]
    pub quick_amounts: Vec<f64>,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig::default(),
            defaults: DefaultsConfig::default(),
            quick_amounts: default_quick_amounts(),
            debounce_ms: default_debounce_ms(),
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("in", "codito", "fxc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        // An empty document parses as null; treat it as all defaults.
        if config_str.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Quick amount by 1-based position.
    pub fn quick_amount(&self, position: usize) -> Result<f64> {
        position
            .checked_sub(1)
            .and_then(|i| self.quick_amounts.get(i))
            .copied()
            .with_context(|| {
                format!(
                    "No quick amount #{position}, choose 1 to {}",
                    self.quick_amounts.len()
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  exchange_rate:
    base_url: "http://example.com/latest"
  flags:
    base_url: "http://example.com/flags"
defaults:
  from: "eur"
  to: "GBP"
  amount: 25
quick_amounts: [5, 50]
debounce_ms: 250
data_path: "/tmp/fxc"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.exchange_rate.base_url,
            "http://example.com/latest"
        );
        assert_eq!(config.providers.flags.base_url, "http://example.com/flags");
        assert_eq!(config.defaults.from.as_str(), "EUR");
        assert_eq!(config.defaults.to.as_str(), "GBP");
        assert_eq!(config.defaults.amount, 25.0);
        assert_eq!(config.quick_amounts, vec![5.0, 50.0]);
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.default_data_path().unwrap(), PathBuf::from("/tmp/fxc"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("debounce_ms: 100").unwrap();
        assert_eq!(
            config.providers.exchange_rate.base_url,
            "https://api.exchangerate-api.com/v4/latest"
        );
        assert_eq!(config.providers.flags.base_url, "https://flagsapi.com");
        assert_eq!(config.defaults.from.as_str(), "USD");
        assert_eq!(config.defaults.to.as_str(), "INR");
        assert_eq!(config.quick_amounts, vec![1.0, 10.0, 100.0, 500.0, 1000.0]);
        assert_eq!(config.debounce_ms, 100);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_invalid_currency_is_rejected() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("defaults: {from: DOLLARS}");
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_defaults() {
        let config: AppConfig = serde_yaml::from_str("defaults: {to: EUR}").unwrap();
        assert_eq!(config.defaults.from.as_str(), "USD");
        assert_eq!(config.defaults.to.as_str(), "EUR");
        assert_eq!(config.defaults.amount, 100.0);
    }

    #[test]
    fn test_empty_file_loads_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn test_quick_amount_positions() {
        let config = AppConfig::default();
        assert_eq!(config.quick_amount(1).unwrap(), 1.0);
        assert_eq!(config.quick_amount(3).unwrap(), 100.0);
        assert!(config.quick_amount(0).is_err());
        assert!(config.quick_amount(6).is_err());
    }
}
