use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;
use crate::core::error::ConversionError;

/// Live rates from an ExchangeRate-API style endpoint: `GET {base_url}/{FROM}`.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent("fxc/1.0").build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: Option<String>,
    date: Option<String>,
    // Only the target entry is validated; other entries may be anything.
    rates: HashMap<String, serde_json::Value>,
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let url = format!("{}/{}", self.base_url, from);
        debug!("Requesting exchange rates from {}", url);

        let transport = |message: String| ConversionError::Transport {
            base: from.to_string(),
            message,
        };
        let data_shape = |message: String| ConversionError::DataShape {
            base: from.to_string(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(format!("Request error: {e}")))?;

        if !response.status().is_success() {
            return Err(transport(format!("HTTP error: {}", response.status())).into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport(format!("Failed to read response body: {e}")))?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| data_shape(format!("Failed to parse JSON response: {e}")))?;
        debug!(
            base = ?data.base,
            date = ?data.date,
            rates = data.rates.len(),
            "Received exchange rates"
        );

        match data.rates.get(to).and_then(serde_json::Value::as_f64) {
            Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
            _ => Err(data_shape(format!("No rate for {to}")).into()),
        }
    }
}
