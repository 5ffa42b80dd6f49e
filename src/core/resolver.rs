//! Resolves a conversion from the live source, falling back to the demo table.

use crate::core::currency::{CurrencyCode, CurrencyRateProvider, PairKey};
use crate::core::error::ConversionError;
use crate::core::fallback::RateTable;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A validated conversion request. `amount` is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ConversionRequest {
    pub fn pair(&self) -> PairKey {
        PairKey::new(self.from.clone(), self.to.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub converted_amount: f64,
    /// `true` when the rate came from the live source, `false` for the demo table.
    pub is_live: bool,
    pub raw_rate: f64,
}

#[derive(Clone)]
pub struct RateResolver {
    live: Arc<dyn CurrencyRateProvider>,
    fallback: RateTable,
}

impl RateResolver {
    pub fn new(live: Arc<dyn CurrencyRateProvider>) -> Self {
        Self::with_table(live, RateTable::demo())
    }

    pub fn with_table(live: Arc<dyn CurrencyRateProvider>, fallback: RateTable) -> Self {
        Self { live, fallback }
    }

    /// Converts `request.amount`, trying the live source once and the fallback
    /// table second. Callers handle the same-currency case before calling this.
    #[instrument(
        name = "ResolveRate",
        skip(self, request),
        fields(from = %request.from, to = %request.to, amount = request.amount)
    )]
    pub async fn resolve(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        match self
            .live
            .get_rate(request.from.as_str(), request.to.as_str())
            .await
        {
            Ok(rate) => {
                debug!(rate, "Live rate resolved");
                return Ok(ConversionResult {
                    converted_amount: request.amount * rate,
                    is_live: true,
                    raw_rate: rate,
                });
            }
            Err(e) => warn!(error = %e, "Live rate unavailable, using fallback rates"),
        }

        let pair = request.pair();
        let rate = self
            .fallback
            .lookup(&pair)
            .ok_or(ConversionError::RateUnavailable(pair))?;

        Ok(ConversionResult {
            converted_amount: request.amount * rate,
            is_live: false,
            raw_rate: rate,
        })
    }
}
