//! The controller that owns user state and drives conversions.
//!
//! [`Converter::convert`] is the one-shot path. The interactive session uses
//! [`Converter::prepare`] and [`Converter::complete`] separately so that rate
//! resolution can run on another task while this struct stays the single
//! writer of history.

use crate::core::currency::{CurrencyCode, PairKey};
use crate::core::error::ConversionError;
use crate::core::history::HistoryEntry;
use crate::core::resolver::{ConversionRequest, ConversionResult, RateResolver};
use crate::core::state::AppState;
use crate::store::KeyValueStore;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Amount and currencies as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionInput {
    pub amount: String,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ConversionInput {
    pub fn new(amount: impl Into<String>, from: CurrencyCode, to: CurrencyCode) -> Self {
        Self {
            amount: amount.into(),
            from,
            to,
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

/// Parses a user-entered amount. Empty, non-numeric and non-positive input
/// becomes `1`.
pub fn coerce_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
        _ => {
            debug!(input = raw, "Invalid amount, using 1");
            1.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Live,
    Fallback,
    SameCurrency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub request: ConversionRequest,
    pub result: ConversionResult,
    pub source: RateSource,
}

/// Outcome of [`Converter::prepare`].
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// Nothing to resolve: source and target currency are the same.
    Ready(Conversion),
    /// Needs the rate resolver; hand the result to [`Converter::complete`].
    Pending(ConversionRequest),
}

pub struct Converter {
    resolver: RateResolver,
    store: Arc<dyn KeyValueStore>,
    state: AppState,
    status: ConversionStatus,
}

impl Converter {
    pub async fn new(resolver: RateResolver, store: Arc<dyn KeyValueStore>) -> Self {
        let state = AppState::load(store.as_ref()).await;
        Self {
            resolver,
            store,
            state,
            status: ConversionStatus::Idle,
        }
    }

    pub fn resolver(&self) -> &RateResolver {
        &self.resolver
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn status(&self) -> ConversionStatus {
        self.status
    }

    /// Validates `input` and either answers it directly or returns the request
    /// to resolve. Leaves the status at `Loading` when resolution is needed.
    pub fn prepare(&mut self, input: &ConversionInput) -> Prepared {
        self.status = ConversionStatus::Idle;
        let request = ConversionRequest {
            amount: coerce_amount(&input.amount),
            from: input.from.clone(),
            to: input.to.clone(),
        };
        debug!(?request, "Conversion request");

        if request.from == request.to {
            debug!("Same currency, 1:1 conversion");
            self.status = ConversionStatus::Success;
            let result = ConversionResult {
                converted_amount: request.amount,
                is_live: false,
                raw_rate: 1.0,
            };
            return Prepared::Ready(Conversion {
                request,
                result,
                source: RateSource::SameCurrency,
            });
        }

        self.status = ConversionStatus::Loading;
        Prepared::Pending(request)
    }

    /// Applies a resolver outcome: records history on success, sets status.
    pub async fn complete(
        &mut self,
        request: ConversionRequest,
        outcome: Result<ConversionResult, ConversionError>,
    ) -> Result<Conversion, ConversionError> {
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                self.status = ConversionStatus::Error;
                warn!(error = %e, "Conversion failed");
                return Err(e);
            }
        };

        self.state.history.record(HistoryEntry::new(
            request.amount,
            request.from.clone(),
            result.converted_amount,
            request.to.clone(),
            Utc::now(),
        ));
        if let Err(e) = self.state.save_history(self.store.as_ref()).await {
            warn!(error = %e, "Failed to save conversion history");
        }
        info!(
            amount = request.amount,
            from = %request.from,
            to = %request.to,
            converted = result.converted_amount,
            live = result.is_live,
            "Conversion complete"
        );

        self.status = ConversionStatus::Success;
        let source = if result.is_live {
            RateSource::Live
        } else {
            RateSource::Fallback
        };
        Ok(Conversion {
            request,
            result,
            source,
        })
    }

    pub async fn convert(
        &mut self,
        input: &ConversionInput,
    ) -> Result<Conversion, ConversionError> {
        match self.prepare(input) {
            Prepared::Ready(conversion) => Ok(conversion),
            Prepared::Pending(request) => {
                let outcome = self.resolver.resolve(&request).await;
                self.complete(request, outcome).await
            }
        }
    }

    /// Adds a favorite pair and persists the list. Returns `false` if already present.
    pub async fn add_favorite(&mut self, pair: PairKey) -> Result<bool> {
        if !self.state.favorites.add(pair) {
            return Ok(false);
        }
        self.state.save_favorites(self.store.as_ref()).await?;
        Ok(true)
    }

    /// Removes a favorite pair and persists the list. Returns `false` if absent.
    pub async fn remove_favorite(&mut self, pair: &PairKey) -> Result<bool> {
        if !self.state.favorites.remove(pair) {
            return Ok(false);
        }
        self.state.save_favorites(self.store.as_ref()).await?;
        Ok(true)
    }
}
