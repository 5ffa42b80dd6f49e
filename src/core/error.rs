use crate::core::currency::PairKey;
use thiserror::Error;

/// Failures along the conversion path.
///
/// `Transport` and `DataShape` come from the live provider and are absorbed by
/// the resolver's fallback. Only `RateUnavailable` reaches the caller.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Transport error for {base}: {message}")]
    Transport { base: String, message: String },
    #[error("Unexpected response for {base}: {message}")]
    DataShape { base: String, message: String },
    #[error("Exchange rate not available for currency pair {0}")]
    RateUnavailable(PairKey),
}
