//! Core conversion logic and user state

pub mod config;
pub mod converter;
pub mod currency;
pub mod error;
pub mod fallback;
pub mod favorites;
pub mod flags;
pub mod format;
pub mod history;
pub mod log;
pub mod resolver;
pub mod scheduler;
pub mod state;

// Re-export main types for cleaner imports
pub use converter::{Conversion, ConversionInput, ConversionStatus, Converter, RateSource};
pub use currency::{CurrencyCode, CurrencyRateProvider, PairKey};
pub use error::ConversionError;
pub use resolver::{ConversionRequest, ConversionResult, RateResolver};
