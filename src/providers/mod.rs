pub mod exchange_rate_api;
pub mod flags_api;

pub use exchange_rate_api::ExchangeRateApiProvider;
pub use flags_api::{FlagImage, FlagProvider};
