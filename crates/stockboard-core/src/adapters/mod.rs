//! Provider adapters.

pub mod alphavantage;

pub use alphavantage::{AlphaVantageClient, DEFAULT_BASE_URL};
