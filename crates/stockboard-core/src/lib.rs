//! # Stockboard Core
//!
//! Fetch, normalization, and range filtering of Alpha Vantage ticker data.
//!
//! ## Overview
//!
//! One fetch cycle issues seven provider requests in parallel, validates every
//! response for provider-level error signalling, and folds the payloads into a
//! chart-ready [`StockDataBundle`]. [`filter_range`] then slices the bundle to
//! the selected [`TimeRange`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage client |
//! | [`config`] | Home directory, base URL, and timeout resolution |
//! | [`credentials`] | Local API key storage |
//! | [`data_source`] | Data source trait and fetch error taxonomy |
//! | [`domain`] | Series points, overview, bundle, symbols, time ranges |
//! | [`error`] | Validation and credential errors |
//! | [`format`] | Display strings for figures |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Payload to series transforms |
//! | [`pagination`] | Insider table pages |
//! | [`payload`] | Raw payload shapes and response validation |
//! | [`range_filter`] | Time-range slicing |
//! | [`session`] | Last-request-wins view state |
//! | [`summary`] | Headline metrics |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockboard_core::{filter_range, AlphaVantageClient, ReqwestHttpClient, TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AlphaVantageClient::new(Arc::new(ReqwestHttpClient::new()));
//!     let bundle = client.fetch("IBM", "demo").await?;
//!     let view = filter_range(&bundle, TimeRange::ThreeYears);
//!     println!("{} daily closes in range", view.price.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use stockboard_core::{FetchError, FetchErrorKind};
//!
//! fn describe(error: &FetchError) -> &'static str {
//!     match error.kind() {
//!         FetchErrorKind::MissingCredential => "enter an API key",
//!         FetchErrorKind::RateLimited => "wait before searching again",
//!         FetchErrorKind::NotFound(_) => "check the ticker",
//!         _ => "try again",
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! The API key travels only in request URLs; it is never logged and is
//! stripped from transport error messages.

pub mod adapters;
pub mod config;
pub mod credentials;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod format;
pub mod http_client;
pub mod normalize;
pub mod pagination;
pub mod payload;
pub mod range_filter;
pub mod session;
pub mod summary;

// Adapter implementations
pub use adapters::{AlphaVantageClient, DEFAULT_BASE_URL};

// Configuration
pub use config::{StockboardConfig, API_KEY_ENV, BASE_URL_ENV, HOME_ENV};

// Credential storage
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, API_KEY_NAME};

// Data source trait and errors
pub use data_source::{
    Endpoint, FetchError, FetchErrorKind, NotFoundReason, StockDataSource,
};

// Domain models
pub use domain::{
    iso_date, parse_iso_date, parse_provider_decimal, today_utc, years_before,
    BalanceSheetReport, CashAndDebtPoint, CompanyOverview, FinancialMetric, FinancialPoint,
    InsiderTransaction, PricePoint, QuarterLabel, ReturnOfCapitalPoint, StockDataBundle, Symbol,
    TimeRange,
};

// Error types
pub use error::{CredentialError, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Normalization entry point
pub use normalize::normalize_bundle;

// Presentation helpers
pub use pagination::{Page, INSIDER_PAGE_SIZE};
pub use summary::{range_price_change_percent, CompanySummary};

// Range filter
pub use range_filter::{filter_range, filter_range_at};

// Fetch session
pub use session::{FetchSession, FetchTicket, ViewState};
