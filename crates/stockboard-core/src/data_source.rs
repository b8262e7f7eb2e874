//! Data source contract and fetch error taxonomy.
//!
//! A fetch cycle pulls seven provider endpoints for one ticker and folds them
//! into a [`StockDataBundle`]. Failures are classified by [`FetchErrorKind`];
//! every kind is terminal for the cycle, no partial bundle is returned.
//!
//! | Endpoint | Provider function | Feeds |
//! |----------|-------------------|-------|
//! | [`Endpoint::DailyPrices`] | `TIME_SERIES_DAILY` | price |
//! | [`Endpoint::IncomeStatement`] | `INCOME_STATEMENT` | revenue, EBITDA, net income, net margin |
//! | [`Endpoint::CashFlow`] | `CASH_FLOW` | free cash flow, dividends, buybacks |
//! | [`Endpoint::BalanceSheet`] | `BALANCE_SHEET` | assets, shares, cash & debt |
//! | [`Endpoint::Overview`] | `OVERVIEW` | company overview |
//! | [`Endpoint::InsiderTransactions`] | `INSIDER_TRANSACTIONS` | insider buys |
//! | [`Endpoint::Earnings`] | `EARNINGS` | EPS |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::StockDataBundle;

/// Provider endpoints queried during one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    DailyPrices,
    IncomeStatement,
    CashFlow,
    BalanceSheet,
    Overview,
    InsiderTransactions,
    Earnings,
}

impl Endpoint {
    pub const ALL: [Self; 7] = [
        Self::DailyPrices,
        Self::IncomeStatement,
        Self::CashFlow,
        Self::BalanceSheet,
        Self::Overview,
        Self::InsiderTransactions,
        Self::Earnings,
    ];

    /// Value of the provider's `function` query parameter.
    pub const fn function(self) -> &'static str {
        match self {
            Self::DailyPrices => "TIME_SERIES_DAILY",
            Self::IncomeStatement => "INCOME_STATEMENT",
            Self::CashFlow => "CASH_FLOW",
            Self::BalanceSheet => "BALANCE_SHEET",
            Self::Overview => "OVERVIEW",
            Self::InsiderTransactions => "INSIDER_TRANSACTIONS",
            Self::Earnings => "EARNINGS",
        }
    }

    /// Human-readable name used in error messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DailyPrices => "Time Series",
            Self::IncomeStatement => "Income Statement",
            Self::CashFlow => "Cash Flow",
            Self::BalanceSheet => "Balance Sheet",
            Self::Overview => "Overview",
            Self::InsiderTransactions => "Insider Transactions",
            Self::Earnings => "Earnings",
        }
    }

    pub fn from_function(function: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|endpoint| endpoint.function() == function)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Why a ticker produced no usable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// The overview endpoint returned an empty object.
    NoOverview,
    /// The price payload has no daily time-series container.
    NoPriceHistory,
    /// The fetch succeeded but yielded zero price points.
    NoPricePoints,
}

/// Fetch-cycle error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    MissingCredential,
    MissingTicker,
    InvalidTicker,
    Transport,
    Api,
    RateLimited,
    NotFound(NotFoundReason),
}

/// Structured fetch error surfaced to the presentation layer as one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn missing_credential() -> Self {
        Self {
            kind: FetchErrorKind::MissingCredential,
            message: String::from("an Alpha Vantage API key is required"),
        }
    }

    pub fn missing_ticker() -> Self {
        Self {
            kind: FetchErrorKind::MissingTicker,
            message: String::from("a ticker symbol is required"),
        }
    }

    pub fn invalid_ticker(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidTicker,
            message: message.into(),
        }
    }

    /// Aggregate transport failure; deliberately names no endpoint.
    pub fn transport() -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: String::from(
                "failed to fetch data from Alpha Vantage; check your network connection or API key",
            ),
        }
    }

    pub fn api(endpoint: Endpoint, detail: impl Display) -> Self {
        Self {
            kind: FetchErrorKind::Api,
            message: format!("API error for {endpoint}: {detail}"),
        }
    }

    pub fn invalid_response(endpoint: Endpoint) -> Self {
        Self {
            kind: FetchErrorKind::Api,
            message: format!("invalid response from {endpoint} endpoint"),
        }
    }

    pub fn rate_limited(endpoint: Endpoint, detail: impl Display) -> Self {
        Self {
            kind: FetchErrorKind::RateLimited,
            message: format!(
                "API info for {endpoint}: {detail}; this may be a rate limit issue"
            ),
        }
    }

    pub fn not_found(reason: NotFoundReason, symbol: impl Display) -> Self {
        let message = match reason {
            NotFoundReason::NoOverview => format!(
                "no overview data found for {symbol}; the ticker may be invalid or not supported by the OVERVIEW endpoint"
            ),
            NotFoundReason::NoPriceHistory => {
                format!("no price data found for {symbol}; the ticker may be invalid")
            }
            NotFoundReason::NoPricePoints => {
                format!("no data found for ticker \"{symbol}\"; it may be an invalid symbol")
            }
        };
        Self {
            kind: FetchErrorKind::NotFound(reason),
            message,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn not_found_reason(&self) -> Option<NotFoundReason> {
        match self.kind {
            FetchErrorKind::NotFound(reason) => Some(reason),
            _ => None,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::MissingCredential => "fetch.missing_credential",
            FetchErrorKind::MissingTicker => "fetch.missing_ticker",
            FetchErrorKind::InvalidTicker => "fetch.invalid_ticker",
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Api => "fetch.api",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::NotFound(_) => "fetch.not_found",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Source of complete ticker bundles.
///
/// [`crate::AlphaVantageClient`] is the production implementation; the fetch
/// session only depends on this trait.
pub trait StockDataSource: Send + Sync {
    /// Fetch and normalize everything known about `ticker`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when a precondition fails (missing credential or
    /// ticker), any endpoint fails at transport level, the provider signals an
    /// error or throttling, or the ticker is unknown.
    fn fetch_stock_data<'a>(
        &'a self,
        ticker: &'a str,
        api_key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<StockDataBundle, FetchError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_functions_round_trip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_function(endpoint.function()), Some(endpoint));
        }
        assert_eq!(Endpoint::from_function("GLOBAL_QUOTE"), None);
    }

    #[test]
    fn api_and_rate_limit_messages_name_the_endpoint() {
        let api = FetchError::api(Endpoint::IncomeStatement, "Invalid API call.");
        assert_eq!(api.kind(), FetchErrorKind::Api);
        assert!(api.message().contains("Income Statement"));

        let limited = FetchError::rate_limited(Endpoint::Overview, "Thank you for using Alpha Vantage!");
        assert_eq!(limited.kind(), FetchErrorKind::RateLimited);
        assert!(limited.message().contains("Overview"));
        assert!(limited.message().contains("rate limit"));
    }

    #[test]
    fn transport_message_names_no_endpoint() {
        let error = FetchError::transport();
        for endpoint in Endpoint::ALL {
            assert!(!error.message().contains(endpoint.display_name()));
        }
    }

    #[test]
    fn not_found_keeps_reason() {
        let error = FetchError::not_found(NotFoundReason::NoPriceHistory, "ZZZZ");
        assert_eq!(error.not_found_reason(), Some(NotFoundReason::NoPriceHistory));
        assert_eq!(error.code(), "fetch.not_found");
        assert!(error.message().contains("ZZZZ"));
        assert!(error.to_string().ends_with("(fetch.not_found)"));
    }
}
