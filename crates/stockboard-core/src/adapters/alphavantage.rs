use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::data_source::{Endpoint, FetchError, NotFoundReason, StockDataSource};
use crate::http_client::{HttpClient, HttpError, HttpRequest};
use crate::normalize::normalize_bundle;
use crate::payload::{
    parse_balance_sheet, parse_cash_flow, parse_daily_prices, parse_earnings,
    parse_income_statement, parse_insider_transactions, validate_response, ProviderPayloads,
};
use crate::{StockDataBundle, StockboardConfig, Symbol};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Alpha Vantage client pulling the seven endpoints behind one dashboard.
#[derive(Clone)]
pub struct AlphaVantageClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl AlphaVantageClient {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn from_config(http_client: Arc<dyn HttpClient>, config: &StockboardConfig) -> Self {
        Self::new(http_client)
            .with_base_url(config.base_url.clone())
            .with_timeout_ms(config.timeout_ms)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Run one fetch cycle for `ticker`.
    ///
    /// Preconditions are checked before any request goes out: credential,
    /// then ticker presence, then ticker syntax.
    pub async fn fetch(&self, ticker: &str, api_key: &str) -> Result<StockDataBundle, FetchError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(FetchError::missing_credential());
        }
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(FetchError::missing_ticker());
        }
        let symbol =
            Symbol::parse(ticker).map_err(|error| FetchError::invalid_ticker(error.to_string()))?;

        self.fetch_symbol(symbol, api_key).await
    }

    #[tracing::instrument(name = "alphavantage.fetch", skip(self, api_key), fields(symbol = %symbol))]
    async fn fetch_symbol(
        &self,
        symbol: Symbol,
        api_key: &str,
    ) -> Result<StockDataBundle, FetchError> {
        let (daily, income, cash_flow, balance_sheet, overview, insider, earnings) = tokio::join!(
            self.get(Endpoint::DailyPrices, &symbol, api_key),
            self.get(Endpoint::IncomeStatement, &symbol, api_key),
            self.get(Endpoint::CashFlow, &symbol, api_key),
            self.get(Endpoint::BalanceSheet, &symbol, api_key),
            self.get(Endpoint::Overview, &symbol, api_key),
            self.get(Endpoint::InsiderTransactions, &symbol, api_key),
            self.get(Endpoint::Earnings, &symbol, api_key),
        );

        // One failed leg fails the whole cycle.
        let (daily, income, cash_flow, balance_sheet, overview, insider, earnings) = (
            delivered(daily)?,
            delivered(income)?,
            delivered(cash_flow)?,
            delivered(balance_sheet)?,
            delivered(overview)?,
            delivered(insider)?,
            delivered(earnings)?,
        );

        let daily = validate_response(Endpoint::DailyPrices, &daily)?;
        let income = validate_response(Endpoint::IncomeStatement, &income)?;
        let cash_flow = validate_response(Endpoint::CashFlow, &cash_flow)?;
        let balance_sheet = validate_response(Endpoint::BalanceSheet, &balance_sheet)?;
        let overview = validate_response(Endpoint::Overview, &overview)?;
        let insider = validate_response(Endpoint::InsiderTransactions, &insider)?;
        let earnings = validate_response(Endpoint::Earnings, &earnings)?;

        if overview.is_empty() {
            return Err(FetchError::not_found(NotFoundReason::NoOverview, &symbol));
        }
        let Some(daily_prices) = parse_daily_prices(daily)?.time_series else {
            return Err(FetchError::not_found(NotFoundReason::NoPriceHistory, &symbol));
        };

        let payloads = ProviderPayloads {
            daily_prices,
            income: parse_income_statement(income)?,
            cash_flow: parse_cash_flow(cash_flow)?,
            balance_sheet: parse_balance_sheet(balance_sheet)?,
            overview,
            insider: parse_insider_transactions(insider)?,
            earnings: parse_earnings(earnings)?,
        };

        Ok(normalize_bundle(symbol, payloads))
    }

    async fn get(
        &self,
        endpoint: Endpoint,
        symbol: &Symbol,
        api_key: &str,
    ) -> Result<String, HttpError> {
        let request = HttpRequest::get(self.endpoint_url(endpoint, symbol, api_key))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.inspect_err(|error| {
            warn!(%endpoint, error = error.message(), "alphavantage transport error");
        })?;

        if !response.is_success() {
            warn!(%endpoint, status = response.status, "alphavantage returned non-success status");
            return Err(HttpError::new(format!(
                "alphavantage returned status {}",
                response.status
            )));
        }

        debug!(%endpoint, bytes = response.body.len(), "alphavantage response received");
        Ok(response.body)
    }

    fn endpoint_url(&self, endpoint: Endpoint, symbol: &Symbol, api_key: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{}function={}&symbol={}&apikey={}",
            self.base_url,
            separator,
            endpoint.function(),
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(api_key),
        );
        if endpoint == Endpoint::DailyPrices {
            url.push_str("&outputsize=full");
        }
        url
    }
}

fn delivered(response: Result<String, HttpError>) -> Result<String, FetchError> {
    response.map_err(|_| FetchError::transport())
}

impl StockDataSource for AlphaVantageClient {
    fn fetch_stock_data<'a>(
        &'a self,
        ticker: &'a str,
        api_key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<StockDataBundle, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch(ticker, api_key))
    }
}
