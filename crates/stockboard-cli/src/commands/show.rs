use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use stockboard_core::{
    filter_range_at, range_price_change_percent, today_utc, AlphaVantageClient, CashAndDebtPoint,
    CompanySummary, FetchSession, FinancialMetric, FinancialPoint, InsiderTransaction, Page,
    PricePoint, ReqwestHttpClient, ReturnOfCapitalPoint, StockDataBundle, StockDataSource,
    StockboardConfig, TimeRange, ValidationError, ViewState, INSIDER_PAGE_SIZE,
};
use time::Date;

use crate::cli::ShowArgs;
use crate::error::CliError;
use crate::metadata::EnvelopeError;

use super::{CommandData, CommandResult};

/// A chart series the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Price,
    Metric(FinancialMetric),
    CashAndDebt,
    ReturnOfCapital,
}

impl SeriesKind {
    /// Dashboard order.
    pub fn all() -> Vec<Self> {
        let mut kinds = vec![Self::Price];
        kinds.extend(FinancialMetric::ALL.into_iter().map(Self::Metric));
        kinds.push(Self::CashAndDebt);
        kinds.push(Self::ReturnOfCapital);
        kinds
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Metric(metric) => metric.as_str(),
            Self::CashAndDebt => "cash_and_debt",
            Self::ReturnOfCapital => "return_of_capital",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::Metric(metric) => metric.title(),
            Self::CashAndDebt => "Cash & Debt",
            Self::ReturnOfCapital => "Buybacks & Dividends",
        }
    }

    fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "price" => Ok(Self::Price),
            "cash_and_debt" => Ok(Self::CashAndDebt),
            "return_of_capital" => Ok(Self::ReturnOfCapital),
            _ => raw.parse::<FinancialMetric>().map(Self::Metric),
        }
    }
}

/// Expand `--series` values; `all` and `none` stand for every or no series.
pub fn parse_series(values: &[String]) -> Result<Vec<SeriesKind>, ValidationError> {
    let mut kinds = Vec::new();
    for value in values {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => return Ok(SeriesKind::all()),
            "none" => continue,
            _ => {
                let kind = SeriesKind::parse(value)?;
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
    }
    Ok(kinds)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesPoints {
    Price(Vec<PricePoint>),
    Financial(Vec<FinancialPoint>),
    CashAndDebt(Vec<CashAndDebtPoint>),
    ReturnOfCapital(Vec<ReturnOfCapitalPoint>),
}

impl SeriesPoints {
    pub fn len(&self) -> usize {
        match self {
            Self::Price(points) => points.len(),
            Self::Financial(points) => points.len(),
            Self::CashAndDebt(points) => points.len(),
            Self::ReturnOfCapital(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesView {
    pub key: &'static str,
    pub title: &'static str,
    pub points: SeriesPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsiderPageView {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub transactions: Vec<InsiderTransaction>,
}

/// Everything the dashboard renders for one ticker and range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub symbol: String,
    pub range: TimeRange,
    pub summary: CompanySummary,
    pub range_price_change_percent: f64,
    pub series: Vec<SeriesView>,
    pub insider: InsiderPageView,
}

impl DashboardView {
    /// Headline figures come from the full bundle, series from the filtered one.
    pub fn build(
        bundle: &StockDataBundle,
        range: TimeRange,
        page: usize,
        series: &[SeriesKind],
        today: Date,
    ) -> Self {
        let filtered = filter_range_at(bundle, range, today);
        let insider = Page::of(&filtered.insider_transactions, page, INSIDER_PAGE_SIZE);

        Self {
            symbol: bundle.symbol.to_string(),
            range,
            summary: CompanySummary::from_bundle(bundle),
            range_price_change_percent: range_price_change_percent(&filtered.price),
            series: series
                .iter()
                .map(|kind| SeriesView {
                    key: kind.key(),
                    title: kind.title(),
                    points: match kind {
                        SeriesKind::Price => SeriesPoints::Price(filtered.price.clone()),
                        SeriesKind::Metric(metric) => {
                            SeriesPoints::Financial(filtered.series(*metric).to_vec())
                        }
                        SeriesKind::CashAndDebt => {
                            SeriesPoints::CashAndDebt(filtered.cash_and_debt.clone())
                        }
                        SeriesKind::ReturnOfCapital => {
                            SeriesPoints::ReturnOfCapital(filtered.return_of_capital.clone())
                        }
                    },
                })
                .collect(),
            insider: InsiderPageView {
                page: insider.page,
                total_pages: insider.total_pages,
                total_items: insider.total_items,
                transactions: insider.items.to_vec(),
            },
        }
    }
}

pub async fn run(
    args: &ShowArgs,
    config: &StockboardConfig,
    api_key: &str,
) -> Result<CommandResult, CliError> {
    let client = AlphaVantageClient::from_config(Arc::new(ReqwestHttpClient::new()), config);
    fetch_dashboard(args, &client, api_key, today_utc()).await
}

/// Run one fetch cycle through a [`FetchSession`] and shape the result.
pub async fn fetch_dashboard(
    args: &ShowArgs,
    source: &dyn StockDataSource,
    api_key: &str,
    today: Date,
) -> Result<CommandResult, CliError> {
    let range: TimeRange = args.range.parse()?;
    let series = parse_series(&args.series)?;

    let session = FetchSession::new();
    let ticket = session.begin(&args.ticker);
    let started = Instant::now();
    session.fetch(source, &ticket, api_key).await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let result = match session.state() {
        ViewState::Ready(bundle) => CommandResult::ok(CommandData::Dashboard(Box::new(
            DashboardView::build(&bundle, range, args.page, &series, today),
        ))),
        ViewState::Failed { error, .. } => CommandResult::failed(EnvelopeError::from(&error)),
        ViewState::Idle | ViewState::Loading { .. } => CommandResult::ok(CommandData::None),
    };
    Ok(result.with_latency(latency_ms))
}
