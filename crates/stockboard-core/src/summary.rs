//! Headline metrics shown above the charts.

use serde::Serialize;

use crate::{PricePoint, StockDataBundle};

/// Company header, valuation, margins, and balance figures for one bundle.
///
/// Ratios (`profit_margin`, `dividend_yield`, `payout_ratio`, ...) are plain
/// fractions; `price_change_percent` is already scaled to percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySummary {
    pub name: Option<String>,
    pub symbol: String,
    pub exchange: Option<String>,
    pub latest_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,

    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub ev_to_ebitda: Option<f64>,
    pub price_to_book: Option<f64>,

    pub profit_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub quarterly_revenue_growth: Option<f64>,

    pub cash: Option<f64>,
    pub debt: Option<f64>,
    pub net_cash: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub dividend_date: Option<String>,
}

impl CompanySummary {
    pub fn from_bundle(bundle: &StockDataBundle) -> Self {
        let overview = &bundle.overview;
        let (latest_price, price_change, price_change_percent) = daily_change(&bundle.price);
        let sheet = bundle.latest_balance_sheet.as_ref();

        let payout_ratio = match (overview.metric("DividendPerShare"), overview.metric("EPS")) {
            (Some(dividend), Some(eps)) => Some(dividend / eps).filter(|ratio| ratio.is_finite()),
            _ => None,
        };

        Self {
            name: overview.name().map(str::to_owned),
            symbol: overview
                .symbol()
                .map_or_else(|| bundle.symbol.to_string(), str::to_owned),
            exchange: overview.exchange().map(str::to_owned),
            latest_price,
            price_change,
            price_change_percent,
            market_cap: overview.metric("MarketCapitalization"),
            pe_ratio: overview.metric("PERatio"),
            price_to_sales: overview.metric("PriceToSalesRatioTTM"),
            ev_to_ebitda: overview.metric("EVToEBITDA"),
            price_to_book: overview.metric("PriceToBookRatio"),
            profit_margin: overview.metric("ProfitMargin"),
            operating_margin: overview.metric("OperatingMarginTTM"),
            quarterly_revenue_growth: overview.metric("QuarterlyRevenueGrowthYOY"),
            cash: sheet.and_then(|sheet| sheet.cash()),
            debt: sheet.map(|sheet| sheet.debt()),
            net_cash: sheet.and_then(|sheet| sheet.net_cash()),
            dividend_yield: overview.metric("DividendYield"),
            payout_ratio,
            dividend_date: overview.get("DividendDate").map(str::to_owned),
        }
    }
}

/// Latest close, absolute change, and percent change versus the previous close.
fn daily_change(price: &[PricePoint]) -> (f64, f64, f64) {
    let latest = price.last().map_or(0.0, |point| point.price);
    let previous = price
        .len()
        .checked_sub(2)
        .map_or(0.0, |index| price[index].price);
    let change = latest - previous;
    let percent = if previous == 0.0 {
        0.0
    } else {
        change / previous * 100.0
    };
    (latest, change, percent)
}

/// Percent change from the first to the last point of a (filtered) series.
pub fn range_price_change_percent(price: &[PricePoint]) -> f64 {
    match (price.first(), price.last()) {
        (Some(first), Some(last)) if price.len() >= 2 && first.price != 0.0 => {
            (last.price - first.price) / first.price * 100.0
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_iso_date, BalanceSheetReport, CompanyOverview, Symbol};

    fn prices(values: &[f64]) -> Vec<PricePoint> {
        let start = parse_iso_date("2024-01-02").expect("valid");
        values
            .iter()
            .enumerate()
            .map(|(offset, price)| PricePoint {
                date: start + time::Duration::days(offset as i64),
                price: *price,
            })
            .collect()
    }

    #[test]
    fn summary_reads_overview_and_balance_sheet() {
        let mut bundle = StockDataBundle::empty(Symbol::parse("IBM").expect("valid"));
        bundle.price = prices(&[100.0, 110.0]);
        bundle.overview = CompanyOverview::from_fields([
            ("Name", "International Business Machines"),
            ("Exchange", "NYSE"),
            ("PERatio", "22.5"),
            ("DividendPerShare", "6.64"),
            ("EPS", "0"),
            ("DividendDate", "None"),
        ]);
        bundle.latest_balance_sheet = Some(BalanceSheetReport {
            fiscal_date_ending: String::from("2024-06-30"),
            cash_and_cash_equivalents_at_carrying_value: Some(String::from("500")),
            short_term_debt: Some(String::from("100")),
            long_term_debt: Some(String::from("None")),
            ..BalanceSheetReport::default()
        });

        let summary = CompanySummary::from_bundle(&bundle);

        assert_eq!(summary.symbol, "IBM");
        assert_eq!(summary.exchange.as_deref(), Some("NYSE"));
        assert_eq!(summary.latest_price, 110.0);
        assert_eq!(summary.price_change, 10.0);
        assert_eq!(summary.price_change_percent, 10.0);
        assert_eq!(summary.pe_ratio, Some(22.5));
        assert_eq!(summary.payout_ratio, None);
        assert_eq!(summary.dividend_date, None);
        assert_eq!(summary.cash, Some(500.0));
        assert_eq!(summary.debt, Some(100.0));
        assert_eq!(summary.net_cash, Some(400.0));
    }

    #[test]
    fn single_point_has_no_daily_change() {
        let mut bundle = StockDataBundle::empty(Symbol::parse("IBM").expect("valid"));
        bundle.price = prices(&[42.0]);

        let summary = CompanySummary::from_bundle(&bundle);

        assert_eq!(summary.latest_price, 42.0);
        assert_eq!(summary.price_change_percent, 0.0);
        assert_eq!(summary.debt, None);
    }

    #[test]
    fn range_change_uses_first_and_last_points() {
        assert_eq!(range_price_change_percent(&prices(&[50.0, 80.0, 75.0])), 50.0);
        assert_eq!(range_price_change_percent(&prices(&[50.0])), 0.0);
        assert_eq!(range_price_change_percent(&prices(&[0.0, 10.0])), 0.0);
        assert_eq!(range_price_change_percent(&[]), 0.0);
    }
}
