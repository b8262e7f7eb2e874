//! Pure transforms from validated provider payloads to chart-ready series.
//!
//! Quarterly series come out oldest first no matter how the provider orders
//! its reports. A report whose `fiscalDateEnding` does not parse is skipped
//! for every series built from its list, so sibling series keep identical
//! labels.

use std::collections::BTreeMap;

use time::Date;
use tracing::{debug, warn};

use crate::payload::{
    CashFlowReport, DailyBar, EarningsReport, FiscalReport, IncomeReport, InsiderRecord,
    ProviderPayloads,
};
use crate::{
    parse_iso_date, parse_provider_decimal, BalanceSheetReport, CashAndDebtPoint,
    CompanyOverview, FinancialPoint, InsiderTransaction, PricePoint, QuarterLabel,
    ReturnOfCapitalPoint, StockDataBundle, Symbol,
};

const ACQUISITION: &str = "A";
const COMMON_STOCK: &str = "Common Stock";

/// Fold all seven payloads into one bundle.
pub fn normalize_bundle(symbol: Symbol, payloads: ProviderPayloads) -> StockDataBundle {
    let ProviderPayloads {
        daily_prices,
        income,
        cash_flow,
        balance_sheet,
        overview,
        insider,
        earnings,
    } = payloads;

    let income_reports = chronological("income statement", &income.quarterly_reports);
    let cash_flow_reports = chronological("cash flow", &cash_flow.quarterly_reports);
    let balance_reports = chronological("balance sheet", &balance_sheet.quarterly_reports);
    let earnings_reports = chronological("earnings", &earnings.quarterly_earnings);

    let shares_by_date = shares_lookup(&balance_reports);

    let bundle = StockDataBundle {
        price: price_series(&daily_prices),
        revenue: financial_series(&income_reports, |report| {
            parse_provider_decimal(report.total_revenue.as_deref())
        }),
        ebitda: financial_series(&income_reports, |report| {
            parse_provider_decimal(report.ebitda.as_deref())
        }),
        net_income: financial_series(&income_reports, |report| {
            parse_provider_decimal(report.net_income.as_deref())
        }),
        net_margin: financial_series(&income_reports, net_margin),
        free_cash_flow: financial_series(&cash_flow_reports, |report| {
            Some(free_cash_flow(report))
        }),
        total_assets: financial_series(&balance_reports, |report| report.total_assets()),
        shares_outstanding: financial_series(&balance_reports, |report| {
            report.shares_outstanding()
        }),
        eps: financial_series(&earnings_reports, |report: &EarningsReport| {
            parse_provider_decimal(report.reported_eps.as_deref())
        }),
        dividends_per_share: dividends_per_share(&cash_flow_reports, &shares_by_date),
        cash_and_debt: cash_and_debt(&balance_reports),
        return_of_capital: return_of_capital(&cash_flow_reports),
        overview: CompanyOverview::from_json_object(&overview),
        latest_balance_sheet: latest_balance_sheet(&balance_sheet.quarterly_reports),
        insider_transactions: insider_transactions(&insider.data),
        symbol,
    };

    debug!(
        symbol = %bundle.symbol,
        price_points = bundle.price.len(),
        quarters = bundle.revenue.len(),
        insider_buys = bundle.insider_transactions.len(),
        "normalized provider payloads"
    );

    bundle
}

/// Daily closes in ascending date order; unparsable entries are skipped.
pub fn price_series(daily: &BTreeMap<String, DailyBar>) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = daily
        .iter()
        .filter_map(|(raw_date, bar)| {
            let date = parse_iso_date(raw_date).ok()?;
            let price = parse_provider_decimal(bar.close.as_deref())?;
            Some(PricePoint { date, price })
        })
        .collect();

    let skipped = daily.len() - points.len();
    if skipped > 0 {
        warn!(skipped, "skipped unparsable daily price entries");
    }

    points.sort_by_key(|point| point.date);
    points
}

/// Pair each report with its parsed fiscal date, oldest first.
///
/// The sort is stable, so reports sharing a fiscal date keep provider order.
pub fn chronological<'r, R: FiscalReport>(source: &str, reports: &'r [R]) -> Vec<(Date, &'r R)> {
    let mut dated: Vec<(Date, &R)> = reports
        .iter()
        .filter_map(|report| match parse_iso_date(report.fiscal_date_ending()) {
            Ok(date) => Some((date, report)),
            Err(_) => {
                warn!(
                    source,
                    fiscal_date_ending = report.fiscal_date_ending(),
                    "skipping report with unparsable fiscal date"
                );
                None
            }
        })
        .collect();
    dated.sort_by_key(|(date, _)| *date);
    dated
}

fn financial_series<R>(
    reports: &[(Date, &R)],
    value: impl Fn(&R) -> Option<f64>,
) -> Vec<FinancialPoint> {
    reports
        .iter()
        .map(|(date, report)| FinancialPoint {
            date: QuarterLabel::from_date(*date),
            value: value(report),
        })
        .collect()
}

/// `operatingCashflow + capitalExpenditures`, or 0 when either side is missing.
pub fn free_cash_flow(report: &CashFlowReport) -> f64 {
    let operating = parse_provider_decimal(report.operating_cashflow.as_deref());
    let capex = parse_provider_decimal(report.capital_expenditures.as_deref());
    match (operating, capex) {
        (Some(operating), Some(capex)) => operating + capex,
        _ => 0.0,
    }
}

/// Net income over revenue, in percent.
///
/// Zero revenue yields 0; an unparsable side yields `None` unless revenue
/// is zero.
pub fn net_margin(report: &IncomeReport) -> Option<f64> {
    let revenue = parse_provider_decimal(report.total_revenue.as_deref())?;
    if revenue == 0.0 {
        return Some(0.0);
    }
    let net_income = parse_provider_decimal(report.net_income.as_deref())?;
    Some(net_income / revenue * 100.0)
}

/// Positive share counts keyed by fiscal date.
fn shares_lookup(balance_reports: &[(Date, &BalanceSheetReport)]) -> BTreeMap<Date, f64> {
    balance_reports
        .iter()
        .filter_map(|(date, report)| {
            report
                .shares_outstanding()
                .filter(|shares| *shares > 0.0)
                .map(|shares| (*date, shares))
        })
        .collect()
}

/// Common-stock dividend payout over shares outstanding for the same fiscal
/// date. Periods without a positive result are dropped.
pub fn dividends_per_share(
    cash_flow_reports: &[(Date, &CashFlowReport)],
    shares_by_date: &BTreeMap<Date, f64>,
) -> Vec<FinancialPoint> {
    cash_flow_reports
        .iter()
        .filter_map(|(date, report)| {
            let shares = shares_by_date.get(date)?;
            let payout = parse_provider_decimal(report.dividend_payout_common_stock.as_deref())?;
            let per_share = payout / shares;
            (per_share > 0.0).then(|| FinancialPoint {
                date: QuarterLabel::from_date(*date),
                value: Some(per_share),
            })
        })
        .collect()
}

pub fn cash_and_debt(balance_reports: &[(Date, &BalanceSheetReport)]) -> Vec<CashAndDebtPoint> {
    balance_reports
        .iter()
        .map(|(date, report)| CashAndDebtPoint {
            date: QuarterLabel::from_date(*date),
            cash: report.cash().unwrap_or(0.0),
            debt: report.debt(),
        })
        .collect()
}

pub fn return_of_capital(
    cash_flow_reports: &[(Date, &CashFlowReport)],
) -> Vec<ReturnOfCapitalPoint> {
    cash_flow_reports
        .iter()
        .map(|(date, report)| ReturnOfCapitalPoint {
            date: QuarterLabel::from_date(*date),
            buybacks: parse_provider_decimal(
                report.payments_for_repurchase_of_common_stock.as_deref(),
            )
            .map_or(0.0, f64::abs),
            dividends: parse_provider_decimal(report.dividend_payout.as_deref()).unwrap_or(0.0),
        })
        .collect()
}

/// Report with the latest fiscal date; the first report when none parse.
///
/// Selection is by date, not by position: the provider usually lists the
/// newest report first, but an out-of-order payload still yields the newest
/// sheet. Equal dates keep the earlier report.
pub fn latest_balance_sheet(reports: &[BalanceSheetReport]) -> Option<BalanceSheetReport> {
    let mut latest: Option<(Date, &BalanceSheetReport)> = None;
    for report in reports {
        let Ok(date) = parse_iso_date(&report.fiscal_date_ending) else {
            continue;
        };
        if latest.is_none_or(|(best, _)| date > best) {
            latest = Some((date, report));
        }
    }

    latest
        .map(|(_, report)| report)
        .or_else(|| reports.first())
        .cloned()
}

/// Open-market purchases of common stock, newest first, exact duplicates removed.
pub fn insider_transactions(records: &[InsiderRecord]) -> Vec<InsiderTransaction> {
    let mut transactions: Vec<InsiderTransaction> =
        records.iter().filter_map(insider_purchase).collect();

    transactions.sort_by(|left, right| right.date.cmp(&left.date));

    let mut unique: Vec<InsiderTransaction> = Vec::with_capacity(transactions.len());
    for transaction in transactions {
        if !unique.contains(&transaction) {
            unique.push(transaction);
        }
    }
    unique
}

fn insider_purchase(record: &InsiderRecord) -> Option<InsiderTransaction> {
    if record.acquisition_or_disposal.as_deref() != Some(ACQUISITION)
        || record.security_type.as_deref() != Some(COMMON_STOCK)
    {
        return None;
    }

    let share_price = parse_provider_decimal(record.share_price.as_deref())?;
    if share_price <= 0.0 {
        return None;
    }
    let shares = parse_provider_decimal(record.shares.as_deref()).filter(|shares| *shares >= 0.0)?;
    let date = parse_iso_date(record.transaction_date.as_deref()?).ok()?;

    Some(InsiderTransaction {
        name: record.executive.clone().unwrap_or_default(),
        title: record.executive_title.clone().unwrap_or_default(),
        date,
        shares: shares.round() as u64,
        value: shares * share_price,
    })
}
