//! # Domain Models
//!
//! Normalized, chart-ready types produced by one fetch cycle.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PricePoint`] | Daily close, keyed by calendar date |
//! | [`FinancialPoint`] | One quarterly value, keyed by [`QuarterLabel`] |
//! | [`CashAndDebtPoint`] | Quarterly cash and debt pair |
//! | [`ReturnOfCapitalPoint`] | Quarterly buybacks and dividends pair |
//! | [`InsiderTransaction`] | Open-market insider purchase |
//! | [`CompanyOverview`] | Fundamental ratios as delivered |
//! | [`BalanceSheetReport`] | Raw quarterly balance sheet |
//! | [`StockDataBundle`] | Everything above for one ticker |
//! | [`TimeRange`] | Chart window (1Y, 3Y, 5Y, 10Y, All) |
//! | [`Symbol`] | Validated ticker |

mod bundle;
mod date;
mod models;
mod quarter;
mod symbol;
mod time_range;

pub use bundle::{FinancialMetric, StockDataBundle};
pub use date::{iso_date, parse_iso_date, today_utc, years_before};
pub use models::{
    parse_provider_decimal, BalanceSheetReport, CashAndDebtPoint, CompanyOverview,
    FinancialPoint, InsiderTransaction, PricePoint, ReturnOfCapitalPoint,
};
pub use quarter::QuarterLabel;
pub use symbol::Symbol;
pub use time_range::TimeRange;
