//! Time-range slicing of a normalized bundle.
//!
//! | Series | Rule |
//! |--------|------|
//! | price | `date >= today - N years` |
//! | quarterly series | last `K` points by position |
//! | insider transactions, overview, latest balance sheet | unchanged |

use time::Date;

use crate::{today_utc, years_before, FinancialMetric, StockDataBundle, TimeRange};

/// Filter against the current UTC date.
pub fn filter_range(bundle: &StockDataBundle, range: TimeRange) -> StockDataBundle {
    filter_range_at(bundle, range, today_utc())
}

/// Filter against an explicit `today`.
pub fn filter_range_at(bundle: &StockDataBundle, range: TimeRange, today: Date) -> StockDataBundle {
    let mut filtered = bundle.clone();

    if let Some(years) = range.years() {
        let start = years_before(today, years);
        filtered.price.retain(|point| point.date >= start);
    }

    if let Some(quarters) = range.quarters() {
        for metric in FinancialMetric::ALL {
            keep_last(filtered.series_mut(metric), quarters);
        }
        keep_last(&mut filtered.cash_and_debt, quarters);
        keep_last(&mut filtered.return_of_capital, quarters);
    }

    filtered
}

fn keep_last<T>(series: &mut Vec<T>, count: usize) {
    let excess = series.len().saturating_sub(count);
    series.drain(..excess);
}
