use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    BalanceSheetReport, CashAndDebtPoint, CompanyOverview, FinancialPoint, InsiderTransaction,
    PricePoint, ReturnOfCapitalPoint, Symbol, ValidationError,
};

/// Quarterly metrics sharing the [`FinancialPoint`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialMetric {
    Revenue,
    Ebitda,
    NetIncome,
    FreeCashFlow,
    TotalAssets,
    Eps,
    DividendsPerShare,
    SharesOutstanding,
    NetMargin,
}

impl FinancialMetric {
    pub const ALL: [Self; 9] = [
        Self::Revenue,
        Self::Ebitda,
        Self::NetIncome,
        Self::FreeCashFlow,
        Self::TotalAssets,
        Self::Eps,
        Self::DividendsPerShare,
        Self::SharesOutstanding,
        Self::NetMargin,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Ebitda => "ebitda",
            Self::NetIncome => "net_income",
            Self::FreeCashFlow => "free_cash_flow",
            Self::TotalAssets => "total_assets",
            Self::Eps => "eps",
            Self::DividendsPerShare => "dividends_per_share",
            Self::SharesOutstanding => "shares_outstanding",
            Self::NetMargin => "net_margin",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Ebitda => "EBITDA",
            Self::NetIncome => "Net Income",
            Self::FreeCashFlow => "Free Cash Flow",
            Self::TotalAssets => "Total Assets",
            Self::Eps => "EPS",
            Self::DividendsPerShare => "Dividends per Share",
            Self::SharesOutstanding => "Shares Outstanding",
            Self::NetMargin => "Net Margin (%)",
        }
    }
}

impl Display for FinancialMetric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialMetric {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidMetric {
                value: input.to_owned(),
            })
    }
}

/// Everything one fetch cycle produces for a ticker.
///
/// Series are ascending by date. Series built from the same report list share
/// length and labels, except dividends per share, which drops periods without
/// a positive share count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDataBundle {
    pub symbol: Symbol,
    pub price: Vec<PricePoint>,
    pub revenue: Vec<FinancialPoint>,
    pub ebitda: Vec<FinancialPoint>,
    pub net_income: Vec<FinancialPoint>,
    pub free_cash_flow: Vec<FinancialPoint>,
    pub total_assets: Vec<FinancialPoint>,
    pub eps: Vec<FinancialPoint>,
    pub dividends_per_share: Vec<FinancialPoint>,
    pub shares_outstanding: Vec<FinancialPoint>,
    pub net_margin: Vec<FinancialPoint>,
    pub cash_and_debt: Vec<CashAndDebtPoint>,
    pub return_of_capital: Vec<ReturnOfCapitalPoint>,
    pub overview: CompanyOverview,
    pub latest_balance_sheet: Option<BalanceSheetReport>,
    pub insider_transactions: Vec<InsiderTransaction>,
}

impl StockDataBundle {
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            price: Vec::new(),
            revenue: Vec::new(),
            ebitda: Vec::new(),
            net_income: Vec::new(),
            free_cash_flow: Vec::new(),
            total_assets: Vec::new(),
            eps: Vec::new(),
            dividends_per_share: Vec::new(),
            shares_outstanding: Vec::new(),
            net_margin: Vec::new(),
            cash_and_debt: Vec::new(),
            return_of_capital: Vec::new(),
            overview: CompanyOverview::default(),
            latest_balance_sheet: None,
            insider_transactions: Vec::new(),
        }
    }

    pub fn series(&self, metric: FinancialMetric) -> &[FinancialPoint] {
        match metric {
            FinancialMetric::Revenue => &self.revenue,
            FinancialMetric::Ebitda => &self.ebitda,
            FinancialMetric::NetIncome => &self.net_income,
            FinancialMetric::FreeCashFlow => &self.free_cash_flow,
            FinancialMetric::TotalAssets => &self.total_assets,
            FinancialMetric::Eps => &self.eps,
            FinancialMetric::DividendsPerShare => &self.dividends_per_share,
            FinancialMetric::SharesOutstanding => &self.shares_outstanding,
            FinancialMetric::NetMargin => &self.net_margin,
        }
    }

    pub fn series_mut(&mut self, metric: FinancialMetric) -> &mut Vec<FinancialPoint> {
        match metric {
            FinancialMetric::Revenue => &mut self.revenue,
            FinancialMetric::Ebitda => &mut self.ebitda,
            FinancialMetric::NetIncome => &mut self.net_income,
            FinancialMetric::FreeCashFlow => &mut self.free_cash_flow,
            FinancialMetric::TotalAssets => &mut self.total_assets,
            FinancialMetric::Eps => &mut self.eps,
            FinancialMetric::DividendsPerShare => &mut self.dividends_per_share,
            FinancialMetric::SharesOutstanding => &mut self.shares_outstanding,
            FinancialMetric::NetMargin => &mut self.net_margin,
        }
    }

    pub fn latest_price(&self) -> Option<&PricePoint> {
        self.price.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_round_trip_through_from_str() {
        for metric in FinancialMetric::ALL {
            assert_eq!(metric.as_str().parse::<FinancialMetric>(), Ok(metric));
        }
        assert_eq!(
            "Free-Cash-Flow".parse::<FinancialMetric>(),
            Ok(FinancialMetric::FreeCashFlow)
        );
        assert!("price".parse::<FinancialMetric>().is_err());
    }

    #[test]
    fn series_accessor_addresses_each_field() {
        let mut bundle = StockDataBundle::empty(Symbol::parse("IBM").expect("valid"));
        for (index, metric) in FinancialMetric::ALL.into_iter().enumerate() {
            bundle.series_mut(metric).push(FinancialPoint {
                date: crate::QuarterLabel::new(2024, 1).expect("valid"),
                value: Some(index as f64),
            });
        }

        for (index, metric) in FinancialMetric::ALL.into_iter().enumerate() {
            assert_eq!(bundle.series(metric)[0].value, Some(index as f64));
        }
    }
}
