use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

use crate::domain::date::iso_date;
use crate::QuarterLabel;

/// Parse a provider numeric string.
///
/// Alpha Vantage encodes missing figures as the literal `"None"` (sometimes
/// `"-"` or an empty string); those and any non-finite value yield `None`.
pub fn parse_provider_decimal(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed == "None" || trimmed == "-" {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub price: f64,
}

/// One fiscal-quarter value. `None` marks a figure the provider did not report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialPoint {
    pub date: QuarterLabel,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashAndDebtPoint {
    pub date: QuarterLabel,
    pub cash: f64,
    pub debt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnOfCapitalPoint {
    pub date: QuarterLabel,
    pub buybacks: f64,
    pub dividends: f64,
}

/// Open-market insider purchase of common stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderTransaction {
    pub name: String,
    pub title: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub shares: u64,
    pub value: f64,
}

/// Company overview fields, carried through as delivered.
///
/// Values stay strings (`"3200000000000"`, `"0.25"`, `"None"`); use
/// [`CompanyOverview::metric`] for numeric access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyOverview {
    fields: BTreeMap<String, String>,
}

impl CompanyOverview {
    /// Keep string fields verbatim and stringify numbers; nested values are dropped.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::String(text) => text.clone(),
                    Value::Number(number) => number.to_string(),
                    Value::Bool(flag) => flag.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((key.clone(), value))
            })
            .collect();
        Self { fields }
    }

    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(String::as_str)
            .filter(|value| *value != "None")
    }

    pub fn metric(&self, field: &str) -> Option<f64> {
        parse_provider_decimal(self.get(field))
    }

    pub fn name(&self) -> Option<&str> {
        self.get("Name")
    }

    pub fn symbol(&self) -> Option<&str> {
        self.get("Symbol")
    }

    pub fn exchange(&self) -> Option<&str> {
        self.get("Exchange")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Quarterly balance-sheet report as delivered by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetReport {
    #[serde(default)]
    pub fiscal_date_ending: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_liabilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shareholder_equity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_and_cash_equivalents_at_carrying_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_term_debt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_term_debt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_long_term_debt_total: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_stock_shares_outstanding: Option<String>,
}

impl BalanceSheetReport {
    pub fn cash(&self) -> Option<f64> {
        parse_provider_decimal(self.cash_and_cash_equivalents_at_carrying_value.as_deref())
    }

    /// Short-term plus long-term debt when that sum is positive, otherwise the
    /// reported total (0 when the total is missing too).
    pub fn debt(&self) -> f64 {
        let short_term =
            parse_provider_decimal(self.short_term_debt.as_deref()).unwrap_or(0.0);
        let long_term = parse_provider_decimal(self.long_term_debt.as_deref()).unwrap_or(0.0);
        let from_components = short_term + long_term;
        if from_components > 0.0 {
            from_components
        } else {
            parse_provider_decimal(self.short_long_term_debt_total.as_deref()).unwrap_or(0.0)
        }
    }

    pub fn net_cash(&self) -> Option<f64> {
        self.cash().map(|cash| cash - self.debt())
    }

    pub fn total_assets(&self) -> Option<f64> {
        parse_provider_decimal(self.total_assets.as_deref())
    }

    pub fn shares_outstanding(&self) -> Option<f64> {
        parse_provider_decimal(self.common_stock_shares_outstanding.as_deref())
    }
}
