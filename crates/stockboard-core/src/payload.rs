//! Raw Alpha Vantage payload shapes and response validation.
//!
//! Every endpoint answers HTTP 200 even when it fails; errors travel as
//! sentinel top-level keys. [`validate_response`] turns a body into a JSON
//! object or a [`FetchError`], then the per-endpoint `parse_*` functions map
//! the object onto typed payloads.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{BalanceSheetReport, Endpoint, FetchError};

pub const ERROR_MESSAGE_KEY: &str = "Error Message";
pub const INFORMATION_KEY: &str = "Information";
pub const NOTE_KEY: &str = "Note";
pub const DAILY_SERIES_KEY: &str = "Time Series (Daily)";

/// Parse a response body and reject provider-level error signalling.
pub fn validate_response(endpoint: Endpoint, body: &str) -> Result<Map<String, Value>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| FetchError::invalid_response(endpoint))?;
    let Value::Object(object) = value else {
        return Err(FetchError::invalid_response(endpoint));
    };

    if let Some(detail) = sentinel(&object, ERROR_MESSAGE_KEY) {
        return Err(FetchError::api(endpoint, detail));
    }
    if let Some(detail) =
        sentinel(&object, INFORMATION_KEY).or_else(|| sentinel(&object, NOTE_KEY))
    {
        return Err(FetchError::rate_limited(endpoint, detail));
    }

    Ok(object)
}

/// Text of a sentinel key, ignoring null and empty values.
fn sentinel(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_object<T: DeserializeOwned>(
    endpoint: Endpoint,
    object: Map<String, Value>,
) -> Result<T, FetchError> {
    serde_json::from_value(Value::Object(object)).map_err(|error| {
        FetchError::api(endpoint, format!("unexpected payload shape: {error}"))
    })
}

/// Reports carrying a fiscal period end date.
pub trait FiscalReport {
    fn fiscal_date_ending(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailyPricePayload {
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: Option<BTreeMap<String, DailyBar>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "4. close", default, deserialize_with = "lenient_string")]
    pub close: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub quarterly_reports: Vec<IncomeReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeReport {
    #[serde(default)]
    pub fiscal_date_ending: String,
    #[serde(default)]
    pub total_revenue: Option<String>,
    #[serde(default)]
    pub ebitda: Option<String>,
    #[serde(default)]
    pub net_income: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub quarterly_reports: Vec<CashFlowReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowReport {
    #[serde(default)]
    pub fiscal_date_ending: String,
    #[serde(default)]
    pub operating_cashflow: Option<String>,
    #[serde(default)]
    pub capital_expenditures: Option<String>,
    #[serde(default)]
    pub dividend_payout: Option<String>,
    #[serde(default)]
    pub dividend_payout_common_stock: Option<String>,
    #[serde(default)]
    pub payments_for_repurchase_of_common_stock: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub quarterly_reports: Vec<BalanceSheetReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub quarterly_earnings: Vec<EarningsReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EarningsReport {
    #[serde(rename = "fiscalDateEnding", default)]
    pub fiscal_date_ending: String,
    #[serde(rename = "reportedEPS", default)]
    pub reported_eps: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InsiderPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<InsiderRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InsiderRecord {
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub executive: Option<String>,
    #[serde(default)]
    pub executive_title: Option<String>,
    #[serde(default)]
    pub security_type: Option<String>,
    #[serde(default)]
    pub acquisition_or_disposal: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shares: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub share_price: Option<String>,
}

impl FiscalReport for IncomeReport {
    fn fiscal_date_ending(&self) -> &str {
        &self.fiscal_date_ending
    }
}

impl FiscalReport for CashFlowReport {
    fn fiscal_date_ending(&self) -> &str {
        &self.fiscal_date_ending
    }
}

impl FiscalReport for BalanceSheetReport {
    fn fiscal_date_ending(&self) -> &str {
        &self.fiscal_date_ending
    }
}

impl FiscalReport for EarningsReport {
    fn fiscal_date_ending(&self) -> &str {
        &self.fiscal_date_ending
    }
}

/// Validated bodies of all seven endpoints for one ticker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderPayloads {
    pub daily_prices: BTreeMap<String, DailyBar>,
    pub income: IncomeStatementPayload,
    pub cash_flow: CashFlowPayload,
    pub balance_sheet: BalanceSheetPayload,
    pub overview: Map<String, Value>,
    pub insider: InsiderPayload,
    pub earnings: EarningsPayload,
}

pub fn parse_daily_prices(object: Map<String, Value>) -> Result<DailyPricePayload, FetchError> {
    parse_object(Endpoint::DailyPrices, object)
}

pub fn parse_income_statement(
    object: Map<String, Value>,
) -> Result<IncomeStatementPayload, FetchError> {
    parse_object(Endpoint::IncomeStatement, object)
}

pub fn parse_cash_flow(object: Map<String, Value>) -> Result<CashFlowPayload, FetchError> {
    parse_object(Endpoint::CashFlow, object)
}

pub fn parse_balance_sheet(object: Map<String, Value>) -> Result<BalanceSheetPayload, FetchError> {
    parse_object(Endpoint::BalanceSheet, object)
}

pub fn parse_insider_transactions(
    object: Map<String, Value>,
) -> Result<InsiderPayload, FetchError> {
    parse_object(Endpoint::InsiderTransactions, object)
}

pub fn parse_earnings(object: Map<String, Value>) -> Result<EarningsPayload, FetchError> {
    parse_object(Endpoint::Earnings, object)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept numeric fields delivered either as strings or as JSON numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchErrorKind;
    use serde_json::json;

    #[test]
    fn accepts_plain_object() {
        let object = validate_response(Endpoint::Overview, r#"{"Symbol":"IBM"}"#)
            .expect("object should validate");
        assert_eq!(object.get("Symbol"), Some(&json!("IBM")));
    }

    #[test]
    fn rejects_non_object_and_garbage_bodies() {
        for body in ["[]", "\"text\"", "42", "null", "<html>", ""] {
            let error = validate_response(Endpoint::CashFlow, body).expect_err("must fail");
            assert_eq!(error.kind(), FetchErrorKind::Api, "body {body:?}");
            assert!(error.message().contains("Cash Flow"));
        }
    }

    #[test]
    fn error_message_key_is_an_api_error() {
        let body = r#"{"Error Message":"Invalid API call. Please retry or visit the documentation."}"#;
        let error = validate_response(Endpoint::DailyPrices, body).expect_err("must fail");
        assert_eq!(error.kind(), FetchErrorKind::Api);
        assert!(error.message().contains("Time Series"));
        assert!(error.message().contains("Invalid API call"));
    }

    #[test]
    fn note_and_information_keys_signal_throttling() {
        for key in [NOTE_KEY, INFORMATION_KEY] {
            let mut body = Map::new();
            body.insert(
                key.to_owned(),
                json!("Our standard API rate limit is 25 requests per day."),
            );
            let error = validate_response(Endpoint::Earnings, &Value::Object(body).to_string())
                .expect_err("must fail");
            assert_eq!(error.kind(), FetchErrorKind::RateLimited);
            assert!(error.message().contains("Earnings"));
        }
    }

    #[test]
    fn empty_sentinels_are_ignored() {
        let body = r#"{"Note":"","Information":null,"data":[]}"#;
        assert!(validate_response(Endpoint::InsiderTransactions, body).is_ok());
    }

    #[test]
    fn missing_report_list_parses_as_empty() {
        let payload = parse_income_statement(Map::new()).expect("must parse");
        assert!(payload.quarterly_reports.is_empty());

        let object = json!({ "symbol": "IBM", "quarterlyReports": null });
        let payload =
            parse_cash_flow(object.as_object().cloned().expect("object")).expect("must parse");
        assert!(payload.quarterly_reports.is_empty());
    }

    #[test]
    fn malformed_report_list_is_an_api_error() {
        let object = json!({ "quarterlyReports": "nope" });
        let error = parse_balance_sheet(object.as_object().cloned().expect("object"))
            .expect_err("must fail");
        assert_eq!(error.kind(), FetchErrorKind::Api);
        assert!(error.message().contains("Balance Sheet"));
    }

    #[test]
    fn insider_numbers_may_arrive_as_json_numbers() {
        let object = json!({
            "data": [{ "shares": 100, "share_price": "10.5", "security_type": "Common Stock" }]
        });
        let payload = parse_insider_transactions(object.as_object().cloned().expect("object"))
            .expect("must parse");
        assert_eq!(payload.data[0].shares.as_deref(), Some("100"));
        assert_eq!(payload.data[0].share_price.as_deref(), Some("10.5"));
    }
}
