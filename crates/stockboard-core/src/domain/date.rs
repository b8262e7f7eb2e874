//! Calendar-date helpers for provider payloads.
//!
//! Alpha Vantage delivers every date as a `YYYY-MM-DD` string (trading days,
//! fiscal period ends, insider transaction dates). These helpers parse them
//! into [`time::Date`] and serialize them back in the same shape.

use time::format_description::well_known::Iso8601;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

/// Parse a provider `YYYY-MM-DD` date.
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), &Iso8601::DATE).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// Current UTC calendar date.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Same month and day `years` earlier. February 29 maps to February 28 when
/// the target year is not a leap year.
pub fn years_before(date: Date, years: u8) -> Date {
    let year = date.year() - i32::from(years);
    Date::from_calendar_date(year, date.month(), date.day())
        .or_else(|_| Date::from_calendar_date(year, date.month(), date.day() - 1))
        .unwrap_or(Date::MIN)
}

/// Serde adapter writing [`Date`] as `YYYY-MM-DD`.
pub mod iso_date {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_iso_date(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_dates() {
        let date = parse_iso_date("2024-09-30").expect("must parse");
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), time::Month::September);
        assert_eq!(date.day(), 30);
        assert_eq!(date.to_string(), "2024-09-30");
    }

    #[test]
    fn rejects_impossible_and_malformed_dates() {
        for raw in [
            "2024-02-30",
            "2024-13-01",
            "24-01-01",
            "2024/01/01",
            "None",
            "",
        ] {
            assert!(parse_iso_date(raw).is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn years_before_keeps_month_and_day() {
        let today = parse_iso_date("2026-10-19").expect("valid");
        assert_eq!(years_before(today, 3).to_string(), "2023-10-19");
    }

    #[test]
    fn years_before_clamps_leap_day() {
        let leap = parse_iso_date("2024-02-29").expect("valid");
        assert_eq!(years_before(leap, 1).to_string(), "2023-02-28");
        assert_eq!(years_before(leap, 4).to_string(), "2020-02-29");
    }
}
