use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

/// Fiscal quarter label, rendered as `Q{1-4} {year}`.
///
/// Ordering is chronological: year first, then quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuarterLabel {
    year: i32,
    quarter: u8,
}

impl QuarterLabel {
    pub fn new(year: i32, quarter: u8) -> Result<Self, ValidationError> {
        if !(1..=4).contains(&quarter) {
            return Err(ValidationError::InvalidQuarterLabel {
                value: format!("Q{quarter} {year}"),
            });
        }
        Ok(Self { year, quarter })
    }

    /// Quarter containing a fiscal-period-end date: `ceil(month / 3)`.
    pub fn from_date(date: Date) -> Self {
        let month = u8::from(date.month());
        Self {
            year: date.year(),
            quarter: month.div_ceil(3),
        }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn quarter(self) -> u8 {
        self.quarter
    }
}

impl Display for QuarterLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{} {}", self.quarter, self.year)
    }
}

impl FromStr for QuarterLabel {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidQuarterLabel {
            value: input.to_owned(),
        };
        let (quarter, year) = input
            .trim()
            .strip_prefix('Q')
            .and_then(|rest| rest.split_once(' '))
            .ok_or_else(invalid)?;
        let quarter = quarter.parse::<u8>().map_err(|_| invalid())?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        Self::new(year, quarter).map_err(|_| invalid())
    }
}

impl TryFrom<String> for QuarterLabel {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuarterLabel> for String {
    fn from(value: QuarterLabel) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_iso_date;

    fn label(raw: &str) -> String {
        QuarterLabel::from_date(parse_iso_date(raw).expect("valid date")).to_string()
    }

    #[test]
    fn labels_quarter_end_dates() {
        assert_eq!(label("2024-09-30"), "Q3 2024");
        assert_eq!(label("2024-01-15"), "Q1 2024");
        assert_eq!(label("2024-03-31"), "Q1 2024");
        assert_eq!(label("2024-04-01"), "Q2 2024");
        assert_eq!(label("2023-12-31"), "Q4 2023");
    }

    #[test]
    fn off_calendar_fiscal_year_uses_calendar_month() {
        // Apple closes its fiscal Q4 in late September.
        assert_eq!(label("2023-09-30"), "Q3 2023");
        assert_eq!(label("2023-06-24"), "Q2 2023");
    }

    #[test]
    fn parses_rendered_label() {
        let parsed: QuarterLabel = "Q2 2021".parse().expect("valid label");
        assert_eq!(parsed, QuarterLabel::new(2021, 2).expect("valid"));
        assert!("Q5 2021".parse::<QuarterLabel>().is_err());
        assert!("2021 Q1".parse::<QuarterLabel>().is_err());
    }

    #[test]
    fn orders_chronologically() {
        let q4_2023 = QuarterLabel::new(2023, 4).expect("valid");
        let q1_2024 = QuarterLabel::new(2024, 1).expect("valid");
        assert!(q4_2023 < q1_2024);
    }
}
