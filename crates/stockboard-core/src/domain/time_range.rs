use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// User-selectable chart window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    ThreeYears,
    #[default]
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "10Y")]
    TenYears,
    #[serde(rename = "All")]
    All,
}

impl TimeRange {
    pub const ALL: [Self; 5] = [
        Self::OneYear,
        Self::ThreeYears,
        Self::FiveYears,
        Self::TenYears,
        Self::All,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneYear => "1Y",
            Self::ThreeYears => "3Y",
            Self::FiveYears => "5Y",
            Self::TenYears => "10Y",
            Self::All => "All",
        }
    }

    /// Calendar look-back for daily series; `None` means unbounded.
    pub const fn years(self) -> Option<u8> {
        match self {
            Self::OneYear => Some(1),
            Self::ThreeYears => Some(3),
            Self::FiveYears => Some(5),
            Self::TenYears => Some(10),
            Self::All => None,
        }
    }

    /// Trailing quarter count for quarterly series; `None` means unbounded.
    pub const fn quarters(self) -> Option<usize> {
        match self {
            Self::OneYear => Some(4),
            Self::ThreeYears => Some(12),
            Self::FiveYears => Some(20),
            Self::TenYears => Some(40),
            Self::All => None,
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1y" => Ok(Self::OneYear),
            "3y" => Ok(Self::ThreeYears),
            "5y" => Ok(Self::FiveYears),
            "10y" => Ok(Self::TenYears),
            "all" => Ok(Self::All),
            other => Err(ValidationError::InvalidTimeRange {
                value: other.to_owned(),
            }),
        }
    }
}
