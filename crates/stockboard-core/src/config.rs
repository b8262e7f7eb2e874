use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::adapters::DEFAULT_BASE_URL;

pub const HOME_ENV: &str = "STOCKBOARD_HOME";
pub const BASE_URL_ENV: &str = "STOCKBOARD_BASE_URL";
pub const API_KEY_ENV: &str = "STOCKBOARD_ALPHAVANTAGE_API_KEY";

/// Runtime settings shared by the client and the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockboardConfig {
    /// Root directory for stockboard data.
    pub home: PathBuf,
    /// Provider query endpoint.
    pub base_url: String,
    /// Per-request transport timeout.
    pub timeout_ms: u64,
}

impl Default for StockboardConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl StockboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var_os(name))
    }

    /// Build from an arbitrary variable lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let home = var(HOME_ENV)
            .map(PathBuf::from)
            .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(".stockboard")))
            .unwrap_or_else(|| PathBuf::from(".stockboard"));

        let base_url = var(BASE_URL_ENV)
            .map(|value| value.to_string_lossy().trim_end_matches('/').to_owned())
            .unwrap_or_else(|| String::from(DEFAULT_BASE_URL));

        Self {
            home,
            base_url,
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.home.join("credentials.json")
    }
}
