use thiserror::Error;

/// Validation and contract errors exposed by `stockboard-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or digit: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid time range '{value}', expected one of 1y, 3y, 5y, 10y, all")]
    InvalidTimeRange { value: String },
    #[error("invalid metric '{value}'")]
    InvalidMetric { value: String },

    #[error("date must be formatted YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("quarter label must look like 'Q3 2024': '{value}'")]
    InvalidQuarterLabel { value: String },
}

/// Errors raised by the local credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential store io error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("credential store at '{path}' is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
