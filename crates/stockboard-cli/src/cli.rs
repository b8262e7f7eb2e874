//! CLI argument definitions for stockboard.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Fetch a ticker and render the dashboard |
//! | `key` | Manage the stored Alpha Vantage API key |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Debug diagnostics on stderr |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `--api-key` | | API key for this invocation only |
//!
//! # Examples
//!
//! ```bash
//! stockboard key set YOUR_KEY
//! stockboard show IBM
//! stockboard show msft --range 10y --series revenue --format json --pretty
//! stockboard show AAPL --page 2
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stock dashboard for the terminal, backed by Alpha Vantage.
#[derive(Debug, Parser)]
#[command(
    name = "stockboard",
    author,
    version,
    about = "Stock fundamentals dashboard backed by Alpha Vantage",
    long_about = "stockboard fetches daily prices, quarterly statements, the company overview, \
and insider purchases for one ticker, then renders headline metrics, chart series for the \
selected time range, and a paginated insider-buys table.\n\
\n\
The API key is taken from --api-key, then STOCKBOARD_ALPHAVANTAGE_API_KEY, then the key \
stored with 'stockboard key set'."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Emit debug diagnostics on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Alpha Vantage API key for this invocation; not stored.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable dashboard.
    Table,
    /// Single JSON envelope.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a ticker and render its dashboard.
    ///
    /// # Examples
    ///
    ///   stockboard show IBM
    ///   stockboard show IBM --range 1y --series price
    Show(ShowArgs),

    /// Manage the stored API key.
    Key(KeyArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ticker symbol (e.g., IBM, BRK-B).
    pub ticker: String,

    /// Chart window: 1y, 3y, 5y, 10y, or all.
    #[arg(long, default_value = "5y")]
    pub range: String,

    /// Insider-buys table page (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Series to include: all, none, price, cash_and_debt, return_of_capital, or a
    /// quarterly metric such as revenue or net_margin. Repeatable.
    #[arg(long = "series", default_value = "all")]
    pub series: Vec<String>,
}

/// Arguments for the `key` command.
#[derive(Debug, Args)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub command: KeyCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeyCommand {
    /// Store an API key.
    Set {
        /// The Alpha Vantage API key.
        key: String,
    },
    /// Show where the key comes from, masked.
    Show,
    /// Remove the stored key.
    Clear,
}
