//! CLI argument definitions for stockwidgets.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `price` | Look up the latest price for one symbol |
//! | `search` | Search symbols, optionally pick one and show its price |
//!
//! # Examples
//!
//! ```bash
//! stockwidgets price IBM
//! stockwidgets search tesla --select 1 --format json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stock price and symbol search widgets, driven from the terminal.
#[derive(Debug, Parser)]
#[command(name = "stockwidgets", author, version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Per-lookup timeout in milliseconds (overrides STOCKWIDGETS_REQUEST_TIMEOUT_MS).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Alpha Vantage API key (overrides STOCKWIDGETS_ALPHAVANTAGE_API_KEY).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Log widget and provider activity to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest price for a symbol.
    Price(PriceArgs),
    /// Search for symbols by keyword.
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Ticker symbol, e.g. IBM.
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Keywords to search for.
    pub query: String,

    /// Pick the Nth result (1-based) and show its price.
    #[arg(long)]
    pub select: Option<usize>,
}
