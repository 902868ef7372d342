//! CLI argument definitions for fairtick.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `value` | Run a full DCF valuation for a ticker |
//! | `statements` | Fetch and display the historical FCF series |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--offline` | `false` | Deterministic sample data, no network |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Value a company with default assumptions
//! fairtick value GOOG
//!
//! # Tighter discount rate, longer projection, table output
//! fairtick value GOOG --discount-rate 0.10 --period-forwards 6 --format table
//!
//! # Inspect the normalized FCF history without valuing it
//! fairtick statements GOOG --period-backwards 3 --pretty
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Fairtick - discounted-cash-flow valuation CLI
///
/// Fetches historical free-cash-flow statements for a ticker and
/// computes an intrinsic-value estimate under user-supplied growth and
/// discount assumptions.
#[derive(Debug, Parser)]
#[command(
    name = "fairtick",
    author,
    version,
    about = "Discounted-cash-flow valuation CLI",
    long_about = "Fairtick values publicly traded companies from their free-cash-flow history.\n\
\n\
  • Historical FCF series from Yahoo Finance (or deterministic offline data)\n\
  • Compound historical growth diagnostics\n\
  • Gordon-growth terminal value and present-value discounting\n\
  • Structured JSON, NDJSON, or table output\n\
\n\
Use 'fairtick <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve deterministic sample statements instead of fetching from
    /// Yahoo Finance. Useful for demos and offline tests.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full DCF valuation for one ticker.
    ///
    /// # Examples
    ///
    ///   fairtick value GOOG
    ///   fairtick value GOOG --growth-rate 0.10 --perpetual-growth-rate 0.02
    Value(ValueArgs),

    /// Fetch and display the normalized historical FCF series.
    ///
    /// # Examples
    ///
    ///   fairtick statements GOOG
    ///   fairtick statements AAPL --period-backwards 3 --format table
    Statements(StatementsArgs),
}

/// Arguments for the `value` command.
#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Ticker to value (e.g., GOOG).
    pub ticker: String,

    /// Historical periods (fiscal years) used for growth estimation.
    #[arg(long = "period-backwards", default_value_t = 4)]
    pub period_backwards: usize,

    /// Projection horizon in years. Defaults to the backwards window.
    #[arg(long = "period-forwards")]
    pub period_forwards: Option<usize>,

    /// Discount rate estimate (0.08 = 8%).
    #[arg(long = "discount-rate", default_value_t = 0.08)]
    pub discount_rate: f64,

    /// Free-cash-flow growth rate for the projection (0.15 = 15%).
    #[arg(long = "growth-rate", default_value_t = 0.15)]
    pub growth_rate: f64,

    /// Perpetual growth rate for the terminal value (0.025 = 2.5%).
    #[arg(long = "perpetual-growth-rate", default_value_t = 0.025)]
    pub perpetual_growth_rate: f64,
}

/// Arguments for the `statements` command.
#[derive(Debug, Args)]
pub struct StatementsArgs {
    /// Ticker to fetch statements for.
    pub ticker: String,

    /// Historical periods (fiscal years) to fetch.
    #[arg(long = "period-backwards", default_value_t = 4)]
    pub period_backwards: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn value_defaults_match_documented_assumptions() {
        let cli = Cli::parse_from(["fairtick", "value", "GOOG"]);
        match cli.command {
            Command::Value(args) => {
                assert_eq!(args.period_backwards, 4);
                assert_eq!(args.period_forwards, None);
                assert_eq!(args.discount_rate, 0.08);
                assert_eq!(args.growth_rate, 0.15);
                assert_eq!(args.perpetual_growth_rate, 0.025);
            }
            _ => panic!("expected value command"),
        }
    }
}
