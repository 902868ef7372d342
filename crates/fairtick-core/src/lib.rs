//! # Fairtick Core
//!
//! Discounted-cash-flow valuation engine and statement-source
//! contracts for the fairtick toolkit.
//!
//! ## Overview
//!
//! The core is a pure pipeline: raw statement records flow through the
//! series builder, growth estimator, projector, and discounting engine
//! into an immutable [`ValuationReport`]. All I/O lives behind the
//! [`StatementSource`] seam; the engine itself never touches the
//! network or disk, so concurrent runs for different tickers are
//! trivially safe.
//!
//! ```text
//! RawStatementRecord(s)
//!         │
//!         ▼
//! ┌──────────────────────┐    ┌─────────────────┐
//! │ HistoricalSeries     │───▶│ GrowthEstimator │ (advisory)
//! │ Builder              │    └─────────────────┘
//! └──────────┬───────────┘
//!            ▼
//! ┌──────────────────────┐    ┌──────────────────────────┐
//! │ CashFlowProjector    │───▶│ DiscountedValuationEngine│
//! └──────────────────────┘    └────────────┬─────────────┘
//!                                          ▼
//!                                   ValuationReport
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Statement-source adapters (Yahoo Finance) |
//! | [`data_source`] | Statement source trait and request types |
//! | [`domain`] | Domain models (Ticker, FiscalPeriod, series) |
//! | [`engine`] | Parameters, discounting engine, pipeline entry |
//! | [`error`] | Validation and valuation error taxonomy |
//! | [`growth`] | Historical growth estimation |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`projection`] | Forward cash-flow projection |
//! | [`retry`] | Adapter-level retry/backoff |
//! | [`series`] | Historical series builder |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fairtick_core::{compute_valuation, Ticker, ValuationParameters};
//! use fairtick_core::{StatementSource, StatementsRequest, YahooStatementSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ticker = Ticker::parse("GOOG")?;
//!     let parameters = ValuationParameters::new(4, None, 0.08, 0.15, 0.025)?;
//!
//!     let source = YahooStatementSource::default();
//!     let batch = source
//!         .statements(StatementsRequest::new(ticker.clone(), 4)?)
//!         .await?;
//!
//!     let report = compute_valuation(ticker, batch.records, parameters)?;
//!     println!("intrinsic value: {:.2}", report.intrinsic_value);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure surfaces as one named [`ValuationError`] kind; the
//! core never substitutes defaults for invalid parameters or
//! ambiguous data, and never retries (transport retries belong to the
//! adapters).

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod engine;
pub mod error;
pub mod growth;
pub mod http_client;
pub mod projection;
pub mod retry;
pub mod series;

// Adapter implementations
pub use adapters::YahooStatementSource;

// Data source trait and types
pub use data_source::{
    ProviderId, SourceError, SourceErrorKind, StatementBatch, StatementSource, StatementsRequest,
};

// Domain models
pub use domain::{
    validate_currency_code, FcfPoint, FiscalPeriod, HistoricalSeries, RawStatementRecord, Ticker,
    UnitScale,
};

// Engine types and pipeline entry point
pub use engine::{
    compute_valuation, DiscountedValuation, DiscountedValuationEngine, ValuationParameters,
    ValuationReport,
};

// Error types
pub use error::{ValidationError, ValuationError};

// Growth estimation
pub use growth::{GrowthEstimate, GrowthEstimator, GrowthMethod};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Projection
pub use projection::{CashFlowProjector, ProjectedCashFlow, ProjectedFlow};

// Retry logic
pub use retry::{Backoff, RetryConfig};

// Series assembly
pub use series::HistoricalSeriesBuilder;
