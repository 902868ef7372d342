//! Canonical domain types for fairtick valuations.
//!
//! All models validate their invariants at construction time so that
//! malformed upstream data produces a typed error instead of leaking
//! into the valuation math.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated, normalized ticker symbol |
//! | [`FiscalPeriod`] | Ordered fiscal-year identifier |
//! | [`UnitScale`] | Reporting unit of monetary figures |
//! | [`RawStatementRecord`] | One period's statement line items |
//! | [`HistoricalSeries`] | Clean, ordered historical FCF series |

mod series;
mod statement;
mod ticker;

pub use series::{FcfPoint, HistoricalSeries};
pub use statement::{validate_currency_code, FiscalPeriod, RawStatementRecord, UnitScale};
pub use ticker::Ticker;
