use thiserror::Error;

use crate::data_source::SourceError;

/// Validation errors for domain inputs exposed by `fairtick-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("fiscal year {year} is outside the supported range {min}..={max}")]
    FiscalYearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("invalid unit scale '{value}', expected one of ones, thousands, millions, billions")]
    InvalidUnitScale { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
}

/// Valuation failure taxonomy.
///
/// A valuation run either succeeds with a full report or fails with
/// exactly one of these kinds; the core never substitutes defaults for
/// invalid parameters or ambiguous data.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Raw statement data could not be obtained or parsed upstream.
    /// Surfaced unchanged; the core does not retry.
    #[error("data source failure: {0}")]
    DataSource(#[from] SourceError),

    /// Historical records mix currencies (or otherwise cannot share a
    /// common arithmetic basis) and no conversion path exists.
    #[error("inconsistent statement data: expected currency {expected}, found {found}")]
    DataInconsistency { expected: String, found: String },

    /// Fewer than two usable historical periods. A legitimate terminal
    /// outcome for thin upstream data, not a bug.
    #[error("insufficient history: {usable} usable period(s), need at least 2")]
    InsufficientHistory { usable: usize },

    /// Historical growth rate is mathematically undefined for the
    /// series (sign changes or a single usable period). Advisory in
    /// the full pipeline: projection still runs on the user-supplied
    /// growth rate.
    #[error("historical growth rate undefined: {reason}")]
    UndefinedGrowth { reason: String },

    /// User-supplied parameters violate a mathematical precondition.
    #[error("invalid parameter '{field}': {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ValuationError {
    /// Stable machine-readable code for presentation layers.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DataSource(_) => "valuation.data_source",
            Self::DataInconsistency { .. } => "valuation.data_inconsistency",
            Self::InsufficientHistory { .. } => "valuation.insufficient_history",
            Self::UndefinedGrowth { .. } => "valuation.undefined_growth",
            Self::InvalidParameter { .. } => "valuation.invalid_parameter",
            Self::Validation(_) => "valuation.validation",
        }
    }

    pub(crate) fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
