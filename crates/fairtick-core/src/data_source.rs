//! Statement-source contract and request/response types.
//!
//! The valuation core consumes historical statement data through the
//! [`StatementSource`] trait; transport, caching, and retry behavior
//! all live behind it. Source failures carry a structured kind and a
//! stable code so the presentation layer can give actionable messages.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::domain::{RawStatementRecord, Ticker};

/// Identifier for a statement data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Yahoo,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    MalformedPayload,
    Internal,
}

/// Structured error returned by statement sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::MalformedPayload,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::MalformedPayload => "source.malformed_payload",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for historical statement fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementsRequest {
    pub ticker: Ticker,
    /// Number of past fiscal years requested. Sources may serve fewer;
    /// they must not serve zero silently.
    pub periods_back: usize,
}

impl StatementsRequest {
    pub fn new(ticker: Ticker, periods_back: usize) -> Result<Self, SourceError> {
        if periods_back == 0 {
            return Err(SourceError::invalid_request(
                "statements request must cover at least one past period",
            ));
        }
        Ok(Self {
            ticker,
            periods_back,
        })
    }
}

/// Normalized statement batch for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementBatch {
    pub ticker: Ticker,
    pub records: Vec<RawStatementRecord>,
}

/// Statement source contract.
///
/// Implementations must be `Send + Sync`; async methods return boxed
/// futures so the trait stays object-safe behind `Arc<dyn ...>`.
pub trait StatementSource: Send + Sync {
    /// Unique provider identifier.
    fn id(&self) -> ProviderId;

    /// Fetch historical statement records for one ticker.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the provider is unavailable, rate
    /// limited, the request is invalid, or the upstream payload cannot
    /// be parsed into well-typed records.
    fn statements<'a>(
        &'a self,
        req: StatementsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<StatementBatch, SourceError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_period_request() {
        let ticker = Ticker::parse("GOOG").expect("ticker");
        let err = StatementsRequest::new(ticker, 0).expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::InvalidRequest);
        assert!(!err.retryable());
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(SourceError::rate_limited("slow down").code(), "source.rate_limited");
        assert_eq!(
            SourceError::malformed_payload("bad json").code(),
            "source.malformed_payload"
        );
    }
}
