use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] fairtick_core::ValidationError),

    #[error(transparent)]
    Valuation(#[from] fairtick_core::ValuationError),

    #[error(transparent)]
    Source(#[from] fairtick_core::SourceError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Valuation(_) => 3,
            Self::Source(_) => 4,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairtick_core::{ValidationError, ValuationError};

    #[test]
    fn exit_codes_distinguish_error_classes() {
        let validation = CliError::from(ValidationError::EmptyTicker);
        assert_eq!(validation.exit_code(), 2);

        let valuation = CliError::from(ValuationError::InsufficientHistory { usable: 1 });
        assert_eq!(valuation.exit_code(), 3);
    }
}
