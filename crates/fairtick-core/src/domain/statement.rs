use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MIN_FISCAL_YEAR: i32 = 1900;
const MAX_FISCAL_YEAR: i32 = 2200;

/// Ordered fiscal-year period identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FiscalPeriod(i32);

impl FiscalPeriod {
    pub fn from_year(year: i32) -> Result<Self, ValidationError> {
        if !(MIN_FISCAL_YEAR..=MAX_FISCAL_YEAR).contains(&year) {
            return Err(ValidationError::FiscalYearOutOfRange {
                year,
                min: MIN_FISCAL_YEAR,
                max: MAX_FISCAL_YEAR,
            });
        }
        Ok(Self(year))
    }

    pub const fn year(self) -> i32 {
        self.0
    }
}

impl Display for FiscalPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{}", self.0)
    }
}

/// Reporting unit of monetary figures in a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitScale {
    Ones,
    Thousands,
    Millions,
    Billions,
}

impl UnitScale {
    /// Multiplier that converts a figure at this scale to ones.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Ones => 1.0,
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ones => "ones",
            Self::Thousands => "thousands",
            Self::Millions => "millions",
            Self::Billions => "billions",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "ones" | "units" => Ok(Self::Ones),
            "thousands" | "k" => Ok(Self::Thousands),
            "millions" | "m" => Ok(Self::Millions),
            "billions" | "b" => Ok(Self::Billions),
            other => Err(ValidationError::InvalidUnitScale {
                value: other.to_owned(),
            }),
        }
    }

    /// Rescale `value` from this scale to `target`.
    pub fn convert(self, value: f64, target: Self) -> f64 {
        value * self.factor() / target.factor()
    }
}

impl Display for UnitScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fiscal period's normalized financial-statement line items as
/// produced by a statement source.
///
/// `free_cash_flow` is absent when the upstream statement carried no
/// usable figure for the period; the series builder records the gap
/// and continues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatementRecord {
    pub period_end: FiscalPeriod,
    pub free_cash_flow: Option<f64>,
    pub currency: String,
    pub unit_scale: UnitScale,
}

impl RawStatementRecord {
    pub fn new(
        period_end: FiscalPeriod,
        free_cash_flow: Option<f64>,
        currency: impl AsRef<str>,
        unit_scale: UnitScale,
    ) -> Result<Self, ValidationError> {
        validate_optional_finite("free_cash_flow", free_cash_flow)?;

        Ok(Self {
            period_end,
            free_cash_flow,
            currency: validate_currency_code(currency.as_ref())?,
            unit_scale,
        })
    }
}

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_optional_finite(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field });
        }
    }
    Ok(())
}
