//! Discounting math and the end-to-end valuation pipeline.
//!
//! Everything here is pure arithmetic over immutable inputs: the same
//! `(records, parameters)` pair always yields a bit-identical report,
//! so concurrent runs for different tickers need no coordination.

use serde::{Deserialize, Serialize};

use crate::domain::{HistoricalSeries, RawStatementRecord, Ticker};
use crate::error::ValuationError;
use crate::growth::{GrowthEstimate, GrowthEstimator};
use crate::projection::{CashFlowProjector, ProjectedCashFlow};
use crate::series::HistoricalSeriesBuilder;

/// Immutable scalar assumptions for one valuation run.
///
/// All preconditions are checked once at construction; the engine
/// re-validates defensively before any cash-flow math executes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationParameters {
    pub lookback_periods: usize,
    /// Explicit projection horizon; defaults to the lookback window.
    pub projection_periods: Option<usize>,
    pub discount_rate: f64,
    pub growth_rate: f64,
    pub perpetual_growth_rate: f64,
}

impl ValuationParameters {
    pub fn new(
        lookback_periods: usize,
        projection_periods: Option<usize>,
        discount_rate: f64,
        growth_rate: f64,
        perpetual_growth_rate: f64,
    ) -> Result<Self, ValuationError> {
        let parameters = Self {
            lookback_periods,
            projection_periods,
            discount_rate,
            growth_rate,
            perpetual_growth_rate,
        };
        parameters.validate()?;
        Ok(parameters)
    }

    /// Number of future periods to project.
    pub fn horizon(&self) -> usize {
        self.projection_periods.unwrap_or(self.lookback_periods)
    }

    /// Fail fast on any mathematical precondition violation.
    pub fn validate(&self) -> Result<(), ValuationError> {
        if self.lookback_periods == 0 {
            return Err(ValuationError::invalid_parameter(
                "lookback_periods",
                "must be a positive number of periods",
            ));
        }
        if self.projection_periods == Some(0) {
            return Err(ValuationError::invalid_parameter(
                "projection_periods",
                "must be a positive number of periods when set",
            ));
        }
        if !self.discount_rate.is_finite() || self.discount_rate <= 0.0 {
            return Err(ValuationError::invalid_parameter(
                "discount_rate",
                format!("must be a finite positive rate, got {}", self.discount_rate),
            ));
        }
        if !self.growth_rate.is_finite() || self.growth_rate <= -1.0 {
            return Err(ValuationError::invalid_parameter(
                "growth_rate",
                format!(
                    "must be a finite value greater than -1 (-100%), got {}",
                    self.growth_rate
                ),
            ));
        }
        if !self.perpetual_growth_rate.is_finite() || self.perpetual_growth_rate <= -1.0 {
            return Err(ValuationError::invalid_parameter(
                "perpetual_growth_rate",
                format!(
                    "must be a finite value greater than -1 (-100%), got {}",
                    self.perpetual_growth_rate
                ),
            ));
        }
        if self.discount_rate <= self.perpetual_growth_rate {
            return Err(ValuationError::invalid_parameter(
                "perpetual_growth_rate",
                format!(
                    "must be strictly below the discount rate for the terminal value to be \
                     defined ({} >= {})",
                    self.perpetual_growth_rate, self.discount_rate
                ),
            ));
        }
        Ok(())
    }
}

/// Present-value breakdown of a projected cash-flow sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountedValuation {
    pub present_value_of_projection: f64,
    pub terminal_value_discounted: f64,
    pub intrinsic_value: f64,
}

/// Discounts projected flows and a Gordon-growth terminal value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountedValuationEngine;

impl DiscountedValuationEngine {
    /// Discount `projected` to present value.
    ///
    /// Terminal value uses the Gordon growth perpetuity on the final
    /// projected flow and is discounted over the full horizon.
    ///
    /// # Errors
    ///
    /// [`ValuationError::InvalidParameter`] when
    /// `discount_rate <= perpetual_growth_rate`, either rate is not
    /// finite, or `discount_rate <= -1`. Never divides by zero
    /// silently.
    pub fn discount(
        projected: &ProjectedCashFlow,
        discount_rate: f64,
        perpetual_growth_rate: f64,
    ) -> Result<DiscountedValuation, ValuationError> {
        if !discount_rate.is_finite() || discount_rate <= -1.0 {
            return Err(ValuationError::invalid_parameter(
                "discount_rate",
                format!("must be a finite value greater than -1, got {discount_rate}"),
            ));
        }
        if !perpetual_growth_rate.is_finite() || discount_rate <= perpetual_growth_rate {
            return Err(ValuationError::invalid_parameter(
                "perpetual_growth_rate",
                format!(
                    "must be finite and strictly below the discount rate \
                     ({perpetual_growth_rate} >= {discount_rate})"
                ),
            ));
        }

        let last = projected.last().ok_or_else(|| {
            ValuationError::invalid_parameter("projection_periods", "projection horizon is empty")
        })?;

        let present_value_of_projection: f64 = projected
            .flows
            .iter()
            .map(|flow| flow.fcf / (1.0 + discount_rate).powi(flow.period_index as i32))
            .sum();

        let terminal_value =
            last.fcf * (1.0 + perpetual_growth_rate) / (discount_rate - perpetual_growth_rate);
        let terminal_value_discounted =
            terminal_value / (1.0 + discount_rate).powi(last.period_index as i32);

        Ok(DiscountedValuation {
            present_value_of_projection,
            terminal_value_discounted,
            intrinsic_value: present_value_of_projection + terminal_value_discounted,
        })
    }
}

/// Structured output of one valuation run.
///
/// Immutable once assembled; inputs are retained for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub ticker: Ticker,
    pub parameters_used: ValuationParameters,
    pub historical_series_used: HistoricalSeries,
    /// Advisory historical growth estimate; `None` when the series
    /// makes it mathematically undefined (the run still succeeds).
    pub historical_growth: Option<GrowthEstimate>,
    pub projected_cash_flow: ProjectedCashFlow,
    pub present_value_of_projection: f64,
    pub terminal_value_discounted: f64,
    pub intrinsic_value: f64,
}

/// Run the full valuation pipeline over raw statement records.
///
/// Pipeline: build the historical series, estimate historical growth
/// (advisory), project from the latest observation with the
/// user-supplied growth rate, discount, assemble the report.
///
/// # Errors
///
/// Fails with exactly one [`ValuationError`] kind; parameter
/// validation runs before any series work. `UndefinedGrowth` from the
/// estimator is absorbed into the report rather than surfaced — the
/// projection does not depend on it.
pub fn compute_valuation(
    ticker: Ticker,
    raw_records: Vec<RawStatementRecord>,
    parameters: ValuationParameters,
) -> Result<ValuationReport, ValuationError> {
    parameters.validate()?;

    let series = HistoricalSeriesBuilder::new().extend(raw_records).build()?;

    let historical_growth =
        GrowthEstimator::estimate(&series, parameters.lookback_periods).ok();

    let base_fcf = series
        .latest()
        .map(|point| point.fcf)
        .ok_or(ValuationError::InsufficientHistory { usable: 0 })?;

    let projected =
        CashFlowProjector::project(base_fcf, parameters.growth_rate, parameters.horizon())?;

    let discounted = DiscountedValuationEngine::discount(
        &projected,
        parameters.discount_rate,
        parameters.perpetual_growth_rate,
    )?;

    Ok(ValuationReport {
        ticker,
        parameters_used: parameters,
        historical_series_used: series,
        historical_growth,
        projected_cash_flow: projected,
        present_value_of_projection: discounted.present_value_of_projection,
        terminal_value_discounted: discounted.terminal_value_discounted,
        intrinsic_value: discounted.intrinsic_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::CashFlowProjector;

    fn params(
        discount_rate: f64,
        growth_rate: f64,
        perpetual_growth_rate: f64,
    ) -> Result<ValuationParameters, ValuationError> {
        ValuationParameters::new(2, None, discount_rate, growth_rate, perpetual_growth_rate)
    }

    #[test]
    fn accepts_textbook_parameters() {
        assert!(params(0.08, 0.15, 0.025).is_ok());
    }

    #[test]
    fn rejects_non_positive_discount_rate() {
        let err = params(0.0, 0.15, -0.5).expect_err("must fail");
        assert!(matches!(
            err,
            ValuationError::InvalidParameter {
                field: "discount_rate",
                ..
            }
        ));
    }

    #[test]
    fn rejects_perpetual_growth_at_discount_rate() {
        // Equality would divide by zero in the terminal value.
        let err = params(0.05, 0.15, 0.05).expect_err("must fail");
        assert!(matches!(
            err,
            ValuationError::InvalidParameter {
                field: "perpetual_growth_rate",
                ..
            }
        ));
    }

    #[test]
    fn rejects_growth_rate_at_minus_one() {
        let err = params(0.08, -1.0, 0.025).expect_err("must fail");
        assert!(matches!(
            err,
            ValuationError::InvalidParameter {
                field: "growth_rate",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_lookback() {
        let err = ValuationParameters::new(0, None, 0.08, 0.15, 0.025).expect_err("must fail");
        assert!(matches!(
            err,
            ValuationError::InvalidParameter {
                field: "lookback_periods",
                ..
            }
        ));
    }

    #[test]
    fn horizon_defaults_to_lookback() -> Result<(), ValuationError> {
        let p = ValuationParameters::new(4, None, 0.08, 0.15, 0.025)?;
        assert_eq!(p.horizon(), 4);

        let p = ValuationParameters::new(4, Some(6), 0.08, 0.15, 0.025)?;
        assert_eq!(p.horizon(), 6);
        Ok(())
    }

    #[test]
    fn discounts_projection_and_terminal_value() -> Result<(), ValuationError> {
        // fcf0 = 121 at 15% growth: 139.15, 160.0225.
        let projected = CashFlowProjector::project(121.0, 0.15, 2)?;
        let result = DiscountedValuationEngine::discount(&projected, 0.08, 0.025)?;

        let pv_expected = 139.15 / 1.08 + 160.0225 / 1.08_f64.powi(2);
        let tv = 160.0225 * 1.025 / (0.08 - 0.025);
        let tv_discounted = tv / 1.08_f64.powi(2);

        assert!((result.present_value_of_projection - pv_expected).abs() < 1e-9);
        assert!((result.terminal_value_discounted - tv_discounted).abs() < 1e-9);
        assert!(
            (result.intrinsic_value - (pv_expected + tv_discounted)).abs() < 1e-9
        );
        Ok(())
    }

    #[test]
    fn discount_rejects_rate_equal_to_perpetual_growth() -> Result<(), ValuationError> {
        let projected = CashFlowProjector::project(100.0, 0.1, 3)?;
        let err = DiscountedValuationEngine::discount(&projected, 0.05, 0.05)
            .expect_err("must fail before dividing by zero");
        assert!(matches!(err, ValuationError::InvalidParameter { .. }));
        Ok(())
    }

    #[test]
    fn intrinsic_value_is_finite_for_valid_rates() -> Result<(), ValuationError> {
        for &(dr, pg) in &[(0.12, 0.03), (0.05, -0.02), (0.3, 0.0), (0.08, 0.079)] {
            let projected = CashFlowProjector::project(500.0, 0.1, 5)?;
            let result = DiscountedValuationEngine::discount(&projected, dr, pg)?;
            assert!(result.intrinsic_value.is_finite(), "dr={dr} pg={pg}");
            assert!(!result.intrinsic_value.is_nan());
        }
        Ok(())
    }
}
