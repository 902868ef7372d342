//! Deterministic forward projection of free cash flows.

use serde::{Deserialize, Serialize};

use crate::error::ValuationError;

/// One projected annual cash flow, `period_index` years out from the
/// last historical observation (index starts at 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedFlow {
    pub period_index: u32,
    pub fcf: f64,
}

/// Ordered projected cash-flow sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCashFlow {
    /// Last known historical free cash flow the projection compounds
    /// from.
    pub base_fcf: f64,
    pub flows: Vec<ProjectedFlow>,
}

impl ProjectedCashFlow {
    pub fn horizon(&self) -> usize {
        self.flows.len()
    }

    pub fn last(&self) -> Option<&ProjectedFlow> {
        self.flows.last()
    }
}

/// Projects future annual cash flows by compounding a growth rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashFlowProjector;

impl CashFlowProjector {
    /// Compute `fcf[t] = base * (1 + growth_rate)^t` for `t = 1..=horizon`.
    ///
    /// No smoothing and no stochastic component: the output is a pure
    /// function of the three inputs.
    ///
    /// # Errors
    ///
    /// [`ValuationError::InvalidParameter`] when `growth_rate <= -1`
    /// (compounding would turn cash flows non-positive or undefined),
    /// when `growth_rate` is not finite, or when `horizon` is zero.
    pub fn project(
        base_fcf: f64,
        growth_rate: f64,
        horizon: usize,
    ) -> Result<ProjectedCashFlow, ValuationError> {
        if !growth_rate.is_finite() || growth_rate <= -1.0 {
            return Err(ValuationError::invalid_parameter(
                "growth_rate",
                format!("must be a finite value greater than -1, got {growth_rate}"),
            ));
        }
        if horizon == 0 {
            return Err(ValuationError::invalid_parameter(
                "projection_periods",
                "projection horizon must be at least 1",
            ));
        }

        let mut flows = Vec::with_capacity(horizon);
        let mut fcf = base_fcf;
        for t in 1..=horizon {
            fcf *= 1.0 + growth_rate;
            flows.push(ProjectedFlow {
                period_index: t as u32,
                fcf,
            });
        }

        Ok(ProjectedCashFlow { base_fcf, flows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compounds_from_base_value() -> Result<(), ValuationError> {
        let projected = CashFlowProjector::project(121.0, 0.15, 2)?;

        assert_eq!(projected.horizon(), 2);
        assert_eq!(projected.flows[0].period_index, 1);
        assert!((projected.flows[0].fcf - 139.15).abs() < 1e-9);
        assert!((projected.flows[1].fcf - 160.0225).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn negative_growth_shrinks_flows() -> Result<(), ValuationError> {
        let projected = CashFlowProjector::project(100.0, -0.5, 2)?;

        assert_eq!(projected.flows[0].fcf, 50.0);
        assert_eq!(projected.flows[1].fcf, 25.0);
        Ok(())
    }

    #[test]
    fn rejects_growth_at_or_below_minus_one() {
        let err = CashFlowProjector::project(100.0, -1.0, 3).expect_err("must fail");
        assert!(matches!(err, ValuationError::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_zero_horizon() {
        let err = CashFlowProjector::project(100.0, 0.1, 0).expect_err("must fail");
        assert!(matches!(err, ValuationError::InvalidParameter { .. }));
    }
}
