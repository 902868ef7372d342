//! Historical growth-rate estimation.
//!
//! The estimate is advisory: the valuation pipeline records it on the
//! report for sanity-checking against the user-supplied growth
//! assumption, but projection never consumes it.

use serde::{Deserialize, Serialize};

use crate::domain::HistoricalSeries;
use crate::error::ValuationError;

/// How a [`GrowthEstimate`] was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthMethod {
    /// Compound rate between the window endpoints:
    /// `(fcf_latest / fcf_earliest)^(1/(n-1)) - 1`.
    Compound,
    /// Mean of year-over-year simple growth rates over transitions
    /// where both endpoints are positive. Fallback when the compound
    /// formula is undefined (zero or negative endpoint).
    AverageYearOverYear,
}

/// Representative historical growth rate for a series window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthEstimate {
    pub rate: f64,
    /// Window length actually used, at most the requested lookback.
    pub periods_used: usize,
    pub method: GrowthMethod,
}

/// Derives a single historical growth rate from a series.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthEstimator;

impl GrowthEstimator {
    /// Estimate growth over the trailing `lookback` periods.
    ///
    /// # Errors
    ///
    /// [`ValuationError::UndefinedGrowth`] when the window has fewer
    /// than two points, or sign changes leave no transition over which
    /// a growth rate is defined.
    pub fn estimate(
        series: &HistoricalSeries,
        lookback: usize,
    ) -> Result<GrowthEstimate, ValuationError> {
        let window = series.window(lookback);
        let n = window.len();

        if n < 2 {
            return Err(ValuationError::UndefinedGrowth {
                reason: format!("{n} usable period(s) in window, need at least 2"),
            });
        }

        let earliest = window[0].fcf;
        let latest = window[n - 1].fcf;

        if earliest > 0.0 && latest > 0.0 {
            let rate = (latest / earliest).powf(1.0 / (n - 1) as f64) - 1.0;
            return Ok(GrowthEstimate {
                rate,
                periods_used: n,
                method: GrowthMethod::Compound,
            });
        }

        // Endpoint is zero or negative: compound rate undefined. Fall
        // back to averaging year-over-year rates where both sides of
        // the transition are positive.
        let mut rates = Vec::with_capacity(n - 1);
        for pair in window.windows(2) {
            let (from, to) = (pair[0].fcf, pair[1].fcf);
            if from > 0.0 && to > 0.0 {
                rates.push(to / from - 1.0);
            }
        }

        if rates.is_empty() {
            return Err(ValuationError::UndefinedGrowth {
                reason: String::from(
                    "no transition with positive endpoints in the lookback window",
                ),
            });
        }

        let rate = rates.iter().sum::<f64>() / rates.len() as f64;
        Ok(GrowthEstimate {
            rate,
            periods_used: n,
            method: GrowthMethod::AverageYearOverYear,
        })
    }
}
