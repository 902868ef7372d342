use serde::{Deserialize, Serialize};

use super::{FiscalPeriod, UnitScale};

/// One usable historical observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcfPoint {
    pub period: FiscalPeriod,
    /// Free cash flow at the series' common unit scale.
    pub fcf: f64,
}

/// Clean historical free-cash-flow series.
///
/// Points are strictly increasing by period, share one currency and
/// one unit scale, and contain at least two observations (the builder
/// enforces all three).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub currency: String,
    pub unit_scale: UnitScale,
    pub points: Vec<FcfPoint>,
    /// Periods dropped because the upstream record carried no usable
    /// free-cash-flow figure.
    pub gaps: Vec<FiscalPeriod>,
}

impl HistoricalSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation. The builder guarantees at least two
    /// points, so this only returns `None` for hand-built empty series.
    pub fn latest(&self) -> Option<&FcfPoint> {
        self.points.last()
    }

    pub fn earliest(&self) -> Option<&FcfPoint> {
        self.points.first()
    }

    /// Trailing window of at most `lookback` points, best effort when
    /// the available history is shorter.
    pub fn window(&self, lookback: usize) -> &[FcfPoint] {
        let start = self.points.len().saturating_sub(lookback);
        &self.points[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn point(year: i32, fcf: f64) -> FcfPoint {
        FcfPoint {
            period: FiscalPeriod::from_year(year).expect("year"),
            fcf,
        }
    }

    fn series(points: Vec<FcfPoint>) -> HistoricalSeries {
        HistoricalSeries {
            currency: String::from("USD"),
            unit_scale: UnitScale::Ones,
            points,
            gaps: Vec::new(),
        }
    }

    #[test]
    fn window_is_best_effort_when_history_is_short() -> Result<(), ValidationError> {
        let s = series(vec![point(2021, 90.0), point(2022, 100.0)]);

        assert_eq!(s.window(4).len(), 2);
        assert_eq!(s.window(1).len(), 1);
        assert_eq!(s.window(1)[0].period.year(), 2022);
        Ok(())
    }

    #[test]
    fn latest_and_earliest_track_order() {
        let s = series(vec![point(2020, 80.0), point(2021, 90.0), point(2022, 100.0)]);

        assert_eq!(s.earliest().expect("earliest").period.year(), 2020);
        assert_eq!(s.latest().expect("latest").fcf, 100.0);
    }
}
