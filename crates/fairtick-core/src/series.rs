//! Assembly of raw statement records into a clean historical series.
//!
//! The builder tolerates the shapes real statement sources produce:
//! unordered records, restated duplicate periods, missing figures, and
//! mixed reporting scales. What it will not tolerate is a currency mix
//! with no conversion path, or a series too thin to reason about.

use crate::domain::{FcfPoint, FiscalPeriod, HistoricalSeries, RawStatementRecord, UnitScale};
use crate::error::ValuationError;

/// Builds a [`HistoricalSeries`] from raw statement records.
///
/// Pure transformation: sorting, deduplication, gap recording, and
/// unit-scale normalization happen in `build`; the builder itself does
/// no I/O.
#[derive(Debug, Clone)]
pub struct HistoricalSeriesBuilder {
    records: Vec<RawStatementRecord>,
    target_scale: UnitScale,
}

impl Default for HistoricalSeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoricalSeriesBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            target_scale: UnitScale::Ones,
        }
    }

    /// Unit scale the finished series is normalized to.
    pub fn with_target_scale(mut self, scale: UnitScale) -> Self {
        self.target_scale = scale;
        self
    }

    pub fn push(mut self, record: RawStatementRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn extend(mut self, records: impl IntoIterator<Item = RawStatementRecord>) -> Self {
        self.records.extend(records);
        self
    }

    /// Assemble the series.
    ///
    /// # Errors
    ///
    /// - [`ValuationError::DataInconsistency`] when records mix
    ///   currencies (no FX conversion path is supplied here).
    /// - [`ValuationError::InsufficientHistory`] when fewer than two
    ///   usable periods remain after dropping records with absent
    ///   free cash flow.
    pub fn build(self) -> Result<HistoricalSeries, ValuationError> {
        let Self {
            mut records,
            target_scale,
        } = self;

        if records.is_empty() {
            return Err(ValuationError::InsufficientHistory { usable: 0 });
        }

        records.sort_by_key(|record| record.period_end);

        // Single-currency invariant: the first record sets the basis.
        let currency = records[0].currency.clone();
        if let Some(stray) = records.iter().find(|record| record.currency != currency) {
            return Err(ValuationError::DataInconsistency {
                expected: currency,
                found: stray.currency.clone(),
            });
        }

        let mut points: Vec<FcfPoint> = Vec::with_capacity(records.len());
        let mut gaps: Vec<FiscalPeriod> = Vec::new();

        for record in records {
            match record.free_cash_flow {
                Some(fcf) => {
                    let fcf = record.unit_scale.convert(fcf, target_scale);
                    let point = FcfPoint {
                        period: record.period_end,
                        fcf,
                    };
                    // Restated duplicate period: keep the later record.
                    match points.last_mut() {
                        Some(last) if last.period == point.period => *last = point,
                        _ => points.push(point),
                    }
                }
                None => {
                    if gaps.last() != Some(&record.period_end) {
                        gaps.push(record.period_end);
                    }
                }
            }
        }

        // A period that was both restated-empty and filled elsewhere is
        // not a gap.
        gaps.retain(|gap| points.iter().all(|point| point.period != *gap));

        if points.len() < 2 {
            return Err(ValuationError::InsufficientHistory {
                usable: points.len(),
            });
        }

        Ok(HistoricalSeries {
            currency,
            unit_scale: target_scale,
            points,
            gaps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn record(
        year: i32,
        fcf: Option<f64>,
        currency: &str,
        scale: UnitScale,
    ) -> RawStatementRecord {
        RawStatementRecord::new(
            FiscalPeriod::from_year(year).expect("year"),
            fcf,
            currency,
            scale,
        )
        .expect("record")
    }

    #[test]
    fn sorts_unordered_records_strictly_ascending() -> Result<(), ValuationError> {
        let series = HistoricalSeriesBuilder::new()
            .push(record(2022, Some(121.0), "USD", UnitScale::Ones))
            .push(record(2020, Some(100.0), "USD", UnitScale::Ones))
            .push(record(2021, Some(110.0), "USD", UnitScale::Ones))
            .build()?;

        let years: Vec<i32> = series.points.iter().map(|p| p.period.year()).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
        Ok(())
    }

    #[test]
    fn normalizes_mixed_unit_scales() -> Result<(), ValuationError> {
        let series = HistoricalSeriesBuilder::new()
            .push(record(2021, Some(100_000.0), "USD", UnitScale::Thousands))
            .push(record(2022, Some(110.0), "USD", UnitScale::Millions))
            .build()?;

        assert_eq!(series.unit_scale, UnitScale::Ones);
        assert_eq!(series.points[0].fcf, 100_000_000.0);
        assert_eq!(series.points[1].fcf, 110_000_000.0);
        Ok(())
    }

    #[test]
    fn records_gaps_for_absent_figures() -> Result<(), ValuationError> {
        let series = HistoricalSeriesBuilder::new()
            .push(record(2020, Some(100.0), "USD", UnitScale::Ones))
            .push(record(2021, None, "USD", UnitScale::Ones))
            .push(record(2022, Some(121.0), "USD", UnitScale::Ones))
            .build()?;

        assert_eq!(series.len(), 2);
        assert_eq!(series.gaps.len(), 1);
        assert_eq!(series.gaps[0].year(), 2021);
        Ok(())
    }

    #[test]
    fn later_record_wins_for_restated_period() -> Result<(), ValuationError> {
        let series = HistoricalSeriesBuilder::new()
            .push(record(2021, Some(100.0), "USD", UnitScale::Ones))
            .push(record(2021, Some(105.0), "USD", UnitScale::Ones))
            .push(record(2022, Some(121.0), "USD", UnitScale::Ones))
            .build()?;

        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].fcf, 105.0);
        Ok(())
    }

    #[test]
    fn fails_on_currency_mix() {
        let err = HistoricalSeriesBuilder::new()
            .push(record(2021, Some(100.0), "USD", UnitScale::Ones))
            .push(record(2022, Some(110.0), "EUR", UnitScale::Ones))
            .build()
            .expect_err("must fail");

        assert!(matches!(err, ValuationError::DataInconsistency { .. }));
    }

    #[test]
    fn fails_with_fewer_than_two_usable_periods() {
        let err = HistoricalSeriesBuilder::new()
            .push(record(2020, None, "USD", UnitScale::Ones))
            .push(record(2021, None, "USD", UnitScale::Ones))
            .push(record(2022, Some(121.0), "USD", UnitScale::Ones))
            .build()
            .expect_err("must fail");

        assert!(matches!(
            err,
            ValuationError::InsufficientHistory { usable: 1 }
        ));
    }

    #[test]
    fn fails_on_empty_input() {
        let err = HistoricalSeriesBuilder::new().build().expect_err("must fail");
        assert!(matches!(
            err,
            ValuationError::InsufficientHistory { usable: 0 }
        ));
    }

    #[test]
    fn record_construction_normalizes_currency() -> Result<(), ValidationError> {
        let record = RawStatementRecord::new(
            FiscalPeriod::from_year(2022)?,
            Some(1.0),
            "usd",
            UnitScale::Ones,
        )?;
        assert_eq!(record.currency, "USD");
        Ok(())
    }
}
