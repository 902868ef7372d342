//! Behavior tests for historical series assembly.

use fairtick_core::{
    FiscalPeriod, HistoricalSeriesBuilder, RawStatementRecord, UnitScale, ValuationError,
};
use fairtick_tests::usd_record;

#[test]
fn output_is_strictly_ascending_with_no_duplicate_periods() {
    // Given: shuffled records including a restated 2021 figure
    let series = HistoricalSeriesBuilder::new()
        .push(usd_record(2022, Some(121.0)))
        .push(usd_record(2020, Some(100.0)))
        .push(usd_record(2021, Some(108.0)))
        .push(usd_record(2021, Some(110.0)))
        .build()
        .expect("series builds");

    // Then: sorted, deduplicated, later restatement wins
    let years: Vec<i32> = series.points.iter().map(|p| p.period.year()).collect();
    assert_eq!(years, vec![2020, 2021, 2022]);
    assert!(years.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(series.points[1].fcf, 110.0);
}

#[test]
fn mixed_unit_scales_share_one_arithmetic_basis() {
    let record = |year: i32, fcf: f64, scale: UnitScale| {
        RawStatementRecord::new(
            FiscalPeriod::from_year(year).expect("year"),
            Some(fcf),
            "USD",
            scale,
        )
        .expect("record")
    };

    let series = HistoricalSeriesBuilder::new()
        .push(record(2021, 1_500_000.0, UnitScale::Thousands))
        .push(record(2022, 1_650.0, UnitScale::Millions))
        .with_target_scale(UnitScale::Millions)
        .build()
        .expect("series builds");

    assert_eq!(series.unit_scale, UnitScale::Millions);
    assert_eq!(series.points[0].fcf, 1_500.0);
    assert_eq!(series.points[1].fcf, 1_650.0);
}

#[test]
fn currency_mix_fails_with_data_inconsistency() {
    let eur = RawStatementRecord::new(
        FiscalPeriod::from_year(2022).expect("year"),
        Some(110.0),
        "EUR",
        UnitScale::Ones,
    )
    .expect("record");

    let err = HistoricalSeriesBuilder::new()
        .push(usd_record(2021, Some(100.0)))
        .push(eur)
        .build()
        .expect_err("must fail");

    match err {
        ValuationError::DataInconsistency { expected, found } => {
            assert_eq!(expected, "USD");
            assert_eq!(found, "EUR");
        }
        other => panic!("expected DataInconsistency, got {other:?}"),
    }
}

#[test]
fn absent_figures_are_recorded_as_gaps_not_errors() {
    let series = HistoricalSeriesBuilder::new()
        .push(usd_record(2019, Some(90.0)))
        .push(usd_record(2020, None))
        .push(usd_record(2021, Some(110.0)))
        .push(usd_record(2022, Some(121.0)))
        .build()
        .expect("series builds");

    assert_eq!(series.len(), 3);
    assert_eq!(series.gaps.len(), 1);
    assert_eq!(series.gaps[0].year(), 2020);
}

#[test]
fn too_thin_history_is_a_terminal_outcome() {
    let err = HistoricalSeriesBuilder::new()
        .push(usd_record(2022, Some(121.0)))
        .build()
        .expect_err("must fail");

    assert!(matches!(
        err,
        ValuationError::InsufficientHistory { usable: 1 }
    ));
}
