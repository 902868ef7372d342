use fairtick_core::{
    compute_valuation, StatementSource, StatementsRequest, Ticker, ValuationParameters,
    ValuationReport, YahooStatementSource,
};

use crate::cli::ValueArgs;
use crate::error::CliError;

pub async fn run(
    args: &ValueArgs,
    source: &YahooStatementSource,
) -> Result<ValuationReport, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;

    // Fail fast on assumption errors before any fetch happens.
    let parameters = ValuationParameters::new(
        args.period_backwards,
        args.period_forwards,
        args.discount_rate,
        args.growth_rate,
        args.perpetual_growth_rate,
    )?;

    let request = StatementsRequest::new(ticker.clone(), args.period_backwards)?;
    let batch = source.statements(request).await?;

    let report = compute_valuation(ticker, batch.records, parameters)?;
    Ok(report)
}
