use serde::Serialize;

use fairtick_core::{
    HistoricalSeries, HistoricalSeriesBuilder, ProviderId, StatementSource, StatementsRequest,
    Ticker, YahooStatementSource,
};

use crate::cli::StatementsArgs;
use crate::error::CliError;

/// Normalized series output for the `statements` command.
#[derive(Debug, Serialize)]
pub struct StatementsOutput {
    pub ticker: Ticker,
    pub provider: ProviderId,
    pub series: HistoricalSeries,
}

pub async fn run(
    args: &StatementsArgs,
    source: &YahooStatementSource,
) -> Result<StatementsOutput, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;

    let request = StatementsRequest::new(ticker.clone(), args.period_backwards)?;
    let batch = source.statements(request).await?;

    let series = HistoricalSeriesBuilder::new().extend(batch.records).build()?;

    Ok(StatementsOutput {
        ticker,
        provider: source.id(),
        series,
    })
}
