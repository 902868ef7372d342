mod statements;
mod value;

use std::sync::Arc;

use fairtick_core::{ReqwestHttpClient, YahooStatementSource};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use statements::StatementsOutput;

/// Dispatch the parsed invocation and render the result.
pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let source = build_source(cli);

    match &cli.command {
        Command::Value(args) => {
            let report = value::run(args, &source).await?;
            crate::output::render_report(&report, cli.format, cli.pretty)?;
        }
        Command::Statements(args) => {
            let output = statements::run(args, &source).await?;
            crate::output::render_statements(&output, cli.format, cli.pretty)?;
        }
    }

    Ok(())
}

fn build_source(cli: &Cli) -> YahooStatementSource {
    if cli.offline {
        YahooStatementSource::default()
    } else {
        YahooStatementSource::with_http_client(Arc::new(ReqwestHttpClient::new()))
            .with_timeout_ms(cli.timeout_ms)
    }
}
