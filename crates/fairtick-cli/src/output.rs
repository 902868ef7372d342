use fairtick_core::{GrowthMethod, ValuationReport};

use crate::cli::OutputFormat;
use crate::commands::StatementsOutput;
use crate::error::CliError;

pub fn render_report(
    report: &ValuationReport,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json | OutputFormat::Ndjson => render_json(report, format, pretty),
        OutputFormat::Table => {
            render_report_table(report);
            Ok(())
        }
    }
}

pub fn render_statements(
    output: &StatementsOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json | OutputFormat::Ndjson => render_json(output, format, pretty),
        OutputFormat::Table => {
            render_statements_table(output);
            Ok(())
        }
    }
}

fn render_json<T: serde::Serialize>(
    value: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let payload = if pretty && format == OutputFormat::Json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{payload}");
    Ok(())
}

fn render_report_table(report: &ValuationReport) {
    println!("ticker            : {}", report.ticker);
    println!(
        "history           : {} period(s), {} {}",
        report.historical_series_used.len(),
        report.historical_series_used.currency,
        report.historical_series_used.unit_scale,
    );
    if !report.historical_series_used.gaps.is_empty() {
        let gaps: Vec<String> = report
            .historical_series_used
            .gaps
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("gaps              : {}", gaps.join(","));
    }
    match &report.historical_growth {
        Some(estimate) => {
            let method = match estimate.method {
                GrowthMethod::Compound => "compound",
                GrowthMethod::AverageYearOverYear => "avg yoy",
            };
            println!(
                "historical growth : {:.2}% ({method}, {} periods)",
                estimate.rate * 100.0,
                estimate.periods_used,
            );
        }
        None => println!("historical growth : undefined for this series"),
    }
    println!(
        "assumptions       : growth {:.2}%, discount {:.2}%, perpetual {:.2}%",
        report.parameters_used.growth_rate * 100.0,
        report.parameters_used.discount_rate * 100.0,
        report.parameters_used.perpetual_growth_rate * 100.0,
    );
    println!("horizon           : {} year(s)", report.projected_cash_flow.horizon());
    println!(
        "pv of projection  : {:.2}",
        report.present_value_of_projection
    );
    println!(
        "terminal value pv : {:.2}",
        report.terminal_value_discounted
    );
    println!("intrinsic value   : {:.2}", report.intrinsic_value);
}

fn render_statements_table(output: &StatementsOutput) {
    println!("ticker   : {}", output.ticker);
    println!("provider : {}", output.provider);
    println!(
        "currency : {} ({})",
        output.series.currency, output.series.unit_scale
    );
    for point in &output.series.points {
        println!("{} : {:.2}", point.period, point.fcf);
    }
    for gap in &output.series.gaps {
        println!("{gap} : (no usable figure)");
    }
}
