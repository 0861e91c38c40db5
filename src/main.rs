mod age;
mod calendar;
mod input;
mod render;
mod validate;

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use input::BirthDateInput;
use render::{Format, Report};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Tells how old someone is in years, months and days.
///
/// With --day, --month or --year the date is evaluated once. Without them,
/// each line read from stdin (`D/M/Y` or `D M Y`) is evaluated in turn.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Day of birth, 1-31.
    #[arg(long, short)]
    day: Option<String>,
    /// Month of birth, 1-12.
    #[arg(long, short)]
    month: Option<String>,
    /// Year of birth.
    #[arg(long, short)]
    year: Option<String>,
    /// Reference date (YYYY-MM-DD). Defaults to the local calendar date.
    #[arg(long, env = "AGECALC_TODAY")]
    today: Option<NaiveDate>,
    /// Output format.
    #[arg(long, short, value_enum, env = "AGECALC_FORMAT", default_value_t = Format::Text)]
    format: Format,
}

impl Args {
    fn one_shot(&self) -> Option<BirthDateInput> {
        if self.day.is_none() && self.month.is_none() && self.year.is_none() {
            return None;
        }
        Some(BirthDateInput::from_fields(
            self.day.as_deref().unwrap_or(""),
            self.month.as_deref().unwrap_or(""),
            self.year.as_deref().unwrap_or(""),
        ))
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn report_for(input: &BirthDateInput, today: NaiveDate) -> Report {
    debug!(?input, %today, "evaluating birth date");
    let outcome = age::evaluate(input, today);
    match &outcome {
        Ok(age) => debug!(%age, "age calculated"),
        Err(result) => warn!(errors = result.errors().len(), "birth date rejected"),
    }
    Report::from(outcome)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut stdout = tokio::io::stdout();

    if let Some(input) = args.one_shot() {
        info!("single evaluation from arguments");
        let report = report_for(&input, args.today());
        emit(&mut stdout, &report, args.format).await?;

        return Ok(if report.accepted() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    info!("reading birth dates from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        if line.trim().is_empty() {
            continue;
        }
        let input = BirthDateInput::from_line(&line);
        let report = report_for(&input, args.today());
        emit(&mut stdout, &report, args.format).await?;
    }

    Ok(ExitCode::SUCCESS)
}

async fn emit(stdout: &mut Stdout, report: &Report, format: Format) -> Result<()> {
    let out = ensure_newline(report.render(format)?);
    stdout
        .write_all(out.as_bytes())
        .await
        .context("Failed to write report")?;
    stdout.flush().await.context("Failed to flush stdout")
}

fn ensure_newline(mut out: String) -> String {
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
