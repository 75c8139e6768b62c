mod cli;
mod progress;
mod settings;

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use corpusprep_engine::{write_summary, NoProgress, ProgressSink, RunSummary};
use corpusprep_logging::{level_from_verbosity, prep_info, LogDestination};

use crate::cli::Cli;
use crate::progress::BarProgress;
use crate::settings::{Resolved, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    corpusprep_logging::initialize(destination, level_from_verbosity(cli.verbose, cli.quiet));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.settings {
        Some(path) => settings::load(path)?,
        None => Settings::default(),
    };
    let Resolved {
        plan,
        show_progress,
    } = settings::resolve(cli, &settings)?;

    let progress: Box<dyn ProgressSink> = if show_progress {
        Box::new(BarProgress::new())
    } else {
        Box::new(NoProgress)
    };
    let outcome = corpusprep_engine::run(&plan, progress.as_ref())
        .with_context(|| format!("failed to process {:?}", plan.input))?;

    println!("number of tokens: {}", outcome.total_tokens);

    if let Some(path) = &cli.summary {
        let summary = RunSummary::new(&plan, &outcome, Utc::now().to_rfc3339());
        let written = write_summary(path, &summary)
            .with_context(|| format!("failed to write summary {path:?}"))?;
        prep_info!("Wrote run summary to {:?}", written);
    }
    Ok(())
}
