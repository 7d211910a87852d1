//! Command implementations for the meteorite filter CLI
//!
//! This module contains the run orchestration: logging and configuration
//! setup, gathering the request, and the load → filter → export pipeline.

use crate::app::services::catalog_loader::{LoadStats, load_catalog};
use crate::app::services::exporters::{ExportReport, OutputSink, export};
use crate::app::services::range_filter::{FilterStats, apply_range_filter};
use crate::cli::args::Args;
use crate::cli::input::{Prompted, Prompter, SessionRequest};
use crate::config::Config;
use crate::constants::{EXIT_MESSAGE, WELCOME_BANNER};
use crate::{Error, Result};
use colored::*;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub load_stats: LoadStats,
    pub filter_stats: FilterStats,
    pub report: ExportReport,
    pub processing_time: Duration,
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// The user quit at a prompt
    Quit,
}

/// Main command runner
///
/// 1. Set up logging and configuration
/// 2. Take the request from the arguments, prompting for anything missing
/// 3. Load, filter and export
/// 4. Report the outcome
pub fn run(args: Args) -> Result<RunOutcome> {
    setup_logging(&args)?;

    info!("Starting meteorite filter");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let draft = args.request_draft();
    let interactive = draft.complete().is_none();

    let request = match draft.complete() {
        Some(request) => request,
        None => {
            println!("{}", "~".repeat(100).bright_blue());
            println!("{}", WELCOME_BANNER);
            println!("{}", "~".repeat(100).bright_blue());

            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            match prompter.gather(draft)? {
                Prompted::Value(request) => request,
                Prompted::Quit => {
                    info!("User quit before the run started");
                    return Ok(RunOutcome::Quit);
                }
            }
        }
    };

    let mut stdout = io::stdout();
    let summary = execute(&request, &config, &mut stdout)?;
    print_summary(&summary);

    if interactive {
        println!("{}", EXIT_MESSAGE);
    }

    Ok(RunOutcome::Completed(summary))
}

/// Run the load → filter → export pipeline for one request
///
/// `console` receives the table when the request's sink is the console.
pub fn execute<W: Write>(
    request: &SessionRequest,
    config: &Config,
    console: &mut W,
) -> Result<RunSummary> {
    let start_time = Instant::now();

    let catalog = load_catalog(
        &request.input_file,
        request.mode,
        config.parse_error_policy,
    )?;

    for message in &catalog.stats().error_messages {
        warn!("Rejected: {}", message);
    }

    if catalog.is_empty() {
        warn!("No records in {}", request.input_file.display());
    }
    debug!("Filtering {} records by {}", catalog.len(), request.filter);

    let mut filter_stats = FilterStats::new();
    let selected = apply_range_filter(catalog.records(), &request.filter, &mut filter_stats);

    let report = export(request.sink, &selected, config, console)?;

    Ok(RunSummary {
        load_stats: catalog.stats().clone(),
        filter_stats,
        report,
        processing_time: start_time.elapsed(),
    })
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("meteorite_filter={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, then environment, then CLI arguments
fn load_configuration(args: &Args) -> Result<Config> {
    let mut config = Config::from_env()?;
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.filter_stats;
    let rejected = summary.load_stats.lines_rejected;

    let matched = format!(
        "{} of {} records matched ({:.1}%)",
        stats.matched,
        stats.examined,
        stats.match_rate()
    );

    match (&summary.report.sink, &summary.report.destination) {
        (OutputSink::Console, _) | (_, None) => println!("\n{}", matched.green()),
        (_, Some(path)) => println!(
            "\n{} Filtered output sent to \"{}\"",
            matched.green(),
            path.display().to_string().bold()
        ),
    }

    if rejected > 0 {
        println!(
            "{}",
            format!("{} malformed lines were skipped", rejected).yellow()
        );
    }

    debug!("Run finished in {:.2?}", summary.processing_time);
}
