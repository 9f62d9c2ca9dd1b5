//! Indeed Job Search
//!
//! Asks for a job title, a country and a number of results, searches
//! Indeed and saves the listings to jobs_<title>_<location>.xlsx

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use common::{parse_results_wanted, require_non_empty, Field};
use job_search::config::Args;
use job_search::pipeline::{report_failure, report_outcome, Pipeline, SearchError};
use job_search::prompt::ask;
use job_search::IndeedScraper;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    if let Err(e) = ctrlc::set_handler(|| {
        println!("\n\n⚠️  Search cancelled by user. Goodbye!");
        std::process::exit(0);
    }) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Unexpected error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("=== Indeed Job Search ===\n");

    let job_title = match args.title {
        Some(title) => title,
        None => ask("Enter the job title or keywords to search for: ")
            .context("failed to read the job title")?,
    };
    if let Err(e) = require_non_empty(Field::JobTitle, &job_title) {
        report_failure(&SearchError::from(e));
        return Ok(());
    }

    let location = match args.location {
        Some(location) => location,
        None => ask("Enter the job location (e.g. Morocco): ")
            .context("failed to read the location")?,
    };
    if let Err(e) = require_non_empty(Field::Location, &location) {
        report_failure(&SearchError::from(e));
        return Ok(());
    }

    let raw_count = match args.count {
        Some(count) => count,
        None => ask("Enter the number of job results you want (1-100): ")
            .context("failed to read the number of results")?,
    };
    let count = parse_results_wanted(&raw_count);
    if let Some(warning) = &count.warning {
        println!("⚠️  {warning}");
    }

    let scraper = IndeedScraper::new(Duration::from_secs(args.timeout_secs))
        .context("failed to build the HTTP client")?;
    let pipeline = Pipeline::new(&scraper, args.output_dir);

    match pipeline.run(&job_title, &location, count.value) {
        Ok(outcome) => report_outcome(&outcome),
        Err(e) => report_failure(&e),
    }
    Ok(())
}
