//! The search run: validate, resolve the country, scrape, preview, save.

use std::path::PathBuf;

use common::{normalize_location, EmptyInput, LocationError, SearchRequest};
use thiserror::Error;
use tracing::info;

use crate::board::{JobBoard, ScrapeError, ScrapeQuery};
use crate::output::{default_writers, persist, PersistError, Saved, TableWriter};
use crate::preview::{columns_line, render_preview, PREVIEW_LIMIT};

/// Every way a run can stop before a file is saved.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    EmptyInput(#[from] EmptyInput),
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),
    #[error("search failed: {0}")]
    SearchFailure(#[from] ScrapeError),
    #[error("no jobs found")]
    EmptyResultSet,
    #[error(transparent)]
    PersistenceFailure(#[from] PersistError),
}

#[derive(Debug)]
pub struct Outcome {
    pub saved: Saved,
    pub total: usize,
}

pub struct Pipeline<'a, B: JobBoard> {
    board: &'a B,
    writers: Vec<Box<dyn TableWriter>>,
    output_dir: PathBuf,
}

impl<'a, B: JobBoard> Pipeline<'a, B> {
    pub fn new(board: &'a B, output_dir: impl Into<PathBuf>) -> Self {
        Pipeline {
            board,
            writers: default_writers(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_writers(mut self, writers: Vec<Box<dyn TableWriter>>) -> Self {
        self.writers = writers;
        self
    }

    /// Runs one search. `results_wanted` is expected to be validated already.
    pub fn run(
        &self,
        job_title: &str,
        location: &str,
        results_wanted: u32,
    ) -> Result<Outcome, SearchError> {
        let request = SearchRequest::new(job_title, location, results_wanted)?;

        let resolution = normalize_location(request.location_raw())?;
        if let Some(notice) = resolution.assumption_notice() {
            println!("ℹ️  {notice}");
        }
        let country = resolution.country();

        println!(
            "\n🔍 Searching {} for '{}' jobs in '{}' (country: {}, up to {} results)...\n",
            self.board.site(),
            request.job_title(),
            request.location_raw(),
            country,
            request.results_wanted()
        );

        let query = ScrapeQuery {
            site: self.board.site(),
            search_term: request.job_title(),
            location: request.location_raw(),
            results_wanted: request.results_wanted(),
            country,
        };
        let jobs = self.board.scrape(&query)?;
        info!(count = jobs.len(), "scrape finished");

        if jobs.is_empty() {
            return Err(SearchError::EmptyResultSet);
        }

        println!("✅ Available columns:");
        println!("   {}", columns_line());
        println!("\n📄 Top Job Results:");
        print!("{}", render_preview(&jobs, PREVIEW_LIMIT));

        let saved = persist(&self.writers, &self.output_dir, &request.file_stem(), &jobs)?;
        Ok(Outcome {
            saved,
            total: jobs.len(),
        })
    }
}

pub fn report_outcome(outcome: &Outcome) {
    for attempt in &outcome.saved.failed {
        println!(
            "\n⚠️  Could not save as {} ('{}'): {}",
            attempt.format,
            attempt.path.display(),
            attempt.error
        );
    }
    println!(
        "\n✅ {} results saved to '{}'",
        outcome.total,
        outcome.saved.path.display()
    );
}

/// Prints what went wrong and what the user can try next.
pub fn report_failure(err: &SearchError) {
    match err {
        SearchError::EmptyInput(e) => {
            println!("❌ Error: {}.", capitalize(&e.to_string()));
            println!("Exiting program.");
        }
        SearchError::InvalidLocation(e) => {
            println!("⚠️  Warning: {e}.");
            println!("Please use one of the following:");
            println!("{}", e.valid().join(", "));
            println!("Exiting program due to invalid country name.");
        }
        SearchError::SearchFailure(e) => {
            println!("❌ Error during job search: {e}");
            println!("This could be due to:");
            println!("  - The location is not supported by the job board");
            println!("  - A network connectivity issue");
            println!("  - Changes in the job board's pages or API");
        }
        SearchError::EmptyResultSet => {
            println!("😕 No results found. Try:");
            println!("  - A broader or different job title");
            println!("  - A different location");
            println!("  - Checking your internet connection");
        }
        SearchError::PersistenceFailure(e) => {
            println!("❌ Failed to save results:");
            for attempt in &e.attempts {
                println!(
                    "  - {} ('{}'): {}",
                    attempt.format,
                    attempt.path.display(),
                    attempt.error
                );
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
