use std::path::PathBuf;

use clap::Parser;

/// Search Indeed for jobs and save them to a spreadsheet.
///
/// Anything not given on the command line is asked for interactively.
#[derive(Debug, Parser)]
#[command(name = "job-search", version, about)]
pub struct Args {
    /// Job title or keywords to search for
    #[arg(short, long, env = "JOB_SEARCH_TITLE")]
    pub title: Option<String>,

    /// Country to search in (e.g. Morocco, uk, usa)
    #[arg(short, long, env = "JOB_SEARCH_LOCATION")]
    pub location: Option<String>,

    /// Number of results wanted (1-100)
    #[arg(short = 'n', long, env = "JOB_SEARCH_COUNT")]
    pub count: Option<String>,

    /// Directory the results file is written to
    #[arg(short, long, env = "JOB_SEARCH_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// HTTP timeout for each Indeed request, in seconds
    #[arg(long, env = "JOB_SEARCH_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}
