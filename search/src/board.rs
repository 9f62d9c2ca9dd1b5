use common::{Country, Job, Site};
use thiserror::Error;

/// Parameters of one scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeQuery<'a> {
    pub site: Site,
    pub search_term: &'a str,
    pub location: &'a str,
    pub results_wanted: u32,
    pub country: Country,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{0}")]
    Other(String),
}

/// A job board that can be searched. The pipeline only ever talks to this.
pub trait JobBoard {
    fn site(&self) -> Site;

    /// Blocks until the board has answered. Returns at most
    /// `query.results_wanted` jobs, in the board's order.
    fn scrape(&self, query: &ScrapeQuery<'_>) -> Result<Vec<Job>, ScrapeError>;
}
