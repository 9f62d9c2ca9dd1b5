//! Shared types for the job search workspace: the job record written to disk,
//! the country table Indeed understands, and validation of user input.

pub mod count;
pub mod country;
pub mod job;
pub mod request;

pub use count::{parse_results_wanted, CountWarning, ResultsWanted, DEFAULT_RESULTS, MAX_RESULTS};
pub use country::{normalize_location, valid_countries, Country, LocationError, Resolution};
pub use job::{CompensationInterval, Job, Site, Value};
pub use request::{require_non_empty, EmptyInput, Field, SearchRequest};
