//! Indeed job search: scrape a country's job board and save the listings to
//! a spreadsheet.

pub mod board;
pub mod config;
pub mod indeed;
pub mod output;
pub mod pipeline;
pub mod posted;
pub mod preview;
pub mod prompt;
pub mod salary;

pub use board::{JobBoard, ScrapeError, ScrapeQuery};
pub use indeed::IndeedScraper;
pub use pipeline::{Outcome, Pipeline, SearchError};
