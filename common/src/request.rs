use std::fmt;

use thiserror::Error;

use crate::count::MAX_RESULTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    JobTitle,
    Location,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::JobTitle => f.write_str("job title"),
            Field::Location => f.write_str("location"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the {field} cannot be empty")]
pub struct EmptyInput {
    pub field: Field,
}

/// Trims `value` and rejects it when nothing is left.
pub fn require_non_empty(field: Field, value: &str) -> Result<&str, EmptyInput> {
    let value = value.trim();
    if value.is_empty() {
        Err(EmptyInput { field })
    } else {
        Ok(value)
    }
}

/// A validated search: both texts non-empty, count within `1..=MAX_RESULTS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    job_title: String,
    location_raw: String,
    results_wanted: u32,
}

impl SearchRequest {
    pub fn new(
        job_title: &str,
        location_raw: &str,
        results_wanted: u32,
    ) -> Result<Self, EmptyInput> {
        let job_title = require_non_empty(Field::JobTitle, job_title)?;
        let location_raw = require_non_empty(Field::Location, location_raw)?;
        Ok(SearchRequest {
            job_title: job_title.to_string(),
            location_raw: location_raw.to_string(),
            results_wanted: results_wanted.clamp(1, MAX_RESULTS),
        })
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn location_raw(&self) -> &str {
        &self.location_raw
    }

    pub fn results_wanted(&self) -> u32 {
        self.results_wanted
    }

    /// `jobs_<title>_<location>`, without extension.
    pub fn file_stem(&self) -> String {
        format!(
            "jobs_{}_{}",
            file_safe(&self.job_title),
            file_safe(&self.location_raw)
        )
    }
}

// Whitespace and path separators become underscores.
fn file_safe(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_inputs() {
        let request = SearchRequest::new("  rust developer ", " Morocco\n", 5).unwrap();
        assert_eq!(request.job_title(), "rust developer");
        assert_eq!(request.location_raw(), "Morocco");
        assert_eq!(request.results_wanted(), 5);
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let err = SearchRequest::new("   ", "Morocco", 5).unwrap_err();
        assert_eq!(err.field, Field::JobTitle);
        assert_eq!(err.to_string(), "the job title cannot be empty");
    }

    #[test]
    fn test_empty_location_is_rejected() {
        let err = SearchRequest::new("developer", "", 5).unwrap_err();
        assert_eq!(err.field, Field::Location);
    }

    #[test]
    fn test_count_is_kept_in_range() {
        assert_eq!(SearchRequest::new("a", "b", 0).unwrap().results_wanted(), 1);
        assert_eq!(SearchRequest::new("a", "b", 500).unwrap().results_wanted(), 100);
    }

    #[test]
    fn test_file_stem() {
        let request = SearchRequest::new("developer", "Morocco", 5).unwrap();
        assert_eq!(request.file_stem(), "jobs_developer_Morocco");

        let request = SearchRequest::new("senior rust  dev", "new zealand", 5).unwrap();
        assert_eq!(request.file_stem(), "jobs_senior_rust__dev_new_zealand");
    }

    #[test]
    fn test_file_stem_has_no_path_separators() {
        let request = SearchRequest::new("dev", "usa/ca", 5).unwrap();
        assert_eq!(request.file_stem(), "jobs_dev_usa_ca");
    }
}
