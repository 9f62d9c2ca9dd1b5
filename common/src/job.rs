use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Job board a record was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Indeed,
}

impl Site {
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Indeed => "indeed",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pay period of a salary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationInterval {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
}

impl CompensationInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationInterval::Yearly => "yearly",
            CompensationInterval::Monthly => "monthly",
            CompensationInterval::Weekly => "weekly",
            CompensationInterval::Daily => "daily",
            CompensationInterval::Hourly => "hourly",
        }
    }

    /// Maps the wording job boards use ("a year", "per hour", "monthly", ...).
    pub fn from_text(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("year") || text.contains("annum") || text.contains("annual") {
            Some(CompensationInterval::Yearly)
        } else if text.contains("month") {
            Some(CompensationInterval::Monthly)
        } else if text.contains("week") {
            Some(CompensationInterval::Weekly)
        } else if text.contains("day") || text.contains("daily") {
            Some(CompensationInterval::Daily)
        } else if text.contains("hour") {
            Some(CompensationInterval::Hourly)
        } else {
            None
        }
    }
}

/// One job listing as returned by a search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Job {
    pub id: String,
    pub site: Site,
    pub job_url: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub date_posted: Option<NaiveDate>,
    pub job_type: Option<String>,
    pub interval: Option<CompensationInterval>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub currency: Option<String>,
    pub is_remote: bool,
    pub description: String,
}

/// A single cell of a job row, typed so spreadsheet writers can keep numbers numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Empty => Ok(()),
        }
    }
}

impl Job {
    /// Column names in the order `values` yields them.
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "site",
        "job_url",
        "title",
        "company",
        "location",
        "date_posted",
        "job_type",
        "interval",
        "min_amount",
        "max_amount",
        "currency",
        "is_remote",
        "description",
    ];

    /// Columns shown in the terminal preview.
    pub const PREVIEW_COLUMNS: &'static [&'static str] =
        &["title", "company", "location", "date_posted", "job_url"];

    pub fn new(
        site: Site,
        id: impl Into<String>,
        title: impl Into<String>,
        company: impl Into<String>,
        job_url: impl Into<String>,
    ) -> Self {
        Job {
            id: id.into(),
            site,
            job_url: job_url.into(),
            title: title.into(),
            company: company.into(),
            location: String::new(),
            date_posted: None,
            job_type: None,
            interval: None,
            min_amount: None,
            max_amount: None,
            currency: None,
            is_remote: false,
            description: String::new(),
        }
    }

    pub fn values(&self) -> Vec<Value> {
        fn text(s: &str) -> Value {
            if s.is_empty() {
                Value::Empty
            } else {
                Value::Text(s.to_string())
            }
        }
        fn opt_text(s: Option<&str>) -> Value {
            s.map_or(Value::Empty, text)
        }
        fn number(n: Option<f64>) -> Value {
            n.map_or(Value::Empty, Value::Number)
        }

        vec![
            text(&self.id),
            text(self.site.as_str()),
            text(&self.job_url),
            text(&self.title),
            text(&self.company),
            text(&self.location),
            opt_text(self.date_posted.map(|d| d.format("%Y-%m-%d").to_string()).as_deref()),
            opt_text(self.job_type.as_deref()),
            opt_text(self.interval.map(|i| i.as_str())),
            number(self.min_amount),
            number(self.max_amount),
            opt_text(self.currency.as_deref()),
            Value::Bool(self.is_remote),
            text(&self.description),
        ]
    }

    /// The preview subset, rendered as text in `PREVIEW_COLUMNS` order.
    pub fn preview_values(&self) -> [String; 5] {
        [
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
            self.date_posted
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.job_url.clone(),
        ]
    }
}
