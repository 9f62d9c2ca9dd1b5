//! Indeed job board scraper
//!
//! Fetches search result pages from the country's Indeed site and turns
//! the job cards into `Job` records.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, Utc};
use common::{CompensationInterval, Country, Job, Site};
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::board::{JobBoard, ScrapeError, ScrapeQuery};
use crate::posted::parse_posted;
use crate::salary::parse_salary;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Indeed shows this many cards per result page.
const PAGE_SIZE: u32 = 10;

pub struct IndeedScraper {
    client: Client,
    base_url: Option<String>,
}

impl IndeedScraper {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Sends every request to `base_url` instead of the country's Indeed site.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn fetch_page(
        &self,
        base_url: &str,
        query: &ScrapeQuery<'_>,
        start: u32,
    ) -> Result<String, ScrapeError> {
        let url = format!("{base_url}/jobs");
        let start = start.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.search_term),
                ("l", query.location),
                ("start", start.as_str()),
            ])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: response.url().to_string(),
                status,
            });
        }

        Ok(response.text()?)
    }
}

impl JobBoard for IndeedScraper {
    fn site(&self) -> Site {
        Site::Indeed
    }

    fn scrape(&self, query: &ScrapeQuery<'_>) -> Result<Vec<Job>, ScrapeError> {
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| query.country.indeed_base_url());
        let wanted = query.results_wanted as usize;
        let max_pages = query.results_wanted / PAGE_SIZE + 2;
        let today = Local::now().date_naive();

        let mut jobs: Vec<Job> = Vec::with_capacity(wanted);
        let mut seen_ids: HashSet<String> = HashSet::new();

        for page in 0..max_pages {
            let start = page * PAGE_SIZE;
            info!(%base_url, start, "fetching Indeed result page");

            let html = match self.fetch_page(&base_url, query, start) {
                Ok(html) => html,
                // Nothing collected yet: the search itself failed.
                Err(e) if jobs.is_empty() => return Err(e),
                Err(e) => {
                    warn!(error = %e, "stopping pagination early");
                    break;
                }
            };
            debug!(bytes = html.len(), "fetched page");

            let mut added = 0;
            for job in parse_page(&html, &base_url, query.country, today) {
                // Skip duplicates (Indeed repeats sponsored cards across pages)
                if !seen_ids.insert(job.id.clone()) {
                    continue;
                }
                jobs.push(job);
                added += 1;
                if jobs.len() >= wanted {
                    break;
                }
            }

            debug!(added, total = jobs.len(), "parsed page");
            if added == 0 || jobs.len() >= wanted {
                break;
            }
        }

        jobs.truncate(wanted);
        Ok(jobs)
    }
}

/// Parses one result page, preferring the embedded job-card payload and
/// falling back to the rendered HTML cards.
pub fn parse_page(html: &str, base_url: &str, country: Country, today: NaiveDate) -> Vec<Job> {
    let jobs = parse_mosaic(html, base_url, country);
    if !jobs.is_empty() {
        return jobs;
    }
    parse_cards(html, base_url, country, today)
}

#[derive(Debug, Deserialize)]
struct MosaicPayload {
    #[serde(rename = "metaData")]
    meta_data: MosaicMetaData,
}

#[derive(Debug, Deserialize)]
struct MosaicMetaData {
    #[serde(rename = "mosaicProviderJobCardsModel")]
    model: MosaicModel,
}

#[derive(Debug, Deserialize)]
struct MosaicModel {
    #[serde(default)]
    results: Vec<MosaicCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MosaicCard {
    jobkey: String,
    display_title: Option<String>,
    title: Option<String>,
    company: Option<String>,
    formatted_location: Option<String>,
    pub_date: Option<i64>,
    extracted_salary: Option<ExtractedSalary>,
    salary_snippet: Option<SalarySnippet>,
    remote_location: Option<bool>,
    job_types: Option<Vec<String>>,
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtractedSalary {
    min: Option<f64>,
    max: Option<f64>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SalarySnippet {
    currency: Option<String>,
    text: Option<String>,
}

fn parse_mosaic(html: &str, base_url: &str, country: Country) -> Vec<Job> {
    let Ok(re) = Regex::new(
        r#"(?m)window\.mosaic\.providerData\["mosaic-provider-jobcards"\]\s*=\s*(\{.+\});\s*$"#,
    ) else {
        return Vec::new();
    };
    let Some(raw) = re.captures(html).and_then(|c| c.get(1)) else {
        debug!("no embedded job card payload");
        return Vec::new();
    };

    let payload: MosaicPayload = match serde_json::from_str(raw.as_str()) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "embedded job card payload did not parse");
            return Vec::new();
        }
    };

    payload
        .meta_data
        .model
        .results
        .into_iter()
        .filter_map(|card| mosaic_job(card, base_url, country))
        .collect()
}

fn mosaic_job(card: MosaicCard, base_url: &str, country: Country) -> Option<Job> {
    let title = clean_text(&card.display_title.or(card.title).unwrap_or_default());
    if title.is_empty() {
        return None;
    }
    let job_url = format!("{base_url}/viewjob?jk={}", card.jobkey);
    let mut job = Job::new(
        Site::Indeed,
        format!("in-{}", card.jobkey),
        title,
        clean_text(&card.company.unwrap_or_default()),
        job_url,
    );

    job.location = clean_text(&card.formatted_location.unwrap_or_default());
    job.date_posted = card
        .pub_date
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|d| d.date_naive());
    job.job_type = card
        .job_types
        .filter(|types| !types.is_empty())
        .map(|types| types.join(", ").to_lowercase());
    job.is_remote = card.remote_location.unwrap_or(false) || is_remote_text(&job.location);
    job.description = card.snippet.as_deref().map(html_to_text).unwrap_or_default();

    let snippet = card.salary_snippet;
    if let Some(extracted) = card.extracted_salary {
        job.min_amount = extracted.min;
        job.max_amount = extracted.max;
        job.interval = extracted.kind.as_deref().and_then(CompensationInterval::from_text);
        job.currency = snippet.as_ref().and_then(|s| s.currency.clone());
    } else if let Some(salary) = snippet
        .as_ref()
        .and_then(|s| s.text.as_deref())
        .and_then(parse_salary)
    {
        apply_salary(&mut job, salary);
    }

    if job.currency.is_none() && job.min_amount.is_some() {
        job.currency = default_currency(country).map(str::to_string);
    }
    Some(job)
}

struct CardSelectors {
    card: Selector,
    title_link: Selector,
    title_span: Selector,
    company: Selector,
    location: Selector,
    date: Selector,
    salary: Selector,
    attribute: Selector,
    snippet: Selector,
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

impl CardSelectors {
    fn new() -> Self {
        CardSelectors {
            card: selector("div.job_seen_beacon"),
            title_link: selector("h2.jobTitle a"),
            title_span: selector("span[title]"),
            company: selector("[data-testid=\"company-name\"], span.companyName"),
            location: selector("[data-testid=\"text-location\"], div.companyLocation"),
            date: selector("span.date, [data-testid=\"myJobsStateDate\"]"),
            salary: selector("div.salary-snippet-container, div.metadata.salary-snippet-container"),
            attribute: selector("[data-testid=\"attribute_snippet_testid\"]"),
            snippet: selector("div.job-snippet, [data-testid=\"jobsnippet_footer\"]"),
        }
    }
}

fn parse_cards(html: &str, base_url: &str, country: Country, today: NaiveDate) -> Vec<Job> {
    let document = Html::parse_document(html);
    let sel = CardSelectors::new();

    document
        .select(&sel.card)
        .filter_map(|card| card_job(card, &sel, base_url, country, today))
        .collect()
}

fn card_job(
    card: ElementRef<'_>,
    sel: &CardSelectors,
    base_url: &str,
    country: Country,
    today: NaiveDate,
) -> Option<Job> {
    let link = card.select(&sel.title_link).next()?;
    let jobkey = link.value().attr("data-jk")?;

    let title = link
        .select(&sel.title_span)
        .next()
        .and_then(|span| span.value().attr("title").map(str::to_string))
        .unwrap_or_else(|| element_text(link));
    if title.is_empty() {
        return None;
    }

    let company = first_text(card, &sel.company).unwrap_or_default();
    let mut job = Job::new(
        Site::Indeed,
        format!("in-{jobkey}"),
        title,
        company,
        format!("{base_url}/viewjob?jk={jobkey}"),
    );

    job.location = first_text(card, &sel.location).unwrap_or_default();
    job.is_remote = is_remote_text(&job.location);
    job.date_posted = first_text(card, &sel.date).and_then(|text| parse_posted(&text, today));
    job.description = first_text(card, &sel.snippet).unwrap_or_default();

    let attributes: Vec<String> = card.select(&sel.attribute).map(element_text).collect();
    job.job_type = attributes.iter().find_map(|a| job_type_of(a));

    let salary = first_text(card, &sel.salary)
        .into_iter()
        .chain(attributes)
        .find_map(|text| parse_salary(&text));
    if let Some(salary) = salary {
        apply_salary(&mut job, salary);
        if job.currency.is_none() {
            job.currency = default_currency(country).map(str::to_string);
        }
    }

    Some(job)
}

fn apply_salary(job: &mut Job, salary: crate::salary::Salary) {
    job.min_amount = Some(salary.min);
    job.max_amount = Some(salary.max);
    job.interval = salary.interval;
    job.currency = salary.currency;
}

fn job_type_of(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    ["full-time", "part-time", "contract", "temporary", "internship"]
        .into_iter()
        .find(|kind| lower.contains(kind))
        .map(str::to_string)
}

fn default_currency(country: Country) -> Option<&'static str> {
    match country.name() {
        "united states" | "usa/ca" => Some("USD"),
        "united kingdom" => Some("GBP"),
        "canada" => Some("CAD"),
        "australia" => Some("AUD"),
        "india" => Some("INR"),
        "morocco" => Some("MAD"),
        "austria" | "belgium" | "croatia" | "cyprus" | "estonia" | "finland" | "france"
        | "germany" | "greece" | "ireland" | "italy" | "latvia" | "lithuania"
        | "luxembourg" | "malta" | "netherlands" | "portugal" | "slovakia" | "slovenia"
        | "spain" => Some("EUR"),
        _ => None,
    }
}

fn is_remote_text(text: &str) -> bool {
    text.to_lowercase().contains("remote")
}

fn first_text(parent: ElementRef<'_>, selector: &Selector) -> Option<String> {
    parent
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

fn element_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<String>())
}

fn html_to_text(fragment: &str) -> String {
    let fragment = Html::parse_fragment(fragment);
    clean_text(&fragment.root_element().text().collect::<String>())
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
