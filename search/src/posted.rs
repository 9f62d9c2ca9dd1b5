use chrono::{Days, NaiveDate};
use regex::Regex;

/// Turns Indeed's relative posting labels ("Posted 3 days ago", "Today",
/// "30+ days ago") into a calendar date counted back from `today`.
pub fn parse_posted(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = text.to_lowercase();

    if lower.contains("just posted") || lower.contains("today") {
        return Some(today);
    }
    if let Ok(date) = NaiveDate::parse_from_str(lower.trim(), "%Y-%m-%d") {
        return Some(date);
    }

    let days = Regex::new(r"(\d+)\+?\s*days?\s+ago").ok()?;
    if let Some(cap) = days.captures(&lower) {
        let n: u64 = cap[1].parse().ok()?;
        return today.checked_sub_days(Days::new(n));
    }

    let recent = Regex::new(r"\d+\+?\s*(hours?|minutes?|mins?)\s+ago").ok()?;
    if recent.is_match(&lower) {
        return Some(today);
    }

    None
}
