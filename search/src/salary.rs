use common::CompensationInterval;
use regex::Regex;

/// Salary range extracted from a snippet like "$50,000 - $70,000 a year".
#[derive(Debug, Clone, PartialEq)]
pub struct Salary {
    pub min: f64,
    pub max: f64,
    pub interval: Option<CompensationInterval>,
    pub currency: Option<String>,
}

fn currency_for_symbol(symbol: &str) -> Option<&'static str> {
    match symbol {
        "$" => Some("USD"),
        "£" => Some("GBP"),
        "€" => Some("EUR"),
        "₹" => Some("INR"),
        _ => None,
    }
}

/// Pay period written as a phrase: "a year", "per hour", "/hr", "monthly".
/// A bare "hour" or "day" ("8 hour shift", "25 days holiday") is not one.
fn pay_period(raw: &str) -> Option<CompensationInterval> {
    let re = Regex::new(
        r"(?i)(?:\b(?:an?|per)\s+|/\s?)(year|yr|annum|month|mo|week|wk|day|hour|hr)\b|\b(annually|yearly|monthly|weekly|daily|hourly)\b",
    )
    .ok()?;
    let cap = re.captures(raw)?;
    let word = cap.get(1).or_else(|| cap.get(2))?.as_str().to_lowercase();
    match word.as_str() {
        "year" | "yr" | "annum" | "annually" | "yearly" => Some(CompensationInterval::Yearly),
        "month" | "mo" | "monthly" => Some(CompensationInterval::Monthly),
        "week" | "wk" | "weekly" => Some(CompensationInterval::Weekly),
        "day" | "daily" => Some(CompensationInterval::Daily),
        "hour" | "hr" | "hourly" => Some(CompensationInterval::Hourly),
        _ => None,
    }
}

/// Extracts up to two amounts, the pay period and the currency from raw text.
/// Amounts under 1000 count only when they carry a currency or form a range
/// ("25 - 30"); otherwise they are shift lengths, holidays, team sizes.
pub fn parse_salary(raw: &str) -> Option<Salary> {
    // Match numbers that may have commas (e.g., "50,000" or "50000") and a "K" suffix
    let re = Regex::new(r"([$£€₹])?\s?(\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?\s?([kK]\b)?").ok()?;
    let code = Regex::new(r"\b(USD|EUR|GBP|CAD|AUD|INR|MAD|CHF|AED|SGD)\b").ok()?;
    let range = Regex::new(r"\d\s?[kK]?\s*(?:-|to)\s*[$£€₹]?\s?\d").ok()?;

    let mut symbol = None;
    let mut amounts = Vec::with_capacity(2);
    for cap in re.captures_iter(raw) {
        let Some(matched) = cap.get(2) else { continue };
        // Remove commas and parse as f64
        let clean_number: String = matched
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let fraction = cap.get(3).map_or("", |m| m.as_str());
        let Ok(mut num) = format!("{clean_number}{fraction}").parse::<f64>() else {
            continue;
        };
        if cap.get(4).is_some() {
            num *= 1000.0;
        }
        if symbol.is_none() {
            symbol = cap.get(1).map(|m| m.as_str().to_string());
        }
        amounts.push(num);
        if amounts.len() == 2 {
            break;
        }
    }

    let (min, max) = match amounts.as_slice() {
        [] => return None,
        [only] => (*only, *only),
        [a, b, ..] => (a.min(*b), a.max(*b)),
    };

    let currency = symbol
        .as_deref()
        .and_then(currency_for_symbol)
        .map(str::to_string)
        .or_else(|| code.captures(raw).map(|c| c[1].to_string()));

    // Only consider reasonable salary values (at least 1000) unless they look like pay
    if max < 1000.0 && currency.is_none() && !range.is_match(raw) {
        return None;
    }

    Some(Salary {
        min,
        max,
        interval: pay_period(raw),
        currency,
    })
}
