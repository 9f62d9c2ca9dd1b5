use thiserror::Error;

pub const DEFAULT_RESULTS: u32 = 10;
pub const MAX_RESULTS: u32 = 100;

/// Why the requested count was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountWarning {
    #[error("'{0}' is not a number, using default {}", DEFAULT_RESULTS)]
    NotANumber(String),
    #[error("{0} is not a positive number, using default {}", DEFAULT_RESULTS)]
    NotPositive(String),
    #[error("{0} is more than the maximum, using {}", MAX_RESULTS)]
    TooLarge(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsWanted {
    pub value: u32,
    pub warning: Option<CountWarning>,
}

impl ResultsWanted {
    fn accepted(value: u32) -> Self {
        ResultsWanted {
            value,
            warning: None,
        }
    }

    fn replaced(value: u32, warning: CountWarning) -> Self {
        ResultsWanted {
            value,
            warning: Some(warning),
        }
    }
}

/// Parses the requested number of results, never failing: anything unusable
/// becomes a value in `1..=MAX_RESULTS` plus a warning for the user.
pub fn parse_results_wanted(raw: &str) -> ResultsWanted {
    let text = raw.trim();

    match text.parse::<i64>() {
        Ok(n) if n <= 0 => ResultsWanted::replaced(
            DEFAULT_RESULTS,
            CountWarning::NotPositive(text.to_string()),
        ),
        Ok(n) if n > i64::from(MAX_RESULTS) => {
            ResultsWanted::replaced(MAX_RESULTS, CountWarning::TooLarge(text.to_string()))
        }
        // 1..=MAX_RESULTS always fits.
        Ok(n) => ResultsWanted::accepted(n as u32),
        Err(_) => overflowed(text).unwrap_or_else(|| {
            ResultsWanted::replaced(DEFAULT_RESULTS, CountWarning::NotANumber(text.to_string()))
        }),
    }
}

/// Integers too long for `i64` are still integers: clamp them by sign.
fn overflowed(text: &str) -> Option<ResultsWanted> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(if negative {
        ResultsWanted::replaced(DEFAULT_RESULTS, CountWarning::NotPositive(text.to_string()))
    } else {
        ResultsWanted::replaced(MAX_RESULTS, CountWarning::TooLarge(text.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_numeric_uses_default() {
        let parsed = parse_results_wanted("abc");
        assert_eq!(parsed.value, 10);
        assert_eq!(parsed.warning, Some(CountWarning::NotANumber("abc".into())));
    }

    #[test]
    fn test_negative_uses_default() {
        let parsed = parse_results_wanted("-5");
        assert_eq!(parsed.value, 10);
        assert!(matches!(parsed.warning, Some(CountWarning::NotPositive(_))));
    }

    #[test]
    fn test_zero_uses_default() {
        let parsed = parse_results_wanted("0");
        assert_eq!(parsed.value, 10);
        assert!(parsed.warning.is_some());
    }

    #[test]
    fn test_large_is_clamped() {
        let parsed = parse_results_wanted("500");
        assert_eq!(parsed.value, 100);
        assert!(matches!(parsed.warning, Some(CountWarning::TooLarge(_))));
    }

    #[test]
    fn test_huge_is_clamped() {
        let parsed = parse_results_wanted("99999999999999999999999");
        assert_eq!(parsed.value, 100);
        assert!(matches!(parsed.warning, Some(CountWarning::TooLarge(_))));
    }

    #[test]
    fn test_in_range_is_unchanged() {
        assert_eq!(parse_results_wanted("25"), ResultsWanted::accepted(25));
        assert_eq!(parse_results_wanted(" 100 "), ResultsWanted::accepted(100));
        assert_eq!(parse_results_wanted("1"), ResultsWanted::accepted(1));
    }

    #[test]
    fn test_empty_uses_default() {
        let parsed = parse_results_wanted("");
        assert_eq!(parsed.value, 10);
        assert!(matches!(parsed.warning, Some(CountWarning::NotANumber(_))));
    }

    #[test]
    fn test_warning_message_mentions_default() {
        let warning = parse_results_wanted("ten").warning.unwrap();
        assert_eq!(warning.to_string(), "'ten' is not a number, using default 10");
    }
}
