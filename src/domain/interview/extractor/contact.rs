use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::domain::candidate::format_indian_mobile;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b").unwrap());

/// Indian mobile numbers, most specific first.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\+91[-\s]?([6-9][0-9]{9})\b",
        r"\+91[-\s]?([6-9][0-9]{4})[-\s]?([0-9]{5})\b",
        r"\b([6-9][0-9]{9})\b",
        r"\b([6-9][0-9]{4})[-\s]?([0-9]{5})\b",
        r"\(([6-9][0-9]{4})\)[-\s]?([0-9]{5})\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static CANONICAL_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+91[6-9][0-9]{9}$").unwrap());

pub(super) fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First matching pattern wins; the result is always `+91 XXXXX XXXXX`.
pub(super) fn extract_phone(text: &str) -> Option<String> {
    let captures = PHONE_PATTERNS.iter().find_map(|p| p.captures(text))?;
    canonical_from(&captures)
}

fn canonical_from(captures: &Captures<'_>) -> Option<String> {
    let digits: String = captures
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .collect();

    if digits.len() == 10 {
        let formatted = format_indian_mobile(&digits);
        if CANONICAL_PHONE.is_match(&formatted.replace(' ', "")) {
            return Some(formatted);
        }
    }

    // Re-derive from the whole match when the groups did not line up.
    let whole = captures.get(0)?.as_str();
    let mut fallback: String = whole.chars().filter(char::is_ascii_digit).collect();
    if fallback.len() == 12 && whole.trim_start().starts_with("+91") {
        fallback = fallback.split_off(2);
    }
    (fallback.len() == 10 && fallback.starts_with(&['6', '7', '8', '9'][..]))
        .then(|| format_indian_mobile(&fallback))
}
