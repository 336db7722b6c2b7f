use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::candidate::YearsOfExperience;

static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"([0-9]+)\+?\s*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)",
        r"(?:experience|exp).*?([0-9]+)\+?\s*(?:years?|yrs?)",
        r"(?:been\s+(?:working|coding|developing|programming)).*?([0-9]+)\+?\s*(?:years?|yrs?)",
        r"([0-9]+)\+?\s*(?:years?|yrs?)\s*(?:in|as|doing)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// A year count next to "experience" or a working/coding verb.
///
/// Range is not checked here; see `validation::validate_experience`.
pub(super) fn extract_experience(lower: &str) -> Option<YearsOfExperience> {
    EXPERIENCE_PATTERNS.iter().find_map(|pattern| {
        let years = pattern.captures(lower)?.get(1)?.as_str().parse().ok()?;
        Some(YearsOfExperience::new(years))
    })
}
