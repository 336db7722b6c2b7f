use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::candidate::WORK_FROM_HOME;
use crate::domain::foundation::title_case;

/// Known places, checked as substrings before any context pattern.
const GAZETTEER: &[&str] = &[
    "bangalore",
    "bengaluru",
    "mumbai",
    "delhi",
    "hyderabad",
    "chennai",
    "kolkata",
    "pune",
    "ahmedabad",
    "noida",
    "gurgaon",
    "gurugram",
    "new delhi",
    "kochi",
    "chandigarh",
    "jaipur",
    "indore",
    "coimbatore",
    "remote",
    "work from home",
    "wfh",
    "new york",
    "london",
    "singapore",
    "dubai",
    "australia",
    "canada",
    "usa",
    "uk",
];

const REMOTE_SYNONYMS: &[&str] = &["remote", "work from home", "wfh"];

const FILLER_WORDS: &[&str] = &["the", "a", "an", "or", "and", "but", "from"];

const MAX_LOCATION_WORDS: usize = 4;

enum LocationRule {
    /// Captures a place name in group 1.
    Place(Regex),
    /// Matches a remote-work phrase.
    Remote(Regex),
}

static LOCATION_RULES: Lazy<Vec<LocationRule>> = Lazy::new(|| {
    let place = |p: &str| LocationRule::Place(Regex::new(p).unwrap());
    vec![
        place(r"(?:i am|i'm|am|currently|presently)\s+(?:from|in|at|living|based|located|residing)\s+(?:in\s+)?([a-z\s,.-]+?)(?:\s*[.!?]|$|,)"),
        place(r"(?:my|current)\s+location\s+(?:is|:)\s+([a-z\s,.-]+?)(?:\s*[.!?]|$|,)"),
        place(r"(?:located|based|living)\s+(?:at|in|near)\s+([a-z\s,.-]+?)(?:\s*[.!?]|$|,)"),
        place(r"(?:city|town|region|area)\s+(?:of|is|:)\s+([a-z\s,.-]+?)(?:\s*[.!?]|$|,)"),
        LocationRule::Remote(
            Regex::new(r"(?:i|working|available|prefer)\s+(?:to\s+)?(?:work\s+)?(?:remotely|remote\s+work|from\s+home|wfh)")
                .unwrap(),
        ),
    ]
});

/// Gazetteer hit first, then context phrases.
pub(super) fn extract_location(lower: &str) -> Option<String> {
    gazetteer_hit(lower).or_else(|| {
        LOCATION_RULES.iter().find_map(|rule| match rule {
            LocationRule::Remote(pattern) => {
                pattern.is_match(lower).then(|| WORK_FROM_HOME.to_string())
            }
            LocationRule::Place(pattern) => {
                let place = pattern.captures(lower)?.get(1)?.as_str().trim();
                is_plausible_place(place).then(|| title_case(place))
            }
        })
    })
}

fn gazetteer_hit(lower: &str) -> Option<String> {
    let place = GAZETTEER.iter().find(|place| lower.contains(*place))?;
    Some(if REMOTE_SYNONYMS.contains(place) {
        WORK_FROM_HOME.to_string()
    } else {
        title_case(place)
    })
}

fn is_plausible_place(place: &str) -> bool {
    let words: Vec<&str> = place.split_whitespace().collect();
    place.chars().count() > 2
        && !words.iter().all(|w| FILLER_WORDS.contains(w))
        && words.len() <= MAX_LOCATION_WORDS
}
