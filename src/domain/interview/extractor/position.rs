use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::title_case;

/// Role and seniority words that gate position extraction, in priority order.
const POSITION_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "programmer",
    "architect",
    "analyst",
    "manager",
    "lead",
    "senior",
    "junior",
    "full stack",
    "frontend",
    "front-end",
    "front end",
    "backend",
    "back-end",
    "back end",
    "software",
    "web",
    "mobile",
    "devops",
    "qa",
    "tester",
    "sde",
    "data scientist",
    "machine learning",
    "ml",
    "ai",
    "cloud",
    "security",
    "administrator",
];

/// Trailing clauses introduced by these words are cut from a position.
const LOCATION_INDICATORS: &[&str] = &[" in ", " at ", " from ", " near ", " around "];

struct KeywordContexts {
    keyword: &'static str,
    patterns: [Regex; 3],
}

static POSITION_CONTEXTS: Lazy<Vec<KeywordContexts>> = Lazy::new(|| {
    POSITION_KEYWORDS
        .iter()
        .map(|&keyword| {
            let kw = regex::escape(keyword);
            let compile = |prefix: &str| {
                Regex::new(&format!(r"{}([^.!?]*{}[^.!?]*)", prefix, kw)).unwrap()
            };
            KeywordContexts {
                keyword,
                patterns: [
                    compile(r"\b(?:as\s+(?:a\s+)?|i'?m\s+(?:a\s+)?|i am\s+(?:a\s+)?|work\s+as\s+(?:a\s+)?|working\s+as\s+(?:a\s+)?)"),
                    compile(r"\b(?:position|role|job|title)\s+(?:is|as|:)?\s+"),
                    compile(r"\b(?:applying\s+for|interested\s+in|looking\s+for)\s+"),
                ],
            }
        })
        .collect()
});

/// Job title stated in context ("I'm a ...", "role is ...", "applying for ...").
pub(super) fn extract_position(lower: &str) -> Option<String> {
    POSITION_CONTEXTS
        .iter()
        .filter(|ctx| lower.contains(ctx.keyword))
        .find_map(|ctx| {
            ctx.patterns.iter().find_map(|pattern| {
                let raw = pattern.captures(lower)?.get(1)?.as_str();
                let position = strip_location_clause(raw.trim());
                let len = position.chars().count();
                (len > 3 && len < 50).then(|| title_case(position))
            })
        })
}

fn strip_location_clause(position: &str) -> &str {
    LOCATION_INDICATORS.iter().fold(position, |acc, indicator| {
        acc.split(indicator).next().unwrap_or(acc).trim()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn im_a_role() {
        assert_eq!(
            extract_position("i'm a backend developer").as_deref(),
            Some("Backend Developer")
        );
    }

    #[test]
    fn applying_for_drops_location_clause() {
        assert_eq!(
            extract_position("applying for senior engineer in mumbai").as_deref(),
            Some("Senior Engineer")
        );
    }

    #[test]
    fn role_is() {
        assert_eq!(
            extract_position("my target role is data scientist").as_deref(),
            Some("Data Scientist")
        );
    }

    #[test]
    fn trailing_clauses_after_from_are_cut() {
        assert_eq!(
            extract_position("i'm a backend developer from pune, tech stack react and python")
                .as_deref(),
            Some("Backend Developer")
        );
    }

    #[test]
    fn keyword_without_context_is_ignored() {
        assert_eq!(extract_position("the developer conference was fun"), None);
        assert_eq!(extract_position("my name is asha rao"), None);
    }

    #[test]
    fn overlong_candidates_are_rejected() {
        let long = format!("i'm a {} developer", "very ".repeat(12));
        assert_eq!(extract_position(&long), None);
    }
}
