use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::title_case;

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:i'?m|my name is|i am|call me)\s+([a-z][a-z\s'-]{1,30}[a-z])",
        r"(?:hi|hello),?\s+(?:i'?m|my name is|i am)\s+([a-z][a-z\s'-]{1,30}[a-z])",
        r"^([a-z][a-z\s'-]{1,30}?[a-z])(?:\s+here|\s+speaking|\s*$)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Self-introductions: "my name is X", "hi, I'm X", "X here".
pub(super) fn extract_name(lower: &str) -> Option<String> {
    NAME_PATTERNS.iter().find_map(|pattern| {
        let name = pattern.captures(lower)?.get(1)?.as_str().trim();
        (name.chars().count() >= 2).then(|| title_case(name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn my_name_is() {
        assert_eq!(extract_name("my name is asha rao").as_deref(), Some("Asha Rao"));
    }

    #[test]
    fn greeting_prefixed() {
        assert_eq!(extract_name("hello, i'm priya").as_deref(), Some("Priya"));
    }

    #[test]
    fn bare_name_with_here_or_alone() {
        assert_eq!(extract_name("rahul here").as_deref(), Some("Rahul"));
        assert_eq!(extract_name("priya sharma speaking").as_deref(), Some("Priya Sharma"));
        assert_eq!(extract_name("meera nair").as_deref(), Some("Meera Nair"));
    }

    #[test]
    fn no_introduction_no_name() {
        assert_eq!(extract_name("asha.rao@example.com"), None);
        assert_eq!(extract_name("9876543210"), None);
    }
}
