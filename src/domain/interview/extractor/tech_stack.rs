use crate::domain::candidate::TechStack;
use crate::domain::foundation::title_case;

/// Languages, frameworks, platforms and datastores recognised in answers.
const TECH_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "react",
    "angular",
    "vue",
    "node",
    "express",
    "spring",
    "django",
    "flask",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "jenkins",
    "git",
    "sql",
    "nosql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "elasticsearch",
];

/// Every known technology mentioned, in keyword-list order.
pub(super) fn extract_tech_stack(lower: &str) -> Option<TechStack> {
    let stack = TechStack::from_items(
        TECH_KEYWORDS
            .iter()
            .filter(|keyword| mentions(lower, keyword))
            .map(|keyword| title_case(keyword)),
    );
    (!stack.is_empty()).then_some(stack)
}

/// Occurrence of `keyword` not embedded in a longer alphanumeric word.
fn mentions(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + keyword.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(text: &str) -> Vec<String> {
        extract_tech_stack(text)
            .map(|s| s.items().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn collects_every_mention_in_list_order() {
        assert_eq!(items("tech stack react and python"), vec!["Python", "React"]);
    }

    #[test]
    fn symbols_survive_title_casing() {
        assert_eq!(items("mostly c++ and c#, some go"), vec!["C++", "C#", "Go"]);
    }

    #[test]
    fn embedded_words_do_not_count() {
        assert_eq!(items("javascript is good"), vec!["Javascript"]);
        assert_eq!(items("postgresql"), vec!["Postgresql"]);
    }

    #[test]
    fn punctuation_bounds_a_mention() {
        assert_eq!(items("node.js, docker/kubernetes"), vec!["Node", "Docker", "Kubernetes"]);
    }

    #[test]
    fn nothing_known_yields_none() {
        assert!(extract_tech_stack("i like long walks").is_none());
    }
}
