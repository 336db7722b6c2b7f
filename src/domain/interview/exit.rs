//! End-of-interview detection.

/// Words that end the interview when they appear anywhere in a candidate turn.
pub const EXIT_KEYWORDS: &[&str] = &["bye", "goodbye", "exit", "quit", "end"];

/// Case-insensitive substring match against [`EXIT_KEYWORDS`].
///
/// Substring semantics are intentional and coarse: "backend" and "weekend"
/// both contain "end" and therefore count.
pub fn is_exit_signal(text: &str) -> bool {
    let lower = text.to_lowercase();
    EXIT_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farewells_end_the_interview() {
        assert!(is_exit_signal("Thanks, bye!"));
        assert!(is_exit_signal("GOODBYE"));
        assert!(is_exit_signal("quit"));
        assert!(is_exit_signal("I want to exit now"));
    }

    #[test]
    fn ordinary_answers_do_not() {
        assert!(!is_exit_signal("My name is Asha Rao"));
        assert!(!is_exit_signal("9876543210"));
    }

    #[test]
    fn substring_match_is_coarse() {
        assert!(is_exit_signal("I'm a backend developer"));
    }
}
