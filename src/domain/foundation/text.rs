//! Text normalisation helpers shared by extraction and record sanitation.

/// Capitalises the first letter of every alphabetic run and lowercases the rest.
///
/// A letter that follows any non-letter (space, digit, `-`, `'`, `+`) starts a
/// new run, so `"o'neil-smith"` becomes `"O'Neil-Smith"` and `"c++"` stays `"C++"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_letter = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalises_each_word() {
        assert_eq!(title_case("asha rao"), "Asha Rao");
        assert_eq!(title_case("BACKEND developer"), "Backend Developer");
    }

    #[test]
    fn letters_after_punctuation_start_new_words() {
        assert_eq!(title_case("o'neil-smith"), "O'Neil-Smith");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(title_case("c#"), "C#");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(title_case(""), "");
    }
}
