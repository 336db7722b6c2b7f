//! Pattern-based extraction of candidate attributes from free text.
//!
//! Each field has its own matcher, run only while that field is still unset.
//! Nothing here ever replaces a value: the first successful match for a field
//! wins for the rest of the interview. A non-match is silent.

mod contact;
mod experience;
mod location;
mod name;
mod position;
mod tech_stack;

use crate::domain::candidate::{CandidateField, CandidateFieldSet};

/// Fills any still-empty fields that `utterance` provides.
///
/// Returns the fields newly set by this call, in declaration order.
pub fn extract_fields(fields: &mut CandidateFieldSet, utterance: &str) -> Vec<CandidateField> {
    let lower = utterance.to_lowercase();
    let mut filled = Vec::new();

    let mut record = |field: CandidateField, was_set: bool| {
        if was_set {
            tracing::debug!(field = field.key(), "candidate field extracted");
            filled.push(field);
        }
    };

    if !fields.is_set(CandidateField::Name) {
        if let Some(name) = name::extract_name(&lower) {
            record(CandidateField::Name, fields.fill_name(name));
        }
    }
    if !fields.is_set(CandidateField::Email) {
        if let Some(email) = contact::extract_email(utterance) {
            record(CandidateField::Email, fields.fill_email(email));
        }
    }
    if !fields.is_set(CandidateField::Phone) {
        if let Some(phone) = contact::extract_phone(utterance) {
            record(CandidateField::Phone, fields.fill_phone(phone));
        }
    }
    if !fields.is_set(CandidateField::Experience) {
        if let Some(years) = experience::extract_experience(&lower) {
            record(CandidateField::Experience, fields.fill_experience(years));
        }
    }
    if !fields.is_set(CandidateField::Position) {
        if let Some(position) = position::extract_position(&lower) {
            record(CandidateField::Position, fields.fill_position(position));
        }
    }
    if !fields.is_set(CandidateField::Location) {
        if let Some(location) = location::extract_location(&lower) {
            record(CandidateField::Location, fields.fill_location(location));
        }
    }
    if !fields.is_set(CandidateField::TechStack) {
        if let Some(stack) = tech_stack::extract_tech_stack(&lower) {
            record(CandidateField::TechStack, fields.fill_tech_stack(stack));
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn one_utterance_can_fill_several_fields() {
        let mut fields = CandidateFieldSet::new();
        fields.fill_name("Asha Rao");
        let filled = extract_fields(
            &mut fields,
            "I'm a backend developer from Pune, tech stack React and Python",
        );

        assert_eq!(
            filled,
            vec![
                CandidateField::Position,
                CandidateField::Location,
                CandidateField::TechStack,
            ]
        );
        assert_eq!(fields.position(), Some("Backend Developer"));
        assert_eq!(fields.location(), Some("Pune"));
        assert_eq!(fields.tech_stack().map(|s| s.to_string()).as_deref(), Some("Python, React"));
    }

    #[test]
    fn email_keeps_original_case() {
        let mut fields = CandidateFieldSet::new();
        extract_fields(&mut fields, "Asha.Rao@Example.com");
        assert_eq!(fields.email(), Some("Asha.Rao@Example.com"));
    }

    #[test]
    fn later_matches_never_replace_earlier_ones() {
        let mut fields = CandidateFieldSet::new();
        extract_fields(&mut fields, "my name is asha rao, based in pune");
        let filled = extract_fields(&mut fields, "call me priya, I live in mumbai");

        assert!(filled.is_empty());
        assert_eq!(fields.name(), Some("Asha Rao"));
        assert_eq!(fields.location(), Some("Pune"));
    }

    #[test]
    fn tech_stack_is_not_recomputed() {
        let mut fields = CandidateFieldSet::new();
        extract_fields(&mut fields, "I use rust");
        extract_fields(&mut fields, "also python and docker");
        assert_eq!(fields.tech_stack().map(|s| s.to_string()).as_deref(), Some("Rust"));
    }

    #[test]
    fn unrelated_text_sets_nothing() {
        let mut fields = CandidateFieldSet::new();
        assert!(extract_fields(&mut fields, "Could you repeat that?").is_empty());
        assert!(fields.is_empty());
    }

    proptest! {
        #[test]
        fn extraction_never_overwrites(
            first in "[a-zA-Z0-9 @.+,'-]{0,60}",
            second in "[a-zA-Z0-9 @.+,'-]{0,60}",
        ) {
            let mut fields = CandidateFieldSet::new();
            extract_fields(&mut fields, &first);
            let before = fields.clone();
            extract_fields(&mut fields, &second);

            for field in CandidateField::ALL {
                if before.is_set(field) {
                    prop_assert_eq!(before.display_value(field), fields.display_value(field));
                }
            }
            prop_assert!(fields.completion_percentage() >= before.completion_percentage());
        }
    }
}
