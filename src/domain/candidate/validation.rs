//! Format and range checks for candidate attributes.
//!
//! Extraction is deliberately permissive; these rules are applied when a
//! field-set is turned into a stored record, and their findings are reported
//! rather than raised.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CandidateFieldSet, YearsOfExperience};
use crate::domain::foundation::ValidationError;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+91[6-9]\d{9}|[6-9]\d{9}|\+\d{1,3}\d{8,12}|\d{10}|\d{11})$").unwrap()
});

static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s\-'.]+$").unwrap());

/// Inclusive bounds for plausible years of experience.
pub const MAX_EXPERIENCE_YEARS: u32 = 50;

pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Accepts Indian mobiles with or without `+91`, generic international
/// numbers and plain 10/11 digit numbers, ignoring common separators.
pub fn validate_phone(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | '(' | ')') && !c.is_whitespace())
        .collect();
    PHONE.is_match(&cleaned)
}

pub fn validate_name(name: &str) -> bool {
    let name = name.trim();
    name.chars().count() >= 2 && NAME.is_match(name)
}

pub fn validate_experience(experience: YearsOfExperience) -> bool {
    experience.years() <= MAX_EXPERIENCE_YEARS
}

/// Seniority bucket derived from years of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    EntryLevel,
    Junior,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
    #[serde(rename = "Expert/Lead")]
    ExpertLead,
}

impl ExperienceLevel {
    pub fn from_years(years: u32) -> Self {
        match years {
            0 => ExperienceLevel::EntryLevel,
            1..=2 => ExperienceLevel::Junior,
            3..=5 => ExperienceLevel::MidLevel,
            6..=10 => ExperienceLevel::Senior,
            _ => ExperienceLevel::ExpertLead,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::EntryLevel => "Entry Level",
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-Level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::ExpertLead => "Expert/Lead",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every rule the current field values break. Unset fields are not reported.
pub fn validation_issues(fields: &CandidateFieldSet) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if let Some(name) = fields.name() {
        if !validate_name(name) {
            issues.push(ValidationError::invalid_format(
                "name",
                "must be at least 2 characters of letters, spaces, hyphens, apostrophes or periods",
            ));
        }
    }
    if let Some(email) = fields.email() {
        if !validate_email(email) {
            issues.push(ValidationError::invalid_format("email", "not a valid email address"));
        }
    }
    if let Some(phone) = fields.phone() {
        if !validate_phone(phone) {
            issues.push(ValidationError::invalid_format("phone", "not a valid phone number"));
        }
    }
    if let Some(experience) = fields.experience() {
        if !validate_experience(experience) {
            issues.push(ValidationError::out_of_range(
                "experience",
                0,
                MAX_EXPERIENCE_YEARS as i64,
                experience.years() as i64,
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rules() {
        assert!(validate_email("asha.rao@example.com"));
        assert!(validate_email("  first+tag@mail.co.in "));
        assert!(!validate_email("asha@localhost"));
        assert!(!validate_email("not an email"));
    }

    #[test]
    fn phone_rules() {
        assert!(validate_phone("+91 98765 43210"));
        assert!(validate_phone("(98765) 43210"));
        assert!(validate_phone("+14155550100"));
        assert!(validate_phone("01234567890"));
        assert!(!validate_phone("12345"));
        assert!(!validate_phone("call me maybe"));
    }

    #[test]
    fn name_rules() {
        assert!(validate_name("Asha Rao"));
        assert!(validate_name("O'Neil-Smith Jr."));
        assert!(!validate_name("A"));
        assert!(!validate_name("R2D2"));
    }

    #[test]
    fn experience_levels_bucket_years() {
        assert_eq!(ExperienceLevel::from_years(0), ExperienceLevel::EntryLevel);
        assert_eq!(ExperienceLevel::from_years(2), ExperienceLevel::Junior);
        assert_eq!(ExperienceLevel::from_years(4), ExperienceLevel::MidLevel);
        assert_eq!(ExperienceLevel::from_years(10), ExperienceLevel::Senior);
        assert_eq!(ExperienceLevel::from_years(11).label(), "Expert/Lead");
    }

    #[test]
    fn issues_report_out_of_range_experience_and_bad_email() {
        let mut fields = CandidateFieldSet::new();
        fields.fill_email("nope@");
        fields.fill_experience(YearsOfExperience::new(72));
        fields.fill_name("Asha Rao");

        let issues = validation_issues(&fields);
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&ValidationError::out_of_range("experience", 0, 50, 72)));
    }

    #[test]
    fn empty_field_set_has_no_issues() {
        assert!(validation_issues(&CandidateFieldSet::new()).is_empty());
    }
}
