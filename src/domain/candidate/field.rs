//! The fixed set of candidate attributes collected during intake.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven required candidate attributes.
///
/// Declaration order is the order fields are reported as missing and the
/// order they appear in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateField {
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
}

impl CandidateField {
    /// All fields in declaration order.
    pub const ALL: [CandidateField; 7] = [
        CandidateField::Name,
        CandidateField::Email,
        CandidateField::Phone,
        CandidateField::Experience,
        CandidateField::Position,
        CandidateField::Location,
        CandidateField::TechStack,
    ];

    /// Wire key used in prompts and persisted documents.
    pub fn key(&self) -> &'static str {
        match self {
            CandidateField::Name => "name",
            CandidateField::Email => "email",
            CandidateField::Phone => "phone",
            CandidateField::Experience => "experience",
            CandidateField::Position => "position",
            CandidateField::Location => "location",
            CandidateField::TechStack => "tech_stack",
        }
    }

    /// One-line description shown to the completion backend.
    pub fn description(&self) -> &'static str {
        match self {
            CandidateField::Name => "Full name of the candidate",
            CandidateField::Email => "Professional email address",
            CandidateField::Phone => "Contact phone number",
            CandidateField::Experience => "Years of professional experience",
            CandidateField::Position => "Target role/position applying for",
            CandidateField::Location => "Current location/availability",
            CandidateField::TechStack => "Programming languages, frameworks, technologies",
        }
    }
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_field_once_in_order() {
        let keys: Vec<_> = CandidateField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            vec!["name", "email", "phone", "experience", "position", "location", "tech_stack"]
        );
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&CandidateField::TechStack).unwrap();
        assert_eq!(json, "\"tech_stack\"");
        let back: CandidateField = serde_json::from_str("\"phone\"").unwrap();
        assert_eq!(back, CandidateField::Phone);
    }
}
