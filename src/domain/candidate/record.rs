//! Privacy-preserving candidate records.
//!
//! A finished interview's field-set is sanitised (invalid values dropped),
//! then anonymised (email hashed, phone masked) before it is stored.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::validation::{validate_email, validate_experience, validate_name, validate_phone};
use super::CandidateFieldSet;
use crate::domain::foundation::{title_case, SessionId, Timestamp, ValidationError};

/// Default retention window for stored candidate records (two years).
pub const DEFAULT_RETENTION_DAYS: i64 = 730;

/// Identifier of a stored candidate record, `CAND_` followed by 12 hex chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    /// Derives an id from the candidate's email and the record creation time.
    pub fn derive(email: &str, at: &Timestamp) -> Self {
        let input = format!("{}_{}", email, at.as_datetime().to_rfc3339());
        Self(format!("CAND_{}", &sha256_hex(&input)[..12]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CandidateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Candidate attributes with direct identifiers removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnonymizedCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_masked: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
}

impl AnonymizedCandidate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email_hash.is_none()
            && self.phone_masked.is_none()
            && self.experience.is_none()
            && self.position.is_none()
            && self.location.is_none()
            && self.tech_stack.is_empty()
    }
}

/// Stored form of one candidate, with retention metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate_id: CandidateId,
    pub session_id: SessionId,
    pub timestamp: Timestamp,
    pub data: AnonymizedCandidate,
    pub data_retention_date: Timestamp,
    pub consent_given: bool,
}

impl CandidateRecord {
    /// Sanitises and anonymises a field-set into a storable record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` when no attribute survives sanitation.
    pub fn from_field_set(
        fields: &CandidateFieldSet,
        session_id: SessionId,
        now: Timestamp,
        retention_days: i64,
    ) -> Result<Self, ValidationError> {
        let email = fields
            .email()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| validate_email(e));

        let data = AnonymizedCandidate {
            name: fields
                .name()
                .filter(|n| validate_name(n))
                .map(|n| title_case(n.trim())),
            email_hash: email.as_deref().map(|e| sha256_hex(e)[..16].to_string()),
            phone_masked: fields
                .phone()
                .map(str::trim)
                .filter(|p| validate_phone(p))
                .map(mask_phone),
            experience: fields
                .experience()
                .filter(|e| validate_experience(*e))
                .map(|e| e.years()),
            position: fields
                .position()
                .map(str::trim)
                .filter(|p| p.chars().count() >= 2)
                .map(title_case),
            location: fields
                .location()
                .map(str::trim)
                .filter(|l| l.chars().count() >= 2)
                .map(title_case),
            tech_stack: fields
                .tech_stack()
                .map(|stack| stack.items().iter().map(|t| t.to_lowercase()).collect())
                .unwrap_or_default(),
        };

        if data.is_empty() {
            return Err(ValidationError::empty_field("candidate"));
        }

        Ok(Self {
            candidate_id: CandidateId::derive(email.as_deref().unwrap_or_default(), &now),
            session_id,
            timestamp: now,
            data,
            data_retention_date: now.add_days(retention_days),
            consent_given: true,
        })
    }

    /// A record expires once its retention date is no longer in the future.
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        !now.is_before(&self.data_retention_date)
    }
}

fn sha256_hex(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Keeps the first and last three characters and stars out the rest.
fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 6 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 6), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::{TechStack, YearsOfExperience};

    fn complete_fields() -> CandidateFieldSet {
        let mut fields = CandidateFieldSet::new();
        fields.fill_name("asha rao");
        fields.fill_email("Asha.Rao@Example.com");
        fields.fill_phone("+91 98765 43210");
        fields.fill_experience(YearsOfExperience::new(4));
        fields.fill_position("backend developer");
        fields.fill_location("Pune");
        fields.fill_tech_stack(TechStack::from_items(["Python", "React"]));
        fields
    }

    #[test]
    fn record_hides_direct_identifiers() {
        let record = CandidateRecord::from_field_set(
            &complete_fields(),
            SessionId::new(),
            Timestamp::now(),
            DEFAULT_RETENTION_DAYS,
        )
        .unwrap();

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("example.com"));
        assert!(!json.contains("98765 43210"));

        assert_eq!(record.data.name.as_deref(), Some("Asha Rao"));
        assert_eq!(record.data.phone_masked.as_deref(), Some("+91*********210"));
        assert_eq!(record.data.email_hash.as_ref().map(String::len), Some(16));
        assert_eq!(record.data.tech_stack, vec!["python", "react"]);
        assert_eq!(record.data.experience, Some(4));
        assert!(record.consent_given);
    }

    #[test]
    fn email_hash_ignores_case() {
        let a = CandidateRecord::from_field_set(&complete_fields(), SessionId::new(), Timestamp::now(), 1).unwrap();
        let mut lower = CandidateFieldSet::new();
        lower.fill_email("asha.rao@example.com");
        let b = CandidateRecord::from_field_set(&lower, SessionId::new(), Timestamp::now(), 1).unwrap();
        assert_eq!(a.data.email_hash, b.data.email_hash);
    }

    #[test]
    fn candidate_id_has_prefix_and_length() {
        let id = CandidateId::derive("asha.rao@example.com", &Timestamp::now());
        assert!(id.as_str().starts_with("CAND_"));
        assert_eq!(id.as_str().len(), 17);
    }

    #[test]
    fn invalid_values_are_dropped_not_fatal() {
        let mut fields = CandidateFieldSet::new();
        fields.fill_email("broken@");
        fields.fill_experience(YearsOfExperience::new(90));
        fields.fill_location("Pune");

        let record =
            CandidateRecord::from_field_set(&fields, SessionId::new(), Timestamp::now(), 1).unwrap();
        assert!(record.data.email_hash.is_none());
        assert!(record.data.experience.is_none());
        assert_eq!(record.data.location.as_deref(), Some("Pune"));
    }

    #[test]
    fn nothing_valid_is_rejected() {
        let mut fields = CandidateFieldSet::new();
        fields.fill_email("broken@");
        let result = CandidateRecord::from_field_set(&fields, SessionId::new(), Timestamp::now(), 1);
        assert_eq!(result.unwrap_err(), ValidationError::empty_field("candidate"));
    }

    #[test]
    fn retention_date_drives_expiry() {
        let now = Timestamp::now();
        let record =
            CandidateRecord::from_field_set(&complete_fields(), SessionId::new(), now, 730).unwrap();
        assert!(!record.is_expired(&now));
        assert!(record.is_expired(&now.add_days(731)));
    }
}
