//! The record of candidate attributes extracted so far.
//!
//! Every attribute is an explicit optional slot. A slot is either unset or
//! holds a non-empty value, and once filled it is never replaced: all writes
//! go through `fill_*` methods that only succeed on an empty slot.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::CandidateField;
use crate::domain::foundation::{title_case, ValidationError};

static REMOTE_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(remote|work\s*from\s*home|wfh)").unwrap());

/// Canonical label for remote candidates.
pub const WORK_FROM_HOME: &str = "Work From Home";

/// Whole years of professional experience, rendered as `"N years"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearsOfExperience(u32);

impl YearsOfExperience {
    pub fn new(years: u32) -> Self {
        Self(years)
    }

    pub fn years(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for YearsOfExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years", self.0)
    }
}

impl FromStr for YearsOfExperience {
    type Err = ValidationError;

    /// Accepts `"4"`, `"4 years"` or `"4+ yrs"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
        digits
            .parse()
            .map(Self)
            .map_err(|_| ValidationError::invalid_format("experience", "expected a whole number of years"))
    }
}

impl Serialize for YearsOfExperience {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearsOfExperience {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Years(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Years(years) => Ok(Self(years)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Ordered, duplicate-free list of technologies.
///
/// Serialises as the `", "`-joined display string; deserialises from that
/// string or from a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TechStack(Vec<String>);

impl TechStack {
    /// Builds a stack from items, dropping blanks and repeats while keeping order.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stack = Vec::new();
        for item in items {
            let item = item.into().trim().to_string();
            if !item.is_empty() && !stack.contains(&item) {
                stack.push(item);
            }
        }
        Self(stack)
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TechStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl Serialize for TechStack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TechStack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            Items(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Joined(joined) => Self::from_items(joined.split(',')),
            Raw::Items(items) => Self::from_items(items),
        })
    }
}

/// Candidate attributes collected over one interview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFieldSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    experience: Option<YearsOfExperience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tech_stack: Option<TechStack>,
}

fn fill_text(slot: &mut Option<String>, value: impl Into<String>) -> bool {
    let value = value.into();
    if slot.is_some() || value.trim().is_empty() {
        return false;
    }
    *slot = Some(value);
    true
}

impl CandidateFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn experience(&self) -> Option<YearsOfExperience> {
        self.experience
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn tech_stack(&self) -> Option<&TechStack> {
        self.tech_stack.as_ref()
    }

    /// Sets the name if it is still unset. Returns whether the slot was filled.
    pub fn fill_name(&mut self, value: impl Into<String>) -> bool {
        fill_text(&mut self.name, value)
    }

    pub fn fill_email(&mut self, value: impl Into<String>) -> bool {
        fill_text(&mut self.email, value)
    }

    pub fn fill_phone(&mut self, value: impl Into<String>) -> bool {
        fill_text(&mut self.phone, value)
    }

    pub fn fill_experience(&mut self, value: YearsOfExperience) -> bool {
        if self.experience.is_some() {
            return false;
        }
        self.experience = Some(value);
        true
    }

    pub fn fill_position(&mut self, value: impl Into<String>) -> bool {
        fill_text(&mut self.position, value)
    }

    pub fn fill_location(&mut self, value: impl Into<String>) -> bool {
        fill_text(&mut self.location, value)
    }

    pub fn fill_tech_stack(&mut self, value: TechStack) -> bool {
        if self.tech_stack.is_some() || value.is_empty() {
            return false;
        }
        self.tech_stack = Some(value);
        true
    }

    /// Whether the given attribute holds a value.
    pub fn is_set(&self, field: CandidateField) -> bool {
        match field {
            CandidateField::Name => self.name.is_some(),
            CandidateField::Email => self.email.is_some(),
            CandidateField::Phone => self.phone.is_some(),
            CandidateField::Experience => self.experience.is_some(),
            CandidateField::Position => self.position.is_some(),
            CandidateField::Location => self.location.is_some(),
            CandidateField::TechStack => self.tech_stack.is_some(),
        }
    }

    /// Rendered value of an attribute, as shown in prompts and exports.
    pub fn display_value(&self, field: CandidateField) -> Option<String> {
        match field {
            CandidateField::Name => self.name.clone(),
            CandidateField::Email => self.email.clone(),
            CandidateField::Phone => self.phone.clone(),
            CandidateField::Experience => self.experience.map(|e| e.to_string()),
            CandidateField::Position => self.position.clone(),
            CandidateField::Location => self.location.clone(),
            CandidateField::TechStack => self.tech_stack.as_ref().map(|t| t.to_string()),
        }
    }

    /// Unset attributes in declaration order.
    pub fn missing_fields(&self) -> Vec<CandidateField> {
        CandidateField::ALL
            .into_iter()
            .filter(|field| !self.is_set(*field))
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        CandidateField::ALL.len() - self.missing_fields().len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// `(7 - missing) / 7 * 100`.
    pub fn completion_percentage(&self) -> f64 {
        let total = CandidateField::ALL.len() as f64;
        (self.filled_count() as f64 / total) * 100.0
    }

    /// Every validation rule the current values break.
    pub fn validation_issues(&self) -> Vec<ValidationError> {
        super::validation::validation_issues(self)
    }

    /// Re-formats phone and location into their canonical display forms.
    ///
    /// Idempotent; values that do not match a known shape are left alone.
    pub fn normalize(&mut self) {
        if let Some(phone) = self.phone.as_mut() {
            if let Some(canonical) = canonical_phone(phone) {
                *phone = canonical;
            }
        }

        if let Some(location) = self.location.as_mut() {
            *location = if REMOTE_LOCATION.is_match(location) {
                WORK_FROM_HOME.to_string()
            } else {
                title_case(location)
            };
        }
    }
}

/// Formats a 10-digit Indian mobile number as `+91 XXXXX XXXXX`.
pub fn format_indian_mobile(digits: &str) -> String {
    format!("+91 {} {}", &digits[..5], &digits[5..])
}

/// Canonical `+91 XXXXX XXXXX` form of a phone value, if it has a recognisable shape.
fn canonical_phone(phone: &str) -> Option<String> {
    let clean: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if clean.len() == 10 && clean.starts_with(&['6', '7', '8', '9'][..]) {
        return Some(format_indian_mobile(&clean));
    }
    match clean.strip_prefix("+91") {
        Some(rest) if rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit()) => {
            Some(format_indian_mobile(rest))
        }
        _ => None,
    }
}
