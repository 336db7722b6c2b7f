//! Candidate module - the attributes collected about one applicant.
//!
//! - [`CandidateFieldSet`]: the seven optional slots filled during an interview
//! - [`validation`]: format and range rules applied before storage
//! - [`CandidateRecord`]: the sanitised, anonymised stored form
//! - [`CandidateStatistics`]: aggregates over stored records

mod field;
mod field_set;
mod record;
mod statistics;
pub mod validation;

pub use field::CandidateField;
pub use field_set::{format_indian_mobile, CandidateFieldSet, TechStack, YearsOfExperience, WORK_FROM_HOME};
pub use record::{AnonymizedCandidate, CandidateId, CandidateRecord, DEFAULT_RETENTION_DAYS};
pub use statistics::{CandidateStatistics, Tally};
pub use validation::ExperienceLevel;
