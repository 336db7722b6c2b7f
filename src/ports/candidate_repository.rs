//! Candidate repository port.
//!
//! Holds the anonymized records produced when an interview finishes.
//! Records carry their own retention date; `purge_expired` enforces it.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::candidate::{CandidateId, CandidateRecord, CandidateStatistics};
use crate::domain::foundation::Timestamp;

/// Repository port for anonymized candidate records.
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Insert or replace a record keyed by its candidate id.
    async fn save(&self, record: &CandidateRecord) -> Result<(), StorageError>;

    /// Find a record by candidate id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, StorageError>;

    /// Remove a record. Returns whether anything was removed.
    async fn delete(&self, id: &CandidateId) -> Result<bool, StorageError>;

    /// Drop every record whose retention date is before `now`.
    ///
    /// Returns the number of records removed.
    async fn purge_expired(&self, now: &Timestamp) -> Result<usize, StorageError>;

    /// Aggregate statistics over all stored records.
    async fn statistics(&self, now: &Timestamp) -> Result<CandidateStatistics, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CandidateRepository) {}
    }
}
