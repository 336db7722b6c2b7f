//! TranscriptStore port for saved interview exports.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::interview::InterviewExport;

/// Durable storage for interview export documents.
///
/// Exports are addressed by their file name, e.g.
/// `interview_Asha_Rao_20240101_120000.json`.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Persist an export and return the name it was stored under.
    async fn save(&self, export: &InterviewExport) -> Result<String, StorageError>;

    /// Names of stored exports, newest first.
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Load a previously saved export.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no export has that name
    /// - `Serialization` if the stored document is malformed
    async fn load(&self, name: &str) -> Result<InterviewExport, StorageError>;
}
