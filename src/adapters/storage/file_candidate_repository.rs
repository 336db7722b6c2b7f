//! File-based Candidate Repository Adapter
//!
//! Keeps every anonymized record in `<data_dir>/candidates.json`, a single
//! JSON array. Queries treat a missing or unreadable file as an empty store,
//! and individual entries that fail to decode are skipped with a warning.
//! Writes refuse to replace a file that exists but cannot be read or parsed,
//! so a damaged store is never silently overwritten.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::candidate::{CandidateId, CandidateRecord, CandidateStatistics};
use crate::domain::foundation::Timestamp;
use crate::ports::{CandidateRepository, StorageError};

const FILE_NAME: &str = "candidates.json";

/// JSON-array candidate store
#[derive(Debug)]
pub struct FileCandidateRepository {
    file_path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl FileCandidateRepository {
    /// Create a repository whose file lives in `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            file_path: data_dir.as_ref().join(FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn read_all(&self) -> Vec<CandidateRecord> {
        match self.read_for_update().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "candidate store unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Current records for a read-modify-write cycle. Only a missing file
    /// counts as empty here.
    async fn read_for_update(&self) -> Result<Vec<CandidateRecord>, StorageError> {
        let json = match fs::read_to_string(&self.file_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed candidate record");
                    None
                }
            })
            .collect())
    }

    /// Writes through a sibling temp file so readers never see a half-written array.
    async fn write_all(&self, records: &[CandidateRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.file_path).await?;
        Ok(())
    }
}

#[async_trait]
impl CandidateRepository for FileCandidateRepository {
    async fn save(&self, record: &CandidateRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_for_update().await?;

        match records
            .iter_mut()
            .find(|r| r.candidate_id == record.candidate_id)
        {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        self.write_all(&records).await
    }

    async fn find_by_id(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, StorageError> {
        Ok(self
            .read_all()
            .await
            .into_iter()
            .find(|r| &r.candidate_id == id))
    }

    async fn delete(&self, id: &CandidateId) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_for_update().await?;
        let before = records.len();
        records.retain(|r| &r.candidate_id != id);

        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records).await?;
        tracing::info!(candidate_id = %id, "candidate record deleted");
        Ok(true)
    }

    async fn purge_expired(&self, now: &Timestamp) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_for_update().await?;
        let before = records.len();
        records.retain(|r| !r.is_expired(now));

        let removed = before - records.len();
        if removed > 0 {
            self.write_all(&records).await?;
            tracing::info!(removed, "expired candidate records purged");
        }
        Ok(removed)
    }

    async fn statistics(&self, now: &Timestamp) -> Result<CandidateStatistics, StorageError> {
        let records = self.read_all().await;
        Ok(CandidateStatistics::from_records(&records, *now))
    }
}
