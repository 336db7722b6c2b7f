//! File-based Transcript Store Adapter
//!
//! Writes each interview export as pretty JSON into one directory. Listing
//! re-reads every `interview_*.json` file so that damaged documents are
//! noticed and skipped rather than surfaced to callers.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::interview::InterviewExport;
use crate::ports::{StorageError, TranscriptStore};

const FILE_PREFIX: &str = "interview_";
const FILE_SUFFIX: &str = ".json";

/// Directory of exported interview documents
#[derive(Debug, Clone)]
pub struct FileTranscriptStore {
    base_path: PathBuf,
}

impl FileTranscriptStore {
    /// Create a store rooted at `base_path`. The directory is created on first save.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn is_export_name(name: &str) -> bool {
        name.starts_with(FILE_PREFIX)
            && name.ends_with(FILE_SUFFIX)
            && !name.contains(&['/', '\\'][..])
            && !name.contains("..")
    }

    /// Candidate names for one export: the preferred name, then `_2`, `_3`, ...
    fn name_candidates(preferred: String) -> impl Iterator<Item = String> {
        let stem = preferred.trim_end_matches(FILE_SUFFIX).to_string();
        std::iter::once(preferred)
            .chain((2u32..).map(move |n| format!("{}_{}{}", stem, n, FILE_SUFFIX)))
    }

    /// Creates the first free name exclusively, so concurrent saves never
    /// share a file.
    async fn create_unique(&self, preferred: String) -> Result<(String, fs::File), StorageError> {
        for name in Self::name_candidates(preferred) {
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.base_path.join(&name))
                .await
            {
                Ok(file) => return Ok((name, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(StorageError::Io("no free export name".to_string()))
    }

    async fn read_export(path: &Path) -> Result<InterviewExport, StorageError> {
        let json = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[async_trait]
impl TranscriptStore for FileTranscriptStore {
    async fn save(&self, export: &InterviewExport) -> Result<String, StorageError> {
        fs::create_dir_all(&self.base_path).await?;

        let json = serde_json::to_string_pretty(export)?;
        let (name, mut file) = self.create_unique(export.file_name()).await?;
        file.write_all(json.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(file = %name, "interview export written");
        Ok(name)
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found: Vec<(SystemTime, String)> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !Self::is_export_name(&name) {
                continue;
            }
            if let Err(e) = Self::read_export(&entry.path()).await {
                tracing::warn!(file = %name, error = %e, "skipping unreadable interview export");
                continue;
            }
            let modified = entry
                .metadata()
                .await
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((modified, name));
        }

        // Newest first; the timestamp in the name breaks mtime ties.
        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        Ok(found.into_iter().map(|(_, name)| name).collect())
    }

    async fn load(&self, name: &str) -> Result<InterviewExport, StorageError> {
        if !Self::is_export_name(name) {
            return Err(StorageError::NotFound(name.to_string()));
        }
        let path = self.base_path.join(name);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(name.to_string()));
        }
        Self::read_export(&path).await
    }
}
