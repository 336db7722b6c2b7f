//! Persistence configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::candidate::DEFAULT_RETENTION_DAYS;

/// Where transcripts and candidate records are written
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `candidates.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory receiving interview exports
    #[serde(default = "default_exports_dir")]
    pub exports_dir: PathBuf,

    /// Days a candidate record is kept
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retention_days < 1 {
            return Err(ValidationError::InvalidRetention);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            exports_dir: default_exports_dir(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_exports_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_retention_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.exports_dir, PathBuf::from("exports"));
        assert_eq!(config.retention_days, 730);
    }

    #[test]
    fn test_validation_retention() {
        let config = StorageConfig {
            retention_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRetention));
    }
}
