//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TALENT_SCOUT` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a working local setup
//! against LM Studio on port 1234.
//!
//! # Example
//!
//! ```no_run
//! use talent_scout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion backend configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Transcript and candidate storage
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TALENT_SCOUT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TALENT_SCOUT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TALENT_SCOUT__AI__MODEL=llama-3-8b` -> `ai.model = "llama-3-8b"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TALENT_SCOUT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "TALENT_SCOUT__SERVER__PORT",
        "TALENT_SCOUT__SERVER__ENVIRONMENT",
        "TALENT_SCOUT__SERVER__MAX_MESSAGE_LENGTH",
        "TALENT_SCOUT__AI__MODEL",
        "TALENT_SCOUT__AI__TEMPERATURE",
        "TALENT_SCOUT__STORAGE__EXPORTS_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.model, "local-model");
        assert_eq!(config.storage.retention_days, 730);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TALENT_SCOUT__SERVER__PORT", "3000");
        env::set_var("TALENT_SCOUT__SERVER__MAX_MESSAGE_LENGTH", "500");
        env::set_var("TALENT_SCOUT__AI__MODEL", "llama-3-8b");
        env::set_var("TALENT_SCOUT__AI__TEMPERATURE", "0.2");
        env::set_var("TALENT_SCOUT__STORAGE__EXPORTS_DIR", "/tmp/exports");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_message_length, 500);
        assert_eq!(config.ai.model, "llama-3-8b");
        assert!((config.ai.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.storage.exports_dir, std::path::PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TALENT_SCOUT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_invalid_port_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TALENT_SCOUT__SERVER__PORT", "not-a-port");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
