//! # Client Configuration
//!
//! Configuration management for the fireblob facade. Credential discovery
//! itself is delegated entirely to the backing SDK crates; the facade only
//! needs to know which project to address and whether to skip authentication
//! (emulators, public buckets).

use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Configuration for the facade client
///
/// # Examples
///
/// ```rust
/// use fireblob::FireblobConfig;
///
/// let config = FireblobConfig::new("my-project");
/// assert_eq!(config.project_id, "my-project");
/// assert!(!config.anonymous);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireblobConfig {
    /// Google Cloud project that owns the Firestore database and the buckets
    pub project_id: String,
    /// Skip credential discovery for the object store (emulator or public data)
    #[serde(default)]
    pub anonymous: bool,
}

impl Default for FireblobConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            anonymous: false,
        }
    }
}

impl FireblobConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            anonymous: false,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Precedence (highest to lowest):
    /// 1. `FIREBLOB_*` variables (`FIREBLOB_PROJECT_ID`, `FIREBLOB_ANONYMOUS`)
    /// 2. `GOOGLE_CLOUD_PROJECT` for the project id
    pub fn load() -> ClientResult<Self> {
        let loaded = Config::builder()
            .set_default("project_id", "")
            .map_err(|e| ClientError::config_error(e.to_string()))?
            .set_default("anonymous", false)
            .map_err(|e| ClientError::config_error(e.to_string()))?
            .add_source(Environment::with_prefix("FIREBLOB"))
            .build()
            .map_err(|e| ClientError::config_error(e.to_string()))?;

        let mut config: FireblobConfig = loaded
            .try_deserialize()
            .map_err(|e| ClientError::config_error(e.to_string()))?;

        if config.project_id.is_empty() {
            if let Ok(project_id) = std::env::var("GOOGLE_CLOUD_PROJECT") {
                config.project_id = project_id;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can address a project
    pub fn validate(&self) -> ClientResult<()> {
        if self.project_id.is_empty() {
            return Err(ClientError::config_error(
                "project id is required (set FIREBLOB_PROJECT_ID or GOOGLE_CLOUD_PROJECT)",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_new() {
        let config = FireblobConfig::new("demo-project");
        assert_eq!(config.project_id, "demo-project");
        assert!(!config.anonymous);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_project() {
        let config = FireblobConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_prefixed_env() {
        std::env::set_var("FIREBLOB_PROJECT_ID", "env-project");
        std::env::set_var("FIREBLOB_ANONYMOUS", "true");

        let config = FireblobConfig::load().unwrap();
        assert_eq!(config.project_id, "env-project");
        assert!(config.anonymous);

        std::env::remove_var("FIREBLOB_PROJECT_ID");
        std::env::remove_var("FIREBLOB_ANONYMOUS");
    }

    #[test]
    #[serial]
    fn test_load_falls_back_to_google_cloud_project() {
        std::env::remove_var("FIREBLOB_PROJECT_ID");
        std::env::set_var("GOOGLE_CLOUD_PROJECT", "fallback-project");

        let config = FireblobConfig::load().unwrap();
        assert_eq!(config.project_id, "fallback-project");

        std::env::remove_var("GOOGLE_CLOUD_PROJECT");
    }

    #[test]
    #[serial]
    fn test_load_without_project_fails() {
        std::env::remove_var("FIREBLOB_PROJECT_ID");
        std::env::remove_var("GOOGLE_CLOUD_PROJECT");

        let result = FireblobConfig::load();
        assert!(result.is_err());
    }
}
