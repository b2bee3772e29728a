//! Config loading, validation, and derived values.

use super::model::Config;
use crate::cvs::root_path_from_uri;
use crate::error::{CvsError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(CvsError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CvsError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| CvsError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CvsError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<()> {
        if self.cache_path.trim().is_empty() {
            return Err(CvsError::UserError(
                "config validation failed: cache_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Root path stripped from every RCS file header.
    ///
    /// The explicit `root_path` wins; otherwise it is derived from
    /// `repository_uri`.
    pub fn effective_root_path(&self) -> &str {
        match &self.root_path {
            Some(root) => root,
            None => root_path_from_uri(&self.repository_uri),
        }
    }
}
