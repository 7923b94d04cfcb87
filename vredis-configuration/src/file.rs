//! Configuration file model.

use std::path::Path;

use serde::{Deserialize, Serialize};
use vredis_core::SessionConfig;

use crate::error::ConfigError;

/// Root of a vredis configuration document.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConfigFile {
    /// Redis endpoint used by sessions.
    #[serde(default)]
    pub redis: SessionConfig,
}

impl ConfigFile {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_saphyr::from_str(yaml).map_err(|err| ConfigError::Parse(err.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Checks values serde can't reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redis.host().trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.redis.port() == 0 {
            return Err(ConfigError::InvalidPort);
        }
        Ok(())
    }

    /// Returns the session configuration.
    pub fn into_session_config(self) -> SessionConfig {
        self.redis
    }
}

impl From<ConfigFile> for SessionConfig {
    fn from(file: ConfigFile) -> Self {
        file.into_session_config()
    }
}
