//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{LockError, Result};
use crate::locks::LockOptions;
use std::io;
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, falling back to defaults when it is missing.
    ///
    /// Any other read error, or an invalid file, is still reported.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(LockError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file means all defaults.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| LockError::Config(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LockError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `bucket` must be non-empty, must not be `.`/`..`, and must not contain path separators
    /// - `stale_after_minutes` must be positive
    /// - `call_timeout_ms`, when set, must be positive
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(LockError::Config(
                "config validation failed: bucket must not be empty".to_string(),
            ));
        }
        if self.bucket == "." || self.bucket == ".." || self.bucket.contains(['/', '\\']) {
            return Err(LockError::Config(format!(
                "config validation failed: bucket '{}' is not a valid bucket name",
                self.bucket
            )));
        }

        if self.stale_after_minutes == 0 {
            return Err(LockError::Config(
                "config validation failed: stale_after_minutes must be greater than 0".to_string(),
            ));
        }

        if self.call_timeout_ms == Some(0) {
            return Err(LockError::Config(
                "config validation failed: call_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Lock manager options described by this config.
    pub fn lock_options(&self) -> LockOptions {
        LockOptions {
            strategy: self.acquire_strategy,
            call_timeout: self.call_timeout_ms.map(Duration::from_millis),
        }
    }
}
