//! Configuration System
//!
//! Layered configuration built with the `config` crate. Sources, lowest to
//! highest precedence: built-in defaults, the global config file, the
//! workspace `custody.toml`, then `CUSTODY_<SECTION>__<KEY>` environment
//! variables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::FingerprintConfig;
use config::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod sources;

pub use sources::{global_config_path, WORKSPACE_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub fingerprint: FingerprintConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage locations; relative paths resolve against the workspace root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default = "default_reports_path")]
    pub reports_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".custody/store")
}

fn default_reports_path() -> PathBuf {
    PathBuf::from(".custody/reports")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            reports_path: default_reports_path(),
        }
    }
}

impl StorageConfig {
    /// Absolute `(store_path, reports_path)` for a workspace
    pub fn resolve_paths(&self, workspace_root: &Path) -> (PathBuf, PathBuf) {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                workspace_root.join(p)
            }
        };
        (resolve(&self.store_path), resolve(&self.reports_path))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.store_path.as_os_str().is_empty() {
            return Err("Store path cannot be empty".to_string());
        }
        if self.reports_path.as_os_str().is_empty() {
            return Err("Reports path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl CustodyConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = self.storage.validate() {
            errors.push(format!("storage: {}", e));
        }
        if self.fingerprint.chunk_size == 0 {
            errors.push("fingerprint: chunk_size must be greater than 0".to_string());
        }
        if let Err(e) = self.logging.validate() {
            errors.push(format!("logging: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}

/// Loads [`CustodyConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    pub fn load(workspace_root: &Path) -> Result<CustodyConfig, ApiError> {
        Self::load_with_global(workspace_root, global_config_path().as_deref())
    }

    /// Load with an explicit global config file (or none)
    pub fn load_with_global(
        workspace_root: &Path,
        global_file: Option<&Path>,
    ) -> Result<CustodyConfig, ApiError> {
        let mut builder = sources::builder_with_defaults()?;
        builder = sources::add_global_file(builder, global_file);
        builder = sources::add_workspace_file(builder, workspace_root);
        builder = sources::add_environment(builder);
        Self::finish(builder.build()?)
    }

    /// Load from a single config file on top of the defaults
    ///
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<CustodyConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = sources::builder_with_defaults()?
            .add_source(config::File::from(path).required(true));
        Self::finish(sources::add_environment(builder).build()?)
    }

    fn finish(raw: Config) -> Result<CustodyConfig, ApiError> {
        let config: CustodyConfig = raw.try_deserialize()?;
        config.validate().map_err(|errors| {
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;
        Ok(config)
    }
}
