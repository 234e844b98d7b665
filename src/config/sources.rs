//! Configuration sources and their merge order

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Workspace-level config file name
pub const WORKSPACE_CONFIG_FILE: &str = "custody.toml";

/// Path to the global config file, e.g. `~/.config/custody/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "custody").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Builder with every key defaulted
pub(super) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("storage.store_path", ".custody/store")?
        .set_default("storage.reports_path", ".custody/reports")?
        .set_default("fingerprint.chunk_size", 4096)?
        .set_default("fingerprint.workers", 0)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.file", "custody.log")?
        .set_default("logging.color", true)
}

pub(super) fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(path) if path.exists() => {
            debug!(config_path = %path.display(), "Using global configuration");
            builder.add_source(File::from(path).required(false))
        }
        _ => builder,
    }
}

pub(super) fn add_workspace_file(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    let path = workspace_root.join(WORKSPACE_CONFIG_FILE);
    if path.exists() {
        debug!(config_path = %path.display(), "Using workspace configuration");
        builder.add_source(File::from(path).required(false))
    } else {
        builder
    }
}

/// `CUSTODY_FINGERPRINT__WORKERS=4` sets `fingerprint.workers`
pub(super) fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CUSTODY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
