//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format and
//! destination come from the configuration file, overridable through
//! `CUSTODY_LOG`, `CUSTODY_LOG_FORMAT` and `CUSTODY_LOG_OUTPUT`.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_ENV: &str = "CUSTODY_LOG";
const LOG_FORMAT_ENV: &str = "CUSTODY_LOG_FORMAT";
const LOG_OUTPUT_ENV: &str = "CUSTODY_LOG_OUTPUT";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Turn logging off entirely
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is "file"
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Colored output (text format on a terminal stream only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("custody.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.format != "json" && self.format != "text" {
            return Err(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.format
            ));
        }
        parse_output(&self.output).map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (CUSTODY_LOG, CUSTODY_LOG_FORMAT, CUSTODY_LOG_OUTPUT)
/// 2. Configuration (file values with CLI flags applied on top)
/// 3. Defaults
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let (writer, ansi) = match output {
        Output::Stdout => (BoxMakeWriter::new(std::io::stdout), config.color),
        Output::Stderr => (BoxMakeWriter::new(std::io::stderr), config.color),
        Output::File => (BoxMakeWriter::new(Mutex::new(open_log_file(config)?)), false),
    };

    let registry = Registry::default().with(filter);
    let result = if format == "json" {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| ApiError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, ApiError> {
    if let Some(parent) = config.file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::ConfigError(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to open log file {}: {}",
                config.file.display(),
                e
            ))
        })
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ApiError::ConfigError(format!("Invalid log level {}: {}", config.level, e)))?;

    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

/// Determine output format from environment or config
fn determine_format(config: &LoggingConfig) -> Result<String, ApiError> {
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    if config.format != "json" && config.format != "text" {
        return Err(ApiError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            config.format
        )));
    }

    Ok(config.format.clone())
}

/// Determine output destination from environment or config
fn determine_output(config: &LoggingConfig) -> Result<Output, ApiError> {
    if let Ok(output) = std::env::var(LOG_OUTPUT_ENV) {
        return parse_output(&output);
    }
    parse_output(&config.output)
}

fn parse_output(output: &str) -> Result<Output, ApiError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(ApiError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
            output
        ))),
    }
}
