//! CLI parse: clap types for custody. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Custody CLI - Evidence folder fingerprinting and chain-of-custody records
#[derive(Parser, Debug)]
#[command(name = "custody")]
#[command(about = "Fingerprint evidence folders and keep a chain-of-custody register")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config lookup and relative storage paths)
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Custody store directory (overrides storage.store_path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the fingerprint and inventory of a folder
    Fingerprint {
        /// Evidence folder
        path: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Worker threads for hashing (0 = sequential)
        #[arg(long)]
        workers: Option<usize>,
        /// Omit the per-file inventory from text output
        #[arg(long)]
        summary: bool,
    },
    /// Fingerprint a folder and report whether it is already registered
    Check {
        /// Evidence folder
        path: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate, fingerprint and register an evidence folder
    Register {
        /// Evidence folder
        path: PathBuf,
        /// Officer full name
        #[arg(long)]
        officer: String,
        /// Officer badge number (letters and digits)
        #[arg(long)]
        badge: String,
        /// Officer rank
        #[arg(long)]
        rank: Option<String>,
        /// Officer unit
        #[arg(long)]
        unit: Option<String>,
        /// Procedure (case) number
        #[arg(long = "case")]
        case_number: String,
        /// Crime scene description
        #[arg(long)]
        scene: String,
        /// Collection time (RFC 3339 or "YYYY-MM-DD HH:MM", UTC)
        #[arg(long)]
        collected_at: String,
        /// Case notes
        #[arg(long)]
        notes: Option<String>,
        /// Registration remarks
        #[arg(long)]
        remarks: Option<String>,
        /// Explicit document number (generated when absent)
        #[arg(long)]
        document: Option<String>,
        /// Do not render a report
        #[arg(long)]
        no_report: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the most recent registrations
    List {
        /// Maximum number of records
        #[arg(long, default_value = "50")]
        limit: usize,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one registration
    Show {
        /// Document number
        document: String,
        /// Include the file inventory
        #[arg(long)]
        files: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Render (or re-render) the report of a registration
    Report {
        /// Document number
        document: String,
    },
    /// Re-fingerprint a folder and compare it with a registration
    Verify {
        /// Document number
        document: String,
        /// Folder to verify
        path: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}
