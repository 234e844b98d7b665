//! Custody CLI Binary
//!
//! Command-line interface for evidence fingerprinting and chain-of-custody records.

use clap::Parser;
use custody::cli::{exit_code, map_error, Cli, RunContext};
use custody::config::ConfigLoader;
use custody::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Custody CLI starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone(), cli.store.clone())
    {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing workspace: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(&cli.workspace)
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    if cli.quiet {
        config.enabled = false;
        return config;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }

    // CLI arguments take priority over the config file
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}
