// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wattcheck - compare the energy cost of searching vs. asking an AI assistant.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod estimate;
mod render;
mod shell;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wattcheck_config::WattcheckConfig;
use wattcheck_core::WattcheckError;

/// Wattcheck - compare the energy cost of searching vs. asking an AI assistant.
#[derive(Parser, Debug)]
#[command(name = "wattcheck", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate one query.
    Estimate(estimate::EstimateArgs),
    /// Estimate queries interactively.
    Shell,
    /// Print the effective configuration as TOML.
    Config,
    /// Check configuration and environment.
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => wattcheck_config::load_and_validate_path(path),
        None => wattcheck_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        // doctor reports the broken config itself and checks the rest against defaults
        Err(_) if matches!(cli.command, Some(Commands::Doctor)) => WattcheckConfig::default(),
        Err(errors) => {
            wattcheck_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.output.log_level);

    let use_color = !cli.plain && config.output.color && std::io::stdout().is_terminal();

    let result = match cli.command {
        Some(Commands::Estimate(args)) => estimate::run_estimate(&config, &args, use_color),
        Some(Commands::Shell) => shell::run_shell(&config, use_color),
        Some(Commands::Config) => print_config(&config),
        Some(Commands::Doctor) => doctor::run_doctor(&config, cli.config.as_deref(), use_color),
        None => {
            println!("wattcheck: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &WattcheckConfig) -> Result<(), WattcheckError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| WattcheckError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber on stderr with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "wattcheck={log_level},wattcheck_estimator={log_level},wattcheck_config={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
