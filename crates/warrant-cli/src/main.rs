//! Warrant CLI
//!
//! Command-line interface for evaluating authorization decisions.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use warrant_cli::cli::Cli;
use warrant_cli::commands;

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let config = commands::load_config(args.config.as_deref()).with_context(|| {
        format!(
            "failed to load configuration{}",
            args.config
                .as_ref()
                .map(|p| format!(" from {}", p.display()))
                .unwrap_or_default()
        )
    })?;
    tracing::debug!(strategy = %config.strategy, "configuration loaded");

    let output = commands::run(&config, &args.command)?;
    println!("{}", output.text);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Install the tracing subscriber; `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
