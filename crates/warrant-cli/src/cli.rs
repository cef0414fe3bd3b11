//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use warrant_core::CONFIG_ENV_VAR;

/// Warrant - voter-based authorization decisions
#[derive(Parser, Debug)]
#[command(name = "warrant", author, version)]
#[command(about = "Evaluate authorization decisions against a Warrant configuration", long_about = None)]
pub struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide whether an actor is granted an attribute
    Check {
        /// Attribute to check, e.g. ROLE_ADMIN or IS_AUTHENTICATED
        #[arg(short, long)]
        attribute: String,

        /// Actor identity; omit for an anonymous actor
        #[arg(short, long)]
        identity: Option<String>,

        /// Label granted to the actor (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,

        /// Print every voter's vote
        #[arg(long)]
        trace: bool,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the hierarchy expansion of a label set
    Expand {
        /// Label to expand (repeatable)
        #[arg(short, long = "label", required = true)]
        labels: Vec<String>,
    },

    /// Configuration commands
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Validate the configuration, including the label hierarchy
    Validate,
    /// Print the effective configuration as TOML
    Show,
}
