//! Command-line argument parsing for ISPA Predict
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::Config;

/// ISPA Predict - early screening for acute respiratory infections
#[derive(Parser, Debug)]
#[command(name = "ispa")]
#[command(version)]
#[command(about = "Interactive ISPA prediction form with prediction history", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Classifier artifact (overrides config)
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Label encoder artifact (overrides config)
    #[arg(long)]
    pub encoder: Option<PathBuf>,

    /// History CSV file (overrides config)
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only in the log)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive menu (default)
    Start,

    /// Print the prediction history and exit
    History,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run, `start` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }

    /// Apply path overrides from the command line
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.paths.model = model.to_string_lossy().into_owned();
        }
        if let Some(encoder) = &self.encoder {
            config.paths.encoder = encoder.to_string_lossy().into_owned();
        }
        if let Some(history) = &self.history_file {
            config.paths.history = history.to_string_lossy().into_owned();
        }
    }
}

impl Verbosity {
    /// Log filter directive for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }
}
