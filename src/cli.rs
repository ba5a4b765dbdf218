// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `cpmdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cpmdag",
    version,
    about = "Compute a critical-path schedule from a task plan.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    ///
    /// Default: `Cpmdag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Cpmdag.toml")]
    pub config: String,

    /// After the schedule, print the predecessor and successor lists of this
    /// task.
    #[arg(long, value_name = "NAME")]
    pub task: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CPMDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the task graph, but don't compute any dates.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
