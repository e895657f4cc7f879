//! CLI argument definitions.
//!
//! All Clap derive structs for `siemulate` command-line parsing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::catalog::Difficulty;

// ============================================================================
// Root CLI
// ============================================================================

/// SOC analyst training backend.
#[derive(Parser, Debug)]
#[command(name = "siemulate", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "SIEMULATE_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the training API server.
    Serve(ServeArgs),

    /// Run an automated analyst session against a live server.
    Drill(DrillArgs),

    /// List the built-in training scenarios.
    Scenarios(ScenariosArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Serve Command
// ============================================================================

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to YAML configuration file.
    #[arg(short, long, env = "SIEMULATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bind address override (`host:port`).
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Expose Prometheus metrics on this port.
    #[arg(long, env = "SIEMULATE_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    /// Append audit events to this file as JSON lines instead of stderr.
    #[arg(long, env = "SIEMULATE_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Fixed RNG seed for reproducible sequences.
    #[arg(long)]
    pub seed: Option<u64>,
}

// ============================================================================
// Drill Command
// ============================================================================

/// Arguments for `drill`.
#[derive(Args, Debug)]
pub struct DrillArgs {
    /// Base URL of the target server.
    #[arg(short, long, default_value = "http://127.0.0.1:8000", env = "SIEMULATE_SERVER")]
    pub server: String,

    /// Scenario id to start.
    #[arg(long, default_value = "advanced_phishing")]
    pub scenario: String,

    /// Answer randomly instead of playing from the event fields.
    #[arg(long)]
    pub random: bool,

    /// Delay between event polls (humantime form, e.g. "2s").
    #[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
    pub poll_interval: Duration,

    /// Abort the drill if it has not finished after this long.
    #[arg(long, default_value = "3m", value_parser = humantime::parse_duration)]
    pub max_wait: Duration,

    /// Output format for the final summary.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Scenarios Command
// ============================================================================

/// Arguments for `scenarios`.
#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Only show scenarios of this difficulty.
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
