//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log level: warn by default, each `-v` one step louder.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v info, -vv debug, -vvv trace)",
        long_help = "Raise the log level on stderr. RUST_LOG, when set, takes precedence.
    -v      info: generation steps
    -vv     debug: answers, plan sizes, template lookups
    -vvv    trace: everything"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain output without ANSI colours. Also set by `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Never use colors"
    )]
    pub no_color: bool,

    /// Configuration file path, replacing the per-user default.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// `auto` picks `human` on a terminal and `plain` otherwise.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How to render command output"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Human-readable with colors.
    Human,
    /// Plain text without colors.
    Plain,
    /// JSON output.
    Json,
}
