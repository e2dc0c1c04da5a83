//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "roost",
    bin_name = "roost",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate Roosevelt MVC web applications",
    long_about = "roost asks a few questions (or reads an answers file) and \
                  generates a ready-to-run Roosevelt app: package.json, MVC \
                  folders, statics and optional self-signed certificates.",
    after_help = "EXAMPLES:\n\
        \x20 roost new\n\
        \x20 roost new --standard-install my-app --install-deps\n\
        \x20 roost new --answers answers.json --dry-run --output-format json\n\
        \x20 roost templates --format list\n\
        \x20 roost completions bash > /usr/share/bash-completion/completions/roost",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new app.
    #[command(
        visible_alias = "n",
        about = "Generate a new Roosevelt app",
        after_help = "EXAMPLES:\n\
            \x20 roost new                              # interactive\n\
            \x20 roost new -s                           # standard config, dir named after the app\n\
            \x20 roost new -s blog -i                   # standard config in ./blog, then npm i\n\
            \x20 roost new --answers answers.json -y    # non-interactive"
    )]
    New(NewArgs),

    /// Print the file plan without writing anything.
    #[command(
        about = "Print the scaffold plan as JSON",
        after_help = "EXAMPLES:\n\
            \x20 roost plan -s\n\
            \x20 roost plan --answers answers.json | jq '.operations[].destination'"
    )]
    Plan(PlanArgs),

    /// List the embedded templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 roost templates\n\
            \x20 roost templates --format json"
    )]
    Templates(TemplatesArgs),

    /// Initialise a roost configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 roost init          # default location\n\
            \x20 roost init --force  # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 roost completions bash > ~/.local/share/bash-completion/completions/roost\n\
            \x20 roost completions zsh  > ~/.zfunc/_roost\n\
            \x20 roost completions fish > ~/.config/fish/completions/roost.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the roost configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 roost config get defaults.httpPort\n\
            \x20 roost config list\n\
            \x20 roost config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where answers come from when not prompting.
#[derive(Debug, Clone, Default, Args)]
pub struct AnswerSourceArgs {
    /// Skip every prompt and use the standard configuration.
    ///
    /// The optional value names the directory to create; without it the
    /// directory is named after the package.
    #[arg(
        short = 's',
        long = "standard-install",
        value_name = "NAME",
        num_args = 0..=1,
        conflicts_with = "answers",
        help = "Skip prompts and use the standard config (optionally in NAME)"
    )]
    pub standard_install: Option<Option<String>>,

    /// JSON file of prepared answers keyed by question id.
    #[arg(
        long = "answers",
        value_name = "FILE",
        help = "Read answers from a JSON file instead of prompting"
    )]
    pub answers: Option<PathBuf>,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `roost new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    #[command(flatten)]
    pub source: AnswerSourceArgs,

    /// Run `npm i` in the generated app.
    #[arg(
        short = 'i',
        long = "install-deps",
        help = "Install dependencies after generating"
    )]
    pub install_deps: bool,

    /// Do not print the closing instructions.
    #[arg(
        long = "skip-closing-message",
        help = "Skip the closing message when generation is complete"
    )]
    pub skip_closing_message: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and generate immediately"
    )]
    pub yes: bool,

    /// Write into a non-empty destination directory.
    #[arg(long = "force", help = "Write into an existing, non-empty directory")]
    pub force: bool,

    /// Preview the plan without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── plan ──────────────────────────────────────────────────────────────────────

/// Arguments for `roost plan`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: AnswerSourceArgs,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `roost templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Output format.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Formats for `roost templates`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned columns.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `roost init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long = "force", help = "Overwrite existing config")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `roost completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum, help = "Target shell")]
    pub shell: Shell,
}

/// Supported shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

/// Configuration sub-commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print a single value by dotted key.
    #[command(about = "Get a configuration value")]
    Get {
        /// Dotted key, e.g. `defaults.httpPort` or `output.no_color`.
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the whole effective configuration.
    #[command(about = "List all configuration values")]
    List,

    /// Print the configuration file path.
    #[command(about = "Show the configuration file path")]
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
