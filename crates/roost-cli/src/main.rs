//! # roost
//!
//! Generator for Roosevelt MVC web applications.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber.
//! 3. Load settings (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the command handler.
//! 6. Translate any [`CliError`] into a message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                       |
//! |------|-------------------------------|
//! |  0   | Success                       |
//! |  1   | Internal / system error       |
//! |  2   | Invalid input or answers      |
//! |  3   | Resource not found            |
//! |  4   | Configuration error           |

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::Settings,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod collect;
mod commands;
mod config;
mod error;
mod install;
mod logging;
mod output;
#[cfg(feature = "interactive")]
mod prompt;

fn main() -> ExitCode {
    // .env is optional; real environment variables win.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version land here too, with exit code 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "roost started"
    );

    // ── 3. Load settings ──────────────────────────────────────────────────
    // `init` creates the file, so it must not require one.
    let loaded = if matches!(cli.command, Commands::Init(_)) {
        Ok(Settings::default())
    } else {
        Settings::load(cli.global.config.as_deref())
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            eprintln!("Error: {e:#}");
            return ExitCode::from(4);
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &settings);
    let verbose = cli.global.verbose > 0;
    let colored = output.supports_color() && std::io::stderr().is_terminal();

    // ── 5. Dispatch + 6. Error handling ───────────────────────────────────
    match run(cli, settings, output) {
        Ok(()) => {
            info!("roost completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, colored),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, settings: Settings, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::New(cmd) => commands::new::execute(cmd, settings, output),
        Commands::Plan(cmd) => commands::plan::execute(cmd, settings, output),
        Commands::Templates(cmd) => commands::templates::execute(cmd, settings, output),
        Commands::Init(cmd) => commands::init::execute(cmd, &cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, settings, output),
    }
}

/// Log the error, print it to stderr and pick the exit code.
fn handle_error(err: CliError, verbose: bool, colored: bool) -> ExitCode {
    err.log();

    let msg = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }
}
