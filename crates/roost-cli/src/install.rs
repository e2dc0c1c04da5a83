//! Dependency installation for a generated app.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, instrument, warn};

use roost_core::application::ApplicationError;

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

#[cfg(windows)]
const NPM: &str = "npm.cmd";
#[cfg(not(windows))]
const NPM: &str = "npm";

/// Run `npm install` inside `app_dir`.
pub fn npm_install(app_dir: &Path, output: &OutputManager) -> CliResult<()> {
    run_install(NPM, app_dir, output)
}

#[instrument(skip(output), fields(dir = %app_dir.display()))]
fn run_install(program: &str, app_dir: &Path, output: &OutputManager) -> CliResult<()> {
    let spinner = output.spinner("Installing dependencies (npm i)...");
    let result = Command::new(program)
        .arg("install")
        .current_dir(app_dir)
        .stdin(Stdio::null())
        .output();
    spinner.finish();

    let out = result.map_err(|e| CliError::ExternalCommandFailed {
        command: format!("{program} install"),
        source: Some(Box::new(e)),
    })?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        warn!(status = %out.status, "dependency installation failed");
        return Err(CliError::Core(
            ApplicationError::InstallFailed {
                reason: format!("{program} install exited with {}: {}", out.status, stderr.trim()),
            }
            .into(),
        ));
    }

    info!("dependencies installed");
    output.success("Dependencies installed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};
    use crate::config::Settings;

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &Settings::default())
    }

    #[test]
    fn missing_program_is_an_external_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_install("roost-no-such-installer", dir.path(), &quiet_output()).unwrap_err();
        assert!(matches!(err, CliError::ExternalCommandFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_install_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_install("false", dir.path(), &quiet_output()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(roost_core::error::RoostError::Application(
                ApplicationError::InstallFailed { .. }
            ))
        ));
    }
}
