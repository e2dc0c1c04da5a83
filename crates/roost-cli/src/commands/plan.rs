//! Implementation of the `roost plan` command.
//!
//! Prints the scaffold plan as JSON without touching the filesystem. The
//! output is meant for scripts, so it ignores `--output-format`.

use tracing::instrument;

use roost_core::domain::{plan, resolve};

use crate::{
    cli::PlanArgs,
    collect::{self, AnswerSource},
    config::Settings,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: PlanArgs, settings: Settings, output: OutputManager) -> CliResult<()> {
    let source = AnswerSource::from(&args.source);
    let answers = collect::collect(&source, &settings.defaults, &output)?;
    let config = resolve(&answers, &settings.defaults)?;
    let plan = plan(&config)?;
    output.json(&plan)?;
    Ok(())
}
