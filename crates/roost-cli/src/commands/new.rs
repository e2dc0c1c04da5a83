//! Implementation of the `roost new` command.
//!
//! Responsibility: collect answers, hand them to the core pipeline, and
//! report the result. No business logic lives here.

use tracing::{debug, info, instrument};

use roost_core::application::{ApplicationError, TemplateService};
use roost_core::domain::{AppConfig, ScaffoldPlan, plan, resolve};

use crate::{
    cli::{NewArgs, OutputFormat},
    collect::{self, AnswerSource},
    config::Settings,
    error::{CliError, CliResult, IntoCli},
    install,
    output::OutputManager,
};

const CONFIG_DOCS: &str =
    "https://github.com/rooseveltframework/roosevelt#configure-your-app-with-parameters";

/// Execute the `roost new` command.
///
/// Dispatch sequence:
/// 1. Collect answers (standard install, answers file or prompts)
/// 2. Resolve them into an app configuration and plan the files
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Confirm with the user unless `--yes` or answers were prepared
/// 5. Check the template store, then execute the plan via `ScaffoldService`
/// 6. Install dependencies if asked, then print the closing message
#[instrument(skip_all)]
pub fn execute(args: NewArgs, settings: Settings, output: OutputManager) -> CliResult<()> {
    let defaults = &settings.defaults;
    let source = AnswerSource::from(&args.source);

    // 1-2. Answers → config → plan
    let answers = collect::collect(&source, defaults, &output)?;
    let config = resolve(&answers, defaults)?;
    let plan = plan(&config)?;
    debug!(
        app = %config.app_name,
        destination = %plan.destination(),
        operations = plan.len(),
        "plan ready"
    );

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        return show_plan(&plan, &output);
    }

    // 4. Confirm
    if source.is_interactive() && !args.yes {
        let target = plan.destination().to_slash();
        let question = if target.is_empty() {
            format!("Generate {} in the current directory?", config.app_name)
        } else {
            format!("Generate {} in ./{target}?", config.app_name)
        };
        if !collect::confirm(&question)? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Write
    ensure_templates(&super::template_service(&settings)?, &plan)?;
    let root = std::env::current_dir().with_cli_context(|| "reading the working directory")?;
    let service = super::scaffold_service(&settings)?;

    output.header(&format!("Generating '{}'...", config.app_name))?;
    info!(app = %config.app_name, root = %root.display(), "generation started");

    let report = service.execute(&plan, &root, args.force)?;

    info!(files = report.files.len(), "generation completed");
    output.success(&format!(
        "Wrote {} files to {}",
        report.files.len(),
        report.destination.display()
    ))?;

    // 6. Install + closing message
    if args.install_deps {
        install::npm_install(&report.destination, &output)?;
    }

    if !args.skip_closing_message {
        for line in closing_message(&config, args.install_deps) {
            output.print(&line)?;
        }
    }

    Ok(())
}

/// Fail before anything is written when a planned template is unavailable.
fn ensure_templates(templates: &TemplateService, plan: &ScaffoldPlan) -> CliResult<()> {
    let missing = templates.missing_for(plan);
    if missing.is_empty() {
        return Ok(());
    }
    let id = missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(CliError::Core(ApplicationError::TemplateNotFound { id }.into()))
}

// ── Plan display ──────────────────────────────────────────────────────────────

/// Print a plan as JSON or as an aligned operation list.
pub fn show_plan(plan: &ScaffoldPlan, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(plan)?;
        return Ok(());
    }

    let destination = plan.destination().to_slash();
    output.info(&format!(
        "Dry run: would generate {} operations in {}",
        plan.len(),
        if destination.is_empty() { "." } else { destination.as_str() }
    ))?;
    for operation in plan.operations() {
        for path in operation.destinations() {
            output.print(&format!("  {:<13} {}", operation.kind_label(), path.to_slash()))?;
        }
    }
    Ok(())
}

// ── Closing message ───────────────────────────────────────────────────────────

/// End-of-run instructions.
fn closing_message(config: &AppConfig, installed: bool) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("Your app {} has been generated.", config.app_name),
        String::new(),
        "To run the app:".to_string(),
    ];
    if config.creates_directory {
        lines.push(format!("- Enter the app directory: cd {}", config.destination.to_slash()));
    }
    if !installed {
        lines.push("- Install dependencies: npm i".to_string());
    }
    lines.push("- To run in dev mode:   npm run dev".to_string());
    lines.push("- To run in prod mode:  npm run prod".to_string());
    lines.push(format!(
        "Once running, visit {}://localhost:{}",
        config.scheme_label(),
        config.display_port()
    ));
    lines.push(String::new());
    lines.push(format!(
        "To make further changes to the config, edit package.json. \
         See {CONFIG_DOCS} for information on the configuration options."
    ));
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────
