//! One module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod plan;
pub mod templates;

use roost_adapters::{InMemoryStore, LocalFilesystem, OpensslCertificateGenerator, SimpleRenderer};
use roost_core::application::{ScaffoldService, TemplateService};

use crate::{config::Settings, error::CliResult};

/// Embedded templates, overlaid by `$ROOST_TEMPLATES_DIR` and then by the
/// configured template directory.
fn template_store(settings: &Settings) -> CliResult<InMemoryStore> {
    let store = InMemoryStore::from_environment()?;
    if let Some(dir) = &settings.templates.dir {
        store.overlay(dir)?;
    }
    Ok(store)
}

fn scaffold_service(settings: &Settings) -> CliResult<ScaffoldService> {
    Ok(ScaffoldService::new(
        Box::new(template_store(settings)?),
        Box::new(SimpleRenderer::strict()),
        Box::new(LocalFilesystem::new()),
        Box::new(OpensslCertificateGenerator::new()),
    ))
}

fn template_service(settings: &Settings) -> CliResult<TemplateService> {
    Ok(TemplateService::new(Box::new(template_store(settings)?)))
}
