//! Scaffold Service - main application orchestrator.
//!
//! Executes a [`ScaffoldPlan`] against the driven ports:
//! 1. Check the destination (refuse a non-empty one unless forced)
//! 2. Run every operation in plan order
//! 3. Roll back a freshly created destination on failure
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CertificateGenerator, Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{
        CertificateBundle, CertificateOutputs, Operation, OperationKind, Permissions,
        RenderContext, ScaffoldPlan, TemplateId,
    },
    error::RoostResult,
};

/// What a successful run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub destination: PathBuf,
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    certificates: Box<dyn CertificateGenerator>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = ScaffoldService::new(
    ///     Box::new(InMemoryStore::with_builtin()?),
    ///     Box::new(SimpleRenderer::new()),
    ///     Box::new(LocalFilesystem::new()),
    ///     Box::new(OpensslCertificateGenerator::new()),
    /// );
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        certificates: Box<dyn CertificateGenerator>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            certificates,
        }
    }

    /// Materialize `plan` under `root`.
    ///
    /// The project lands in `root/<plan destination>`. An existing, non-empty
    /// destination is refused unless `force` is set. When the destination
    /// was created by this call and an operation fails, it is removed again.
    #[instrument(
        skip_all,
        fields(
            root = %root.display(),
            destination = %plan.destination(),
            operations = plan.len()
        )
    )]
    pub fn execute(
        &self,
        plan: &ScaffoldPlan,
        root: &Path,
        force: bool,
    ) -> RoostResult<ExecutionReport> {
        let target = root.join(plan.destination().as_path());
        let existed = self.filesystem.exists(&target);

        if existed && !force && !self.filesystem.is_empty_dir(&target)? {
            return Err(ApplicationError::ProjectExists { path: target }.into());
        }

        match self.write_all(plan, &target) {
            Ok(report) => {
                info!(
                    files = report.files.len(),
                    directories = report.directories.len(),
                    "Scaffold completed successfully"
                );
                Ok(report)
            }
            Err(e) if existed => {
                warn!(error = %e, "Write failed; destination existed before, leaving it in place");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(&target);
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_all(&self, plan: &ScaffoldPlan, target: &Path) -> RoostResult<ExecutionReport> {
        self.filesystem.create_dir_all(target)?;

        let mut report = ExecutionReport {
            destination: target.to_path_buf(),
            ..ExecutionReport::default()
        };
        for operation in plan.operations() {
            self.apply(operation, target, &mut report)?;
        }
        Ok(report)
    }

    fn apply(
        &self,
        operation: &Operation,
        target: &Path,
        report: &mut ExecutionReport,
    ) -> RoostResult<()> {
        let path = target.join(operation.destination.as_path());
        debug!(kind = operation.kind_label(), path = %path.display(), "Applying operation");

        match &operation.kind {
            OperationKind::Mkdir => {
                self.filesystem.create_dir_all(&path)?;
                report.directories.push(path);
            }
            OperationKind::Copy => {
                let template = self.store.get(source_id(operation)?)?;
                self.write(&path, template.source.as_str(), Permissions::ReadWrite, report)?;
            }
            OperationKind::Render => {
                let template = self.store.get(source_id(operation)?)?;
                let empty = RenderContext::new();
                let context = operation.variables.as_ref().unwrap_or(&empty);
                let content = self.renderer.render(&template, context)?;
                self.write(&path, &content, Permissions::ReadWrite, report)?;
            }
            OperationKind::GenerateCert { request, outputs } => {
                info!(common_name = %request.common_name, "Generating self-signed certificate");
                let bundle = self.certificates.generate(request)?;
                for (relative, permissions) in outputs.files() {
                    let content = pem_for(&bundle, outputs, relative.as_path());
                    let file = target.join(relative.as_path());
                    self.write(&file, content, permissions, report)?;
                }
            }
        }
        Ok(())
    }

    fn write(
        &self,
        path: &Path,
        content: &str,
        permissions: Permissions,
        report: &mut ExecutionReport,
    ) -> RoostResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content, permissions)?;
        report.files.push(path.to_path_buf());
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, target: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(target) {
            warn!(
                error = %e,
                path = %target.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

fn source_id(operation: &Operation) -> RoostResult<&TemplateId> {
    operation.source_template_id.as_ref().ok_or_else(|| {
        ApplicationError::RenderingFailed {
            id: operation.destination.to_string(),
            reason: "operation has no source template".into(),
        }
        .into()
    })
}

fn pem_for<'a>(bundle: &'a CertificateBundle, outputs: &CertificateOutputs, file: &Path) -> &'a str {
    if file == outputs.private_key.as_path() {
        &bundle.private_key_pem
    } else if file == outputs.public_key.as_path() {
        &bundle.public_key_pem
    } else {
        &bundle.certificate_pem
    }
}
