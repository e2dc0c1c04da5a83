use std::collections::HashSet;

use serde::Serialize;

use crate::domain::entities::app_config::CertificateRequest;
use crate::domain::entities::common::{Permissions, RelativePath};
use crate::domain::entities::template::{RenderContext, TemplateId};
use crate::domain::error::{DomainError, PlanError};

/// Ordered file operations that materialize a project.
///
/// Paths are relative to the project destination. No two operations share a
/// destination, and nothing is planned below a planned file;
/// [`ScaffoldPlan::push`] rejects both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldPlan {
    destination: RelativePath,
    operations: Vec<Operation>,
    #[serde(skip)]
    seen: HashSet<RelativePath>,
    #[serde(skip)]
    files: HashSet<RelativePath>,
}

impl ScaffoldPlan {
    pub fn new(destination: RelativePath) -> Self {
        Self {
            destination,
            operations: Vec::new(),
            seen: HashSet::new(),
            files: HashSet::new(),
        }
    }

    /// Append an operation, checking every destination it writes.
    pub fn push(&mut self, operation: Operation) -> Result<(), DomainError> {
        let targets = operation.destinations();
        let writes_files = !matches!(operation.kind, OperationKind::Mkdir);
        let mut fresh = HashSet::with_capacity(targets.len());
        for target in &targets {
            if self.seen.contains(target) || !fresh.insert(target.clone()) {
                return Err(PlanError::DuplicateDestination {
                    path: target.to_string(),
                }
                .into());
            }
            if let Some(file) = self.files.iter().find(|file| target.is_within(file)) {
                return Err(nested(target, file));
            }
            if writes_files {
                if let Some(inner) = self.seen.iter().find(|seen| seen.is_within(target)) {
                    return Err(nested(inner, target));
                }
            }
        }
        if writes_files {
            self.files.extend(fresh.iter().cloned());
        }
        self.seen.extend(fresh);
        self.operations.push(operation);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.operations.is_empty() {
            return Err(PlanError::Empty.into());
        }
        Ok(())
    }

    pub fn destination(&self) -> &RelativePath {
        &self.destination
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Every destination path in plan order.
    pub fn destinations(&self) -> Vec<RelativePath> {
        self.operations.iter().flat_map(Operation::destinations).collect()
    }

    pub fn position(&self, destination: &str) -> Option<usize> {
        self.operations
            .iter()
            .position(|op| op.destinations().iter().any(|d| d.to_slash() == destination))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub kind: OperationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_template_id: Option<TemplateId>,
    pub destination: RelativePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<RenderContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OperationKind {
    Copy,
    Render,
    Mkdir,
    GenerateCert { request: CertificateRequest, outputs: CertificateOutputs },
}

/// The three files a certificate generation writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateOutputs {
    pub public_key: RelativePath,
    pub certificate: RelativePath,
    pub private_key: RelativePath,
}

impl CertificateOutputs {
    pub fn in_root() -> Self {
        let root = RelativePath::root();
        Self {
            public_key: root.child(CertificateRequest::PUBLIC_KEY_FILE),
            certificate: root.child(CertificateRequest::CERTIFICATE_FILE),
            private_key: root.child(CertificateRequest::PRIVATE_KEY_FILE),
        }
    }

    /// Permissions for each output, private key last.
    pub fn files(&self) -> [(&RelativePath, Permissions); 3] {
        [
            (&self.public_key, Permissions::ReadWrite),
            (&self.certificate, Permissions::ReadWrite),
            (&self.private_key, Permissions::OwnerOnly),
        ]
    }
}

fn nested(path: &RelativePath, file: &RelativePath) -> DomainError {
    PlanError::NestedUnderFile {
        path: path.to_string(),
        file: file.to_string(),
    }
    .into()
}

impl Operation {
    pub fn copy(source: &str, destination: RelativePath) -> Self {
        Self {
            kind: OperationKind::Copy,
            source_template_id: Some(TemplateId::new(source)),
            destination,
            variables: None,
        }
    }

    pub fn render(source: &str, destination: RelativePath, variables: RenderContext) -> Self {
        Self {
            kind: OperationKind::Render,
            source_template_id: Some(TemplateId::new(source)),
            destination,
            variables: Some(variables),
        }
    }

    pub fn mkdir(destination: RelativePath) -> Self {
        Self {
            kind: OperationKind::Mkdir,
            source_template_id: None,
            destination,
            variables: None,
        }
    }

    pub fn generate_cert(request: CertificateRequest) -> Self {
        let outputs = CertificateOutputs::in_root();
        Self {
            destination: outputs.certificate.clone(),
            kind: OperationKind::GenerateCert { request, outputs },
            source_template_id: None,
            variables: None,
        }
    }

    /// All paths this operation writes.
    pub fn destinations(&self) -> Vec<RelativePath> {
        match &self.kind {
            OperationKind::GenerateCert { outputs, .. } => outputs
                .files()
                .into_iter()
                .map(|(path, _)| path.clone())
                .collect(),
            _ => vec![self.destination.clone()],
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            OperationKind::Copy => "copy",
            OperationKind::Render => "render",
            OperationKind::Mkdir => "mkdir",
            OperationKind::GenerateCert { .. } => "generateCert",
        }
    }
}
