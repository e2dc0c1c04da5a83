pub mod answers;
pub mod app_config;
pub mod common;
pub mod defaults;
pub mod plan;
pub mod template;

pub use answers::{Answer, RawAnswers};
pub use app_config::{
    AppConfig, CertificateBundle, CertificateRequest, HttpsConfig, KeyPath, MvcPaths,
    NetworkConfig, StaticAssets, SymlinkRule, ViewEngine, ViewEngines,
};
pub use common::{Permissions, RelativePath};
pub use defaults::{Defaults, DependencyMap};
pub use plan::{CertificateOutputs, Operation, OperationKind, ScaffoldPlan};
pub use template::{RenderContext, TemplateEntry, TemplateId, TemplateSource};
