use crate::domain::entities::common::RelativePath;
use crate::domain::entities::defaults::DependencyMap;
use crate::domain::value_objects::{CssCompiler, JsCompiler, TemplateFamily};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Canonical application configuration.
///
/// Built once by the resolver and never mutated afterwards; every later
/// stage only reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub app_name: String,
    pub package_name: String,
    pub version: String,
    /// Project directory relative to the working directory. Root (`.`) when
    /// no directory is created.
    pub destination: RelativePath,
    pub creates_directory: bool,
    pub network: NetworkConfig,
    pub static_assets: StaticAssets,
    pub mvc: MvcPaths,
    pub view_engines: ViewEngines,
    pub template_family: TemplateFamily,
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
    pub symlink_plan: Vec<SymlinkRule>,
    pub certificate: Option<CertificateRequest>,
}

impl AppConfig {
    /// Whether the plain HTTP listener runs.
    pub fn effective_http_listener(&self) -> bool {
        self.network.effective_http_listener()
    }

    /// URL scheme label for the closing message: `http`, `https` or `http(s)`.
    pub fn scheme_label(&self) -> &'static str {
        let https = &self.network.https;
        match (https.enable, https.https_only) {
            (true, true) => "https",
            (true, false) => "http(s)",
            (false, _) => "http",
        }
    }

    /// Port the closing message points at.
    pub fn display_port(&self) -> u16 {
        if self.effective_http_listener() {
            self.network.http_port
        } else {
            self.network.https.port
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub http_port: u16,
    pub https: HttpsConfig,
}

impl NetworkConfig {
    pub fn effective_http_listener(&self) -> bool {
        !(self.https.enable && self.https.https_only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpsConfig {
    pub enable: bool,
    pub https_only: bool,
    pub port: u16,
    pub pfx: bool,
    pub key_path: Option<KeyPath>,
    pub passphrase: Option<String>,
    pub ca: Option<String>,
    pub request_cert: bool,
    pub reject_unauthorized: bool,
}

/// Where the HTTPS server finds its key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KeyPath {
    Pfx(String),
    KeyCert { key: String, cert: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticAssets {
    pub css_compiler: CssCompiler,
    pub js_compiler: JsCompiler,
    pub css_ext: String,
    pub css_syntax: String,
    /// Compiler options, or the string `"none"`.
    pub css_params: Value,
    pub js_params: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MvcPaths {
    pub models_path: RelativePath,
    pub views_path: RelativePath,
    pub controllers_path: RelativePath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEngine {
    pub extension: String,
    pub module_name: String,
}

impl fmt::Display for ViewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.extension, self.module_name)
    }
}

/// Either an explicit `none` or a non-empty list with unique extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ViewEngines {
    None,
    List(Vec<ViewEngine>),
}

impl ViewEngines {
    pub fn engines(&self) -> &[ViewEngine] {
        match self {
            Self::None => &[],
            Self::List(list) => list,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// One entry of `staticsSymlinksToPublic`: `source` or `source: target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymlinkRule {
    pub source: String,
    pub target: Option<String>,
}

impl SymlinkRule {
    pub fn plain(source: &str) -> Self {
        Self {
            source: source.into(),
            target: None,
        }
    }

    pub fn to(source: &str, target: &str) -> Self {
        Self {
            source: source.into(),
            target: Some(target.into()),
        }
    }
}

impl fmt::Display for SymlinkRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{}: {}", self.source, target),
            None => f.write_str(&self.source),
        }
    }
}

/// Subject of a self-signed certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub common_name: String,
    pub country_name: String,
    pub state_name: String,
    pub locality_name: String,
    pub organization_name: String,
    pub organizational_unit: String,
    pub validity_years: u32,
}

impl CertificateRequest {
    pub const PUBLIC_KEY_FILE: &'static str = "public.pem";
    pub const CERTIFICATE_FILE: &'static str = "certPem.pem";
    pub const PRIVATE_KEY_FILE: &'static str = "privatePem.pem";
}

/// PEM artifacts produced for a [`CertificateRequest`].
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateBundle {
    pub public_key_pem: String,
    pub certificate_pem: String,
    pub private_key_pem: String,
}

impl fmt::Debug for CertificateBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("public_key_pem", &self.public_key_pem.len())
            .field("certificate_pem", &self.certificate_pem.len())
            .field("private_key_pem", &"<redacted>")
            .finish()
    }
}
