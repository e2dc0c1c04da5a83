//! Domain value objects: config mode, compiler choices, key format, template
//! family and question identifiers.
//!
//! # Design
//!
//! These are pure value types: `Copy` (or cheap `Clone`), equality-by-value,
//! no identity. Each one owns its string representations (`as_str` for the
//! wire/manifest form, `label` for prompts) and a `FromStr` parser that accepts
//! both.

use crate::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ConfigMode ───────────────────────────────────────────────────────────────

/// Whether the user accepted the standard configuration or customizes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigMode {
    #[default]
    Standard,
    Customize,
}

impl ConfigMode {
    pub const ALL: [ConfigMode; 2] = [ConfigMode::Standard, ConfigMode::Customize];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Customize => "Customize",
        }
    }
}

impl fmt::Display for ConfigMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "customize" | "customise" | "custom" => Ok(Self::Customize),
            other => Err(invalid_choice("configMode", other, &Self::ALL.map(|m| m.as_str()))),
        }
    }
}

// ── CssCompiler ──────────────────────────────────────────────────────────────

/// CSS preprocessor branch of the static-asset pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssCompiler {
    Less,
    Sass,
    None,
}

impl CssCompiler {
    pub const ALL: [CssCompiler; 3] = [CssCompiler::Less, CssCompiler::Sass, CssCompiler::None];

    /// Prompt label, also accepted by `FromStr`.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Less => "LESS",
            Self::Sass => "SASS",
            Self::None => "none",
        }
    }

    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for CssCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CssCompiler {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "less" => Ok(Self::Less),
            "sass" | "scss" => Ok(Self::Sass),
            "none" => Ok(Self::None),
            other => Err(invalid_choice("cssCompiler", other, &Self::ALL.map(|c| c.label()))),
        }
    }
}

// ── JsCompiler ───────────────────────────────────────────────────────────────

/// JavaScript minifier branch of the static-asset pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsCompiler {
    Uglify,
    Closure,
    None,
}

impl JsCompiler {
    pub const ALL: [JsCompiler; 3] = [JsCompiler::Uglify, JsCompiler::Closure, JsCompiler::None];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Uglify => "UglifyJS",
            Self::Closure => "Closure Compiler",
            Self::None => "none",
        }
    }

    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for JsCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JsCompiler {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uglifyjs" | "uglify" => Ok(Self::Uglify),
            "closure compiler" | "closure" => Ok(Self::Closure),
            "none" => Ok(Self::None),
            other => Err(invalid_choice("jsCompiler", other, &Self::ALL.map(|c| c.label()))),
        }
    }
}

/// A compiler branch as the user left it: an explicit pick or "use the
/// system default".
///
/// Exactly one branch is ever active; the assembler replaces `SystemDefault`
/// with the compiler named by the defaults table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerSelection<C> {
    Explicit(C),
    SystemDefault,
}

impl<C: Copy> CompilerSelection<C> {
    pub fn or_default(self, default: C) -> C {
        match self {
            Self::Explicit(c) => c,
            Self::SystemDefault => default,
        }
    }
}

// ── KeyFormat ────────────────────────────────────────────────────────────────

/// Which kind of key material the HTTPS server loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyFormat {
    #[serde(rename = ".pfx")]
    #[default]
    Pfx,
    #[serde(rename = ".cert")]
    Cert,
}

impl KeyFormat {
    pub const ALL: [KeyFormat; 2] = [KeyFormat::Pfx, KeyFormat::Cert];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pfx => ".pfx",
            Self::Cert => ".cert",
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().trim_start_matches('.') {
            "pfx" => Ok(Self::Pfx),
            "cert" | "pem" => Ok(Self::Cert),
            other => Err(invalid_choice("pfx", other, &Self::ALL.map(|k| k.as_str()))),
        }
    }
}

// ── TemplateFamily ───────────────────────────────────────────────────────────

/// Family of MVC templates the planner draws from.
///
/// Only `Teddy`, the bundled engine, has engine-specific templates. `Other`
/// keeps the module name of an engine roost has no templates for; the
/// planner treats it like `Vanilla`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFamily {
    Teddy,
    Vanilla,
    Other(String),
}

impl TemplateFamily {
    /// Whether this family has its own template set.
    pub fn is_engine_specific(&self) -> bool {
        matches!(self, Self::Teddy)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Teddy => "teddy",
            Self::Vanilla => "vanilla",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── QuestionId ───────────────────────────────────────────────────────────────

/// Identifier of every question the wizard can ask.
///
/// `as_str` is the camelCase key used in answers files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionId {
    AppName,
    CreateDir,
    Dirname,
    ConfigMode,
    EnableHttps,
    HttpsOnly,
    HttpPort,
    GenerateSsl,
    CommonName,
    CountryName,
    StateName,
    LocalityName,
    OrganizationName,
    OrganizationalUnit,
    HttpsPort,
    KeyFormat,
    KeyPath,
    CertPath,
    Passphrase,
    Ca,
    RequestCert,
    RejectUnauthorized,
    CssCompiler,
    JsCompiler,
    ModelsPath,
    ViewsPath,
    ControllersPath,
    TemplatingEngine,
    TemplatingEngineName,
    TemplatingExtension,
    AdditionalTemplatingEngines,
    ViewEngines,
}

impl QuestionId {
    pub const ALL: [QuestionId; 32] = [
        Self::AppName,
        Self::CreateDir,
        Self::Dirname,
        Self::ConfigMode,
        Self::EnableHttps,
        Self::HttpsOnly,
        Self::HttpPort,
        Self::GenerateSsl,
        Self::CommonName,
        Self::CountryName,
        Self::StateName,
        Self::LocalityName,
        Self::OrganizationName,
        Self::OrganizationalUnit,
        Self::HttpsPort,
        Self::KeyFormat,
        Self::KeyPath,
        Self::CertPath,
        Self::Passphrase,
        Self::Ca,
        Self::RequestCert,
        Self::RejectUnauthorized,
        Self::CssCompiler,
        Self::JsCompiler,
        Self::ModelsPath,
        Self::ViewsPath,
        Self::ControllersPath,
        Self::TemplatingEngine,
        Self::TemplatingEngineName,
        Self::TemplatingExtension,
        Self::AdditionalTemplatingEngines,
        Self::ViewEngines,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AppName => "appName",
            Self::CreateDir => "createDir",
            Self::Dirname => "dirname",
            Self::ConfigMode => "configMode",
            Self::EnableHttps => "enableHTTPS",
            Self::HttpsOnly => "httpsOnly",
            Self::HttpPort => "httpPort",
            Self::GenerateSsl => "generateSSL",
            Self::CommonName => "commonName",
            Self::CountryName => "countryName",
            Self::StateName => "stateName",
            Self::LocalityName => "localityName",
            Self::OrganizationName => "organizationName",
            Self::OrganizationalUnit => "organizationalUnit",
            Self::HttpsPort => "httpsPort",
            Self::KeyFormat => "pfx",
            Self::KeyPath => "keyPath",
            Self::CertPath => "certPath",
            Self::Passphrase => "passphrase",
            Self::Ca => "ca",
            Self::RequestCert => "requestCert",
            Self::RejectUnauthorized => "rejectUnauthorized",
            Self::CssCompiler => "cssCompiler",
            Self::JsCompiler => "jsCompiler",
            Self::ModelsPath => "modelsPath",
            Self::ViewsPath => "viewsPath",
            Self::ControllersPath => "controllersPath",
            Self::TemplatingEngine => "templatingEngine",
            Self::TemplatingEngineName => "templatingEngineName",
            Self::TemplatingExtension => "templatingExtension",
            Self::AdditionalTemplatingEngines => "additionalTemplatingEngines",
            Self::ViewEngines => "viewEngines",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown question id: {s}"))
    }
}

impl Serialize for QuestionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn invalid_choice(question: &'static str, input: &str, choices: &[&str]) -> ValidationError {
    ValidationError::InvalidChoice {
        question,
        input: input.to_string(),
        choices: choices.join(", "),
    }
}
