//! The defaults table every unanswered question falls back to.
//!
//! `Defaults` deserializes with `#[serde(default)]` at every level, so a
//! config file only has to name the keys it wants to change.

use crate::domain::value_objects::{CssCompiler, JsCompiler, KeyFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Module name → version range.
pub type DependencyMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Defaults {
    pub app_name: String,
    pub version: String,
    pub create_dir: bool,
    pub http_port: u16,
    pub https: HttpsDefaults,
    pub subject: SubjectDefaults,
    pub models_path: String,
    pub views_path: String,
    pub controllers_path: String,
    /// Whether a templating engine is used when the user does not say.
    pub templating_engine: bool,
    pub templating_engine_name: String,
    pub templating_extension: String,
    /// `"ext: module"` entries used when templating is on but no engine was
    /// entered.
    pub view_engines: Vec<String>,
    pub default_css_compiler: CssCompiler,
    pub default_js_compiler: JsCompiler,
    pub bundles: Bundles,
    pub dev_dependencies: DependencyMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpsDefaults {
    pub enable: bool,
    pub https_only: bool,
    pub port: u16,
    pub key_format: KeyFormat,
    pub key_path: Option<String>,
    pub cert_path: Option<String>,
    pub passphrase: Option<String>,
    pub ca: Option<String>,
    pub request_cert: bool,
    pub reject_unauthorized: bool,
}

/// Optional certificate subject fields. `commonName` and `countryName`
/// have no defaults: they must be answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubjectDefaults {
    pub state_name: String,
    pub locality_name: String,
    pub organization_name: String,
    pub organizational_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bundles {
    pub base: DependencyMap,
    pub templating: TemplatingBundle,
    pub less: CssBundle,
    pub sass: CssBundle,
    pub uglify: JsBundle,
    pub closure: JsBundle,
}

/// The bundled templating engine and what it pulls in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplatingBundle {
    /// Identifier matched against view engine module names.
    pub engine: String,
    pub dependencies: DependencyMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CssBundle {
    pub dependencies: DependencyMap,
    pub options: Value,
    pub css_ext: String,
    pub css_syntax: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsBundle {
    pub dependencies: DependencyMap,
    pub options: Value,
}

impl Defaults {
    pub fn css_bundle(&self, compiler: CssCompiler) -> Option<&CssBundle> {
        match compiler {
            CssCompiler::Less => Some(&self.bundles.less),
            CssCompiler::Sass => Some(&self.bundles.sass),
            CssCompiler::None => None,
        }
    }

    pub fn js_bundle(&self, compiler: JsCompiler) -> Option<&JsBundle> {
        match compiler {
            JsCompiler::Uglify => Some(&self.bundles.uglify),
            JsCompiler::Closure => Some(&self.bundles.closure),
            JsCompiler::None => None,
        }
    }
}

fn deps(pairs: &[(&str, &str)]) -> DependencyMap {
    pairs
        .iter()
        .map(|(name, range)| (name.to_string(), range.to_string()))
        .collect()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            app_name: "My Roosevelt Sample App".into(),
            version: "0.0.1".into(),
            create_dir: true,
            http_port: 43711,
            https: HttpsDefaults::default(),
            subject: SubjectDefaults::default(),
            models_path: "mvc/models".into(),
            views_path: "mvc/views".into(),
            controllers_path: "mvc/controllers".into(),
            templating_engine: false,
            templating_engine_name: "teddy".into(),
            templating_extension: "html".into(),
            view_engines: vec!["html: teddy".into()],
            default_css_compiler: CssCompiler::None,
            default_js_compiler: JsCompiler::None,
            bundles: Bundles::default(),
            dev_dependencies: deps(&[
                ("nodemon", "~3.1.0"),
                ("standard", "~17.1.0"),
                ("stylelint", "~16.2.0"),
                ("stylelint-config-standard", "~36.0.0"),
            ]),
        }
    }
}

impl Default for HttpsDefaults {
    fn default() -> Self {
        Self {
            enable: false,
            https_only: false,
            port: 43733,
            key_format: KeyFormat::Cert,
            key_path: None,
            cert_path: None,
            passphrase: None,
            ca: None,
            request_cert: false,
            reject_unauthorized: true,
        }
    }
}

impl Default for Bundles {
    fn default() -> Self {
        Self {
            base: deps(&[("roosevelt", "~0.21.0")]),
            templating: TemplatingBundle {
                engine: "teddy".into(),
                dependencies: deps(&[("teddy", "~0.6.0")]),
            },
            less: CssBundle {
                dependencies: deps(&[("roosevelt-less", "~0.11.0")]),
                options: json!({
                    "nodeModule": "roosevelt-less",
                    "params": { "cleanCSS": { "advanced": true, "aggressiveMerging": true } }
                }),
                css_ext: "less".into(),
                css_syntax: "--custom-syntax postcss-less".into(),
            },
            sass: CssBundle {
                dependencies: deps(&[("roosevelt-sass", "~0.11.0")]),
                options: json!({
                    "nodeModule": "roosevelt-sass",
                    "params": { "outputStyle": "compressed", "precision": 5 }
                }),
                css_ext: "scss".into(),
                css_syntax: "--custom-syntax postcss-scss".into(),
            },
            uglify: JsBundle {
                dependencies: deps(&[("roosevelt-uglify", "~0.3.0")]),
                options: json!({ "nodeModule": "roosevelt-uglify", "params": {} }),
            },
            closure: JsBundle {
                dependencies: deps(&[("roosevelt-closure", "~0.3.0")]),
                options: json!({
                    "nodeModule": "roosevelt-closure",
                    "params": { "compilationLevel": "ADVANCED" }
                }),
            },
        }
    }
}
