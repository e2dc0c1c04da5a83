//! `package.json` contents derived from an [`AppConfig`].
//!
//! The manifest template carries placeholders for whole JSON fragments; this
//! module produces those fragments with `serde_json` so the rendered file is
//! always valid JSON.

use serde_json::{Map, Value, json};

use crate::domain::entities::{AppConfig, KeyPath, RenderContext, ViewEngines};

/// Main script of every generated app.
pub const MAIN_SCRIPT: &str = "app.js";

/// npm scripts. `lint` globs the stylesheet extension in use.
pub fn scripts(config: &AppConfig) -> Value {
    let assets = &config.static_assets;
    let mut stylelint = format!("stylelint \"statics/css/**/*.{}\"", assets.css_ext);
    if !assets.css_syntax.is_empty() {
        stylelint.push(' ');
        stylelint.push_str(&assets.css_syntax);
    }
    json!({
        "dev": format!("nodemon {MAIN_SCRIPT} --development-mode"),
        "prod": format!("node {MAIN_SCRIPT} --production-mode"),
        "start": format!("node {MAIN_SCRIPT}"),
        "lint": format!("standard && {stylelint}"),
    })
}

/// The `rooseveltConfig` section. `port` is left out when only HTTPS runs.
pub fn roosevelt_config(config: &AppConfig) -> Value {
    let https = &config.network.https;
    let key_path = match &https.key_path {
        None => Value::Null,
        Some(KeyPath::Pfx(pfx)) => json!({ "pfx": pfx }),
        Some(KeyPath::KeyCert { key, cert }) => json!({ "key": key, "cert": cert }),
    };

    let mut section = Map::new();
    if config.effective_http_listener() {
        section.insert("port".into(), json!(config.network.http_port));
    }
    section.insert(
        "https".into(),
        json!({
            "enable": https.enable,
            "httpsOnly": https.https_only,
            "port": https.port,
            "pfx": https.pfx,
            "keyPath": key_path,
            "passphrase": https.passphrase,
            "ca": https.ca,
            "requestCert": https.request_cert,
            "rejectUnauthorized": https.reject_unauthorized,
        }),
    );
    section.insert("modelsPath".into(), json!(config.mvc.models_path));
    section.insert("viewsPath".into(), json!(config.mvc.views_path));
    section.insert("controllersPath".into(), json!(config.mvc.controllers_path));
    section.insert("viewEngine".into(), view_engine_value(&config.view_engines));
    section.insert(
        "css".into(),
        json!({ "compiler": config.static_assets.css_params }),
    );
    section.insert(
        "js".into(),
        json!({ "compiler": config.static_assets.js_params }),
    );
    section.insert(
        "staticsSymlinksToPublic".into(),
        Value::Array(
            config
                .symlink_plan
                .iter()
                .map(|rule| Value::String(rule.to_string()))
                .collect(),
        ),
    );
    Value::Object(section)
}

fn view_engine_value(engines: &ViewEngines) -> Value {
    match engines {
        ViewEngines::None => Value::String("none".into()),
        ViewEngines::List(list) => {
            Value::Array(list.iter().map(|e| Value::String(e.to_string())).collect())
        }
    }
}

/// Variables for `_package.json`.
pub fn package_json_context(config: &AppConfig) -> RenderContext {
    RenderContext::new()
        .with_variable("APP_NAME", json_string(&config.package_name))
        .with_variable("VERSION", json_string(&config.version))
        .with_variable("SCRIPTS", fragment(&scripts(config)))
        .with_variable("DEPENDENCIES", fragment(&json!(config.dependencies)))
        .with_variable("DEV_DEPENDENCIES", fragment(&json!(config.dev_dependencies)))
        .with_variable("ROOSEVELT_CONFIG", fragment(&roosevelt_config(config)))
}

/// Variables for the teddy global model (a JS string literal).
pub fn global_model_context(config: &AppConfig) -> RenderContext {
    RenderContext::new().with_variable("APP_NAME", json_string(&config.app_name))
}

/// Variables for the vanilla homepage (HTML text).
pub fn homepage_context(config: &AppConfig) -> RenderContext {
    RenderContext::new().with_variable("APP_NAME", escape_html(&config.app_name))
}

fn json_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Pretty JSON indented to sit one level deep in the manifest.
fn fragment(value: &Value) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|_| value.to_string())
        .replace('\n', "\n  ")
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Defaults, RawAnswers};
    use crate::domain::resolver::resolve;
    use crate::domain::value_objects::QuestionId;

    const TEMPLATE: &str = r#"{
  "name": {{APP_NAME}},
  "version": {{VERSION}},
  "scripts": {{SCRIPTS}},
  "dependencies": {{DEPENDENCIES}},
  "devDependencies": {{DEV_DEPENDENCIES}},
  "rooseveltConfig": {{ROOSEVELT_CONFIG}}
}
"#;

    fn config(answers: RawAnswers) -> AppConfig {
        resolve(&answers, &Defaults::default()).unwrap()
    }

    #[test]
    fn rendered_manifest_parses_and_mirrors_config() {
        let config = config(
            RawAnswers::new()
                .with(QuestionId::AppName, "Quote \"Me\" App")
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::CssCompiler, "LESS"),
        );
        let rendered = package_json_context(&config).render(TEMPLATE);
        let parsed: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed["name"], "quote-\"me\"-app");
        assert_eq!(parsed["dependencies"]["roosevelt-less"], "~0.11.0");
        assert_eq!(parsed["rooseveltConfig"]["port"], 43711);
        assert_eq!(parsed["rooseveltConfig"]["viewEngine"], "none");
        assert_eq!(
            parsed["rooseveltConfig"]["staticsSymlinksToPublic"],
            json!(["images", "css: .build/css", "js"])
        );
        assert!(
            parsed["scripts"]["lint"]
                .as_str()
                .unwrap()
                .contains("statics/css/**/*.less\" --custom-syntax postcss-less")
        );
    }

    #[test]
    fn https_only_omits_plain_port() {
        let config = config(
            RawAnswers::new()
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::EnableHttps, true)
                .with(QuestionId::HttpsOnly, true),
        );
        let section = roosevelt_config(&config);
        assert!(section.get("port").is_none());
        assert_eq!(section["https"]["enable"], true);
        assert_eq!(section["https"]["httpsOnly"], true);
    }

    #[test]
    fn key_path_shapes() {
        let config = config(
            RawAnswers::new()
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::EnableHttps, true)
                .with(QuestionId::KeyFormat, ".cert")
                .with(QuestionId::KeyPath, "certs/key.pem")
                .with(QuestionId::CertPath, "certs/cert.pem"),
        );
        let section = roosevelt_config(&config);
        assert_eq!(
            section["https"]["keyPath"],
            json!({ "key": "certs/key.pem", "cert": "certs/cert.pem" })
        );
        assert_eq!(section["https"]["pfx"], false);
    }

    #[test]
    fn homepage_name_is_escaped() {
        assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
    }
}
