//! Configuration resolution: raw answers + defaults → [`AppConfig`].
//!
//! Pure and deterministic. Per field an explicit non-empty answer wins,
//! otherwise the default. In `Standard` mode every customization answer is
//! ignored, even when present.

use crate::domain::assembler::{Selections, assemble, uses_bundled_engine};
use crate::domain::entities::{
    AppConfig, CertificateRequest, Defaults, HttpsConfig, KeyPath, MvcPaths, NetworkConfig,
    RawAnswers, RelativePath, ViewEngine, ViewEngines,
};
use crate::domain::error::{DomainError, ValidationError};
use crate::domain::planner::check_mvc_layout;
use crate::domain::slug::slugify;
use crate::domain::validation::DomainValidator;
use crate::domain::value_objects::{
    CompilerSelection, ConfigMode, CssCompiler, JsCompiler, KeyFormat, QuestionId, TemplateFamily,
};

/// Most view engines one app may register.
pub const MAX_VIEW_ENGINES: usize = 16;

pub fn resolve(answers: &RawAnswers, defaults: &Defaults) -> Result<AppConfig, DomainError> {
    let app_name = answers
        .text(QuestionId::AppName)?
        .unwrap_or_else(|| defaults.app_name.clone());
    let package_name = slugify(&app_name);

    let creates_directory = answers
        .flag(QuestionId::CreateDir)?
        .unwrap_or(defaults.create_dir);
    let destination = if creates_directory {
        let dirname = answers
            .text(QuestionId::Dirname)?
            .unwrap_or_else(|| package_name.clone());
        RelativePath::try_new("dirname", dirname)?
    } else {
        RelativePath::root()
    };

    let mode = match answers.text(QuestionId::ConfigMode)? {
        Some(raw) => raw.parse::<ConfigMode>()?,
        None => ConfigMode::Standard,
    };
    let custom = Customized {
        answers,
        enabled: mode == ConfigMode::Customize,
    };

    let network = resolve_network(&custom, defaults)?;
    let certificate = resolve_certificate(&custom, defaults, network.https.enable)?;
    let network = if certificate.is_some() {
        NetworkConfig {
            https: HttpsConfig {
                pfx: false,
                key_path: Some(KeyPath::KeyCert {
                    key: CertificateRequest::PRIVATE_KEY_FILE.into(),
                    cert: CertificateRequest::CERTIFICATE_FILE.into(),
                }),
                ..network.https
            },
            ..network
        }
    } else {
        network
    };

    let css = match custom.text(QuestionId::CssCompiler)? {
        Some(raw) => CompilerSelection::Explicit(raw.parse::<CssCompiler>()?),
        None => CompilerSelection::SystemDefault,
    };
    let js = match custom.text(QuestionId::JsCompiler)? {
        Some(raw) => CompilerSelection::Explicit(raw.parse::<JsCompiler>()?),
        None => CompilerSelection::SystemDefault,
    };

    let mvc = MvcPaths {
        models_path: custom_path(&custom, QuestionId::ModelsPath, &defaults.models_path)?,
        views_path: custom_path(&custom, QuestionId::ViewsPath, &defaults.views_path)?,
        controllers_path: custom_path(
            &custom,
            QuestionId::ControllersPath,
            &defaults.controllers_path,
        )?,
    };
    check_mvc_layout(&mvc)?;

    let view_engines = resolve_view_engines(&custom, defaults)?;
    let template_family = template_family(&view_engines, defaults);

    let assembly = assemble(
        &Selections {
            css,
            js,
            view_engines: &view_engines,
        },
        defaults,
    );
    if assembly.uses_templating != template_family.is_engine_specific() {
        return Err(DomainError::ConfigurationInconsistency(format!(
            "templating bundle merged = {}, but template family is {}",
            assembly.uses_templating, template_family
        )));
    }

    let config = AppConfig {
        app_name,
        package_name,
        version: defaults.version.clone(),
        destination,
        creates_directory,
        network,
        static_assets: assembly.static_assets,
        mvc,
        view_engines,
        template_family,
        dependencies: assembly.dependencies,
        dev_dependencies: defaults.dev_dependencies.clone(),
        symlink_plan: assembly.symlink_plan,
        certificate,
    };
    DomainValidator::validate_config(&config)?;
    Ok(config)
}

/// Answer lookups that see nothing unless the user chose to customize.
struct Customized<'a> {
    answers: &'a RawAnswers,
    enabled: bool,
}

impl Customized<'_> {
    fn text(&self, id: QuestionId) -> Result<Option<String>, ValidationError> {
        if self.enabled { self.answers.text(id) } else { Ok(None) }
    }

    fn flag(&self, id: QuestionId) -> Result<Option<bool>, ValidationError> {
        if self.enabled { self.answers.flag(id) } else { Ok(None) }
    }

    fn list(&self, id: QuestionId) -> Result<Option<Vec<String>>, ValidationError> {
        if self.enabled { self.answers.list(id) } else { Ok(None) }
    }
}

fn resolve_network(custom: &Customized<'_>, defaults: &Defaults) -> Result<NetworkConfig, DomainError> {
    let d = &defaults.https;
    let enable = custom.flag(QuestionId::EnableHttps)?.unwrap_or(d.enable);
    let https_only = custom.flag(QuestionId::HttpsOnly)?.unwrap_or(d.https_only);

    let http_port = match custom.text(QuestionId::HttpPort)? {
        Some(raw) => parse_port("HTTP port", &raw)?,
        None => defaults.http_port,
    };

    // HTTPS details only count when HTTPS is on.
    let https_text = |id| -> Result<Option<String>, ValidationError> {
        if enable { custom.text(id) } else { Ok(None) }
    };
    let https_flag = |id| -> Result<Option<bool>, ValidationError> {
        if enable { custom.flag(id) } else { Ok(None) }
    };

    let port = match https_text(QuestionId::HttpsPort)? {
        Some(raw) => parse_port("HTTPS port", &raw)?,
        None => d.port,
    };
    let key_format = match https_text(QuestionId::KeyFormat)? {
        Some(raw) => raw.parse::<KeyFormat>()?,
        None => d.key_format,
    };
    let pfx = key_format == KeyFormat::Pfx;

    // Generated certificates replace whatever paths were given.
    let generating = enable && custom.flag(QuestionId::GenerateSsl)?.unwrap_or(false);
    let key = https_text(QuestionId::KeyPath)?.or_else(|| d.key_path.clone());
    let cert = https_text(QuestionId::CertPath)?.or_else(|| d.cert_path.clone());
    let key_path = match (pfx, key, cert) {
        (true, Some(key), _) => Some(KeyPath::Pfx(key)),
        (false, Some(key), Some(cert)) => Some(KeyPath::KeyCert { key, cert }),
        (false, Some(_), None) if generating => None,
        (false, Some(_), None) => {
            return Err(ValidationError::Required {
                question: QuestionId::CertPath.as_str(),
            }
            .into());
        }
        (_, None, _) => None,
    };

    Ok(NetworkConfig {
        http_port,
        https: HttpsConfig {
            enable,
            https_only,
            port,
            pfx,
            key_path,
            passphrase: https_text(QuestionId::Passphrase)?.or_else(|| d.passphrase.clone()),
            ca: https_text(QuestionId::Ca)?.or_else(|| d.ca.clone()),
            request_cert: https_flag(QuestionId::RequestCert)?.unwrap_or(d.request_cert),
            reject_unauthorized: https_flag(QuestionId::RejectUnauthorized)?
                .unwrap_or(d.reject_unauthorized),
        },
    })
}

fn resolve_certificate(
    custom: &Customized<'_>,
    defaults: &Defaults,
    https_enabled: bool,
) -> Result<Option<CertificateRequest>, DomainError> {
    // A country code is checked whenever one is supplied.
    let country_name = custom.text(QuestionId::CountryName)?;
    if let Some(code) = &country_name {
        validate_country_code(code)?;
    }

    let requested = https_enabled && custom.flag(QuestionId::GenerateSsl)?.unwrap_or(false);
    if !requested {
        return Ok(None);
    }

    let common_name = custom
        .text(QuestionId::CommonName)?
        .ok_or(ValidationError::MissingSubjectField { field: "commonName" })?;
    let country_name =
        country_name.ok_or(ValidationError::MissingSubjectField { field: "countryName" })?;

    let subject = &defaults.subject;
    let or = |id, fallback: &String| -> Result<String, ValidationError> {
        Ok(custom.text(id)?.unwrap_or_else(|| fallback.clone()))
    };

    Ok(Some(CertificateRequest {
        common_name,
        country_name,
        state_name: or(QuestionId::StateName, &subject.state_name)?,
        locality_name: or(QuestionId::LocalityName, &subject.locality_name)?,
        organization_name: or(QuestionId::OrganizationName, &subject.organization_name)?,
        organizational_unit: or(QuestionId::OrganizationalUnit, &subject.organizational_unit)?,
        validity_years: 1,
    }))
}

fn custom_path(
    custom: &Customized<'_>,
    id: QuestionId,
    default: &str,
) -> Result<RelativePath, DomainError> {
    let raw = custom.text(id)?.unwrap_or_else(|| default.to_string());
    Ok(RelativePath::try_new(id.as_str(), raw)?)
}

fn resolve_view_engines(
    custom: &Customized<'_>,
    defaults: &Defaults,
) -> Result<ViewEngines, DomainError> {
    let templating = custom
        .flag(QuestionId::TemplatingEngine)?
        .unwrap_or(defaults.templating_engine);
    if !templating {
        return Ok(ViewEngines::None);
    }

    let specs = match custom.list(QuestionId::ViewEngines)? {
        Some(list) if !list.is_empty() => list,
        _ if !defaults.view_engines.is_empty() => defaults.view_engines.clone(),
        _ => vec![format!(
            "{}: {}",
            defaults.templating_extension, defaults.templating_engine_name
        )],
    };
    if specs.len() > MAX_VIEW_ENGINES {
        return Err(ValidationError::TooManyViewEngines {
            max: MAX_VIEW_ENGINES,
        }
        .into());
    }

    let mut engines: Vec<ViewEngine> = Vec::with_capacity(specs.len());
    for spec in &specs {
        let engine = parse_view_engine(spec)?;
        if engines.iter().any(|e| e.extension == engine.extension) {
            return Err(ValidationError::DuplicateViewEngineExtension {
                extension: engine.extension,
            }
            .into());
        }
        engines.push(engine);
    }
    Ok(ViewEngines::List(engines))
}

fn template_family(view_engines: &ViewEngines, defaults: &Defaults) -> TemplateFamily {
    if uses_bundled_engine(view_engines, defaults) {
        return TemplateFamily::Teddy;
    }
    match view_engines.engines().first() {
        Some(engine) => TemplateFamily::Other(engine.module_name.clone()),
        None => TemplateFamily::Vanilla,
    }
}

/// Parse `"ext: module"`. A leading dot on the extension is dropped.
pub fn parse_view_engine(spec: &str) -> Result<ViewEngine, ValidationError> {
    let malformed = || ValidationError::MalformedViewEngine {
        input: spec.to_string(),
    };
    let (ext, module) = spec.split_once(':').ok_or_else(malformed)?;
    let extension = ext.trim().trim_start_matches('.');
    let module_name = module.trim();
    if extension.is_empty() || module_name.is_empty() || module_name.contains(':') {
        return Err(malformed());
    }
    Ok(ViewEngine {
        extension: extension.to_string(),
        module_name: module_name.to_string(),
    })
}

/// Decimal port in 1–65535, no sign, no leading zero.
pub fn parse_port(field: &'static str, raw: &str) -> Result<u16, ValidationError> {
    let out_of_range = || ValidationError::PortOutOfRange {
        field,
        input: raw.to_string(),
    };
    let s = raw.trim();
    if s.is_empty() || s.len() > 5 || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(out_of_range());
    }
    match s.parse::<u32>() {
        Ok(port @ 1..=65535) => u16::try_from(port).map_err(|_| out_of_range()),
        _ => Err(out_of_range()),
    }
}

/// Exactly two uppercase ASCII letters.
pub fn validate_country_code(raw: &str) -> Result<(), ValidationError> {
    if raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCountryCode {
            input: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SymlinkRule;

    fn customize() -> RawAnswers {
        RawAnswers::new()
            .with(QuestionId::AppName, "Shop")
            .with(QuestionId::ConfigMode, "Customize")
    }

    #[test]
    fn standard_scenario_uses_defaults() {
        let defaults = Defaults::default();
        let answers = RawAnswers::new()
            .with(QuestionId::AppName, "My App")
            .with(QuestionId::CreateDir, true)
            .with(QuestionId::ConfigMode, "Standard");
        let config = resolve(&answers, &defaults).unwrap();

        assert_eq!(config.package_name, "my-app");
        assert_eq!(config.destination.to_slash(), "my-app");
        assert_eq!(config.network.http_port, defaults.http_port);
        assert!(!config.network.https.enable);
        assert!(config.effective_http_listener());
        assert_eq!(config.dependencies, defaults.bundles.base);
        assert_eq!(config.template_family, TemplateFamily::Vanilla);
        assert!(config.view_engines.is_none());
        assert_eq!(
            config.symlink_plan,
            vec![
                SymlinkRule::plain("images"),
                SymlinkRule::plain("css"),
                SymlinkRule::plain("js")
            ]
        );
        assert!(config.certificate.is_none());
    }

    #[test]
    fn standard_mode_ignores_customization_answers() {
        let answers = RawAnswers::new()
            .with(QuestionId::ConfigMode, "Standard")
            .with(QuestionId::HttpPort, "99999")
            .with(QuestionId::CssCompiler, "LESS");
        let config = resolve(&answers, &Defaults::default()).unwrap();
        assert_eq!(config.static_assets.css_compiler, CssCompiler::None);
        assert_eq!(config.network.http_port, 43711);
    }

    #[test]
    fn https_only_disables_plain_listener() {
        let answers = customize()
            .with(QuestionId::EnableHttps, true)
            .with(QuestionId::HttpsOnly, true)
            .with(QuestionId::HttpsPort, "8443");
        let config = resolve(&answers, &Defaults::default()).unwrap();
        assert!(!config.effective_http_listener());
        assert_eq!(config.network.https.port, 8443);
        assert_eq!(config.scheme_label(), "https");
    }

    #[test]
    fn rejects_out_of_range_port() {
        let answers = customize().with(QuestionId::HttpPort, "99999");
        let err = resolve(&answers, &Defaults::default()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::PortOutOfRange { field: "HTTP port", .. })
        ));
    }

    #[test]
    fn port_parsing_edges() {
        assert_eq!(parse_port("p", "1").unwrap(), 1);
        assert_eq!(parse_port("p", "65535").unwrap(), 65535);
        for bad in ["0", "65536", "080", "-1", "12a", "", "+80", "100000"] {
            assert!(parse_port("p", bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn country_code_must_be_two_uppercase_letters() {
        assert!(validate_country_code("US").is_ok());
        for bad in ["us", "USA", "U", "U1", ""] {
            assert!(validate_country_code(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn certificate_requires_common_and_country_name() {
        let base = customize()
            .with(QuestionId::EnableHttps, true)
            .with(QuestionId::GenerateSsl, true);

        let err = resolve(&base.clone().with(QuestionId::CountryName, "US"), &Defaults::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingSubjectField { field: "commonName" })
        ));

        let err = resolve(
            &base.clone().with(QuestionId::CommonName, "example.com"),
            &Defaults::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingSubjectField { field: "countryName" })
        ));
    }

    #[test]
    fn generated_certificate_overrides_key_path() {
        let answers = customize()
            .with(QuestionId::EnableHttps, true)
            .with(QuestionId::GenerateSsl, true)
            .with(QuestionId::CommonName, "example.com")
            .with(QuestionId::CountryName, "CA")
            .with(QuestionId::KeyFormat, ".pfx")
            .with(QuestionId::KeyPath, "certs/site.pfx");
        let config = resolve(&answers, &Defaults::default()).unwrap();
        let request = config.certificate.as_ref().unwrap();
        assert_eq!(request.country_name, "CA");
        assert_eq!(request.validity_years, 1);
        assert!(!config.network.https.pfx);
        assert_eq!(
            config.network.https.key_path,
            Some(KeyPath::KeyCert {
                key: "privatePem.pem".into(),
                cert: "certPem.pem".into()
            })
        );
    }

    #[test]
    fn pfx_flag_follows_key_format() {
        let answers = customize()
            .with(QuestionId::EnableHttps, true)
            .with(QuestionId::KeyFormat, ".pfx")
            .with(QuestionId::KeyPath, "certs/site.pfx");
        let config = resolve(&answers, &Defaults::default()).unwrap();
        assert!(config.network.https.pfx);
        assert_eq!(
            config.network.https.key_path,
            Some(KeyPath::Pfx("certs/site.pfx".into()))
        );
    }

    #[test]
    fn app_name_is_trimmed_before_slugify() {
        let answers = RawAnswers::new().with(QuestionId::AppName, "  x  ");
        let config = resolve(&answers, &Defaults::default()).unwrap();
        assert_eq!(config.app_name, "x");
        assert_eq!(config.package_name, "x");
    }

    #[test]
    fn no_directory_means_current_dir() {
        let answers = RawAnswers::new().with(QuestionId::CreateDir, false);
        let config = resolve(&answers, &Defaults::default()).unwrap();
        assert!(config.destination.is_root());
        assert!(!config.creates_directory);
    }

    #[test]
    fn rejects_paths_outside_project() {
        let answers = customize().with(QuestionId::ModelsPath, "../models");
        assert!(matches!(
            resolve(&answers, &Defaults::default()),
            Err(DomainError::Validation(ValidationError::PathOutsideProject { field: "modelsPath", .. }))
        ));
        let answers = RawAnswers::new().with(QuestionId::Dirname, "/tmp/app");
        assert!(resolve(&answers, &Defaults::default()).is_err());
    }

    #[test]
    fn rejects_mvc_paths_over_generated_files() {
        let defaults = Defaults::default();
        for (id, raw, taken) in [
            (QuestionId::ModelsPath, "package.json", "package.json"),
            (QuestionId::ModelsPath, "app.js/models", "app.js"),
            (QuestionId::ViewsPath, "statics/css/styles.css", "statics/css/styles.css"),
            (QuestionId::ControllersPath, "certPem.pem/x", "certPem.pem"),
        ] {
            let err = resolve(&customize().with(id, raw), &defaults).unwrap_err();
            assert!(
                matches!(
                    err,
                    DomainError::Validation(ValidationError::ReservedPath { field, taken: ref t, .. })
                        if field == id.as_str() && t == taken
                ),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn mvc_directories_may_not_overlap_their_files() {
        let answers = customize()
            .with(QuestionId::ModelsPath, "mvc/views/homepage.html")
            .with(QuestionId::ViewsPath, "mvc/views");
        assert!(matches!(
            resolve(&answers, &Defaults::default()),
            Err(DomainError::Validation(ValidationError::ReservedPath { field: "viewsPath", .. }))
        ));

        let shared = customize()
            .with(QuestionId::ViewsPath, "mvc")
            .with(QuestionId::ControllersPath, "mvc");
        assert!(resolve(&shared, &Defaults::default()).is_ok());
    }

    #[test]
    fn key_without_certificate_needs_cert_path() {
        let answers = customize()
            .with(QuestionId::EnableHttps, true)
            .with(QuestionId::KeyFormat, ".cert")
            .with(QuestionId::KeyPath, "certs/site.key");
        assert!(matches!(
            resolve(&answers, &Defaults::default()),
            Err(DomainError::Validation(ValidationError::Required { question: "certPath" }))
        ));

        let generated = answers
            .with(QuestionId::GenerateSsl, true)
            .with(QuestionId::CommonName, "localhost")
            .with(QuestionId::CountryName, "US");
        let config = resolve(&generated, &Defaults::default()).unwrap();
        assert!(config.certificate.is_some());
    }

    #[test]
    fn view_engine_validation() {
        let with = |list: Vec<&str>| {
            customize()
                .with(QuestionId::TemplatingEngine, true)
                .with(
                    QuestionId::ViewEngines,
                    list.into_iter().map(String::from).collect::<Vec<_>>(),
                )
        };
        let defaults = Defaults::default();

        let config = resolve(&with(vec!["html: teddy", "ejs: ejs"]), &defaults).unwrap();
        assert_eq!(config.template_family, TemplateFamily::Teddy);
        assert!(config.dependencies.contains_key("teddy"));

        assert!(matches!(
            resolve(&with(vec!["html: teddy", "html: ejs"]), &defaults),
            Err(DomainError::Validation(ValidationError::DuplicateViewEngineExtension { .. }))
        ));
        assert!(matches!(
            resolve(&with(vec!["html teddy"]), &defaults),
            Err(DomainError::Validation(ValidationError::MalformedViewEngine { .. }))
        ));
        assert!(matches!(
            resolve(&with(vec![": teddy"]), &defaults),
            Err(DomainError::Validation(ValidationError::MalformedViewEngine { .. }))
        ));
    }

    #[test]
    fn unknown_engine_falls_back_to_generic_family() {
        let answers = customize()
            .with(QuestionId::TemplatingEngine, true)
            .with(QuestionId::ViewEngines, vec!["pug: pug".to_string()]);
        let config = resolve(&answers, &Defaults::default()).unwrap();
        assert_eq!(config.template_family, TemplateFamily::Other("pug".into()));
        assert!(!config.dependencies.contains_key("teddy"));
    }

    #[test]
    fn templating_on_without_list_uses_default_engines() {
        let answers = customize().with(QuestionId::TemplatingEngine, true);
        let config = resolve(&answers, &Defaults::default()).unwrap();
        assert_eq!(config.view_engines.engines()[0].to_string(), "html: teddy");
    }
}
