use std::collections::HashSet;

use crate::domain::entities::{AppConfig, ViewEngines};
use crate::domain::error::DomainError;
use crate::domain::slug::MAX_PACKAGE_NAME_LEN;

/// Invariant checks on a finished [`AppConfig`].
///
/// The resolver should never produce a config that fails here; a failure is a
/// defect and is reported as [`DomainError::ConfigurationInconsistency`].
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &AppConfig) -> Result<(), DomainError> {
        Self::validate_package_name(&config.package_name)?;
        Self::validate_view_engines(&config.view_engines)?;

        if config.symlink_plan.first().map(|r| r.source.as_str()) != Some("images") {
            return Err(inconsistent("symlink plan must start with 'images'"));
        }
        if config.certificate.is_some() && !config.network.https.enable {
            return Err(inconsistent("certificate requested while HTTPS is disabled"));
        }
        let assets = &config.static_assets;
        if !assets.css_compiler.is_enabled() && assets.css_params != "none" {
            return Err(inconsistent("css compiler is off but has parameters"));
        }
        if !assets.js_compiler.is_enabled() && assets.js_params != "none" {
            return Err(inconsistent("js compiler is off but has parameters"));
        }
        Ok(())
    }

    fn validate_package_name(name: &str) -> Result<(), DomainError> {
        if name.chars().count() > MAX_PACKAGE_NAME_LEN {
            return Err(inconsistent("package name exceeds 214 characters"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(inconsistent("package name contains whitespace"));
        }
        Ok(())
    }

    fn validate_view_engines(engines: &ViewEngines) -> Result<(), DomainError> {
        let ViewEngines::List(list) = engines else {
            return Ok(());
        };
        if list.is_empty() {
            return Err(inconsistent("view engine list is empty; use 'none' instead"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = list.iter().find(|e| !seen.insert(e.extension.as_str())) {
            return Err(inconsistent(&format!(
                "view engine extension '{}' appears twice",
                dup.extension
            )));
        }
        Ok(())
    }
}

fn inconsistent(message: &str) -> DomainError {
    DomainError::ConfigurationInconsistency(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Defaults, RawAnswers, ViewEngine};
    use crate::domain::resolver::resolve;

    #[test]
    fn resolved_config_passes() {
        let config = resolve(&RawAnswers::new(), &Defaults::default()).unwrap();
        assert!(DomainValidator::validate_config(&config).is_ok());
    }

    #[test]
    fn empty_engine_list_is_inconsistent() {
        let mut config = resolve(&RawAnswers::new(), &Defaults::default()).unwrap();
        config.view_engines = ViewEngines::List(Vec::new());
        assert!(matches!(
            DomainValidator::validate_config(&config),
            Err(DomainError::ConfigurationInconsistency(_))
        ));

        config.view_engines = ViewEngines::List(vec![
            ViewEngine { extension: "html".into(), module_name: "a".into() },
            ViewEngine { extension: "html".into(), module_name: "b".into() },
        ]);
        assert!(DomainValidator::validate_config(&config).is_err());
    }
}
