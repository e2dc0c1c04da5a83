//! Scaffold planning: [`AppConfig`] → ordered [`ScaffoldPlan`].
//!
//! The plan is built in a fixed order: certificate, manifest, root files,
//! models, views, controllers, stylesheets, then static images and scripts.
//! Template ids are paths inside the template set; families live in their own
//! subdirectory (`mvc/views/teddy/...`, `statics/css/less/...`).

use crate::domain::entities::{
    AppConfig, CertificateRequest, MvcPaths, Operation, RelativePath, ScaffoldPlan,
};
use crate::domain::error::{DomainError, ValidationError};
use crate::domain::manifest;
use crate::domain::value_objects::QuestionId;

/// Every template id a plan may reference.
pub const TEMPLATE_IDS: &[&str] = &[
    "_package.json",
    "_.stylelintrc.json",
    "app.js",
    "_.gitignore",
    "mvc/models/teddy/global.js",
    "mvc/views/robots.txt",
    "mvc/views/teddy/layouts/main.html",
    "mvc/views/teddy/404.html",
    "mvc/views/teddy/homepage.html",
    "mvc/views/vanilla/homepage.html",
    "mvc/controllers/robots.txt.js",
    "mvc/controllers/teddy/404.js",
    "mvc/controllers/teddy/homepage.js",
    "mvc/controllers/vanilla/homepage.js",
    "statics/css/less/styles.less",
    "statics/css/less/more.less",
    "statics/css/sass/styles.scss",
    "statics/css/sass/more.scss",
    "statics/css/vanilla/styles.css",
    "statics/images/logo.svg",
    "statics/images/favicon.svg",
    "statics/js/main.js",
];

/// Files written at fixed places below the project root, whatever the answers.
pub const ROOT_FILES: &[&str] = &[
    "package.json",
    ".stylelintrc.json",
    manifest::MAIN_SCRIPT,
    ".gitignore",
    CertificateRequest::PUBLIC_KEY_FILE,
    CertificateRequest::CERTIFICATE_FILE,
    CertificateRequest::PRIVATE_KEY_FILE,
    "statics/css/styles.less",
    "statics/css/more.less",
    "statics/css/styles.scss",
    "statics/css/more.scss",
    "statics/css/styles.css",
    "statics/images/logo.svg",
    "statics/images/favicon.svg",
    "statics/js/main.js",
];

const MODEL_FILES: &[&str] = &["global.js"];
const VIEW_FILES: &[&str] = &["robots.txt", "layouts/main.html", "404.html", "homepage.html"];
const CONTROLLER_FILES: &[&str] = &["robots.txt.js", "404.js", "homepage.js"];

/// Check that the MVC directories can hold their files.
///
/// No directory may be, or sit below, a file roost writes, and no two
/// generated files may land on each other. Files of both template families
/// count, so the outcome does not depend on the engine choice.
pub fn check_mvc_layout(mvc: &MvcPaths) -> Result<(), ValidationError> {
    let root = RelativePath::root();
    let mut files: Vec<RelativePath> = ROOT_FILES.iter().map(|f| root.child(f)).collect();
    let mut dirs: Vec<RelativePath> = Vec::new();

    for (id, dir, names) in [
        (QuestionId::ModelsPath, &mvc.models_path, MODEL_FILES),
        (QuestionId::ViewsPath, &mvc.views_path, VIEW_FILES),
        (QuestionId::ControllersPath, &mvc.controllers_path, CONTROLLER_FILES),
    ] {
        let reserved = |taken: &RelativePath| ValidationError::ReservedPath {
            field: id.as_str(),
            path: dir.to_string(),
            taken: taken.to_string(),
        };
        if let Some(file) = files.iter().find(|file| dir.is_within(file)) {
            return Err(reserved(file));
        }
        dirs.push(dir.clone());

        for name in names {
            let file = dir.child(name);
            if let Some(taken) = files
                .iter()
                .chain(dirs.iter())
                .find(|other| other.is_within(&file))
            {
                return Err(reserved(taken));
            }
            files.push(file);
        }
    }
    Ok(())
}

pub fn plan(config: &AppConfig) -> Result<ScaffoldPlan, DomainError> {
    let mut plan = ScaffoldPlan::new(config.destination.clone());
    let root = RelativePath::root();
    let engine_specific = config.template_family.is_engine_specific();
    let mvc = &config.mvc;

    if let Some(request) = &config.certificate {
        plan.push(Operation::generate_cert(request.clone()))?;
    }

    plan.push(Operation::render(
        "_package.json",
        root.child("package.json"),
        manifest::package_json_context(config),
    ))?;
    plan.push(Operation::copy("_.stylelintrc.json", root.child(".stylelintrc.json")))?;
    plan.push(Operation::copy("app.js", root.child(manifest::MAIN_SCRIPT)))?;
    plan.push(Operation::copy("_.gitignore", root.child(".gitignore")))?;

    // models
    if engine_specific {
        plan.push(Operation::render(
            "mvc/models/teddy/global.js",
            mvc.models_path.child("global.js"),
            manifest::global_model_context(config),
        ))?;
    } else {
        plan.push(Operation::mkdir(mvc.models_path.clone()))?;
    }

    // views
    plan.push(Operation::copy(
        "mvc/views/robots.txt",
        mvc.views_path.child("robots.txt"),
    ))?;
    if engine_specific {
        for file in &VIEW_FILES[1..] {
            plan.push(Operation::copy(
                &format!("mvc/views/teddy/{file}"),
                mvc.views_path.child(file),
            ))?;
        }
    } else {
        plan.push(Operation::render(
            "mvc/views/vanilla/homepage.html",
            mvc.views_path.child("homepage.html"),
            manifest::homepage_context(config),
        ))?;
    }

    // controllers
    plan.push(Operation::copy(
        "mvc/controllers/robots.txt.js",
        mvc.controllers_path.child(CONTROLLER_FILES[0]),
    ))?;
    let (family, controllers) = if engine_specific {
        ("teddy", &CONTROLLER_FILES[1..])
    } else {
        ("vanilla", &CONTROLLER_FILES[2..])
    };
    for file in controllers {
        plan.push(Operation::copy(
            &format!("mvc/controllers/{family}/{file}"),
            mvc.controllers_path.child(file),
        ))?;
    }

    // stylesheets
    let css_dir = root.child("statics/css");
    let stylesheets: &[(&str, &str)] = match config.static_assets.css_ext.as_str() {
        "less" => &[
            ("statics/css/less/styles.less", "styles.less"),
            ("statics/css/less/more.less", "more.less"),
        ],
        "scss" => &[
            ("statics/css/sass/styles.scss", "styles.scss"),
            ("statics/css/sass/more.scss", "more.scss"),
        ],
        _ => &[("statics/css/vanilla/styles.css", "styles.css")],
    };
    for (source, file) in stylesheets {
        plan.push(Operation::copy(source, css_dir.child(file)))?;
    }

    for source in [
        "statics/images/logo.svg",
        "statics/images/favicon.svg",
        "statics/js/main.js",
    ] {
        plan.push(Operation::copy(source, root.child(source)))?;
    }

    plan.validate()?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Defaults, OperationKind, RawAnswers};
    use crate::domain::resolver::resolve;
    use proptest::prelude::*;

    fn plan_for(answers: RawAnswers) -> ScaffoldPlan {
        let config = resolve(&answers, &Defaults::default()).unwrap();
        plan(&config).unwrap()
    }

    fn destinations(plan: &ScaffoldPlan) -> Vec<String> {
        plan.destinations().iter().map(|d| d.to_slash()).collect()
    }

    #[test]
    fn standard_plan_uses_generic_family() {
        let plan = plan_for(RawAnswers::new().with(QuestionId::AppName, "My App"));
        let dests = destinations(&plan);
        assert_eq!(plan.destination().to_slash(), "my-app");
        assert_eq!(dests[0], "package.json");
        assert!(dests.contains(&"mvc/models".to_string()));
        assert!(dests.contains(&"mvc/views/homepage.html".to_string()));
        assert!(dests.contains(&"mvc/controllers/homepage.js".to_string()));
        assert!(dests.contains(&"statics/css/styles.css".to_string()));
        assert!(!dests.iter().any(|d| d.ends_with("404.html")));
        assert_eq!(dests.last().map(String::as_str), Some("statics/js/main.js"));
    }

    #[test]
    fn teddy_plan_uses_engine_templates() {
        let plan = plan_for(
            RawAnswers::new()
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::TemplatingEngine, true)
                .with(QuestionId::CssCompiler, "SASS"),
        );
        let dests = destinations(&plan);
        for expected in [
            "mvc/models/global.js",
            "mvc/views/layouts/main.html",
            "mvc/views/404.html",
            "mvc/controllers/404.js",
            "statics/css/styles.scss",
            "statics/css/more.scss",
        ] {
            assert!(dests.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!dests.contains(&"mvc/models".to_string()));
        assert!(!dests.contains(&"statics/css/styles.css".to_string()));
    }

    #[test]
    fn certificate_comes_before_manifest() {
        let plan = plan_for(
            RawAnswers::new()
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::EnableHttps, true)
                .with(QuestionId::GenerateSsl, true)
                .with(QuestionId::CommonName, "localhost")
                .with(QuestionId::CountryName, "US"),
        );
        assert!(matches!(
            plan.operations()[0].kind,
            OperationKind::GenerateCert { .. }
        ));
        assert!(plan.position("privatePem.pem") < plan.position("package.json"));
    }

    #[test]
    fn destinations_are_unique() {
        let plan = plan_for(
            RawAnswers::new()
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::TemplatingEngine, true),
        );
        let dests = destinations(&plan);
        let mut unique = dests.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), dests.len());
    }

    #[test]
    fn colliding_paths_are_rejected_before_planning() {
        let answers = RawAnswers::new()
            .with(QuestionId::ConfigMode, "Customize")
            .with(QuestionId::ModelsPath, "package.json");
        let err = resolve(&answers, &Defaults::default()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::ReservedPath { ref taken, .. })
                if taken == "package.json"
        ));
    }

    #[test]
    fn layout_check_knows_every_generated_file() {
        let teddy = plan_for(
            RawAnswers::new()
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::TemplatingEngine, true)
                .with(QuestionId::EnableHttps, true)
                .with(QuestionId::GenerateSsl, true)
                .with(QuestionId::CommonName, "localhost")
                .with(QuestionId::CountryName, "US"),
        );
        let vanilla = plan_for(RawAnswers::new().with(QuestionId::CssCompiler, "LESS"));
        let known: Vec<String> = ROOT_FILES
            .iter()
            .map(|f| f.to_string())
            .chain(MODEL_FILES.iter().map(|f| format!("mvc/models/{f}")))
            .chain(VIEW_FILES.iter().map(|f| format!("mvc/views/{f}")))
            .chain(CONTROLLER_FILES.iter().map(|f| format!("mvc/controllers/{f}")))
            .chain(["mvc/models".to_string()])
            .collect();
        for plan in [teddy, vanilla] {
            for dest in destinations(&plan) {
                assert!(known.contains(&dest), "{dest} is not covered by the layout check");
            }
        }
    }

    #[test]
    fn plan_only_references_known_templates() {
        let plan = plan_for(
            RawAnswers::new()
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::TemplatingEngine, true)
                .with(QuestionId::CssCompiler, "LESS"),
        );
        for op in plan.operations() {
            if let Some(id) = &op.source_template_id {
                assert!(TEMPLATE_IDS.contains(&id.as_str()), "unknown template {id}");
            }
        }
    }

    fn mvc_path() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::of(prop::sample::select(vec![
            "mvc/models",
            "mvc",
            ".",
            "lib/app",
            "package.json",
            "app.js/models",
            "statics/css",
            "mvc/views/homepage.html",
        ]))
    }

    prop_compose! {
        fn customized_answers()(
            css in prop::option::of(prop::sample::select(vec!["LESS", "SASS", "none"])),
            js in prop::option::of(prop::sample::select(vec!["UglifyJS", "Closure Compiler", "none"])),
            engines in prop::option::of(prop::sample::select(vec![
                vec!["html: teddy"],
                vec!["pug: pug"],
                vec!["html: teddy", "ejs: ejs"],
            ])),
            https in any::<bool>(),
            https_only in any::<bool>(),
            generate in any::<bool>(),
            paths in (mvc_path(), mvc_path(), mvc_path()),
        ) -> RawAnswers {
            let mut answers = RawAnswers::new()
                .with(QuestionId::ConfigMode, "Customize")
                .with(QuestionId::TemplatingEngine, engines.is_some())
                .with(QuestionId::EnableHttps, https)
                .with(QuestionId::HttpsOnly, https_only)
                .with(QuestionId::GenerateSsl, generate)
                .with(QuestionId::CommonName, "localhost")
                .with(QuestionId::CountryName, "US");
            if let Some(css) = css {
                answers.insert(QuestionId::CssCompiler, css);
            }
            if let Some(js) = js {
                answers.insert(QuestionId::JsCompiler, js);
            }
            if let Some(engines) = engines {
                answers.insert(
                    QuestionId::ViewEngines,
                    engines.into_iter().map(String::from).collect::<Vec<_>>(),
                );
            }
            let (models, views, controllers) = paths;
            for (id, path) in [
                (QuestionId::ModelsPath, models),
                (QuestionId::ViewsPath, views),
                (QuestionId::ControllersPath, controllers),
            ] {
                if let Some(path) = path {
                    answers.insert(id, path);
                }
            }
            answers
        }
    }

    proptest! {
        #[test]
        fn resolved_configs_always_plan(answers in customized_answers()) {
            let defaults = Defaults::default();
            let first = resolve(&answers, &defaults);
            let second = resolve(&answers, &defaults);
            prop_assert_eq!(&first, &second);

            if let Ok(config) = first {
                let plan = plan(&config);
                prop_assert!(plan.is_ok(), "{:?}", plan);
                let dests = destinations(&plan.unwrap());
                let mut unique = dests.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), dests.len());
            }
        }
    }
}
