//! Dependency assembly: folds the user's compiler and engine picks into one
//! flat dependency map plus the static-asset settings that go with them.

use serde_json::Value;

use crate::domain::entities::{
    Defaults, DependencyMap, StaticAssets, SymlinkRule, ViewEngines,
};
use crate::domain::value_objects::{CompilerSelection, CssCompiler, JsCompiler};

/// What the assembler needs from the resolved answers.
#[derive(Debug, Clone)]
pub struct Selections<'a> {
    pub css: CompilerSelection<CssCompiler>,
    pub js: CompilerSelection<JsCompiler>,
    pub view_engines: &'a ViewEngines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub dependencies: DependencyMap,
    pub static_assets: StaticAssets,
    pub symlink_plan: Vec<SymlinkRule>,
    /// Whether the bundled templating engine's dependencies were merged.
    pub uses_templating: bool,
}

/// Merge order is base → templating → css → js; a later bundle overwrites
/// an earlier one on key collision.
pub fn assemble(selections: &Selections<'_>, defaults: &Defaults) -> Assembly {
    let mut dependencies = defaults.bundles.base.clone();
    let mut symlink_plan = vec![SymlinkRule::plain("images")];

    let uses_templating = uses_bundled_engine(selections.view_engines, defaults);
    if uses_templating {
        merge(&mut dependencies, &defaults.bundles.templating.dependencies);
    }

    let css_compiler = selections.css.or_default(defaults.default_css_compiler);
    let (css_ext, css_syntax, css_params) = match defaults.css_bundle(css_compiler) {
        Some(bundle) => {
            merge(&mut dependencies, &bundle.dependencies);
            symlink_plan.push(SymlinkRule::to("css", ".build/css"));
            (
                bundle.css_ext.clone(),
                bundle.css_syntax.clone(),
                bundle.options.clone(),
            )
        }
        None => {
            symlink_plan.push(SymlinkRule::plain("css"));
            ("css".to_string(), String::new(), none_params())
        }
    };

    let js_compiler = selections.js.or_default(defaults.default_js_compiler);
    let js_params = match defaults.js_bundle(js_compiler) {
        Some(bundle) => {
            merge(&mut dependencies, &bundle.dependencies);
            symlink_plan.push(SymlinkRule::to("js", ".build/js"));
            bundle.options.clone()
        }
        None => {
            symlink_plan.push(SymlinkRule::plain("js"));
            none_params()
        }
    };

    Assembly {
        dependencies,
        static_assets: StaticAssets {
            css_compiler,
            js_compiler,
            css_ext,
            css_syntax,
            css_params,
            js_params,
        },
        symlink_plan,
        uses_templating,
    }
}

/// True when any selected engine's module name contains the bundled engine id.
pub fn uses_bundled_engine(view_engines: &ViewEngines, defaults: &Defaults) -> bool {
    let engine = defaults.bundles.templating.engine.as_str();
    !engine.is_empty()
        && view_engines
            .engines()
            .iter()
            .any(|e| e.module_name.contains(engine))
}

fn merge(into: &mut DependencyMap, bundle: &DependencyMap) {
    into.extend(bundle.iter().map(|(k, v)| (k.clone(), v.clone())));
}

fn none_params() -> Value {
    Value::String("none".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ViewEngine;

    fn teddy() -> ViewEngines {
        ViewEngines::List(vec![ViewEngine {
            extension: "html".into(),
            module_name: "teddy".into(),
        }])
    }

    #[test]
    fn less_none_teddy_merges_three_bundles() {
        let defaults = Defaults::default();
        let engines = teddy();
        let assembly = assemble(
            &Selections {
                css: CompilerSelection::Explicit(CssCompiler::Less),
                js: CompilerSelection::Explicit(JsCompiler::None),
                view_engines: &engines,
            },
            &defaults,
        );

        let mut expected = defaults.bundles.base.clone();
        expected.extend(defaults.bundles.templating.dependencies.clone());
        expected.extend(defaults.bundles.less.dependencies.clone());
        assert_eq!(assembly.dependencies, expected);

        assert_eq!(assembly.static_assets.css_ext, "less");
        assert_eq!(assembly.static_assets.js_params, Value::String("none".into()));
        let links: Vec<String> = assembly.symlink_plan.iter().map(|s| s.to_string()).collect();
        assert_eq!(links, ["images", "css: .build/css", "js"]);
    }

    #[test]
    fn later_bundle_wins_on_collision() {
        let mut defaults = Defaults::default();
        defaults
            .bundles
            .base
            .insert("roosevelt-uglify".into(), "~0.1.0".into());
        let engines = ViewEngines::None;
        let assembly = assemble(
            &Selections {
                css: CompilerSelection::Explicit(CssCompiler::None),
                js: CompilerSelection::Explicit(JsCompiler::Uglify),
                view_engines: &engines,
            },
            &defaults,
        );
        assert_eq!(assembly.dependencies["roosevelt-uglify"], "~0.3.0");
    }

    #[test]
    fn system_default_uses_configured_compiler() {
        let defaults = Defaults {
            default_css_compiler: CssCompiler::Sass,
            default_js_compiler: JsCompiler::Closure,
            ..Defaults::default()
        };
        let engines = ViewEngines::None;
        let assembly = assemble(
            &Selections {
                css: CompilerSelection::SystemDefault,
                js: CompilerSelection::SystemDefault,
                view_engines: &engines,
            },
            &defaults,
        );
        assert_eq!(assembly.static_assets.css_compiler, CssCompiler::Sass);
        assert_eq!(assembly.static_assets.css_ext, "scss");
        assert!(assembly.dependencies.contains_key("roosevelt-sass"));
        assert!(assembly.dependencies.contains_key("roosevelt-closure"));
        assert!(!assembly.uses_templating);
    }

    #[test]
    fn none_branch_links_raw_sources() {
        let defaults = Defaults::default();
        let engines = ViewEngines::None;
        let assembly = assemble(
            &Selections {
                css: CompilerSelection::Explicit(CssCompiler::None),
                js: CompilerSelection::Explicit(JsCompiler::None),
                view_engines: &engines,
            },
            &defaults,
        );
        assert_eq!(assembly.dependencies, defaults.bundles.base);
        assert_eq!(assembly.static_assets.css_ext, "css");
        assert_eq!(assembly.static_assets.css_syntax, "");
        let links: Vec<String> = assembly.symlink_plan.iter().map(|s| s.to_string()).collect();
        assert_eq!(links, ["images", "css", "js"]);
    }
}
