//! Built-in template set.
//!
//! Every template the planner can reference is compiled into the binary with
//! `include_str!`, so a release build needs no files next to it. The set can
//! be overlaid from a directory for local customization.
//!
//! # Template resolution order
//!
//! 1. **`$ROOST_TEMPLATES_DIR`**: files found here replace the embedded
//!    template with the same id. Ids missing from the directory keep their
//!    embedded content.
//! 2. **Embedded**: the set below.
//!
//! # Environment variable
//!
//! ```env
//! ROOST_TEMPLATES_DIR=./my-templates
//! ```

use std::path::PathBuf;

use tracing::{debug, warn};

use roost_core::domain::TemplateEntry;

/// Environment variable naming an override directory.
pub const TEMPLATES_DIR_ENV: &str = "ROOST_TEMPLATES_DIR";

macro_rules! embedded {
    ($($id:literal),* $(,)?) => {
        &[$(($id, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $id)))),*]
    };
}

static EMBEDDED: &[(&str, &str)] = embedded![
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

// ── Public API ────────────────────────────────────────────────────────────────

/// All embedded templates, in planner order.
pub fn all_templates() -> Vec<TemplateEntry> {
    EMBEDDED
        .iter()
        .map(|(id, content)| TemplateEntry::embedded(id, content))
        .collect()
}

/// The override directory from [`TEMPLATES_DIR_ENV`], when set and present.
pub fn override_dir() -> Option<PathBuf> {
    let raw = std::env::var_os(TEMPLATES_DIR_ENV)?;
    let path = PathBuf::from(raw);
    if path.is_dir() {
        debug!(path = %path.display(), "using template override directory");
        Some(path)
    } else {
        warn!(
            path = %path.display(),
            "{TEMPLATES_DIR_ENV} does not point at a directory; using embedded templates only"
        );
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
