//! Simple variable substitution renderer.

use roost_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RenderContext, TemplateEntry},
    error::RoostResult,
};
use tracing::{instrument, warn};

/// Renders `{{VAR}}` placeholders from a [`RenderContext`].
///
/// Unknown placeholders are left as written. In strict mode they fail the
/// render instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer {
    strict: bool,
}

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that rejects templates with unfilled placeholders.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(&self, template: &TemplateEntry, context: &RenderContext) -> RoostResult<String> {
        let source = template.source.as_str();
        let missing = context.missing(source);
        if !missing.is_empty() {
            if self.strict {
                return Err(ApplicationError::RenderingFailed {
                    id: template.id.to_string(),
                    reason: format!("no value for {}", missing.join(", ")),
                }
                .into());
            }
            warn!(missing = ?missing, "template has placeholders without values");
        }
        Ok(context.render(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(content: &'static str) -> TemplateEntry {
        TemplateEntry::embedded("mvc/views/vanilla/homepage.html", content)
    }

    #[test]
    fn substitutes_known_variables() {
        let ctx = RenderContext::new().with_variable("APP_NAME", "Demo");
        let out = SimpleRenderer::new()
            .render(&entry("<h1>{{ APP_NAME }}</h1>"), &ctx)
            .unwrap();
        assert_eq!(out, "<h1>Demo</h1>");
    }

    #[test]
    fn strict_mode_rejects_missing_values() {
        let err = SimpleRenderer::strict()
            .render(&entry("{{APP_NAME}} {{VERSION}}"), &RenderContext::new())
            .unwrap_err();
        assert!(err.to_string().contains("APP_NAME, VERSION"));
    }

    #[test]
    fn lenient_mode_keeps_unknown_placeholders() {
        let out = SimpleRenderer::new()
            .render(&entry("{{VERSION}}"), &RenderContext::new())
            .unwrap();
        assert_eq!(out, "{{VERSION}}");
    }
}
