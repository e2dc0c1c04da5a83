//! Template identity, content and render context.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TemplateId (Value Object)                                  │
//! │  └── Path of the source inside the template set             │
//! │      e.g. "_package.json", "mvc/views/teddy/404.html"      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TemplateEntry                                              │
//! │  └── id + TemplateSource (static or owned text)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RenderContext (Value Object)                               │
//! │  └── Variable substitution: {{APP_NAME}} -> "my-app"        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Templates are plain text. Only `Render` operations substitute
//! placeholders; `Copy` operations write the source verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a template source, the slash-separated path inside the
/// template set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Template family directory this source belongs to, if any
    /// (`mvc/views/teddy/404.html` → `teddy`).
    pub fn family(&self) -> Option<&str> {
        let parts: Vec<&str> = self.0.split('/').collect();
        match parts.as_slice() {
            ["mvc" | "statics", _, family, _, ..] => Some(*family),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Source of template content: either compile-time or runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compile-time string literal (`include_str!`).
    Static(&'static str),

    /// Runtime-owned string (loaded from an override directory).
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    /// Quick check for placeholder syntax.
    pub fn has_placeholders(&self) -> bool {
        let s = self.as_str();
        s.contains("{{") && s.contains("}}")
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

/// A template known to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub id: TemplateId,
    pub source: TemplateSource,
    /// Where the entry came from (`embedded` or an override directory).
    pub origin: String,
}

impl TemplateEntry {
    pub fn embedded(id: &str, content: &'static str) -> Self {
        Self {
            id: TemplateId::new(id),
            source: TemplateSource::Static(content),
            origin: "embedded".into(),
        }
    }

    pub fn size(&self) -> usize {
        self.source.as_str().len()
    }
}

/// Context for template rendering.
///
/// Variables are `SCREAMING_SNAKE_CASE` and already encoded for the target
/// file: the manifest builder hands over JSON fragments, the homepage gets
/// HTML-escaped text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Replace every `{{KEY}}` with its value.
    ///
    /// Unknown placeholders stay as written; [`RenderContext::missing`] reports them.
    pub fn render(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    match self.variables.get(key) {
                        Some(value) => result.push_str(value),
                        None => result.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    result.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        result.push_str(rest);
        result
    }

    /// Placeholders in `template` this context has no value for.
    pub fn missing(&self, template: &str) -> Vec<String> {
        let mut missing = Vec::new();
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else { break };
            let key = after[..end].trim();
            if is_placeholder_name(key)
                && !self.variables.contains_key(key)
                && !missing.iter().any(|m| m == key)
            {
                missing.push(key.to_string());
            }
            rest = &after[end + 2..];
        }
        missing
    }
}

fn is_placeholder_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
