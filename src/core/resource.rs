//! # Resource Resolution
//!
//! Symbolic keys (icons, links, version strings) are resolved against an
//! ordered list of scopes:
//!
//! ```text
//! resolve(key)
//!   ├── 1. application scope   (direct key lookup)
//!   ├── 2. theme lookup        (active theme, then `default`; may error)
//!   └── 3. None                (one "not found" diagnostic)
//! ```
//!
//! Nothing here returns an error to the caller. Fallback errors are logged
//! and demoted to a miss; the caller decides the default value.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the base theme consulted after the active one.
pub const BASE_THEME: &str = "default";

/// A resolved resource value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ResourceValue {
    Text(String),
    Number(i64),
    Icon { icon: String },
}

impl fmt::Display for ResourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceValue::Text(s) => write!(f, "{s}"),
            ResourceValue::Number(n) => write!(f, "{n}"),
            ResourceValue::Icon { icon } => write!(f, "icon {icon}"),
        }
    }
}

/// Glyph drawn next to a navigation label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon(pub String);

impl Icon {
    pub fn glyph(&self) -> &str {
        &self.0
    }
}

/// A named key → value table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceScope {
    name: String,
    entries: BTreeMap<String, ResourceValue>,
}

impl ResourceScope {
    pub fn new(name: impl Into<String>, entries: BTreeMap<String, ResourceValue>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&ResourceValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResourceValue)> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Empty key, surrounding whitespace, or control characters.
    MalformedKey(String),
    UnknownTheme(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::MalformedKey(key) => write!(f, "malformed resource key {key:?}"),
            ResourceError::UnknownTheme(name) => write!(f, "theme '{name}' is not defined"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// Theme dictionaries: the fallback scope of the resolver.
#[derive(Debug, Clone, Default)]
pub struct ThemeResources {
    active: String,
    themes: BTreeMap<String, ResourceScope>,
}

impl ThemeResources {
    pub fn new(
        active: impl Into<String>,
        themes: BTreeMap<String, BTreeMap<String, ResourceValue>>,
    ) -> Self {
        let themes = themes
            .into_iter()
            .map(|(name, entries)| (name.clone(), ResourceScope::new(name, entries)))
            .collect();
        Self {
            active: active.into(),
            themes,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Looks `key` up in the active theme, then in the base theme.
    pub fn find(&self, key: &str) -> Result<Option<ResourceValue>, ResourceError> {
        validate_key(key)?;
        let active = self
            .themes
            .get(&self.active)
            .ok_or_else(|| ResourceError::UnknownTheme(self.active.clone()))?;

        if let Some(value) = active.get(key) {
            return Ok(Some(value.clone()));
        }
        Ok(self
            .themes
            .get(BASE_THEME)
            .and_then(|base| base.get(key))
            .cloned())
    }
}

fn validate_key(key: &str) -> Result<(), ResourceError> {
    if key.is_empty() || key.trim() != key || key.chars().any(char::is_control) {
        return Err(ResourceError::MalformedKey(key.to_string()));
    }
    Ok(())
}

/// Resolves keys against the application scope, then the theme lookup.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    application: ResourceScope,
    themes: ThemeResources,
}

impl ResourceResolver {
    pub fn new(application: ResourceScope, themes: ThemeResources) -> Self {
        Self {
            application,
            themes,
        }
    }

    pub fn application(&self) -> &ResourceScope {
        &self.application
    }

    pub fn themes(&self) -> &ThemeResources {
        &self.themes
    }

    /// Resolve `key`, logging every miss and every fallback error.
    pub fn resolve(&self, key: &str) -> Option<ResourceValue> {
        if let Some(value) = self.application.get(key) {
            return Some(value.clone());
        }

        match self.themes.find(key) {
            Ok(Some(value)) => return Some(value),
            Ok(None) => {}
            Err(e) => warn!("Error looking up resource {key:?}: {e}"),
        }

        warn!("Resource key not found: {key}");
        None
    }

    /// Resolve a text resource. Values of another type count as absent.
    pub fn resolve_text(&self, key: &str) -> Option<String> {
        match self.resolve(key)? {
            ResourceValue::Text(s) => Some(s),
            ResourceValue::Number(n) => Some(n.to_string()),
            other => {
                debug!("Resource {key} is not text: {other}");
                None
            }
        }
    }

    pub fn resolve_icon(&self, key: &str) -> Option<Icon> {
        match self.resolve(key)? {
            ResourceValue::Icon { icon } => Some(Icon(icon)),
            other => {
                debug!("Resource {key} is not an icon: {other}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{captured_logs, test_resolver};

    fn themes_with_active(active: &str) -> ThemeResources {
        let mut default = BTreeMap::new();
        default.insert(
            "HomeIcon".to_string(),
            ResourceValue::Icon { icon: "H".into() },
        );
        default.insert("Accent".to_string(), ResourceValue::Text("blue".into()));
        let mut dark = BTreeMap::new();
        dark.insert("Accent".to_string(), ResourceValue::Text("black".into()));

        let mut themes = BTreeMap::new();
        themes.insert("default".to_string(), default);
        themes.insert("dark".to_string(), dark);
        ThemeResources::new(active, themes)
    }

    fn app_scope() -> ResourceScope {
        let mut entries = BTreeMap::new();
        entries.insert(
            "SoftwareVersion".to_string(),
            ResourceValue::Text("1.2.3".into()),
        );
        entries.insert("Accent".to_string(), ResourceValue::Text("red".into()));
        ResourceScope::new("application", entries)
    }

    #[test]
    fn test_application_scope_wins() {
        let resolver = ResourceResolver::new(app_scope(), themes_with_active("dark"));
        assert_eq!(
            resolver.resolve("Accent"),
            Some(ResourceValue::Text("red".into()))
        );
    }

    #[test]
    fn test_key_only_in_fallback_resolves_without_diagnostics() {
        let resolver = ResourceResolver::new(app_scope(), themes_with_active("dark"));
        captured_logs::clear();

        assert_eq!(
            resolver.resolve_icon("HomeIcon"),
            Some(Icon("H".to_string()))
        );
        assert!(captured_logs::take().is_empty());
    }

    #[test]
    fn test_active_theme_searched_before_base() {
        let resolver = ResourceResolver::new(ResourceScope::default(), themes_with_active("dark"));
        assert_eq!(resolver.resolve_text("Accent").as_deref(), Some("black"));
    }

    #[test]
    fn test_missing_key_logs_exactly_once() {
        let resolver = ResourceResolver::new(app_scope(), themes_with_active("dark"));
        captured_logs::clear();

        assert_eq!(resolver.resolve("NoSuchKey"), None);

        let logs = captured_logs::take();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("NoSuchKey"));
    }

    #[test]
    fn test_unknown_theme_error_is_demoted_to_miss() {
        let resolver = ResourceResolver::new(app_scope(), themes_with_active("neon"));
        captured_logs::clear();

        assert_eq!(resolver.resolve("HomeIcon"), None);

        let logs = captured_logs::take();
        assert!(logs.iter().any(|l| l.contains("theme 'neon' is not defined")));
    }

    #[test]
    fn test_malformed_key_error_is_demoted_to_miss() {
        let resolver = ResourceResolver::new(app_scope(), themes_with_active("dark"));
        captured_logs::clear();

        assert_eq!(resolver.resolve(" Accent"), None);
        assert_eq!(resolver.resolve(""), None);

        let logs = captured_logs::take();
        assert!(logs.iter().any(|l| l.contains("malformed resource key")));
    }

    #[test]
    fn test_find_reports_errors_directly() {
        let themes = themes_with_active("neon");
        assert_eq!(
            themes.find("HomeIcon"),
            Err(ResourceError::UnknownTheme("neon".into()))
        );
        assert_eq!(
            themes_with_active("dark").find("bad\nkey"),
            Err(ResourceError::MalformedKey("bad\nkey".into()))
        );
    }

    #[test]
    fn test_typed_helpers_reject_other_types() {
        let resolver = test_resolver();
        assert_eq!(resolver.resolve_text("HomeIcon"), None);
        assert_eq!(resolver.resolve_icon("SoftwareVersion"), None);
    }

    #[test]
    fn test_caller_supplies_default() {
        let resolver = ResourceResolver::new(ResourceScope::default(), themes_with_active("dark"));
        let version = resolver
            .resolve_text("SoftwareVersion")
            .unwrap_or_else(|| "Unknown".to_string());
        assert_eq!(version, "Unknown");
    }

    #[test]
    fn test_resource_value_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            values: BTreeMap<String, ResourceValue>,
        }
        let doc: Doc = toml::from_str(
            r#"
[values]
Link = "https://example.com"
Build = 42
Icon = { icon = "*" }
"#,
        )
        .unwrap();
        assert_eq!(
            doc.values["Link"],
            ResourceValue::Text("https://example.com".into())
        );
        assert_eq!(doc.values["Build"], ResourceValue::Number(42));
        assert_eq!(doc.values["Icon"], ResourceValue::Icon { icon: "*".into() });
    }
}
