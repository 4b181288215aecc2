//! Values visible to templates during a render.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::config::ProjectConfig;

/// A single bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Bool(bool),
}

impl Value {
    /// Truthiness used by `{% if %}`: booleans as-is, strings when non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Read-only name → value map passed to the renderer.
///
/// Built with consuming `with_*` calls; there is no `&mut` API, so a context
/// cannot change while a template is being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingContext {
    values: BTreeMap<String, Value>,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard bindings derived from a validated configuration.
    pub fn for_project(config: &ProjectConfig) -> Self {
        let features = config.features();
        let database = config.database();

        Self::new()
            .with_str("project_name", config.name())
            .with_str("module_path", config.module_path())
            .with_str("language", config.language().as_str())
            .with_str("database", database.as_str())
            .with_str("db_driver", database.go_driver())
            .with_str("db_dsn_example", database.dsn_example(config.name()))
            .with_str("deployment", config.deployment().as_str())
            .with_bool("use_cache", features.cache)
            .with_bool("use_docker", features.docker)
            .with_bool("example_module", features.example_module)
            .with_str("tool_version", crate::VERSION)
    }

    pub fn with_str(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, Value::Str(value.into()))
    }

    pub fn with_bool(self, name: impl Into<String>, value: bool) -> Self {
        self.with(name, Value::Bool(value))
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(!Value::from("").is_truthy());
    }

    #[test]
    fn later_binding_replaces_earlier() {
        let ctx = BindingContext::new().with_str("a", "1").with_str("a", "2");
        assert_eq!(ctx.get("a"), Some(&Value::Str("2".into())));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn project_bindings_are_derived_from_config() {
        let cfg = ProjectConfig::builder()
            .name("shopapi")
            .module_path("github.com/acme/shopapi")
            .output_dir("/tmp/x")
            .cache(true)
            .build()
            .unwrap();

        let ctx = BindingContext::for_project(&cfg);

        assert_eq!(ctx.get("project_name"), Some(&Value::from("shopapi")));
        assert_eq!(
            ctx.get("module_path"),
            Some(&Value::from("github.com/acme/shopapi"))
        );
        assert_eq!(ctx.get("use_cache"), Some(&Value::Bool(true)));
        assert_eq!(ctx.get("use_docker"), Some(&Value::Bool(true)));
        assert_eq!(ctx.get("db_driver"), Some(&Value::from("gorm.io/driver/postgres")));
        assert!(ctx.get("db_dsn_example").is_some());
        assert!(ctx.get("tool_version").is_some());
    }

    #[test]
    fn names_are_sorted() {
        let ctx = BindingContext::new().with_bool("b", true).with_str("a", "x");
        assert_eq!(ctx.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
