//! The `ProjectConfig` record and its validating builder.
//!
//! A `ProjectConfig` is created once per invocation, validated by
//! [`ProjectConfigBuilder::build`], then handed to exactly one generation run.
//! Fields are private: once a value exists its name and module path are
//! guaranteed non-empty and well-formed.
//!
//! Whether the selected language actually has a generator is *not* checked
//! here. That is a stack-selection concern (see `application::stacks`).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    value_objects::{Database, Deployment, Language},
};

// ── Feature flags ─────────────────────────────────────────────────────────────

/// Named boolean toggles that shape the generated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureFlags {
    /// Wire a Redis cache client into the dependency-management module.
    pub cache: bool,
    /// Emit `Dockerfile`, `docker-compose.yml` and `.dockerignore`.
    pub docker: bool,
    /// Emit the example `user` domain and its API module.
    pub example_module: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            cache: false,
            docker: true,
            example_module: true,
        }
    }
}

// ── Configuration record ──────────────────────────────────────────────────────

/// Validated, immutable description of one project to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    name: String,
    module_path: String,
    output_dir: PathBuf,
    language: Language,
    features: FeatureFlags,
    database: Database,
    deployment: Deployment,
}

impl ProjectConfig {
    pub fn builder() -> ProjectConfigBuilder {
        ProjectConfigBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    pub const fn features(&self) -> FeatureFlags {
        self.features
    }

    pub const fn database(&self) -> Database {
        self.database
    }

    pub const fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// `<output_dir>/<name>`: the directory generation creates.
    pub fn project_dir(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, module {})",
            self.name, self.language, self.module_path
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ProjectConfig`]. All checks run in [`build`](Self::build).
#[derive(Debug, Default, Clone)]
pub struct ProjectConfigBuilder {
    name: Option<String>,
    module_path: Option<String>,
    output_dir: Option<PathBuf>,
    language: Language,
    features: FeatureFlags,
}

impl ProjectConfigBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Module path of the generated project. Defaults to the project name.
    pub fn module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    pub fn cache(mut self, on: bool) -> Self {
        self.features.cache = on;
        self
    }

    pub fn docker(mut self, on: bool) -> Self {
        self.features.docker = on;
        self
    }

    pub fn example_module(mut self, on: bool) -> Self {
        self.features.example_module = on;
        self
    }

    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "project name",
            })?;
        validate_project_name(&name)?;

        let module_path = match self.module_path.map(|m| m.trim().to_string()) {
            Some(m) if !m.is_empty() => m,
            Some(_) => {
                return Err(DomainError::MissingRequiredField {
                    field: "module path",
                });
            }
            None => name.clone(),
        };
        validate_module_path(&module_path)?;

        let output_dir = self
            .output_dir
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "output directory",
            })?;

        Ok(ProjectConfig {
            name,
            module_path,
            output_dir,
            language: self.language,
            features: self.features,
            database: Database::Postgres,
            deployment: Deployment::Docker,
        })
    }
}

// ── Field rules ───────────────────────────────────────────────────────────────

/// `^[A-Za-z][A-Za-z0-9_-]*$`
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("must not be empty")),
        Some(c) if !c.is_ascii_alphabetic() => return Err(invalid("must start with a letter")),
        Some(_) => {}
    }

    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-')) {
        return Err(invalid(&format!("character '{bad}' is not allowed")));
    }

    Ok(())
}

pub fn validate_module_path(path: &str) -> Result<(), DomainError> {
    if path.is_empty() {
        return Err(DomainError::MissingRequiredField {
            field: "module path",
        });
    }
    if path.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidModulePath {
            path: path.to_string(),
            reason: "must not contain whitespace".into(),
        });
    }
    if path.starts_with('/') || path.ends_with('/') {
        return Err(DomainError::InvalidModulePath {
            path: path.to_string(),
            reason: "must not start or end with '/'".into(),
        });
    }
    Ok(())
}
