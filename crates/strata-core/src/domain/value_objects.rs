//! Domain value objects: Language, Database, Deployment.
//!
//! # Design
//!
//! These are pure value types: `Copy`, compared by value, with no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding a New Stack
//!
//! 1. Mark the `Language` variant as supported in [`Language::is_supported`]
//! 2. Implement `ProjectGenerator` for it in `application::stacks`
//! 3. Register it in `stacks::stack_for`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// Target language of the generated project.
///
/// `Java` is a reserved placeholder: it parses, but selecting it is an
/// unsupported option until a generator exists for it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Go,
    Java,
}

impl Language {
    pub const ALL: &'static [Language] = &[Self::Go, Self::Java];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Java => "java",
        }
    }

    /// Whether a generator exists for this language.
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Go)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Self::Go),
            "java" => Ok(Self::Java),
            other => Err(DomainError::UnknownLanguage(other.to_string())),
        }
    }
}

// ── Database ──────────────────────────────────────────────────────────────────

/// Database the generated project is wired for. Fixed per stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Postgres,
}

impl Database {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
        }
    }

    /// Go module providing the GORM dialector.
    pub const fn go_driver(&self) -> &'static str {
        match self {
            Self::Postgres => "gorm.io/driver/postgres",
        }
    }

    /// Example DSN pointing at a local database named after the project.
    pub fn dsn_example(&self, database_name: &str) -> String {
        match self {
            Self::Postgres => format!(
                "host=localhost user=postgres password=postgres dbname={database_name} port=5432 sslmode=disable"
            ),
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Deployment ────────────────────────────────────────────────────────────────

/// Deployment target of the generated project. Fixed per stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    Docker,
}

impl Deployment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Docker => "docker",
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
