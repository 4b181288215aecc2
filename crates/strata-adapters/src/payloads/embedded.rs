//! Payloads compiled into the binary.
//!
//! Sources live under `payloads/<language>/<path>.tmpl` in this crate and are
//! pulled in with `include_str!`, so a release binary needs no files on disk.

use strata_core::{
    application::ports::{PayloadKey, PayloadStore},
    domain::Language,
    error::StrataResult,
};

/// Builds a sorted `(path, source)` table for one language directory.
macro_rules! payload_table {
    ($lang:literal: [$($path:literal),* $(,)?]) => {
        &[$(($path, include_str!(concat!("../../payloads/", $lang, "/", $path, ".tmpl")))),*]
    };
}

static GO_PAYLOADS: &[(&str, &str)] = payload_table!("go": [
        ".dockerignore",
        ".gitignore",
        "Dockerfile",
        "Makefile",
        "README.md",
        "api/go.mod",
        "api/user-api/dto/user_dto.go",
        "api/user-api/go.mod",
        "api/user-api/http/user_handler.go",
        "api/user-api/service/user_app_service.go",
        "bom/bom.go",
        "bom/go.mod",
        "cmd/api/go.mod",
        "cmd/api/main.go",
        "docker-compose.yml",
        "go.work",
        "share/errors/app_error.go",
        "share/errors/error_handler.go",
        "share/go.mod",
        "share/middleware/trace.go",
        "share/repository/base.go",
        "share/repository/builder.go",
        "share/repository/gorm/base_entity.go",
        "share/repository/gorm/factory.go",
        "share/repository/gorm/hooks.go",
        "share/repository/gorm/queryable.go",
        "share/repository/gorm/repository.go",
        "share/repository/page.go",
        "share/repository/queryable.go",
        "share/types/response.go",
        "user/domain/entity/user.go",
        "user/domain/enum/user_status.go",
        "user/domain/errors/user_error.go",
        "user/domain/event/user_events.go",
        "user/domain/go.mod",
        "user/domain/repository/user_repository.go",
        "user/domain/service/user_domain_service.go",
        "user/domain/valueobject/email.go",
        "user/domain/valueobject/password.go",
        "user/go.mod",
        "user/infrastructure/converter/user_converter.go",
        "user/infrastructure/entity/user_po.go",
        "user/infrastructure/go.mod",
        "user/infrastructure/repository/user_repository_impl.go",
]);

/// The built-in payload set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedPayloadStore;

impl EmbeddedPayloadStore {
    pub fn new() -> Self {
        Self
    }

    fn table(language: Language) -> &'static [(&'static str, &'static str)] {
        match language {
            Language::Go => GO_PAYLOADS,
            Language::Java => &[],
        }
    }
}

impl PayloadStore for EmbeddedPayloadStore {
    fn get(&self, key: &PayloadKey) -> StrataResult<Option<String>> {
        let table = Self::table(key.language);
        Ok(table
            .binary_search_by(|(path, _)| (*path).cmp(key.path.as_str()))
            .ok()
            .map(|i| table[i].1.to_string()))
    }

    fn keys(&self, language: Language) -> StrataResult<Vec<PayloadKey>> {
        Ok(Self::table(language)
            .iter()
            .map(|(path, _)| PayloadKey {
                language,
                path: (*path).to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        assert!(GO_PAYLOADS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn finds_known_payload() {
        let key = PayloadKey {
            language: Language::Go,
            path: "bom/go.mod".into(),
        };
        let source = EmbeddedPayloadStore.get(&key).unwrap().unwrap();
        assert!(source.starts_with("module {{ module_path }}/bom"));
    }

    #[test]
    fn unknown_path_is_none() {
        let key = PayloadKey {
            language: Language::Go,
            path: "nope.txt".into(),
        };
        assert!(EmbeddedPayloadStore.get(&key).unwrap().is_none());
        assert!(EmbeddedPayloadStore.load(&key).is_err());
    }

    #[test]
    fn java_has_no_payloads() {
        assert!(EmbeddedPayloadStore.keys(Language::Java).unwrap().is_empty());
    }
}
