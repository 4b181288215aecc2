use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay inside the directory it is joined to.
///
/// Invariant: never absolute, never contains a `..` component, never empty.
/// Enforced at construction; there is no panicking constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    ///
    /// `.` components are dropped, so `./bom/go.mod` and `bom/go.mod` are equal.
    pub fn try_new(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let display = || path.display().to_string();

        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed { path: display() });
        }

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(DomainError::PathTraversal { path: display() });
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(DomainError::AbsolutePathNotAllowed { path: display() });
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(DomainError::PathTraversal { path: display() });
        }

        Ok(Self(normalized))
    }

    /// Join a segment, maintaining the invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let tail = Self::try_new(segment)?;
        Ok(Self(self.0.join(tail.0)))
    }

    /// First component, e.g. `user` for `user/domain/go.mod`.
    pub fn top_level(&self) -> &str {
        self.0
            .components()
            .next()
            .and_then(|c| c.as_os_str().to_str())
            .unwrap_or("")
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash form, used as a stable payload key on every platform.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_paths() {
        let p = RelativePath::try_new("share/errors/app_error.go").unwrap();
        assert_eq!(p.to_slash_string(), "share/errors/app_error.go");
        assert_eq!(p.top_level(), "share");
    }

    #[test]
    fn drops_current_dir_components() {
        let p = RelativePath::try_new("./bom/./go.mod").unwrap();
        assert_eq!(p, RelativePath::try_new("bom/go.mod").unwrap());
    }

    #[test]
    fn rejects_parent_traversal() {
        for bad in ["../escape", "bom/../../x", ".."] {
            assert!(
                matches!(
                    RelativePath::try_new(bad),
                    Err(DomainError::PathTraversal { .. })
                ),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn rejects_absolute_paths() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn rejects_empty_path() {
        assert!(RelativePath::try_new("").is_err());
        assert!(RelativePath::try_new(".").is_err());
    }

    #[test]
    fn join_keeps_invariant() {
        let base = RelativePath::try_new("user").unwrap();
        assert_eq!(base.join("domain/go.mod").unwrap().to_string(), "user/domain/go.mod");
        assert!(base.join("../../etc").is_err());
    }
}
