//! Payload overrides loaded from a directory tree.
//!
//! # Directory layout expected
//!
//! ```text
//! my-payloads/
//! ├── manifest.toml            ← optional
//! └── go/
//!     ├── README.md.tmpl       ← overrides README.md
//!     └── cmd/api/
//!         └── main.go.tmpl     ← overrides cmd/api/main.go
//! ```
//!
//! Only files ending in `.tmpl` are considered; the suffix is stripped to get
//! the output path. Top-level directories that are not a known language are
//! skipped with a warning.
//!
//! # `manifest.toml` format
//!
//! ```toml
//! [payloads]
//! name        = "acme house style"
//! version     = "1.2.0"            # optional
//! description = "Company README"   # optional
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use strata_core::{
    application::{
        ApplicationError,
        ports::{PayloadKey, PayloadStore},
    },
    domain::{Language, RelativePath},
    error::{StrataError, StrataResult},
};

const SUFFIX: &str = ".tmpl";
const MANIFEST: &str = "manifest.toml";

// ── Manifest ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ManifestFile {
    payloads: PayloadManifest,
}

/// `[payloads]` section of `manifest.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PayloadManifest {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Payloads read once from `<root>/<language>/<path>.tmpl`.
#[derive(Debug, Clone)]
pub struct DirectoryPayloadStore {
    root: PathBuf,
    manifest: Option<PayloadManifest>,
    payloads: BTreeMap<PayloadKey, String>,
}

impl DirectoryPayloadStore {
    /// Walk `root` and load every payload under it.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::PayloadLoad`] if `root` is missing, a file cannot
    /// be read, a path escapes the tree, or `manifest.toml` is malformed.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>) -> StrataResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(load_error(&root, "not a directory"));
        }

        let manifest = read_manifest(&root)?;
        if let Some(m) = &manifest {
            debug!(name = %m.name, version = ?m.version, "payload manifest");
        }

        let mut payloads = BTreeMap::new();
        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| load_error(&root, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&root)
                .map_err(|e| load_error(entry.path(), e))?;
            let Some((language, path)) = split_payload_path(relative)? else {
                continue;
            };

            let source =
                fs::read_to_string(entry.path()).map_err(|e| load_error(entry.path(), e))?;
            debug!(%language, path = %path, "loaded payload override");
            payloads.insert(PayloadKey::new(language, &path), source);
        }

        debug!(count = payloads.len(), "finished loading payloads");
        Ok(Self {
            root,
            manifest,
            payloads,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> Option<&PayloadManifest> {
        self.manifest.as_ref()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl PayloadStore for DirectoryPayloadStore {
    fn get(&self, key: &PayloadKey) -> StrataResult<Option<String>> {
        Ok(self.payloads.get(key).cloned())
    }

    fn keys(&self, language: Language) -> StrataResult<Vec<PayloadKey>> {
        Ok(self
            .payloads
            .keys()
            .filter(|k| k.language == language)
            .cloned()
            .collect())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_manifest(root: &Path) -> StrataResult<Option<PayloadManifest>> {
    let path = root.join(MANIFEST);
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).map_err(|e| load_error(&path, e))?;
    let parsed: ManifestFile = toml::from_str(&raw).map_err(|e| load_error(&path, e))?;
    Ok(Some(parsed.payloads))
}

/// `go/cmd/api/main.go.tmpl` → `(Go, cmd/api/main.go)`. `None` for files to skip.
fn split_payload_path(relative: &Path) -> StrataResult<Option<(Language, RelativePath)>> {
    let mut components = relative.components();
    let Some(first) = components.next() else {
        return Ok(None);
    };
    let rest = components.as_path();
    if rest.as_os_str().is_empty() {
        // Files at the root: the manifest, a README, etc.
        return Ok(None);
    }

    let first = first.as_os_str().to_string_lossy();
    let Ok(language) = first.parse::<Language>() else {
        warn!(dir = %first, "skipping payload directory for unknown language");
        return Ok(None);
    };

    let Some(stripped) = rest.to_str().and_then(|s| s.strip_suffix(SUFFIX)) else {
        debug!(path = %relative.display(), "skipping non-payload file");
        return Ok(None);
    };

    let path = RelativePath::try_new(stripped).map_err(|e| load_error(relative, e))?;
    Ok(Some((language, path)))
}

fn load_error(path: &Path, reason: impl std::fmt::Display) -> StrataError {
    ApplicationError::PayloadLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}
