//! Scoped file writer.
//!
//! [`ProjectWriter`] is the only way generation touches the filesystem: every
//! path goes through [`RelativePath`] first, so nothing can be written
//! outside the project root.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::application::ports::Filesystem;
use crate::domain::RelativePath;
use crate::error::StrataResult;

/// Writes files and directories under a fixed project root.
///
/// Lives for a single generation run. Writing the same path twice in a run
/// overwrites the first write.
pub struct ProjectWriter {
    root: PathBuf,
    filesystem: Arc<dyn Filesystem>,
    written: RefCell<Vec<PathBuf>>,
}

impl ProjectWriter {
    pub fn new(root: impl Into<PathBuf>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            root: root.into(),
            filesystem,
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `relative` under the root, creating parents.
    ///
    /// Returns the absolute path written.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> StrataResult<PathBuf> {
        let relative = RelativePath::try_new(relative)?;
        let target = self.root.join(relative.as_path());

        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&target, content)?;
        trace!(path = %target.display(), bytes = content.len(), "wrote file");

        let mut written = self.written.borrow_mut();
        if !written.contains(&target) {
            written.push(target.clone());
        }
        Ok(target)
    }

    /// Create `relative` (and its parents) under the root.
    pub fn create_dir(&self, relative: impl AsRef<Path>) -> StrataResult<PathBuf> {
        let relative = RelativePath::try_new(relative)?;
        let target = self.root.join(relative.as_path());
        self.filesystem.create_dir_all(&target)?;
        debug!(path = %target.display(), "created directory");
        Ok(target)
    }

    /// Absolute paths of files written so far, in first-write order.
    pub fn written(&self) -> Vec<PathBuf> {
        self.written.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::StrataError;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Records calls instead of touching disk.
    #[derive(Default)]
    struct RecordingFs {
        dirs: Mutex<Vec<PathBuf>>,
        files: Mutex<BTreeMap<PathBuf, String>>,
    }

    impl Filesystem for RecordingFs {
        fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
            self.dirs.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    fn writer() -> (ProjectWriter, Arc<RecordingFs>) {
        let fs = Arc::new(RecordingFs::default());
        (ProjectWriter::new("/out/shopapi", fs.clone()), fs)
    }

    #[test]
    fn creates_parent_before_writing() {
        let (writer, fs) = writer();
        let path = writer.write("share/errors/app_error.go", "package errors\n").unwrap();

        assert_eq!(path, PathBuf::from("/out/shopapi/share/errors/app_error.go"));
        assert_eq!(
            fs.dirs.lock().unwrap().as_slice(),
            &[PathBuf::from("/out/shopapi/share/errors")]
        );
        assert_eq!(fs.files.lock().unwrap()[&path], "package errors\n");
    }

    #[test]
    fn second_write_overwrites_and_is_listed_once() {
        let (writer, fs) = writer();
        writer.write("README.md", "one").unwrap();
        writer.write("README.md", "two").unwrap();

        assert_eq!(writer.written().len(), 1);
        assert_eq!(
            fs.files.lock().unwrap()[&PathBuf::from("/out/shopapi/README.md")],
            "two"
        );
    }

    #[test]
    fn rejects_paths_escaping_root() {
        let (writer, fs) = writer();
        let err = writer.write("../evil.sh", "rm -rf /").unwrap_err();

        assert!(matches!(
            err,
            StrataError::Domain(DomainError::PathTraversal { .. })
        ));
        assert!(fs.files.lock().unwrap().is_empty());
        assert!(fs.dirs.lock().unwrap().is_empty());
    }

    #[test]
    fn rejects_absolute_paths() {
        let (writer, _) = writer();
        assert!(writer.create_dir("/etc").is_err());
    }

    #[test]
    fn written_preserves_order() {
        let (writer, _) = writer();
        writer.write("b.txt", "").unwrap();
        writer.write("a.txt", "").unwrap();
        let names: Vec<_> = writer
            .written()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["b.txt", "a.txt"]);
    }
}
