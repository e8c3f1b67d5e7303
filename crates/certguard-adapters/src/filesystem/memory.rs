//! In-memory file inspector for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use certguard_core::{
    application::{ApplicationError, ports::FileInspector},
    domain::FileRef,
    error::CertguardResult,
};

/// File inspector over a shared map of registered files.
///
/// Clones share the same map, so a test can keep one handle and give the
/// other to a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileInspector {
    files: Arc<RwLock<HashMap<PathBuf, FileRef>>>,
}

impl MemoryFileInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file; the name is taken from the last path component.
    pub fn add_file(
        &self,
        path: impl AsRef<Path>,
        size: u64,
        media_type: impl Into<String>,
    ) -> CertguardResult<()> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut files = self
            .files
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        files.insert(path.to_path_buf(), FileRef::new(name, size, media_type));
        Ok(())
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every registered file.
    pub fn clear(&self) -> CertguardResult<()> {
        self.files
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .clear();
        Ok(())
    }
}

impl FileInspector for MemoryFileInspector {
    fn inspect(&self, path: &Path) -> CertguardResult<FileRef> {
        let files = self
            .files
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FileInspection {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into()
        })
    }
}
