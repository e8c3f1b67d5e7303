//! Local file inspector using std::fs.

use std::io;
use std::path::Path;

use tracing::debug;

use certguard_core::{
    application::{ApplicationError, ports::FileInspector},
    domain::FileRef,
    error::{CertguardError, CertguardResult},
};

/// Media type used when the extension is not recognised.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Guess a media type from the file extension (case-insensitive).
pub fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_MEDIA_TYPE,
    }
}

/// Production file inspector backed by filesystem metadata.
///
/// Never reads file contents: size comes from metadata and the media type
/// from the extension.
#[derive(Debug, Clone, Copy)]
pub struct LocalFileInspector;

impl LocalFileInspector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileInspector for LocalFileInspector {
    fn inspect(&self, path: &Path) -> CertguardResult<FileRef> {
        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, e))?;
        if !metadata.is_file() {
            return Err(ApplicationError::FileInspection {
                path: path.to_path_buf(),
                reason: "not a regular file".into(),
            }
            .into());
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = FileRef::new(name, metadata.len(), media_type_for(path));
        debug!(path = %path.display(), size = file.size, media_type = %file.media_type, "inspected file");
        Ok(file)
    }
}

fn map_io_error(path: &Path, e: io::Error) -> CertguardError {
    ApplicationError::FileInspection {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}
