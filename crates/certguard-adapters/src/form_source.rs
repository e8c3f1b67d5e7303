//! Form documents read from JSON or TOML files.
//!
//! # Document format
//!
//! The top level maps field names to values:
//!
//! ```toml
//! rejectReason = "The signature is blurred"
//!
//! [signaturePosition]
//! x = 10
//! y = 20
//! width = 120
//! height = 40
//!
//! [signatureFile]
//! path = "signature.png"   # resolved by the check service
//! ```
//!
//! Both formats are parsed into `serde_json::Value` first, so a TOML table
//! with a numeric `size` and a string `type` becomes a file reference exactly
//! like its JSON counterpart.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use certguard_core::{
    application::{
        ApplicationError,
        ports::{FormDocument, FormSource},
    },
    error::CertguardResult,
};

/// Supported document formats, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn parse(self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
        }
    }
}

/// Loads form documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFormSource;

impl FileFormSource {
    pub fn new() -> Self {
        Self
    }
}

impl FormSource for FileFormSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> CertguardResult<FormDocument> {
        let format = Format::from_path(path).ok_or_else(|| ApplicationError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let form_load = |reason: String| ApplicationError::FormLoad {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| form_load(e.to_string()))?;
        let value = format.parse(&raw).map_err(form_load)?;
        if !value.is_object() {
            return Err(form_load("top level must be a table of fields".into()).into());
        }

        let document = FormDocument::from(value);
        debug!(fields = document.len(), ?format, "loaded form document");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certguard_core::domain::{FieldValue, FileRef};
    use certguard_core::error::CertguardError;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_json_document() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "form.json",
            r#"{
                "email": "jane@example.com",
                "certificateFile": { "name": "c.pdf", "size": 2048, "type": "application/pdf" },
                "note": null
            }"#,
        );

        let doc = FileFormSource::new().load(&path).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.fields["email"], FieldValue::from("jane@example.com"));
        assert_eq!(
            doc.fields["certificateFile"],
            FieldValue::File(FileRef::new("c.pdf", 2048, "application/pdf"))
        );
        assert_eq!(doc.fields["note"], FieldValue::Absent);
    }

    #[test]
    fn loads_toml_document() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "form.toml",
            r#"
rejectReason = "The signature is blurred"

[signaturePosition]
x = 10
y = 20
width = 120
height = 40
"#,
        );

        let doc = FileFormSource::new().load(&path).unwrap();
        assert_eq!(
            doc.fields["signaturePosition"],
            FieldValue::record([("x", 10), ("y", 20), ("width", 120), ("height", 40)])
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "form.yaml", "email: x");
        let err = FileFormSource::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            CertguardError::Application(ApplicationError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn top_level_must_be_an_object() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "form.json", "[1, 2, 3]");
        let err = FileFormSource::new().load(&path).unwrap_err();
        assert!(err.to_string().contains("top level must be a table"));
    }

    #[test]
    fn syntax_errors_are_form_load_errors() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "form.json", "{ not json");
        let err = FileFormSource::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            CertguardError::Application(ApplicationError::FormLoad { .. })
        ));
    }
}
