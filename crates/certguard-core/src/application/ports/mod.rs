//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `certguard-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileInspector`: turns a path into a `FileRef` (name, size, media type)
//!   - `FormSource`: loads a form document (field name → value)

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::{FieldValue, FileRef};
use crate::error::CertguardResult;

/// Port for reading file metadata.
///
/// Implemented by:
/// - `certguard_adapters::filesystem::LocalFileInspector` (production)
/// - `certguard_adapters::filesystem::MemoryFileInspector` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait FileInspector: Send + Sync {
    /// Describe the file at `path` without reading its contents.
    fn inspect(&self, path: &Path) -> CertguardResult<FileRef>;
}

/// Port for loading form documents.
///
/// Implemented by:
/// - `certguard_adapters::form_source::FileFormSource` (JSON / TOML files)
#[cfg_attr(test, mockall::automock)]
pub trait FormSource: Send + Sync {
    fn load(&self, path: &Path) -> CertguardResult<FormDocument>;
}

/// The field values of one submitted form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDocument {
    pub fields: BTreeMap<String, FieldValue>,
}

impl FormDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A JSON object becomes one field per top-level key. Anything else is an
/// empty document.
impl From<serde_json::Value> for FormDocument {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            },
            _ => Self::default(),
        }
    }
}
