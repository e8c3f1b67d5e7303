//! Check Service - validation use cases behind the ports.
//!
//! Validates single values, files on disk and whole form documents against
//! the domain validator catalog. The service owns the catalog (read-only) and
//! reaches the outside world only through [`FileInspector`] and [`FormSource`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{FileInspector, FormSource},
        services::FormValidator,
    },
    domain::{CatalogEntry, FieldValue, ValidationResult, ValidatorCatalog},
    error::CertguardResult,
};

/// Member key that marks a form value as a reference to a file on disk.
pub const FILE_PATH_KEY: &str = "path";

/// Outcome of checking a form document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormReport {
    /// One result per field that matched a catalog entry.
    pub results: BTreeMap<String, ValidationResult>,
    /// Fields present in the document with no validator (always valid).
    pub unvalidated: Vec<String>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.results.values().all(ValidationResult::is_valid)
    }

    /// Number of validated fields with at least one error.
    pub fn failing(&self) -> usize {
        self.results.values().filter(|r| !r.is_valid()).count()
    }
}

/// Service for validation use cases.
pub struct CheckService {
    catalog: ValidatorCatalog,
    forms: Box<dyn FormSource>,
    files: Box<dyn FileInspector>,
}

impl CheckService {
    /// Create a new check service with the given adapters.
    pub fn new(
        catalog: ValidatorCatalog,
        forms: Box<dyn FormSource>,
        files: Box<dyn FileInspector>,
    ) -> Self {
        Self {
            catalog,
            forms,
            files,
        }
    }

    pub fn catalog(&self) -> &ValidatorCatalog {
        &self.catalog
    }

    /// Validate one value against a catalog entry.
    #[instrument(skip(self, value), fields(entry = %entry))]
    pub fn validate_value(&self, entry: CatalogEntry, value: &FieldValue) -> ValidationResult {
        let result = self.catalog.get(entry).validate(value);
        debug!(
            valid = result.is_valid(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "value validated"
        );
        result
    }

    /// Inspect the file at `path` and validate it against a catalog entry.
    #[instrument(skip(self), fields(entry = %entry, path = %path.display()))]
    pub fn validate_file(
        &self,
        entry: CatalogEntry,
        path: &Path,
    ) -> CertguardResult<ValidationResult> {
        let file = self.files.inspect(path)?;
        debug!(size = file.size, media_type = %file.media_type, "file inspected");
        Ok(self.validate_value(entry, &FieldValue::File(file)))
    }

    /// Load a form document and validate every field whose name matches a
    /// catalog entry.
    ///
    /// For validated fields, a value of the form `{ "path": "..." }` is
    /// replaced by the inspected file, with relative paths resolved against
    /// the document's directory. A file that cannot be inspected becomes that
    /// field's error; the rest of the form is still checked. Unvalidated
    /// fields are left as they are.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn check_form(&self, path: &Path) -> CertguardResult<FormReport> {
        let document = self.forms.load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        let mut form = FormValidator::new();
        let mut values = Vec::with_capacity(document.len());
        let mut unreadable = BTreeMap::new();
        let mut unvalidated = Vec::new();

        for (name, value) in document.fields {
            let Ok(entry) = name.parse::<CatalogEntry>() else {
                unvalidated.push(name);
                continue;
            };
            form = form.add_field(name.clone(), self.catalog.get(entry).clone());
            match self.resolve_file(value, base) {
                Ok(value) => values.push((name, value)),
                Err(err) => {
                    warn!(field = %name, error = %err, "file reference not readable");
                    let result = ValidationResult::new(vec![err.to_string()], Vec::new());
                    unreadable.insert(name, result);
                }
            }
        }
        form.set_values(values);

        let mut results = form.validate_all();
        results.extend(unreadable);

        let report = FormReport {
            results,
            unvalidated,
        };
        info!(
            fields = report.results.len(),
            failing = report.failing(),
            unvalidated = report.unvalidated.len(),
            "form checked"
        );
        Ok(report)
    }

    fn resolve_file(&self, value: FieldValue, base: &Path) -> CertguardResult<FieldValue> {
        let FieldValue::Record(ref map) = value else {
            return Ok(value);
        };
        match (map.len(), map.get(FILE_PATH_KEY).and_then(FieldValue::as_text)) {
            (1, Some(relative)) => {
                let file = self.files.inspect(&base.join(relative))?;
                Ok(FieldValue::File(file))
            }
            _ => Ok(value),
        }
    }
}
