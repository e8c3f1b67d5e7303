//! Form Validator - named validators plus the current field values.
//!
//! One instance per form-editing session. The UI calls `set_value` on every
//! change and reads errors/warnings back synchronously. There is no internal
//! locking: callers that share an instance must serialize access themselves.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{CatalogEntry, FieldValue, ValidationResult, Validator, ValidatorCatalog};

/// Aggregates per-field validators and values.
///
/// Values may be set for fields that have no validator; those fields are
/// always valid. Registering a validator is optional.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    validators: BTreeMap<String, Validator>,
    values: BTreeMap<String, FieldValue>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload validators from the catalog, one per `(field, entry)` pair.
    pub fn from_catalog<'a, I>(catalog: &ValidatorCatalog, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, CatalogEntry)>,
    {
        fields
            .into_iter()
            .fold(Self::new(), |form, (name, entry)| {
                form.add_field(name, catalog.get(entry).clone())
            })
    }

    /// Register (or replace) the validator for `name`.
    pub fn add_field(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.validators.insert(name.into(), validator);
        self
    }

    /// Set (or replace) the current value of `name`.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set several values at once; existing values for other fields are kept.
    pub fn set_values<K, V, I>(&mut self, values: I) -> &mut Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (name, value) in values {
            self.values.insert(name.into(), value.into());
        }
        self
    }

    /// Drop every value, keeping the registered validators.
    pub fn clear_values(&mut self) -> &mut Self {
        self.values.clear();
        self
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Names of the fields that have a validator.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Validate one field. Unregistered fields are valid.
    ///
    /// A registered field with no value is validated as [`FieldValue::Absent`].
    pub fn validate_field(&self, name: &str) -> ValidationResult {
        let Some(validator) = self.validators.get(name) else {
            return ValidationResult::valid();
        };
        match self.values.get(name) {
            Some(value) => validator.validate(value),
            None => validator.validate(&FieldValue::Absent),
        }
    }

    /// Validate every registered field (not every value).
    pub fn validate_all(&self) -> BTreeMap<String, ValidationResult> {
        let results: BTreeMap<String, ValidationResult> = self
            .validators
            .keys()
            .map(|name| (name.clone(), self.validate_field(name)))
            .collect();

        debug!(
            fields = results.len(),
            failing = results.values().filter(|r| !r.is_valid()).count(),
            "form validated"
        );
        results
    }

    /// `true` when every registered field is valid.
    pub fn is_valid(&self) -> bool {
        self.validate_all().values().all(ValidationResult::is_valid)
    }

    /// Error messages per field. Fields without errors are omitted.
    pub fn errors(&self) -> BTreeMap<String, Vec<String>> {
        collect_messages(self.validate_all(), ValidationResult::errors)
    }

    /// Warning messages per field. Fields without warnings are omitted.
    pub fn warnings(&self) -> BTreeMap<String, Vec<String>> {
        collect_messages(self.validate_all(), ValidationResult::warnings)
    }
}

fn collect_messages(
    results: BTreeMap<String, ValidationResult>,
    pick: fn(&ValidationResult) -> &[String],
) -> BTreeMap<String, Vec<String>> {
    results
        .into_iter()
        .filter_map(|(name, result)| {
            let messages = pick(&result);
            (!messages.is_empty()).then(|| (name, messages.to_vec()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rule;

    fn form() -> FormValidator {
        FormValidator::new()
            .add_field("name", Validator::new().add_rule(Rule::required()))
            .add_field(
                "reason",
                Validator::new()
                    .add_rule(Rule::required())
                    .add_rule(Rule::min_length(10))
                    .add_warning(Rule::max_length(20)),
            )
    }

    #[test]
    fn unregistered_field_is_valid() {
        let mut form = form();
        form.set_value("nickname", "");
        assert!(form.validate_field("nickname").is_valid());
        assert!(form.validate_field("never-set").is_valid());
    }

    #[test]
    fn registered_field_without_value_is_absent() {
        let result = form().validate_field("name");
        assert_eq!(result.errors(), ["This field is required"]);
    }

    #[test]
    fn validate_all_covers_registered_fields_only() {
        let mut form = form();
        form.set_values([("name", "Ada"), ("extra", "ignored")]);
        let results = form.validate_all();
        assert_eq!(results.len(), 2);
        assert!(results.contains_key("name"));
        assert!(results.contains_key("reason"));
        assert!(!results.contains_key("extra"));
    }

    #[test]
    fn validate_all_matches_validate_field() {
        let mut form = form();
        form.set_value("reason", "short");
        for (name, result) in form.validate_all() {
            assert_eq!(result, form.validate_field(&name));
        }
    }

    #[test]
    fn errors_omit_valid_fields() {
        let mut form = form();
        form.set_value("name", "Ada").set_value("reason", "short");
        let errors = form.errors();
        assert!(!errors.contains_key("name"));
        assert_eq!(errors["reason"], vec!["Must be at least 10 characters"]);
        assert!(!form.is_valid());
    }

    #[test]
    fn warnings_collected_separately() {
        let mut form = form();
        form.set_values([("name", "Ada"), ("reason", "This reason is far too wordy")]);
        assert!(form.is_valid());
        assert!(form.errors().is_empty());
        assert_eq!(
            form.warnings()["reason"],
            vec!["Must be no more than 20 characters"]
        );
    }

    #[test]
    fn set_value_replaces_previous_value() {
        let mut form = form();
        form.set_value("name", "").set_value("name", "Grace");
        assert_eq!(form.value("name"), Some(&FieldValue::from("Grace")));
        assert!(form.validate_field("name").is_valid());
    }

    #[test]
    fn clear_values_keeps_validators() {
        let mut form = form();
        form.set_values([("name", "Ada"), ("reason", "Long enough reason")]);
        assert!(form.is_valid());
        form.clear_values();
        assert!(!form.is_valid());
        assert_eq!(form.field_names().collect::<Vec<_>>(), ["name", "reason"]);
    }

    #[test]
    fn from_catalog_uses_catalog_validators() {
        let catalog = ValidatorCatalog::default();
        let mut form = FormValidator::from_catalog(
            &catalog,
            [("reason", CatalogEntry::RejectReason), ("email", CatalogEntry::Email)],
        );
        form.set_values([("reason", "Stamp missing on page two"), ("email", "not-an-email")]);

        let errors = form.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["email"], vec!["Must be a valid email address"]);
    }

    #[test]
    fn malformed_value_does_not_stop_other_fields() {
        let mut form = form();
        form.set_value("name", FieldValue::List(vec![]))
            .set_value("reason", 12345);
        let results = form.validate_all();
        assert!(results["name"].is_valid());
        assert_eq!(
            results["reason"].errors(),
            ["Must be at least 10 characters"]
        );
    }
}
