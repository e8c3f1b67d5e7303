//! [`Validator`] and [`ValidationResult`].

use serde::Serialize;
use tracing::trace;

use super::rule::Rule;
use super::value::FieldValue;

/// Outcome of validating one value.
///
/// `is_valid` is derived from `errors` at construction and the struct is
/// never mutated afterwards. Warnings never affect validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A result with no messages at all.
    pub fn valid() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Failed error-rule messages, in rule registration order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Failed warning-rule messages, in rule registration order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// An ordered list of error rules and an ordered list of warning rules
/// evaluated against a single value.
///
/// Built once, then only read. A validator with no error rules accepts
/// everything, including absent values.
///
/// # Example
///
/// ```
/// use certguard_core::domain::{FieldValue, Rule, Validator};
///
/// let v = Validator::new()
///     .add_rule(Rule::required())
///     .add_rule(Rule::min_length(10));
///
/// let result = v.validate(&FieldValue::from(""));
/// assert_eq!(result.errors().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validator {
    error_rules: Vec<Rule>,
    warning_rules: Vec<Rule>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error rule.
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.error_rules.push(rule);
        self
    }

    /// Append a warning rule.
    pub fn add_warning(mut self, rule: Rule) -> Self {
        self.warning_rules.push(rule);
        self
    }

    /// Evaluate every rule against `value`.
    ///
    /// Every failing rule is reported, not just the first, in the order the
    /// rules were added.
    pub fn validate(&self, value: &FieldValue) -> ValidationResult {
        ValidationResult::new(
            failures(&self.error_rules, value),
            failures(&self.warning_rules, value),
        )
    }

    pub fn error_rule_count(&self) -> usize {
        self.error_rules.len()
    }

    pub fn warning_rule_count(&self) -> usize {
        self.warning_rules.len()
    }
}

fn failures(rules: &[Rule], value: &FieldValue) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| {
            let passed = rule.evaluate(value);
            if !passed {
                trace!(kind = value.kind(), rule = rule.message(), "rule failed");
            }
            !passed
        })
        .map(|rule| rule.message().to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileRef;

    #[test]
    fn empty_validator_accepts_everything() {
        let v = Validator::new().add_warning(Rule::required());
        for value in [
            FieldValue::Absent,
            FieldValue::from(""),
            FieldValue::from(0),
            FieldValue::from(FileRef::new("x", 1, "text/plain")),
        ] {
            assert!(v.validate(&value).is_valid());
        }
    }

    #[test]
    fn all_failures_reported_in_order() {
        let v = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::min_length(10));

        let result = v.validate(&FieldValue::from(""));
        assert!(!result.is_valid());
        assert_eq!(
            result.errors(),
            ["This field is required", "Must be at least 10 characters"]
        );
    }

    #[test]
    fn warnings_do_not_affect_validity() {
        let v = Validator::new()
            .add_rule(Rule::required())
            .add_warning(Rule::max_length(3));

        let result = v.validate(&FieldValue::from("long enough"));
        assert!(result.is_valid());
        assert_eq!(result.warnings(), ["Must be no more than 3 characters"]);
    }

    #[test]
    fn wrong_shape_fails_only_that_rule() {
        let v = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::image_file())
            .add_rule(Rule::no_unsafe_markup());

        let result = v.validate(&FieldValue::from(42));
        assert_eq!(result.errors(), ["File must be an image (PNG, JPEG, or SVG)"]);
    }

    #[test]
    fn validation_is_repeatable() {
        let v = Validator::new()
            .add_rule(Rule::min_length(3))
            .add_warning(Rule::max_length(5));
        let value = FieldValue::from("abcdefg");
        assert_eq!(v.validate(&value), v.validate(&value));
    }

    #[test]
    fn result_serializes_with_validity_flag() {
        let result = ValidationResult::new(vec!["bad".into()], vec![]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["errors"][0], "bad");
    }
}
