//! The [`Rule`] type: a predicate paired with the message shown when it fails.
//!
//! # Design
//!
//! A rule is plain data. Every factory in `factories.rs` builds the same
//! `{ check, message }` shape, and evaluation is one flat `match` over
//! [`Check`]. There is no trait hierarchy of rule kinds and no captured
//! mutable state, so a rule can be cloned into any number of validators and
//! evaluated from anywhere.

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use super::factories::{IMAGE_MEDIA_TYPES, INJECTION_PATTERNS};
use super::sanitize;
use super::value::FieldValue;

/// What a rule checks. One variant per factory.
#[derive(Debug, Clone)]
pub(crate) enum Check {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    Numeric,
    PositiveNumber,
    Range { min: f64, max: f64 },
    FileSize(u64),
    FileType(Vec<String>),
    ImageFile,
    NoUnsafeMarkup,
    NoInjectionPattern,
    DateOrder { from: String, to: String },
    MaxSpanDays { from: String, to: String, days: i64 },
    Member { key: String, inner: Box<Check> },
    Optional(Box<Check>),
    Custom(fn(&FieldValue) -> bool),
}

impl Check {
    fn holds(&self, value: &FieldValue) -> bool {
        match self {
            Self::Required => !value.is_blank(),
            Self::MinLength(n) => value.as_text().is_some_and(|s| s.chars().count() >= *n),
            Self::MaxLength(n) => value.as_text().is_some_and(|s| s.chars().count() <= *n),
            Self::Pattern(re) => value.as_text().is_some_and(|s| re.is_match(s)),
            Self::Numeric => value.coerce_number().is_some_and(f64::is_finite),
            Self::PositiveNumber => value.coerce_number().is_some_and(|n| n > 0.0),
            Self::Range { min, max } => value
                .coerce_number()
                .is_some_and(|n| *min <= n && n <= *max),
            Self::FileSize(max) => value.as_file().is_some_and(|f| f.size <= *max),
            Self::FileType(allowed) => value
                .as_file()
                .is_some_and(|f| allowed.iter().any(|t| *t == f.media_type)),
            Self::ImageFile => value
                .as_file()
                .is_some_and(|f| IMAGE_MEDIA_TYPES.contains(&f.media_type.as_str())),
            // Content-safety checks only look at text; other shapes pass.
            Self::NoUnsafeMarkup => value.as_text().is_none_or(|s| sanitize::text(s) == s),
            Self::NoInjectionPattern => value
                .as_text()
                .is_none_or(|s| !INJECTION_PATTERNS.iter().any(|re| re.is_match(s))),
            Self::DateOrder { from, to } => match DateSpan::read(value, from, to) {
                DateSpan::Open => true,
                DateSpan::Malformed => false,
                DateSpan::Closed(start, end) => start <= end,
            },
            Self::MaxSpanDays { from, to, days } => match DateSpan::read(value, from, to) {
                DateSpan::Open => true,
                DateSpan::Malformed => false,
                DateSpan::Closed(start, end) => (end - start).num_days() <= *days,
            },
            Self::Member { key, inner } => match value {
                FieldValue::Record(map) => inner.holds(map.get(key).unwrap_or(&FieldValue::Absent)),
                _ => false,
            },
            Self::Optional(inner) => value.is_blank() || inner.holds(value),
            Self::Custom(predicate) => predicate(value),
        }
    }
}

impl PartialEq for Check {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Required, Self::Required)
            | (Self::Numeric, Self::Numeric)
            | (Self::PositiveNumber, Self::PositiveNumber)
            | (Self::ImageFile, Self::ImageFile)
            | (Self::NoUnsafeMarkup, Self::NoUnsafeMarkup)
            | (Self::NoInjectionPattern, Self::NoInjectionPattern) => true,
            (Self::MinLength(a), Self::MinLength(b)) | (Self::MaxLength(a), Self::MaxLength(b)) => {
                a == b
            }
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::Range { min: a, max: b }, Self::Range { min: c, max: d }) => a == c && b == d,
            (Self::FileSize(a), Self::FileSize(b)) => a == b,
            (Self::FileType(a), Self::FileType(b)) => a == b,
            (Self::DateOrder { from: a, to: b }, Self::DateOrder { from: c, to: d }) => {
                a == c && b == d
            }
            (
                Self::MaxSpanDays { from: a, to: b, days: x },
                Self::MaxSpanDays { from: c, to: d, days: y },
            ) => a == c && b == d && x == y,
            (Self::Member { key: a, inner: x }, Self::Member { key: b, inner: y }) => {
                a == b && x == y
            }
            (Self::Optional(a), Self::Optional(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

/// The two ends of a date range read out of a record.
enum DateSpan {
    /// No range at all, or at least one end is missing or empty.
    Open,
    /// A present end is not a date, or the value is not a record.
    Malformed,
    Closed(NaiveDate, NaiveDate),
}

impl DateSpan {
    fn read(value: &FieldValue, from: &str, to: &str) -> Self {
        match value {
            FieldValue::Record(_) => {}
            v if v.is_blank() => return Self::Open,
            _ => return Self::Malformed,
        }
        let present = |key: &str| value.member(key).filter(|v| !v.is_blank());
        let (Some(start), Some(end)) = (present(from), present(to)) else {
            return Self::Open;
        };
        match (parse_date(start), parse_date(end)) {
            (Some(s), Some(e)) => Self::Closed(s, e),
            _ => Self::Malformed,
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(value: &FieldValue) -> Option<NaiveDate> {
    let text = value.as_text()?.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// A reusable predicate plus the message reported when it fails.
///
/// Rules are immutable once built. Construct them with the factories
/// (`Rule::required()`, `Rule::range(1.0, 10.0)`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    check: Check,
    message: String,
}

impl Rule {
    pub(crate) fn from_check(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }

    /// Evaluate the predicate. `true` means the value satisfies the rule.
    pub fn evaluate(&self, value: &FieldValue) -> bool {
        self.check.holds(value)
    }

    /// The message reported when [`Self::evaluate`] returns `false`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Same check, different message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    /// Apply `rule` to the `key` member of a record value.
    ///
    /// A value that is not a record fails; a missing member is evaluated as
    /// [`FieldValue::Absent`]. The inner rule's message is kept.
    pub fn member(key: impl Into<String>, rule: Rule) -> Self {
        Self {
            check: Check::Member {
                key: key.into(),
                inner: Box::new(rule.check),
            },
            message: rule.message,
        }
    }

    /// Apply `rule` only when a value was given. Absent and empty values pass.
    pub fn optional(rule: Rule) -> Self {
        Self {
            check: Check::Optional(Box::new(rule.check)),
            message: rule.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(from: &str, to: &str) -> FieldValue {
        FieldValue::record([("dateFrom", from), ("dateTo", to)])
    }

    #[test]
    fn with_message_keeps_check() {
        let rule = Rule::required().with_message("Name is required");
        assert_eq!(rule.message(), "Name is required");
        assert!(!rule.evaluate(&FieldValue::Absent));
        assert!(rule.evaluate(&"x".into()));
    }

    #[test]
    fn member_projects_record_field() {
        let rule = Rule::member("x", Rule::range(0.0, 100.0));
        assert!(rule.evaluate(&FieldValue::record([("x", 50)])));
        assert!(!rule.evaluate(&FieldValue::record([("x", 150)])));
    }

    #[test]
    fn member_fails_on_missing_key_and_non_record() {
        let rule = Rule::member("x", Rule::range(0.0, 100.0));
        assert!(!rule.evaluate(&FieldValue::record([("y", 50)])));
        assert!(!rule.evaluate(&FieldValue::from(50)));
    }

    #[test]
    fn optional_skips_blank_values_only() {
        let rule = Rule::optional(Rule::file_type(["image/png"]));
        assert!(rule.evaluate(&FieldValue::Absent));
        assert!(rule.evaluate(&"".into()));
        assert!(!rule.evaluate(&"sig.png".into()));
        assert_eq!(rule.message(), Rule::file_type(["image/png"]).message());
    }

    #[test]
    fn date_span_open_when_an_end_is_missing() {
        let rule = Rule::date_order("dateFrom", "dateTo");
        assert!(rule.evaluate(&range("2024-01-01", "")));
        assert!(rule.evaluate(&FieldValue::record([("dateTo", "2024-01-01")])));
    }

    #[test]
    fn date_span_malformed_dates_fail() {
        let rule = Rule::date_order("dateFrom", "dateTo");
        assert!(!rule.evaluate(&range("yesterday", "2024-01-01")));
        assert!(!rule.evaluate(&FieldValue::from("2024-01-01")));
    }

    #[test]
    fn parse_date_accepts_rfc3339() {
        let rule = Rule::date_order("dateFrom", "dateTo");
        assert!(rule.evaluate(&range("2024-01-01T10:00:00Z", "2024-01-02")));
    }

    #[test]
    fn factories_produce_equal_rules() {
        assert_eq!(Rule::min_length(3), Rule::min_length(3));
        assert_ne!(Rule::min_length(3), Rule::min_length(4));
        assert_eq!(Rule::email(), Rule::email());
        assert_eq!(
            Rule::file_type(["image/png"]),
            Rule::file_type(["image/png"])
        );
    }
}
