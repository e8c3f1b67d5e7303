//! Rule factories: parameterized builders for the common constraints.
//!
//! Every factory is a pure function of its parameters. Calling one twice with
//! the same arguments yields two equal, independent rules.
//!
//! # Shape policy
//!
//! A rule that expects text, a number or a file fails when it receives any
//! other shape. The two content-safety rules ([`Rule::no_unsafe_markup`] and
//! [`Rule::no_injection_pattern`]) are the exception: they only inspect text
//! and pass every other shape through.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::DomainError;
use super::rule::{Check, Rule};
use super::value::FieldValue;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Media types accepted by [`Rule::image_file`].
pub(crate) const IMAGE_MEDIA_TYPES: &[&str] =
    &["image/png", "image/jpeg", "image/jpg", "image/svg+xml"];

/// SQL keywords, comment/statement delimiters and `OR 1=1`-style tautologies.
pub(crate) static INJECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(select|insert|update|delete|drop|create|alter|exec|union)\b",
        r"(--|/\*|\*/|;)",
        r#"(?i)\b(or|and)\b\s+['"]?\w+['"]?\s*=\s*['"]?\w+"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("injection pattern is valid"))
    .collect()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

impl Rule {
    /// Present: not absent and not the empty string. `0` and `false` pass.
    pub fn required() -> Self {
        Self::from_check(Check::Required, "This field is required")
    }

    /// Text with at least `n` characters.
    pub fn min_length(n: usize) -> Self {
        Self::from_check(Check::MinLength(n), format!("Must be at least {n} characters"))
    }

    /// Text with at most `n` characters.
    pub fn max_length(n: usize) -> Self {
        Self::from_check(
            Check::MaxLength(n),
            format!("Must be no more than {n} characters"),
        )
    }

    /// Text matching `regex`.
    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Self::from_check(Check::Pattern(regex), message)
    }

    /// Like [`Self::pattern`], compiling the expression first.
    pub fn pattern_str(pattern: &str, message: impl Into<String>) -> Result<Self, DomainError> {
        let regex = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self::pattern(regex, message))
    }

    /// Coerces to a finite number.
    pub fn numeric() -> Self {
        Self::from_check(Check::Numeric, "Must be a valid number")
    }

    /// Coerces to a number greater than zero.
    pub fn positive_number() -> Self {
        Self::from_check(Check::PositiveNumber, "Must be a positive number")
    }

    /// Coerces to a number in `[min, max]`, both ends inclusive.
    pub fn range(min: f64, max: f64) -> Self {
        Self::from_check(
            Check::Range { min, max },
            format!("Must be between {min} and {max}"),
        )
    }

    /// A file no larger than `max_bytes`.
    ///
    /// The limit is inclusive even though the message reads "less than";
    /// the wording is the one shown in the product UI.
    pub fn file_size(max_bytes: u64) -> Self {
        Self::from_check(
            Check::FileSize(max_bytes),
            format!(
                "File size must be less than {:.1}MB",
                max_bytes as f64 / BYTES_PER_MB
            ),
        )
    }

    /// A file whose declared media type is one of `allowed` (exact, case-sensitive).
    pub fn file_type<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        let message = format!("File type must be one of: {}", allowed.join(", "));
        Self::from_check(Check::FileType(allowed), message)
    }

    /// A PNG, JPEG or SVG file.
    pub fn image_file() -> Self {
        Self::from_check(Check::ImageFile, "File must be an image (PNG, JPEG, or SVG)")
    }

    /// Text left unchanged by [`crate::domain::sanitize::text`].
    ///
    /// Any difference counts as unsafe, including the entity escaping of a
    /// bare `&` or `<`. Non-text values pass.
    pub fn no_unsafe_markup() -> Self {
        Self::from_check(
            Check::NoUnsafeMarkup,
            "Content contains potentially unsafe markup",
        )
    }

    /// Text free of SQL keywords, comment delimiters and tautologies.
    /// Non-text values pass.
    pub fn no_injection_pattern() -> Self {
        Self::from_check(
            Check::NoInjectionPattern,
            "Content contains potentially unsafe patterns",
        )
    }

    /// Text shaped like `local@domain.tld`.
    pub fn email() -> Self {
        Self::pattern(EMAIL_REGEX.clone(), "Must be a valid email address")
    }

    /// Record whose `from` date is not after its `to` date.
    pub fn date_order(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::from_check(
            Check::DateOrder {
                from: from.into(),
                to: to.into(),
            },
            "Start date must be before or equal to end date",
        )
    }

    /// Record whose `from`..`to` span is at most `days` days.
    pub fn max_span_days(from: impl Into<String>, to: impl Into<String>, days: i64) -> Self {
        Self::from_check(
            Check::MaxSpanDays {
                from: from.into(),
                to: to.into(),
                days,
            },
            format!("Date range cannot exceed {days} days"),
        )
    }

    /// A one-off predicate supplied by the caller.
    pub fn custom(predicate: fn(&FieldValue) -> bool, message: impl Into<String>) -> Self {
        Self::from_check(Check::Custom(predicate), message)
    }
}
