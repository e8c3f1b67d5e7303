//! Domain validator catalog.
//!
//! # Design
//!
//! Every business field the certificate screens edit gets exactly one named
//! [`Validator`], composed from the rule factories and nothing else. All size
//! limits, length bounds and thresholds live in [`CatalogLimits`] so product
//! constants are defined once.
//!
//! The catalog is built once (usually at startup) and then only read. It is
//! passed by reference; there is no global instance.
//!
//! # Adding a New Field
//!
//! 1. Add a variant to [`CatalogEntry`] with its `as_str` and `FromStr` arms
//! 2. Add a field to [`ValidatorCatalog`] and compose it in `build`
//! 3. Add the arm to [`ValidatorCatalog::get`]

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::rule::Rule;
use super::validator::Validator;

const MIB: u64 = 1024 * 1024;

/// Member keys of a signature position record.
pub mod position {
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
}

/// Member keys of a document filter record.
pub mod filter {
    pub const DATE_FROM: &str = "dateFrom";
    pub const DATE_TO: &str = "dateTo";
}

static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z]").expect("valid pattern"));
static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[a-z]").expect("valid pattern"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]").expect("valid pattern"));
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new("[^A-Za-z0-9]").expect("valid pattern"));
static VERIFICATION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Z0-9]{6,32}$").expect("valid pattern"));

// ── CatalogEntry ─────────────────────────────────────────────────────────────

/// Names of the prebuilt validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogEntry {
    SignatureFile,
    SignaturePosition,
    RejectReason,
    DocumentFilter,
    Email,
    Password,
    VerificationCode,
    AssetName,
    CertificateFile,
}

impl CatalogEntry {
    pub const ALL: &'static [CatalogEntry] = &[
        Self::SignatureFile,
        Self::SignaturePosition,
        Self::RejectReason,
        Self::DocumentFilter,
        Self::Email,
        Self::Password,
        Self::VerificationCode,
        Self::AssetName,
        Self::CertificateFile,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SignatureFile => "signature-file",
            Self::SignaturePosition => "signature-position",
            Self::RejectReason => "reject-reason",
            Self::DocumentFilter => "document-filter",
            Self::Email => "email",
            Self::Password => "password",
            Self::VerificationCode => "verification-code",
            Self::AssetName => "asset-name",
            Self::CertificateFile => "certificate-file",
        }
    }

    /// One-line description for listings.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::SignatureFile => "Uploaded signature image",
            Self::SignaturePosition => "Signature placement on the page (x, y, width, height)",
            Self::RejectReason => "Free-text reason for rejecting a document",
            Self::DocumentFilter => "Document list date filter (dateFrom, dateTo)",
            Self::Email => "Account email address",
            Self::Password => "New password in the reset flow",
            Self::VerificationCode => "Certificate verification code",
            Self::AssetName => "Display name of a managed asset",
            Self::CertificateFile => "Uploaded certificate document",
        }
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts kebab-case, snake_case and camelCase spellings, so form field
/// names like `rejectReason` map straight onto an entry.
impl FromStr for CatalogEntry {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "signaturefile" | "signature" => Ok(Self::SignatureFile),
            "signatureposition" | "position" => Ok(Self::SignaturePosition),
            "rejectreason" | "reason" => Ok(Self::RejectReason),
            "documentfilter" | "filter" => Ok(Self::DocumentFilter),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "verificationcode" | "code" => Ok(Self::VerificationCode),
            "assetname" => Ok(Self::AssetName),
            "certificatefile" | "certificate" => Ok(Self::CertificateFile),
            _ => Err(DomainError::UnknownCatalogEntry(s.to_owned())),
        }
    }
}

// ── CatalogLimits ────────────────────────────────────────────────────────────

/// Product constants the catalog is built from.
///
/// `Default` holds the shipped values; configuration may override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogLimits {
    pub signature_max_bytes: u64,
    pub certificate_max_bytes: u64,
    pub reject_reason_min: usize,
    pub reject_reason_max: usize,
    pub filter_max_span_days: i64,
    pub password_min: usize,
    pub email_max: usize,
    pub asset_name_max: usize,
    pub asset_name_recommended_max: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            signature_max_bytes: 5 * MIB,
            certificate_max_bytes: 10 * MIB,
            reject_reason_min: 10,
            reject_reason_max: 500,
            filter_max_span_days: 365,
            password_min: 8,
            email_max: 254,
            asset_name_max: 255,
            asset_name_recommended_max: 100,
        }
    }
}

// ── ValidatorCatalog ─────────────────────────────────────────────────────────

/// The prebuilt validators, one per [`CatalogEntry`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorCatalog {
    limits: CatalogLimits,
    signature_file: Validator,
    signature_position: Validator,
    reject_reason: Validator,
    document_filter: Validator,
    email: Validator,
    password: Validator,
    verification_code: Validator,
    asset_name: Validator,
    certificate_file: Validator,
}

impl ValidatorCatalog {
    /// Compose every validator from `limits`.
    pub fn build(limits: CatalogLimits) -> Self {
        let signature_file = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::image_file())
            .add_rule(Rule::file_size(limits.signature_max_bytes))
            .add_warning(Rule::optional(
                Rule::file_type(["image/png"])
                    .with_message("PNG format is recommended for best quality"),
            ));

        let signature_position = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::member(
                position::X,
                Rule::range(0.0, 100.0)
                    .with_message("Horizontal position must be between 0 and 100"),
            ))
            .add_rule(Rule::member(
                position::Y,
                Rule::range(0.0, 100.0).with_message("Vertical position must be between 0 and 100"),
            ))
            .add_rule(Rule::member(
                position::WIDTH,
                Rule::range(50.0, 500.0).with_message("Width must be between 50 and 500"),
            ))
            .add_rule(Rule::member(
                position::HEIGHT,
                Rule::range(20.0, 250.0).with_message("Height must be between 20 and 250"),
            ));

        let reject_reason = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::min_length(limits.reject_reason_min))
            .add_rule(Rule::max_length(limits.reject_reason_max))
            .add_rule(Rule::no_unsafe_markup())
            .add_rule(Rule::no_injection_pattern());

        let document_filter = Validator::new()
            .add_rule(Rule::date_order(filter::DATE_FROM, filter::DATE_TO))
            .add_rule(Rule::max_span_days(
                filter::DATE_FROM,
                filter::DATE_TO,
                limits.filter_max_span_days,
            ));

        let email = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::email())
            .add_rule(Rule::max_length(limits.email_max));

        let password = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::min_length(limits.password_min))
            .add_rule(Rule::pattern(
                UPPERCASE.clone(),
                "Must contain at least one uppercase letter",
            ))
            .add_rule(Rule::pattern(
                LOWERCASE.clone(),
                "Must contain at least one lowercase letter",
            ))
            .add_rule(Rule::pattern(DIGIT.clone(), "Must contain at least one number"))
            .add_warning(Rule::pattern(
                SPECIAL.clone(),
                "Adding a special character makes the password stronger",
            ));

        let verification_code = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::pattern(
                VERIFICATION_CODE.clone(),
                "Verification code must be 6-32 uppercase letters or digits",
            ));

        let asset_name = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::max_length(limits.asset_name_max))
            .add_rule(Rule::no_unsafe_markup())
            .add_warning(Rule::optional(
                Rule::max_length(limits.asset_name_recommended_max)
                    .with_message("Shorter names display better in lists"),
            ));

        let certificate_file = Validator::new()
            .add_rule(Rule::required())
            .add_rule(Rule::file_type(["application/pdf"]))
            .add_rule(Rule::file_size(limits.certificate_max_bytes));

        Self {
            limits,
            signature_file,
            signature_position,
            reject_reason,
            document_filter,
            email,
            password,
            verification_code,
            asset_name,
            certificate_file,
        }
    }

    /// The validator registered for `entry`.
    pub fn get(&self, entry: CatalogEntry) -> &Validator {
        match entry {
            CatalogEntry::SignatureFile => &self.signature_file,
            CatalogEntry::SignaturePosition => &self.signature_position,
            CatalogEntry::RejectReason => &self.reject_reason,
            CatalogEntry::DocumentFilter => &self.document_filter,
            CatalogEntry::Email => &self.email,
            CatalogEntry::Password => &self.password,
            CatalogEntry::VerificationCode => &self.verification_code,
            CatalogEntry::AssetName => &self.asset_name,
            CatalogEntry::CertificateFile => &self.certificate_file,
        }
    }

    /// Look up an entry by name.
    pub fn find(&self, name: &str) -> Result<&Validator, DomainError> {
        name.parse::<CatalogEntry>().map(|entry| self.get(entry))
    }

    /// Every entry with its validator, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (CatalogEntry, &Validator)> + '_ {
        CatalogEntry::ALL.iter().map(move |&entry| (entry, self.get(entry)))
    }

    pub fn limits(&self) -> &CatalogLimits {
        &self.limits
    }
}

impl Default for ValidatorCatalog {
    fn default() -> Self {
        Self::build(CatalogLimits::default())
    }
}
