//! Error handling for the Certguard CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping
//!
//! A value that fails validation is reported as
//! [`CliError::ValidationFailed`] only after the results have been printed;
//! it exists to carry the non-zero exit code.

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use certguard_core::domain::DomainError;
use certguard_core::error::CertguardError;

pub use certguard_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// One or more values broke an error rule.
    #[error("Validation failed for {subject}: {errors} error(s)")]
    ValidationFailed { subject: String, errors: usize },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed, or a key is unknown.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `certguard-core` or the adapters.
    #[error(transparent)]
    Core(#[from] CertguardError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::ValidationFailed { .. } => vec![
                "Fix the errors listed above and run again".into(),
                "Warnings never cause a failure".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'certguard config list' to see the resolved values".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::ValidationFailed { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!(
            "\n{} {}\n\n  {}\n",
            "✗".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );

        if verbose {
            for cause in self.causes() {
                output.push_str(&format!("\n  {} {}\n", "→".dimmed(), cause.dimmed()));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {}\n", self);

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  Caused by: {cause}\n"));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    fn causes(&self) -> Vec<String> {
        std::iter::successors(self.source(), |&err| err.source())
            .map(ToString::to_string)
            .collect()
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::info!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (bad arguments, invalid values).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, serde_json::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::InvalidInput {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certguard_core::application::ApplicationError;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn validation_failure_is_a_user_error() {
        let err = CliError::ValidationFailed {
            subject: "email".into(),
            errors: 2,
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Validation failed for email: 2 error(s)");
    }

    #[test]
    fn unknown_entry_is_not_found() {
        let err = CliError::from(DomainError::UnknownCatalogEntry("ssn".into()));
        assert_eq!(err.exit_code(), 3);
        assert!(err.suggestions().iter().any(|s| s.contains("certguard catalog")));
    }

    #[test]
    fn unsupported_form_format_is_a_user_error() {
        let err = CliError::Core(
            ApplicationError::UnsupportedFormat {
                path: PathBuf::from("form.yaml"),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::ValidationFailed {
            subject: "form.json".into(),
            errors: 1,
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_lists_causes() {
        let err: CliResult<()> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing")).with_cli_context(|| "reading");
        let s = err.unwrap_err().format_plain(true);
        assert!(s.contains("Caused by: missing"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn verbose_causes_follow_the_whole_chain() {
        let inner = CliError::IoError {
            message: "reading form.json".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let err = CliError::InvalidInput {
            message: "cannot use form".into(),
            source: Some(Box::new(inner)),
        };
        assert_eq!(err.causes(), ["I/O error: reading form.json", "denied"]);
    }

    #[test]
    fn core_errors_display_without_wrapping() {
        let err = CliError::from(DomainError::UnknownCatalogEntry("ssn".into()));
        assert_eq!(err.to_string(), "Unknown validator 'ssn'");
        assert!(err.causes().is_empty());
    }

    #[test]
    fn into_cli_json_error() {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str("{");
        let cli = parsed.with_cli_context(|| "bad value");
        assert!(matches!(cli, Err(CliError::InvalidInput { .. })));
    }
}
