//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use certguard_core::domain::Sanitizer;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "certguard",
    bin_name = "certguard",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate and sanitize certificate-management form input",
    long_about = "Certguard checks form values against the built-in validator \
                  catalog and applies the string sanitizers used before \
                  storage or display.",
    after_help = "EXAMPLES:\n\
        \x20 certguard validate reject-reason --value '\"Signature is blurred\"'\n\
        \x20 certguard validate signature-file --file ./signature.png\n\
        \x20 certguard check ./upload-form.toml\n\
        \x20 certguard sanitize filename 'my report (final).pdf'",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate one value against a catalog validator.
    #[command(
        visible_alias = "v",
        about = "Validate a single value",
        after_help = "EXAMPLES:\n\
            \x20 certguard validate email --value '\"jane@example.com\"'\n\
            \x20 certguard validate signature-position --value '{\"x\":10,\"y\":20,\"width\":120,\"height\":40}'\n\
            \x20 certguard validate certificate-file --file ./cert.pdf"
    )]
    Validate(ValidateArgs),

    /// Validate every known field of a form document.
    #[command(
        about = "Check a whole form document",
        after_help = "EXAMPLES:\n\
            \x20 certguard check ./reject.json\n\
            \x20 certguard check ./upload.toml --output-format json"
    )]
    Check(CheckArgs),

    /// Apply a sanitizer to a string.
    #[command(
        visible_alias = "s",
        about = "Sanitize a string",
        after_help = "EXAMPLES:\n\
            \x20 certguard sanitize text '<b>Hello</b> world'\n\
            \x20 certguard sanitize sql \"O'Brien\""
    )]
    Sanitize(SanitizeArgs),

    /// List the validator catalog.
    #[command(visible_alias = "ls", about = "List catalog validators")]
    Catalog,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 certguard completions bash > ~/.local/share/bash-completion/completions/certguard\n\
            \x20 certguard completions zsh  > ~/.zfunc/_certguard\n\
            \x20 certguard completions fish > ~/.config/fish/completions/certguard.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the resolved configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 certguard config get limits.password_min\n\
            \x20 certguard config list\n\
            \x20 certguard config path"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `certguard validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Catalog entry, e.g. `reject-reason` (see `certguard catalog`).
    #[arg(value_name = "ENTRY", help = "Catalog validator to apply")]
    pub entry: String,

    /// The value as JSON. Input that is not valid JSON is taken as a plain
    /// string.
    #[arg(
        long = "value",
        value_name = "JSON",
        allow_hyphen_values = true,
        conflicts_with = "file",
        required_unless_present = "file",
        help = "Value to validate (JSON, or a bare string)"
    )]
    pub value: Option<String>,

    /// Validate the metadata of a file on disk instead of a literal value.
    #[arg(
        long = "file",
        value_name = "PATH",
        help = "File whose name, size and type are validated"
    )]
    pub file: Option<PathBuf>,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `certguard check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// A `.json` or `.toml` document mapping field names to values.
    #[arg(value_name = "FORM_FILE", help = "Form document to check")]
    pub form: PathBuf,
}

// ── sanitize ──────────────────────────────────────────────────────────────────

/// Arguments for `certguard sanitize`.
#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// Which sanitizer to run.
    #[arg(value_enum, value_name = "KIND", help = "Sanitizer to apply")]
    pub kind: SanitizeKind,

    /// Raw input string.
    #[arg(value_name = "INPUT", allow_hyphen_values = true, help = "String to sanitize")]
    pub input: String,
}

/// Sanitizers selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum SanitizeKind {
    /// Strip all markup.
    #[value(alias = "plain")]
    Text,
    /// Keep inline formatting tags only.
    Html,
    /// Safe file name.
    #[value(alias = "file")]
    Filename,
    /// Quote-doubling for SQL string literals.
    Sql,
    /// Trim and lower-case.
    Email,
}

impl From<SanitizeKind> for Sanitizer {
    fn from(kind: SanitizeKind) -> Self {
        match kind {
            SanitizeKind::Text => Self::Text,
            SanitizeKind::Html => Self::Html,
            SanitizeKind::Filename => Self::Filename,
            SanitizeKind::Sql => Self::Sql,
            SanitizeKind::Email => Self::Email,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `certguard completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `certguard config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `limits.password_min`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
