//! Output management and formatting.
//!
//! Results go to stdout, diagnostics to stderr (via tracing and
//! `handle_error`). In JSON mode every command prints exactly one JSON
//! document on stdout.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use certguard_core::domain::ValidationResult;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliResult, IntoCli};

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// The `--output-format` flag wins over `output.format` in the config;
    /// `auto` from either source resolves to human on a TTY, plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
            }
            explicit => explicit,
        };

        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// A command's primary result (sanitized text, a config value). Never
    /// suppressed.
    pub fn emit(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// Pretty-printed JSON document on stdout. Never suppressed.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(io::Error::other)
            .with_cli_context(|| "failed to encode JSON output")?;
        self.term
            .write_line(&rendered)
            .with_cli_context(|| "failed to write output")
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`. *Not* suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// One validation result: a status line for `subject`, then each error
    /// and warning indented below it.
    pub fn validation(&self, subject: &str, result: &ValidationResult) -> io::Result<()> {
        if result.is_valid() {
            self.success(&format!("{subject}: valid"))?;
        } else {
            self.error(&format!("{subject}: invalid"))?;
        }
        for message in result.errors() {
            self.error(&format!("  {message}"))?;
        }
        for message in result.warnings() {
            self.warning(&format!("  {message}"))?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(format: OutputFormat, config: &AppConfig) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, config)
    }

    #[test]
    fn flag_wins_over_config() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = make_manager(OutputFormat::Plain, &config);
        assert_eq!(out.resolved_format, OutputFormat::Plain);
    }

    #[test]
    fn config_format_used_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = make_manager(OutputFormat::Auto, &config);
        assert!(out.is_json());
    }

    #[test]
    fn only_human_output_is_colored() {
        let config = AppConfig::default();
        assert!(!make_manager(OutputFormat::Human, &config).no_color);
        assert!(make_manager(OutputFormat::Plain, &config).no_color);
        assert!(make_manager(OutputFormat::Json, &config).no_color);
    }

    #[test]
    fn config_no_color_disables_color() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(make_manager(OutputFormat::Human, &config).no_color);
    }

    #[test]
    fn validation_writes_without_error() {
        let out = make_manager(OutputFormat::Plain, &AppConfig::default());
        let result = ValidationResult::new(vec!["bad".into()], vec!["meh".into()]);
        assert!(out.validation("email", &result).is_ok());
    }
}
