//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only ever sees [`CatalogLimits`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables, `CERTGUARD__<SECTION>__<KEY>`
//!    (e.g. `CERTGUARD__LIMITS__PASSWORD_MIN=12`)
//! 2. Config file: `--config FILE`, else [`AppConfig::config_path`] if present
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use certguard_core::domain::CatalogLimits;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CERTGUARD";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Thresholds the validator catalog is built from.
    #[serde(default)]
    pub limits: CatalogLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to encode default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.certguard.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "certguard", "certguard")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".certguard.toml"))
    }

    /// The file `load` reads for the given `--config` flag.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file
            .map(PathBuf::clone)
            .unwrap_or_else(Self::config_path)
    }

    /// Look up a dotted key such as `limits.password_min`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let tree = serde_json::to_value(self).ok()?;
        key.split('.')
            .try_fold(&tree, |node, part| node.get(part))
            .cloned()
    }
}

/// `true` when `path` names an existing config file.
pub fn exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_carry_catalog_limits() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.limits, CatalogLimits::default());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("certguard.toml");
        fs::write(
            &path,
            "[limits]\npassword_min = 12\n\n[output]\nno_color = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.limits.password_min, 12);
        assert_eq!(cfg.limits.reject_reason_min, 10);
        assert!(cfg.output.no_color);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("limits.reject_reason_max"),
            Some(serde_json::json!(500))
        );
        assert_eq!(cfg.get("output.no_color"), Some(serde_json::json!(false)));
        assert_eq!(cfg.get("limits.nope"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
