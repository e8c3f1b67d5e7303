//! Command handlers, one module per subcommand.

use certguard_adapters::{FileFormSource, LocalFileInspector};
use certguard_core::{application::CheckService, domain::ValidatorCatalog};

use crate::config::AppConfig;

pub mod catalog;
pub mod check;
pub mod completions;
pub mod config;
pub mod sanitize;
pub mod validate;

/// Wire the check service to the local adapters, with limits from config.
fn check_service(config: &AppConfig) -> CheckService {
    CheckService::new(
        ValidatorCatalog::build(config.limits.clone()),
        Box::new(FileFormSource::new()),
        Box::new(LocalFileInspector::new()),
    )
}
