//! `certguard catalog` - list the validator catalog.

use serde::Serialize;

use certguard_core::domain::ValidatorCatalog;

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

/// One catalog line.
#[derive(Debug, Serialize)]
struct EntryRow {
    name: &'static str,
    description: &'static str,
    error_rules: usize,
    warning_rules: usize,
}

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = ValidatorCatalog::build(config.limits);
    let rows: Vec<EntryRow> = catalog
        .entries()
        .map(|(entry, validator)| EntryRow {
            name: entry.as_str(),
            description: entry.describe(),
            error_rules: validator.error_rule_count(),
            warning_rules: validator.warning_rule_count(),
        })
        .collect();

    if output.is_json() {
        return output.json(&rows);
    }

    output.header("Validators:")?;
    for row in &rows {
        output.print(&format!(
            "  {:<20} {} rule(s), {} warning(s)  {}",
            row.name, row.error_rules, row.warning_rules, row.description
        ))?;
    }
    Ok(())
}
