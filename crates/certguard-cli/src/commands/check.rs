//! `certguard check` - validate every known field of a form document.

use tracing::info;

use crate::{
    cli::CheckArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = super::check_service(&config);
    let report = service.check_form(&args.form)?;
    info!(
        form = %args.form.display(),
        valid = report.is_valid(),
        "checked form"
    );

    if output.is_json() {
        output.json(&report)?;
    } else {
        output.header(&format!("Form: {}", args.form.display()))?;
        for (field, result) in &report.results {
            output.validation(field, result)?;
        }
        if !report.unvalidated.is_empty() {
            output.print(&format!("Not validated: {}", report.unvalidated.join(", ")))?;
        }
    }

    if report.is_valid() {
        return Ok(());
    }
    Err(CliError::ValidationFailed {
        subject: args.form.display().to_string(),
        errors: report.results.values().map(|r| r.errors().len()).sum(),
    })
}
