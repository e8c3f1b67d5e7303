//! `certguard sanitize` - apply one sanitizer to a string.

use serde_json::json;
use tracing::debug;

use certguard_core::domain::Sanitizer;

use crate::{cli::SanitizeArgs, error::CliResult, output::OutputManager};

pub fn execute(args: SanitizeArgs, output: OutputManager) -> CliResult<()> {
    let sanitizer = Sanitizer::from(args.kind);
    let sanitized = sanitizer.apply(&args.input);
    debug!(%sanitizer, changed = sanitized != args.input, "sanitized input");

    if output.is_json() {
        output.json(&json!({
            "sanitizer": sanitizer.as_str(),
            "input": args.input,
            "output": sanitized,
        }))
    } else {
        output.emit(&sanitized)?;
        Ok(())
    }
}
