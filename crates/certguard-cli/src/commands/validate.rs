//! `certguard validate` - run one catalog validator against one value.

use serde_json::json;
use tracing::info;

use certguard_core::domain::{CatalogEntry, FieldValue};

use crate::{
    cli::ValidateArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let entry: CatalogEntry = args.entry.parse()?;
    let service = super::check_service(&config);

    let result = match (args.value.as_deref(), args.file.as_deref()) {
        (_, Some(path)) => service.validate_file(entry, path)?,
        (Some(raw), None) => service.validate_value(entry, &parse_value(raw)?),
        (None, None) => {
            return Err(CliError::InvalidInput {
                message: "either --value or --file is required".into(),
                source: None,
            });
        }
    };
    info!(%entry, valid = result.is_valid(), "validated value");

    if output.is_json() {
        output.json(&json!({ "entry": entry, "result": &result }))?;
    } else {
        output.validation(entry.as_str(), &result)?;
    }

    if result.is_valid() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            subject: entry.to_string(),
            errors: result.errors().len(),
        })
    }
}

/// JSON when it parses, a bare string otherwise. Input that opens like an
/// object or array must be valid JSON.
fn parse_value(raw: &str) -> CliResult<FieldValue> {
    if raw.trim_start().starts_with(['{', '[']) {
        let value: serde_json::Value =
            serde_json::from_str(raw).with_cli_context(|| format!("--value is not valid JSON: {raw}"))?;
        return Ok(value.into());
    }
    Ok(serde_json::from_str::<serde_json::Value>(raw)
        .map(FieldValue::from)
        .unwrap_or_else(|_| FieldValue::from(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_scalars_are_typed() {
        assert_eq!(parse_value("42").unwrap(), FieldValue::Number(42.0));
        assert_eq!(parse_value("null").unwrap(), FieldValue::Absent);
        assert_eq!(parse_value("\"hi\"").unwrap(), FieldValue::from("hi"));
    }

    #[test]
    fn bare_text_is_a_string() {
        assert_eq!(
            parse_value("Signature is blurred").unwrap(),
            FieldValue::from("Signature is blurred")
        );
        assert_eq!(parse_value("").unwrap(), FieldValue::from(""));
    }

    #[test]
    fn objects_become_records() {
        let value = parse_value(r#"{"x": 1, "y": 2}"#).unwrap();
        assert_eq!(value, FieldValue::record([("x", 1), ("y", 2)]));
    }

    #[test]
    fn broken_object_is_rejected() {
        assert!(matches!(
            parse_value("{\"x\": "),
            Err(CliError::InvalidInput { .. })
        ));
    }
}
