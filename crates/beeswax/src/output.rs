//! Output formatting: JSON, compact JSON, YAML.
//!
//! Every command renders a `serde_json::Value` (an API payload or a small
//! status object) in the format selected by `--output` or the config file.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Parse the config file's `output` setting.
pub fn format_from_config(value: &str) -> Result<OutputFormat, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "json-compact" | "json_compact" => Ok(OutputFormat::JsonCompact),
        "yaml" | "yml" => Ok(OutputFormat::Yaml),
        other => Err(CliError::Validation {
            field: "output".into(),
            reason: format!("expected json, json-compact or yaml, got '{other}'"),
        }),
    }
}

/// Render `data` in the chosen format.
pub fn render<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => serde_yaml::to_string(data)
            .map(|s| s.trim_end().to_owned())
            .map_err(|e| CliError::Validation {
                field: "output".into(),
                reason: format!("YAML serialization failed: {e}"),
            }),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn compact_json_is_single_line() {
        let out = render(OutputFormat::JsonCompact, &json!({ "id": 1, "ok": true })).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn yaml_has_no_trailing_newline() {
        let out = render(OutputFormat::Yaml, &json!({ "account_id": 4 })).unwrap();
        assert_eq!(out, "account_id: 4");
    }

    #[test]
    fn config_format_names() {
        assert_eq!(format_from_config("YAML").unwrap(), OutputFormat::Yaml);
        assert!(format_from_config("table").is_err());
    }
}
