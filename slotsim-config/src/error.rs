//! Error types for configuration loading and validation

use std::fmt::Write;
use std::path::PathBuf;

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// One or more fields, or a cross-field rule, failed validation.
    #[error("Invalid configuration:\n{}", format_validation_errors(.0))]
    Validation(#[source] ValidationErrors),

    /// The YAML or an environment override could not be deserialized.
    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

/// Lists every failure as `section.field: message`, sorted by path.
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    collect(errors, "", &mut lines);
    lines.sort();

    let mut output = String::new();
    for (path, message) in lines {
        let _ = writeln!(output, "  {path}: {message}");
    }
    output
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = match (prefix.is_empty(), field.as_ref()) {
            // Schema-level rules report under `__all__`.
            (true, "__all__") => "config".to_string(),
            (false, "__all__") => prefix.to_string(),
            (true, name) => name.to_string(),
            (false, name) => format!("{prefix}.{name}"),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push((path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlotsimConfig;
    use validator::Validate;

    #[test]
    fn nested_failures_are_listed_by_path() {
        let mut config = SlotsimConfig::default();
        config.model.capacity = 0;
        config.model.wc = 0.0;

        let message = ConfigError::from(config.validate().unwrap_err()).to_string();
        let capacity = message.find("model.capacity:").unwrap();
        let wc = message.find("model.wc:").unwrap();
        assert!(capacity < wc);
        assert!(message.starts_with("Invalid configuration:\n"));
    }

    #[test]
    fn schema_failures_are_reported_at_the_root() {
        let mut config = SlotsimConfig::default();
        config.model.yc = 0.0;

        let message = ConfigError::from(config.validate().unwrap_err()).to_string();
        assert!(message.contains("  config: "));
    }
}
