//! YAML parser for pagination settings
//!
//! Parses and validates settings files.

use crate::config::{PaginationConfig, PaginationOverrides};
use crate::error::{Error, Result};
use crate::loader::types::Settings;
use std::fs;
use std::path::Path;

/// Load settings from a YAML file
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    tracing::debug!(path = %path.display(), "Loaded settings file");
    load_settings_from_str(&content)
}

/// Load settings from a YAML string
pub fn load_settings_from_str(yaml: &str) -> Result<Settings> {
    // An empty document means "all defaults"
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse settings YAML: {e}")))?;

    validate_settings(&settings)?;
    Ok(settings)
}

/// Validate settings
fn validate_settings(settings: &Settings) -> Result<()> {
    validate_config(&settings.pagination)?;

    for (name, resource) in &settings.resources {
        if name.is_empty() {
            return Err(Error::config("Resource name cannot be empty"));
        }
        validate_layer(&format!("resources.{name}.pagination"), &resource.pagination)?;

        for (operation, layer) in &resource.operations {
            if operation.is_empty() {
                return Err(Error::config(format!(
                    "Resource '{name}' has an operation with an empty name"
                )));
            }
            validate_layer(&format!("resources.{name}.operations.{operation}"), layer)?;
        }
    }

    Ok(())
}

/// Validate the process-wide defaults
fn validate_config(config: &PaginationConfig) -> Result<()> {
    let names = [
        ("page_parameter_name", &config.page_parameter_name),
        (
            "items_per_page_parameter_name",
            &config.items_per_page_parameter_name,
        ),
        ("enabled_parameter_name", &config.enabled_parameter_name),
        ("partial_parameter_name", &config.partial_parameter_name),
    ];
    for (field, value) in names {
        if value.trim().is_empty() {
            return Err(Error::invalid_config(field, "parameter name cannot be empty"));
        }
    }

    check_non_negative("pagination.items_per_page", config.items_per_page)?;
    check_non_negative(
        "pagination.maximum_items_per_page",
        config.maximum_items_per_page,
    )?;

    if let (Some(items), Some(maximum)) = (config.items_per_page, config.maximum_items_per_page) {
        if items > maximum {
            return Err(Error::invalid_config(
                "pagination.items_per_page",
                format!("{items} exceeds maximum_items_per_page ({maximum})"),
            ));
        }
    }

    Ok(())
}

/// Validate one override layer
fn validate_layer(path: &str, layer: &PaginationOverrides) -> Result<()> {
    check_non_negative(&format!("{path}.items_per_page"), layer.items_per_page)?;
    check_non_negative(
        &format!("{path}.maximum_items_per_page"),
        layer.maximum_items_per_page,
    )
}

fn check_non_negative(field: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if v < 0 => Err(Error::invalid_config(field, format!("{v} is negative"))),
        _ => Ok(()),
    }
}
