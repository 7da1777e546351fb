//! Tests for YAML loader module

use super::*;
use crate::error::Error;
use crate::types::SqlDialect;
use std::io::Write;

// ============================================================================
// Basic Loading Tests
// ============================================================================

#[test]
fn test_load_full_settings() {
    let yaml = r"
pagination:
  items_per_page: 20
  maximum_items_per_page: 100
  client_items_per_page: true
  page_parameter_name: p
  dialect: postgres
resources:
  books:
    pagination:
      items_per_page: 10
    operations:
      list:
        partial: true
        client_partial: true
";

    let settings = load_settings_from_str(yaml).unwrap();
    assert_eq!(settings.pagination.items_per_page, Some(20));
    assert_eq!(settings.pagination.maximum_items_per_page, Some(100));
    assert!(settings.pagination.client_items_per_page);
    assert_eq!(settings.pagination.page_parameter_name, "p");
    assert_eq!(settings.pagination.partial_parameter_name, "partial");
    assert_eq!(settings.pagination.dialect, SqlDialect::Postgres);

    let books = &settings.resources["books"];
    assert_eq!(books.pagination.items_per_page, Some(10));
    assert_eq!(books.operations["list"].partial, Some(true));
}

#[test]
fn test_load_empty_settings_uses_defaults() {
    let settings = load_settings_from_str("").unwrap();
    assert!(settings.pagination.enabled);
    assert_eq!(settings.pagination.items_per_page, Some(30));
    assert!(settings.resources.is_empty());
}

#[test]
fn test_load_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "pagination:\n  partial: true").unwrap();

    let settings = load_settings(file.path()).unwrap();
    assert!(settings.pagination.partial);
}

#[test]
fn test_load_missing_file() {
    let err = load_settings("/nonexistent/pagination.yaml").unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

// ============================================================================
// Overrides Lookup Tests
// ============================================================================

#[test]
fn test_overrides_for_operation() {
    let yaml = r"
resources:
  books:
    pagination:
      items_per_page: 10
    operations:
      list:
        items_per_page: 5
";
    let settings = load_settings_from_str(yaml).unwrap();

    let overrides = settings.overrides_for("books", "list");
    assert_eq!(overrides.resource.items_per_page, Some(10));
    assert_eq!(overrides.operation.items_per_page, Some(5));

    let overrides = settings.overrides_for("books", "search");
    assert_eq!(overrides.resource.items_per_page, Some(10));
    assert!(overrides.operation.is_empty());
}

#[test]
fn test_overrides_for_unknown_resource() {
    let settings = load_settings_from_str("resources: {}").unwrap();
    let overrides = settings.overrides_for("authors", "list");
    assert!(overrides.resource.is_empty());
    assert!(overrides.operation.is_empty());
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_reject_negative_items_per_page() {
    let yaml = r"
resources:
  books:
    operations:
      list:
        items_per_page: -5
";
    let err = load_settings_from_str(yaml).unwrap_err();
    assert!(err
        .to_string()
        .contains("resources.books.operations.list.items_per_page"));
}

#[test]
fn test_reject_default_above_maximum() {
    let yaml = r"
pagination:
  items_per_page: 200
  maximum_items_per_page: 100
";
    let err = load_settings_from_str(yaml).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_reject_empty_parameter_name() {
    let yaml = r#"
pagination:
  partial_parameter_name: ""
"#;
    let err = load_settings_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("partial_parameter_name"));
}

#[test]
fn test_reject_invalid_yaml() {
    let err = load_settings_from_str("pagination: [not, a, map]").unwrap_err();
    assert!(err.to_string().contains("Failed to parse settings YAML"));
}

#[test]
fn test_reject_unknown_dialect() {
    let err = load_settings_from_str("pagination:\n  dialect: oracle\n").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}
