//! Common types used throughout sql-pagination
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{
    Dialect, DuckDbDialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type, also the shape of a single result row
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// SQL Dialect
// ============================================================================

/// SQL dialect used when parsing base queries
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SqlDialect {
    /// ANSI-ish dialect accepting most common syntax
    #[default]
    Generic,
    Postgres,
    Mysql,
    Sqlite,
    Duckdb,
}

impl SqlDialect {
    /// Parser dialect for this SQL flavour
    pub fn parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::Postgres => Box::new(PostgreSqlDialect {}),
            SqlDialect::Mysql => Box::new(MySqlDialect {}),
            SqlDialect::Sqlite => Box::new(SQLiteDialect {}),
            SqlDialect::Duckdb => Box::new(DuckDbDialect {}),
        }
    }
}

// ============================================================================
// Total Items
// ============================================================================

/// Total number of items behind a paginated collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalItems {
    /// Counted with a COUNT query
    Known(u64),
    /// Deliberately not computed (partial pagination)
    Unknown,
}

impl TotalItems {
    /// Get the count if it is known
    pub fn known(self) -> Option<u64> {
        match self {
            Self::Known(count) => Some(count),
            Self::Unknown => None,
        }
    }

    /// Check if the count was not computed
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}
